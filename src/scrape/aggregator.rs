//! Thread-safe accumulator for scraped records
//!
//! Workers complete in arbitrary order and all merge into one collection;
//! the mutex here is the only synchronization the result set needs. Record
//! order carries no meaning, so appends just go at the end.

use crate::GameRecord;
use std::sync::Mutex;

/// Shared accumulator the worker pool appends completed batches into
#[derive(Debug, Default)]
pub struct ResultAggregator {
    records: Mutex<Vec<GameRecord>>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed page's records
    pub fn append(&self, mut batch: Vec<GameRecord>) {
        let mut records = self.records.lock().unwrap();
        records.append(&mut batch);
    }

    /// Number of records collected so far
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clones the current contents
    pub fn snapshot(&self) -> Vec<GameRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Consumes the aggregator, yielding the collected records
    pub fn into_records(self) -> Vec<GameRecord> {
        self.records.into_inner().unwrap()
    }
}
