//! Task scheduling over a bounded worker pool
//!
//! The scheduler turns a runtime-discovered genre set into a flat list of
//! page tasks, then runs them as tokio tasks gated by a semaphore sized to
//! the configured worker count. One page's permanent failure is logged and
//! its records omitted; sibling tasks keep running.

use crate::scrape::aggregator::ResultAggregator;
use crate::scrape::counter::count_pages;
use crate::scrape::fetcher::{fetch_page, RetryPolicy};
use crate::scrape::parser::parse_records;
use crate::site;
use crate::{GameRecord, GenreId, PageTask, SweepError};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Result of a full scheduling run
#[derive(Debug)]
pub struct ScrapeOutcome {
    /// All records collected from successfully fetched and parsed pages
    pub records: Vec<GameRecord>,

    /// Genres that yielded zero pages (no results, or count not found)
    pub genres_skipped: usize,

    /// Total page tasks submitted to the pool
    pub pages_scheduled: usize,

    /// Page tasks that failed permanently
    pub pages_failed: usize,
}

/// Schedules page tasks across all genres and runs them concurrently
pub struct TaskScheduler {
    client: Client,
    base: url::Url,
    retry: RetryPolicy,
    workers: usize,
}

impl TaskScheduler {
    pub fn new(client: Client, base: url::Url, retry: RetryPolicy, workers: usize) -> Self {
        Self {
            client,
            base,
            retry,
            workers,
        }
    }

    /// Runs the scrape for the given genres
    ///
    /// For each genre the result count is fetched first; genres with zero
    /// pages are skipped. All remaining page tasks across all genres share
    /// one pool, so a large genre cannot starve the others of workers.
    ///
    /// # Arguments
    ///
    /// * `genres` - The discovered genre set
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeOutcome)` - Records plus per-run counters
    /// * `Err(SweepError)` - Only for failures that invalidate the whole run
    pub async fn run(&self, genres: &[GenreId]) -> Result<ScrapeOutcome, SweepError> {
        let mut tasks: Vec<PageTask> = Vec::new();
        let mut genres_skipped = 0;

        for genre in genres {
            match count_pages(&self.client, &self.base, genre, &self.retry).await {
                Ok(0) => {
                    genres_skipped += 1;
                }
                Ok(pages) => {
                    for page in 1..=pages {
                        tasks.push(PageTask::new(genre.clone(), page));
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping genre {}: {}", genre, e);
                    genres_skipped += 1;
                }
            }
        }

        let pages_scheduled = tasks.len();
        tracing::info!(
            "Scheduled {} page tasks across {} genres ({} workers)",
            pages_scheduled,
            genres.len() - genres_skipped,
            self.workers
        );

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let aggregator = Arc::new(ResultAggregator::new());
        let mut join_set = JoinSet::new();

        for task in tasks {
            let url = site::results_url(&self.base, &task.genre, task.page)?;
            let client = self.client.clone();
            let retry = self.retry.clone();
            let semaphore = Arc::clone(&semaphore);
            let aggregator = Arc::clone(&aggregator);

            join_set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| SweepError::Pool(e.to_string()))?;

                let html = fetch_page(&client, &url, &retry).await?;
                let records = parse_records(&html, &task.genre)?;
                let count = records.len();
                aggregator.append(records);

                tracing::info!(
                    "Genre {} page {} done, {} rows",
                    task.genre,
                    task.page,
                    count
                );
                Ok::<usize, SweepError>(count)
            });
        }

        let mut pages_failed = 0;
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    pages_failed += 1;
                    tracing::warn!("Page task failed permanently: {}", e);
                }
                Err(e) => {
                    pages_failed += 1;
                    tracing::error!("Worker panicked: {}", e);
                }
            }
        }

        // All workers have finished; the aggregator should be uniquely held
        let records = match Arc::try_unwrap(aggregator) {
            Ok(aggregator) => aggregator.into_records(),
            Err(shared) => shared.snapshot(),
        };

        Ok(ScrapeOutcome {
            records,
            genres_skipped,
            pages_scheduled,
            pages_failed,
        })
    }
}
