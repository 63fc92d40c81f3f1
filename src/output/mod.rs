//! Output module: spreadsheet persistence and run reporting

mod sheet;
mod stats;

pub use sheet::{count_rows, persist, PersistSummary};
pub use stats::{print_run_summary, RunSummary};
