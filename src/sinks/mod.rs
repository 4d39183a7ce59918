//! Result sinks: abstract consumers of case results and summaries.
//!
//! The core produces `TestResult` rows and one `Summary`; sinks decide
//! how to surface them.
pub mod config;
mod format;
mod writers;


pub use config::SinksConfig;
pub use writers::{ConsoleSink, JsonReportSink};

use crate::cases::TestResult;
use crate::error::AppResult;
use crate::stats::Summary;

pub trait ResultSink {
    /// Consumes the full result list and derived summary.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink's destination cannot be written.
    fn write(&self, results: &[TestResult], summary: &Summary) -> AppResult<()>;
}
