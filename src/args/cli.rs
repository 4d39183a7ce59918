use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::PositiveUsize;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP endpoint verification and load-testing harness - concurrent probing, fixed test-case suite, aggregated stats, and pluggable result sinks."
)]
pub struct HarnessArgs {
    /// Target URL probed by every test case
    #[arg(long, short)]
    pub url: Option<String>,

    /// Worker-pool width for concurrent probe batches
    #[arg(long = "pool-width", short = 'w', value_parser = parse_positive_usize)]
    pub pool_width: Option<PositiveUsize>,

    /// Probe count for the summary sample batch
    #[arg(long, value_parser = parse_positive_usize)]
    pub samples: Option<PositiveUsize>,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "request-timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Write a JSON report to this path
    #[arg(long = "report-json")]
    pub report_json: Option<PathBuf>,

    /// Configuration file (TOML or JSON)
    #[arg(long, short)]
    pub config: Option<String>,

    /// Suppress the console report
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}
