use std::path::PathBuf;

use super::writers::{ConsoleSink, JsonReportSink};
use super::ResultSink;
use crate::config::RunConfig;

#[derive(Debug, Clone, Default)]
pub struct SinksConfig {
    pub console: bool,
    pub json: Option<PathBuf>,
}

impl SinksConfig {
    #[must_use]
    pub fn from_run_config(config: &RunConfig) -> Self {
        Self {
            console: !config.quiet,
            json: config.report_json.clone(),
        }
    }

    #[must_use]
    pub fn build(&self) -> Vec<Box<dyn ResultSink>> {
        let mut sinks: Vec<Box<dyn ResultSink>> = Vec::new();
        if self.console {
            sinks.push(Box::new(ConsoleSink));
        }
        if let Some(path) = self.json.as_ref() {
            sinks.push(Box::new(JsonReportSink::new(path.clone())));
        }
        sinks
    }
}
