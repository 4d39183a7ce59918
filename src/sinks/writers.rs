use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;

use super::ResultSink;
use super::format::{format_f64, write_line};
use crate::cases::{CaseStatus, TestResult};
use crate::error::{AppError, AppResult, SinkError};
use crate::stats::Summary;

/// Plain-text report on stdout.
pub struct ConsoleSink;

impl ResultSink for ConsoleSink {
    fn write(&self, results: &[TestResult], summary: &Summary) -> AppResult<()> {
        print!("{}", render_console(results, summary)?);
        Ok(())
    }
}

pub(super) fn render_console(results: &[TestResult], summary: &Summary) -> AppResult<String> {
    let mut output = String::new();

    write_line(
        &mut output,
        &format!("Success Rate: {}%", format_f64(summary.success_rate)),
    )?;
    write_line(
        &mut output,
        &format!(
            "Avg Latency (ok): {}ms",
            format_f64(summary.average_latency_ms)
        ),
    )?;
    write_line(
        &mut output,
        &format!(
            "Avg Payload Size: {} bytes",
            format_f64(summary.average_payload_size)
        ),
    )?;
    write_line(
        &mut output,
        &format!(
            "Avg Setup/Punchline Length: {} / {} chars",
            format_f64(summary.average_setup_length),
            format_f64(summary.average_punchline_length)
        ),
    )?;
    write_line(&mut output, "Type Distribution:")?;
    for (kind, count) in &summary.type_distribution {
        write_line(&mut output, &format!("  {}: {}", kind, count))?;
    }
    write_line(&mut output, "Results:")?;
    for result in results {
        let line = match result.status {
            CaseStatus::Pass => format!("  PASS  {}", result.name),
            CaseStatus::Fail => format!("  FAIL  {} - {}", result.name, result.details),
        };
        write_line(&mut output, &line)?;
    }

    Ok(output)
}

#[derive(Serialize)]
struct ReportDocument<'run> {
    generated_at: String,
    summary: &'run Summary,
    results: &'run [TestResult],
}

/// Timestamped JSON report written to a configured path.
pub struct JsonReportSink {
    path: PathBuf,
}

impl JsonReportSink {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ResultSink for JsonReportSink {
    fn write(&self, results: &[TestResult], summary: &Summary) -> AppResult<()> {
        let document = ReportDocument {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            summary,
            results,
        };
        let serialized = serde_json::to_string_pretty(&document)
            .map_err(|err| AppError::sink(SinkError::SerializeReport { source: err }))?;
        std::fs::write(&self.path, serialized).map_err(|err| {
            AppError::sink(SinkError::WriteReport {
                path: self.path.clone(),
                source: err,
            })
        })
    }
}
