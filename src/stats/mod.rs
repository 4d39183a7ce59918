//! Pure aggregation over collected case results and probe outcomes.
//!
//! Every function here is deterministic and side-effect free; repeated
//! calls over the same collection yield identical results. Empty input
//! resolves to zero, never an error.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::cases::{CaseStatus, TestResult};
use crate::probe::{ProbeOutcome, ResponseBody};

/// Derived statistics; recomputed, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub success_rate: f64,
    pub average_latency_ms: f64,
    pub type_distribution: BTreeMap<String, u64>,
    pub average_payload_size: f64,
    pub average_setup_length: f64,
    pub average_punchline_length: f64,
}

fn mean<I>(values: I) -> f64
where
    I: Iterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0_u64;
    for value in values {
        sum += value;
        count = count.saturating_add(1);
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Percentage of PASS results, `0` for an empty collection.
#[must_use]
pub fn success_rate(results: &[TestResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results
        .iter()
        .filter(|result| result.status == CaseStatus::Pass)
        .count();
    100.0 * passed as f64 / results.len() as f64
}

/// Mean elapsed time in ms over successful outcomes, `0` when none are.
#[must_use]
pub fn average_latency_ms(outcomes: &[ProbeOutcome]) -> f64 {
    mean(
        outcomes
            .iter()
            .filter(|outcome| outcome.success)
            .filter_map(ProbeOutcome::elapsed_ms),
    )
}

/// Tally of the `type` field across outcomes where it is present.
#[must_use]
pub fn category_distribution(outcomes: &[ProbeOutcome]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for kind in outcomes
        .iter()
        .filter_map(|outcome| outcome.body.as_ref())
        .filter_map(|body| body.kind().and_then(Value::as_str))
    {
        let entry = counts.entry(kind.to_owned()).or_insert(0_u64);
        *entry = entry.saturating_add(1);
    }
    counts
}

/// Mean serialized body length over outcomes that carry a body.
#[must_use]
pub fn average_payload_size(outcomes: &[ProbeOutcome]) -> f64 {
    mean(
        outcomes
            .iter()
            .filter_map(|outcome| outcome.body.as_ref())
            .map(|body| body.serialized_len() as f64),
    )
}

fn average_string_length<F>(outcomes: &[ProbeOutcome], field: F) -> f64
where
    F: Fn(&ResponseBody) -> Option<&Value>,
{
    mean(
        outcomes
            .iter()
            .filter_map(|outcome| outcome.body.as_ref())
            .filter_map(|body| field(body).and_then(Value::as_str))
            .map(|text| text.chars().count() as f64),
    )
}

#[must_use]
pub fn build_summary(results: &[TestResult], outcomes: &[ProbeOutcome]) -> Summary {
    Summary {
        success_rate: success_rate(results),
        average_latency_ms: average_latency_ms(outcomes),
        type_distribution: category_distribution(outcomes),
        average_payload_size: average_payload_size(outcomes),
        average_setup_length: average_string_length(outcomes, ResponseBody::setup),
        average_punchline_length: average_string_length(outcomes, ResponseBody::punchline),
    }
}
