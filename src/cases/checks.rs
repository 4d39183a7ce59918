use std::collections::HashSet;

use serde_json::Value;

use super::{CaseContext, CheckFailure, ensure};
use crate::probe::{ProbeOutcome, ResponseBody, probe};

const EXPECTED_FIELDS: [&str; 4] = ["id", "type", "setup", "punchline"];

const SENSITIVE_KEYWORDS: [&str; 8] = [
    "password", "credit", "card", "ssn", "security", "auth", "key", "token",
];

async fn successful_probe(ctx: &CaseContext) -> Result<ProbeOutcome, CheckFailure> {
    let outcome = probe(&ctx.client, &ctx.url).await;
    if outcome.success {
        Ok(outcome)
    } else {
        Err(CheckFailure::new(
            outcome.error.unwrap_or_else(|| "probe failed".to_owned()),
        ))
    }
}

fn body_of(outcome: &ProbeOutcome) -> Result<&ResponseBody, CheckFailure> {
    outcome
        .body
        .as_ref()
        .ok_or_else(|| CheckFailure::new("response body missing"))
}

pub(super) async fn expected_fields(ctx: &CaseContext) -> Result<(), CheckFailure> {
    let outcome = successful_probe(ctx).await?;
    let body = body_of(&outcome)?;
    let missing: Vec<&str> = EXPECTED_FIELDS
        .iter()
        .copied()
        .filter(|field| body.field(field).is_none())
        .collect();
    ensure(missing.is_empty(), || {
        format!("missing fields: {}", missing.join(", "))
    })
}

/// Exact match, deliberately not a prefix match: a trailing
/// `; charset=utf-8` is a violation.
pub(super) async fn content_type_exact(ctx: &CaseContext) -> Result<(), CheckFailure> {
    let outcome = successful_probe(ctx).await?;
    let content_type = outcome.content_type.unwrap_or_default();
    ensure(content_type == "application/json", || {
        format!("unexpected content type '{}'", content_type)
    })
}

pub(super) async fn id_numeric_and_unique(ctx: &CaseContext) -> Result<(), CheckFailure> {
    let mut seen = HashSet::new();
    for _ in 0..10 {
        let outcome = successful_probe(ctx).await?;
        let body = body_of(&outcome)?;
        let id = body
            .id()
            .and_then(Value::as_i64)
            .ok_or_else(|| CheckFailure::new("id is not an integer"))?;
        ensure(seen.insert(id), || format!("duplicate id: {}", id))?;
    }
    Ok(())
}

pub(super) async fn type_is_string(ctx: &CaseContext) -> Result<(), CheckFailure> {
    let outcome = successful_probe(ctx).await?;
    let body = body_of(&outcome)?;
    let kind = body
        .kind()
        .ok_or_else(|| CheckFailure::new("type field missing"))?;
    ensure(kind.is_string(), || "type is not a string".to_owned())
}

pub(super) async fn setup_punchline_length(ctx: &CaseContext) -> Result<(), CheckFailure> {
    let outcome = successful_probe(ctx).await?;
    let body = body_of(&outcome)?;
    for (name, value) in [("setup", body.setup()), ("punchline", body.punchline())] {
        let text = value
            .and_then(Value::as_str)
            .ok_or_else(|| CheckFailure::new(format!("{} is not a string", name)))?;
        ensure(text.chars().count() <= 255, || {
            format!("{} exceeds 255 characters", name)
        })?;
    }
    Ok(())
}

pub(super) async fn concurrent_consistency(ctx: &CaseContext) -> Result<(), CheckFailure> {
    let client = ctx.client.clone();
    let url = ctx.url.clone();
    let outcomes = ctx
        .dispatcher
        .dispatch(10, move |_| {
            let client = client.clone();
            let url = url.clone();
            async move { probe(&client, &url).await }
        })
        .await;
    let successes = outcomes
        .iter()
        .filter(|outcome| outcome.status_code == Some(200))
        .count();
    ensure(successes == 10, || {
        format!("obtained {} of 10 successful responses", successes)
    })
}

pub(super) async fn response_time(ctx: &CaseContext) -> Result<(), CheckFailure> {
    let outcome = successful_probe(ctx).await?;
    let elapsed_ms = outcome
        .elapsed_ms()
        .ok_or_else(|| CheckFailure::new("elapsed time missing"))?;
    ensure(elapsed_ms <= 2000.0, || {
        format!("response took {:.0} ms", elapsed_ms)
    })
}

/// Larger sample than the numeric/unique case; the two id pools are
/// intentionally separate sessions.
pub(super) async fn sequential_unique_ids(ctx: &CaseContext) -> Result<(), CheckFailure> {
    let mut seen = HashSet::new();
    for _ in 0..100 {
        let outcome = successful_probe(ctx).await?;
        let body = body_of(&outcome)?;
        let id = body
            .id()
            .ok_or_else(|| CheckFailure::new("id field missing"))?
            .to_string();
        ensure(seen.insert(id.clone()), || format!("duplicate id: {}", id))?;
    }
    Ok(())
}

pub(super) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|v| v != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

async fn field_not_empty(ctx: &CaseContext, name: &str) -> Result<(), CheckFailure> {
    let outcome = successful_probe(ctx).await?;
    let body = body_of(&outcome)?;
    let value = body
        .field(name)
        .ok_or_else(|| CheckFailure::new(format!("{} field missing", name)))?;
    ensure(is_truthy(value), || format!("{} field is empty", name))
}

pub(super) async fn id_not_empty(ctx: &CaseContext) -> Result<(), CheckFailure> {
    field_not_empty(ctx, "id").await
}

pub(super) async fn type_not_empty(ctx: &CaseContext) -> Result<(), CheckFailure> {
    field_not_empty(ctx, "type").await
}

pub(super) async fn setup_not_empty(ctx: &CaseContext) -> Result<(), CheckFailure> {
    field_not_empty(ctx, "setup").await
}

/// Each matching key is listed once even when it matches several words.
pub(super) async fn sensitive_data(ctx: &CaseContext) -> Result<(), CheckFailure> {
    let outcome = successful_probe(ctx).await?;
    let body = body_of(&outcome)?;
    let exposed: Vec<&str> = body
        .keys()
        .into_iter()
        .filter(|key| {
            let lowered = key.to_lowercase();
            SENSITIVE_KEYWORDS.iter().any(|word| lowered.contains(word))
        })
        .collect();
    ensure(exposed.is_empty(), || {
        format!("sensitive keys exposed: {}", exposed.join(", "))
    })
}
