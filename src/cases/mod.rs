//! The fixed suite of endpoint verification cases.
//!
//! Each case is an independent async check over a shared [`CaseContext`].
//! Checks signal violations by returning a [`CheckFailure`] rather than
//! panicking; the runner converts every case outcome into exactly one
//! [`TestResult`] appended to a [`ResultLog`], so a failing check never
//! aborts the run.
mod checks;


use std::fmt;
use std::future::Future;
use std::pin::Pin;

use chrono::Local;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::dispatch::Dispatcher;

/// Message carried by a failed assertion or probe inside a case.
#[derive(Debug, Clone)]
pub struct CheckFailure {
    message: String,
}

impl CheckFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Returns `Err` with the lazily built message when `condition` is false.
pub(crate) fn ensure<F>(condition: bool, message: F) -> Result<(), CheckFailure>
where
    F: FnOnce() -> String,
{
    if condition {
        Ok(())
    } else {
        Err(CheckFailure::new(message()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseStatus {
    Pass,
    Fail,
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseStatus::Pass => f.write_str("PASS"),
            CaseStatus::Fail => f.write_str("FAIL"),
        }
    }
}

/// Outcome of one executed case. Never mutated after insertion.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub name: String,
    pub status: CaseStatus,
    pub details: String,
    pub timestamp: String,
}

/// Append-only accumulator owned by the sequential runner.
#[derive(Debug, Default)]
pub struct ResultLog {
    results: Vec<TestResult>,
}

impl ResultLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &str, outcome: Result<(), CheckFailure>) {
        let (status, details) = outcome.map_or_else(
            |failure| (CaseStatus::Fail, failure.message),
            |()| (CaseStatus::Pass, String::new()),
        );
        self.results.push(TestResult {
            name: name.to_owned(),
            status,
            details,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
    }

    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    #[must_use]
    pub fn into_results(self) -> Vec<TestResult> {
        self.results
    }
}

/// Shared, read-only context handed to every case.
#[derive(Debug, Clone)]
pub struct CaseContext {
    pub client: Client,
    pub url: String,
    pub dispatcher: Dispatcher,
}

type CaseFuture<'ctx> = Pin<Box<dyn Future<Output = Result<(), CheckFailure>> + Send + 'ctx>>;
type CaseFn = for<'ctx> fn(&'ctx CaseContext) -> CaseFuture<'ctx>;

pub struct TestCase {
    pub name: &'static str,
    runner: CaseFn,
}

impl TestCase {
    /// Executes this case once against the context.
    ///
    /// # Errors
    ///
    /// Returns the first failed assertion or probe as a [`CheckFailure`].
    pub async fn run(&self, ctx: &CaseContext) -> Result<(), CheckFailure> {
        (self.runner)(ctx).await
    }
}

const fn case(name: &'static str, runner: CaseFn) -> TestCase {
    TestCase { name, runner }
}

/// All registered cases, in execution order.
#[must_use]
pub fn registry() -> Vec<TestCase> {
    vec![
        case("expected fields present", |ctx| {
            Box::pin(checks::expected_fields(ctx))
        }),
        case("content type is application/json", |ctx| {
            Box::pin(checks::content_type_exact(ctx))
        }),
        case("id numeric and unique over 10 probes", |ctx| {
            Box::pin(checks::id_numeric_and_unique(ctx))
        }),
        case("type is a string", |ctx| {
            Box::pin(checks::type_is_string(ctx))
        }),
        case("setup and punchline length within 255", |ctx| {
            Box::pin(checks::setup_punchline_length(ctx))
        }),
        case("concurrent requests all succeed", |ctx| {
            Box::pin(checks::concurrent_consistency(ctx))
        }),
        case("response time within 2000 ms", |ctx| {
            Box::pin(checks::response_time(ctx))
        }),
        case("ids unique over 100 sequential probes", |ctx| {
            Box::pin(checks::sequential_unique_ids(ctx))
        }),
        case("id field not empty", |ctx| {
            Box::pin(checks::id_not_empty(ctx))
        }),
        case("type field not empty", |ctx| {
            Box::pin(checks::type_not_empty(ctx))
        }),
        case("setup field not empty", |ctx| {
            Box::pin(checks::setup_not_empty(ctx))
        }),
        case("no sensitive data exposed", |ctx| {
            Box::pin(checks::sensitive_data(ctx))
        }),
    ]
}

/// Runs every registered case sequentially, one `TestResult` each.
pub async fn run_cases(ctx: &CaseContext, log: &mut ResultLog) {
    for test_case in registry() {
        debug!("running case: {}", test_case.name);
        let outcome = test_case.run(ctx).await;
        log.record(test_case.name, outcome);
    }
}
