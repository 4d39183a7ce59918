//! Single-shot HTTP probing.
//!
//! A probe performs exactly one GET with no retry and converts every
//! failure mode (transport error, non-200 status, malformed JSON) into
//! a [`ProbeOutcome`] value; nothing propagates past this boundary.
mod body;


pub use body::ResponseBody;

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio::time::Instant;
use tracing::debug;

/// Normalized result of one HTTP GET.
///
/// A failed outcome always carries a non-empty `error` or a status code
/// other than 200; a successful outcome always has status 200 and a
/// parsed body.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub success: bool,
    pub status_code: Option<u16>,
    pub elapsed: Option<Duration>,
    pub content_type: Option<String>,
    pub body: Option<ResponseBody>,
    pub error: Option<String>,
}

impl ProbeOutcome {
    const fn succeeded(
        elapsed: Duration,
        content_type: Option<String>,
        body: ResponseBody,
    ) -> Self {
        Self {
            success: true,
            status_code: Some(200),
            elapsed: Some(elapsed),
            content_type,
            body: Some(body),
            error: None,
        }
    }

    const fn failed(
        error: String,
        status_code: Option<u16>,
        elapsed: Option<Duration>,
        content_type: Option<String>,
    ) -> Self {
        Self {
            success: false,
            status_code,
            elapsed,
            content_type,
            body: None,
            error: Some(error),
        }
    }

    /// Elapsed wall-clock time in milliseconds, absent on total failure.
    #[must_use]
    pub fn elapsed_ms(&self) -> Option<f64> {
        self.elapsed.map(|elapsed| elapsed.as_secs_f64() * 1000.0)
    }
}

/// Performs one GET against `url` and normalizes the result.
///
/// Elapsed time spans request dispatch to full body receipt.
pub async fn probe(client: &Client, url: &str) -> ProbeOutcome {
    let start = Instant::now();

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(err) => {
            debug!("probe transport failure: {}", err);
            return ProbeOutcome::failed(format!("request failed: {}", err), None, None, None);
        }
    };

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let text = match response.text().await {
        Ok(text) => text,
        Err(err) => {
            return ProbeOutcome::failed(
                format!("failed to read body: {}", err),
                Some(status),
                Some(start.elapsed()),
                content_type,
            );
        }
    };
    let elapsed = start.elapsed();

    if status != 200 {
        return ProbeOutcome::failed(
            format!("unexpected status {}", status),
            Some(status),
            Some(elapsed),
            content_type,
        );
    }

    let value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            return ProbeOutcome::failed(
                format!("malformed JSON body: {}", err),
                Some(status),
                Some(elapsed),
                content_type,
            );
        }
    };

    ProbeOutcome::succeeded(elapsed, content_type, ResponseBody::new(value))
}
