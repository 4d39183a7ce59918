//! Bounded worker-pool fan-out with index-ordered results.
#[cfg(test)]
mod tests;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::warn;

use crate::args::PositiveUsize;
use crate::probe::ProbeOutcome;

/// Issues a batch of probes in parallel on the multi-thread runtime.
///
/// Concurrency is capped by the configured pool width; results come
/// back indexed by logical request index, not completion order.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    width: PositiveUsize,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(width: PositiveUsize) -> Self {
        Self { width }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width.get()
    }

    /// Runs `n` logical requests, at most `width` in flight at once.
    ///
    /// `result[i]` corresponds to `make_request(i)` regardless of which
    /// worker finished first. A batch always runs to completion; a
    /// failing request never cancels its siblings, and a worker that
    /// panics or is cancelled surfaces as a failed outcome.
    pub async fn dispatch<F, Fut>(&self, n: usize, make_request: F) -> Vec<ProbeOutcome>
    where
        F: Fn(usize) -> Fut,
        Fut: Future<Output = ProbeOutcome> + Send + 'static,
    {
        let permits = Arc::new(Semaphore::new(self.width.get()));
        let mut handles = Vec::with_capacity(n);

        for index in 0..n {
            let permits = Arc::clone(&permits);
            let request = make_request(index);
            handles.push(tokio::spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                request.await
            }));
        }

        let mut outcomes = Vec::with_capacity(n);
        for handle in handles {
            let outcome = handle.await.unwrap_or_else(|err| {
                warn!("dispatch worker failed: {}", err);
                ProbeOutcome {
                    success: false,
                    status_code: None,
                    elapsed: None,
                    content_type: None,
                    body: None,
                    error: Some(format!("worker task failed: {}", err)),
                }
            });
            outcomes.push(outcome);
        }
        outcomes
    }
}
