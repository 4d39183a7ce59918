/// Endpoint probed when no target is configured.
pub(crate) const DEFAULT_TARGET_URL: &str = "https://official-joke-api.appspot.com/jokes/random";

pub(crate) const DEFAULT_POOL_WIDTH: usize = 10;

/// Probe count for the summary sample batch.
pub(crate) const DEFAULT_SAMPLES: usize = 50;
