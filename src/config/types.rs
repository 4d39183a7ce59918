use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::args::{
    DEFAULT_POOL_WIDTH, DEFAULT_SAMPLES, DEFAULT_TARGET_URL, HarnessArgs, PositiveUsize,
};
use crate::error::{AppError, AppResult, HttpError};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// On-disk configuration; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub pool_width: Option<PositiveUsize>,
    pub samples: Option<PositiveUsize>,
    pub request_timeout_ms: Option<u64>,
    pub report_json: Option<PathBuf>,
    pub quiet: Option<bool>,
}

/// Fully resolved run settings: CLI flags win over the config file,
/// which wins over built-in defaults.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub pool_width: PositiveUsize,
    pub samples: PositiveUsize,
    pub request_timeout: Duration,
    pub report_json: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
}

impl RunConfig {
    /// Merges CLI arguments with an optional config file.
    ///
    /// # Errors
    ///
    /// Returns an error when the resolved target URL is not valid.
    pub fn resolve(args: &HarnessArgs, file: Option<ConfigFile>) -> AppResult<Self> {
        let file = file.unwrap_or_default();

        let url = args
            .url
            .clone()
            .or(file.url)
            .unwrap_or_else(|| DEFAULT_TARGET_URL.to_owned());
        url::Url::parse(&url).map_err(|err| {
            AppError::http(HttpError::InvalidUrl {
                url: url.clone(),
                source: err,
            })
        })?;

        let pool_width = args
            .pool_width
            .or(file.pool_width)
            .map_or_else(|| PositiveUsize::try_from(DEFAULT_POOL_WIDTH), Ok)?;
        let samples = args
            .samples
            .or(file.samples)
            .map_or_else(|| PositiveUsize::try_from(DEFAULT_SAMPLES), Ok)?;
        let request_timeout = args
            .request_timeout
            .or_else(|| file.request_timeout_ms.map(Duration::from_millis))
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            url,
            pool_width,
            samples,
            request_timeout,
            report_json: args.report_json.clone().or(file.report_json),
            quiet: args.quiet || file.quiet.unwrap_or(false),
            verbose: args.verbose,
        })
    }
}
