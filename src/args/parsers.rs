use std::time::Duration;

use super::types::PositiveUsize;
use crate::error::{AppError, AppResult, ConfigError};

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::config)
}

/// Parses a duration with an ms/s/m/h suffix; a bare number means seconds.
pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let trimmed = s.trim();
    let split_at = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split_at);
    let value: u64 = digits.parse().map_err(|err| {
        AppError::config(ConfigError::InvalidNumber { source: err })
    })?;
    match unit.trim() {
        "ms" => Ok(Duration::from_millis(value)),
        "" | "s" => Ok(Duration::from_secs(value)),
        "m" => Ok(Duration::from_secs(value.saturating_mul(60))),
        "h" => Ok(Duration::from_secs(value.saturating_mul(3600))),
        _ => Err(AppError::config(ConfigError::InvalidDuration {
            value: s.to_owned(),
        })),
    }
}
