//! Bounds validation utilities

use crate::error::{Error, Result};
use crate::limits::MAX_CLOCK_SKEW_SECONDS;

/// Apply clock skew to a timestamp with overflow protection
///
/// Overflow means the timestamp is unusable, which validation treats as invalid.
pub(crate) fn apply_clock_skew(timestamp: i64, skew_seconds: u64, add: bool) -> Result<i64> {
    let skew_i64 = i64::try_from(skew_seconds).map_err(|_| Error::InvalidToken)?;
    if add {
        timestamp.checked_add(skew_i64)
    } else {
        timestamp.checked_sub(skew_i64)
    }
    .ok_or(Error::InvalidToken)
}

/// Reject clock skew values that would effectively disable expiry checks
pub(crate) fn validate_clock_skew(seconds: u64) -> Result<()> {
    if seconds > MAX_CLOCK_SKEW_SECONDS {
        return Err(Error::config(format!(
            "clock skew too large: {seconds} seconds (maximum: {MAX_CLOCK_SKEW_SECONDS} seconds)"
        )));
    }
    Ok(())
}

/// Reject empty required configuration strings
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::config(format!("{field} is empty")));
    }
    Ok(())
}
