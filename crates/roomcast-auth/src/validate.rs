//! Pure validation of caller-supplied token parameters
//!
//! Both helpers run before any serialized field is constructed, even when
//! the field will be omitted from the output.

use crate::token::TokenError;

/// Ceiling on an explicit expiration: 30 days past issuance, in seconds.
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

/// Longest accepted connection-data payload, in characters.
pub const MAX_CONNECTION_DATA_CHARS: usize = 1000;

/// Check a caller-supplied expiration instant.
///
/// Returns `Ok(false)` when `expire_time` is zero: no expiration field is
/// emitted and the default lifetime applies. Returns `Ok(true)` when the
/// instant lies strictly after `create_time` and at most 30 days past `now`.
///
/// # Errors
/// `TokenError::InvalidExpireTime` carrying the offending value otherwise.
pub fn validate_expire_time(
    expire_time: i64,
    create_time: i64,
    now: i64,
) -> Result<bool, TokenError> {
    if expire_time == 0 {
        return Ok(false);
    }

    if expire_time <= create_time || expire_time > now + MAX_TOKEN_LIFETIME_SECS {
        return Err(TokenError::InvalidExpireTime(expire_time));
    }

    Ok(true)
}

/// Check caller-supplied connection metadata.
///
/// Returns `Ok(false)` for absent or empty data (no field emitted) and
/// `Ok(true)` for data within the character cap.
///
/// # Errors
/// `TokenError::ConnectionDataTooLarge` with the measured length otherwise.
pub fn validate_connection_data(data: Option<&str>) -> Result<bool, TokenError> {
    let data = match data {
        Some(data) if !data.is_empty() => data,
        _ => return Ok(false),
    };

    let chars = data.chars().count();
    if chars > MAX_CONNECTION_DATA_CHARS {
        return Err(TokenError::ConnectionDataTooLarge(chars));
    }

    Ok(true)
}
