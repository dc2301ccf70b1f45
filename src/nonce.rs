use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};

use crate::Result;

const NONCE_ENTROPY_BYTES: usize = 32;

/// Generates a fresh `oauth_nonce`.
///
/// 32 bytes from the operating system's random source are base64-encoded and
/// every character outside `[0-9A-Za-z]` is stripped. The result is usually
/// 40 to 44 characters long. Fails with [`Error::EntropyUnavailable`] instead
/// of falling back to a weaker generator.
///
/// [`Error::EntropyUnavailable`]: crate::Error::EntropyUnavailable
pub fn generate_nonce() -> Result<String> {
    let mut bytes = [0u8; NONCE_ENTROPY_BYTES];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(BASE64
        .encode(bytes)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect())
}

/// Seconds since the Unix epoch, as used for `oauth_timestamp`.
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        // a clock before 1970 is reported as the epoch itself
        .unwrap_or_default()
}
