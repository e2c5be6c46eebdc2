//! Certificate fingerprint parsing.

use crate::domain::error::ProvisionError;

/// Parse `openssl x509 -noout -fingerprint -md5` output into a lowercase,
/// colon-free hex digest.
///
/// Input looks like `MD5 Fingerprint=AB:CD:...` (the label varies across
/// openssl versions, so everything up to the last `=` is dropped).
///
/// # Errors
///
/// Returns `MalformedFingerprint` unless the result is exactly 32 hex digits.
pub fn parse_md5_fingerprint(openssl_output: &str) -> Result<String, ProvisionError> {
    let raw = openssl_output.trim();
    let value = raw.rsplit_once('=').map_or(raw, |(_, v)| v);
    let digest: String = value
        .chars()
        .filter(|c| *c != ':')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if digest.len() == 32 && digest.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(digest)
    } else {
        Err(ProvisionError::MalformedFingerprint(raw.to_string()))
    }
}
