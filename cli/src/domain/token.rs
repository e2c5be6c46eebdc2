//! The FPTN access token handed to end-user clients.
//!
//! Format: `fptn:` followed by the unpadded URL-safe base64 encoding of the
//! JSON record below. Decoding accepts either base64 alphabet, with or
//! without padding.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::domain::error::ProvisionError;

/// Scheme prefix of every access token.
pub const TOKEN_SCHEME: &str = "fptn:";

/// Current token schema version.
pub const TOKEN_VERSION: u32 = 1;

/// Connection record encoded into an access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialToken {
    pub version: u32,
    pub service_name: String,
    pub username: String,
    pub password: String,
    pub servers: Vec<ServerDescriptor>,
}

/// One server entry of a [`CredentialToken`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    pub name: String,
    pub host: String,
    pub md5_fingerprint: String,
    pub port: u16,
}

impl fmt::Debug for CredentialToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialToken")
            .field("version", &self.version)
            .field("service_name", &self.service_name)
            .field("username", &self.username)
            .field("password", &"***")
            .field("servers", &self.servers)
            .finish()
    }
}

impl CredentialToken {
    /// Serialize to JSON and encode as `fptn:<base64url, no padding>`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn encode(&self) -> Result<String, ProvisionError> {
        let json = serde_json::to_string(self)
            .map_err(|e| ProvisionError::MalformedToken(e.to_string()))?;
        Ok(format!("{TOKEN_SCHEME}{}", URL_SAFE_NO_PAD.encode(json)))
    }

    /// Parse a token produced by [`CredentialToken::encode`] or by any
    /// encoder using the standard base64 alphabet.
    ///
    /// # Errors
    ///
    /// Returns `MalformedToken` if the scheme, base64 payload or JSON record
    /// is invalid.
    pub fn decode(token: &str) -> Result<Self, ProvisionError> {
        let payload = token
            .trim()
            .strip_prefix(TOKEN_SCHEME)
            .ok_or_else(|| ProvisionError::MalformedToken(format!("missing '{TOKEN_SCHEME}' prefix")))?
            .trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .or_else(|_| STANDARD_NO_PAD.decode(payload))
            .map_err(|e| ProvisionError::MalformedToken(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ProvisionError::MalformedToken(e.to_string()))
    }
}
