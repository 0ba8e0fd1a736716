//! Errors the authenticator diagnoses itself.
//!
//! Everything else (I/O, transport, TOML) propagates through `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(
        "client_id/client_secret missing for [{service}] in {}.\n\
         Create an OAuth client (Desktop app) in Google Cloud Console\n\
         and fill in both values, or set GPHOTOS_CLIENT_ID / GPHOTOS_CLIENT_SECRET.",
        .path.display()
    )]
    MissingClientCredentials { service: String, path: PathBuf },

    #[error("token endpoint rejected {grant} grant ({status}): {error}{}", suffix(.description))]
    TokenRejected {
        grant: &'static str,
        status: u16,
        error: String,
        description: Option<String>,
    },

    #[error("token endpoint response has no access_token")]
    MissingAccessToken,

    #[error("userinfo response has no email field")]
    MissingEmail,
}

fn suffix(description: &Option<String>) -> String {
    description
        .as_deref()
        .map(|d| format!(" - {d}"))
        .unwrap_or_default()
}

impl AuthError {
    /// True when a refresh token was revoked or expired.
    pub fn is_invalid_grant(&self) -> bool {
        matches!(self, AuthError::TokenRejected { error, .. } if error == "invalid_grant")
    }
}
