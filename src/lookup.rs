//! Photo feed search for a single file name.
//!
//! Presence is decided by a plain substring test on the raw response body:
//! the file counts as uploaded iff `<filename></title>` occurs anywhere in it.
//! The body is not parsed and the HTTP status is not consulted.

use anyhow::{Context, Result};
use std::fmt;

use crate::auth::Session;

pub const DEFAULT_BASE_URL: &str = "https://picasaweb.google.com/data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Exists,
    ProbablyNotUploaded,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Exists => write!(f, "file exists on google photos"),
            Verdict::ProbablyNotUploaded => write!(f, "file probably not uploaded"),
        }
    }
}

/// `filename + "</title>"` somewhere in `body`.
pub fn verdict(filename: &str, body: &str) -> Verdict {
    let needle = format!("{}</title>", filename);
    if body.contains(&needle) {
        Verdict::Exists
    } else {
        Verdict::ProbablyNotUploaded
    }
}

/// `OAuth <token>`
pub fn authorization_header(session: &Session) -> String {
    format!("OAuth {}", session.access_token)
}

#[derive(Debug, Clone)]
pub struct LookupClient {
    base_url: String,
}

impl Default for LookupClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl LookupClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search URL with the file name embedded as-is (no percent-encoding).
    pub fn query_url(&self, filename: &str) -> String {
        format!(
            "{}/feed/api/user/default?kind=photo&q={}",
            self.base_url, filename
        )
    }

    /// GET the search URL and return the body, whatever the status code.
    pub fn fetch(&self, session: &Session, filename: &str) -> Result<String> {
        let url = self.query_url(filename);
        log::debug!("GET {}", url);
        let resp = match ureq::get(&url)
            .set("Authorization", &authorization_header(session))
            .call()
        {
            Ok(r) => r,
            Err(ureq::Error::Status(status, r)) => {
                log::warn!("Search returned HTTP {}", status);
                r
            }
            Err(e) => return Err(anyhow::Error::new(e).context("photo search request")),
        };
        resp.into_string().context("reading photo search response")
    }

    pub fn check(&self, session: &Session, filename: &str) -> Result<Verdict> {
        let body = self.fetch(session, filename)?;
        log::debug!("{}", body);
        Ok(verdict(filename, &body))
    }
}
