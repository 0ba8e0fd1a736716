//! `config.ini` credential store.
//!
//! One `[Service]` table per OAuth service:
//!
//! ```text
//! [GooglePhotos]
//! client_id = "..."
//! client_secret = "..."
//! refresh_token = "..."
//! access_token = "..."
//! expires_at = 1706692800
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCredentials {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl ServiceCredentials {
    pub fn has_client(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// Cached access token that stays valid for more than `margin_secs`.
    pub fn live_access_token(&self, now: i64, margin_secs: i64) -> Option<&str> {
        match (&self.access_token, self.expires_at) {
            (Some(token), Some(exp)) if !token.is_empty() && exp - margin_secs > now => {
                Some(token.as_str())
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    services: BTreeMap<String, ServiceCredentials>,
}

impl CredentialStore {
    /// Read the store, returning an empty one if the file is missing.
    pub fn load(path: &Path) -> Result<Self> {
        let services = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            services,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, service: &str) -> Option<&ServiceCredentials> {
        self.services.get(service)
    }

    /// Return the service table, inserting an empty one if absent.
    pub fn entry(&mut self, service: &str) -> &mut ServiceCredentials {
        self.services.entry(service.to_string()).or_default()
    }

    /// Write the store, creating the parent dir if needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.services)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}
