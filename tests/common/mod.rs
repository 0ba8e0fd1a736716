//! Shared test fixtures and helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use gphotos::auth::{self, GoogleAuth, OAuthEndpoints};

/// Create a temporary config directory.
pub fn temp_config_dir() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let dir = tmp.path().to_path_buf();
    (tmp, dir)
}

/// Write config.ini with a GooglePhotos client plus any extra lines.
pub fn write_config_ini(dir: &Path, extra: &str) -> PathBuf {
    let content = format!(
        "[GooglePhotos]\n\
         client_id = \"test-client.apps.googleusercontent.com\"\n\
         client_secret = \"test-secret\"\n\
         {extra}\n"
    );
    let path = dir.join("config.ini");
    std::fs::write(&path, content).unwrap();
    path
}

/// Authenticator pointed at a mock server, failing if it ever prompts.
pub fn oauth_against(config_file: &Path, server_url: &str) -> GoogleAuth {
    GoogleAuth::new(config_file, &auth::default_scope(), auth::SERVICE)
        .with_endpoints(OAuthEndpoints::with_base(server_url))
        .with_code_source(|_url: &str| anyhow::bail!("operator prompt not expected"))
}

pub fn token_body(access: &str, refresh: Option<&str>) -> String {
    match refresh {
        Some(r) => format!(
            r#"{{"access_token":"{access}","expires_in":3599,"refresh_token":"{r}","token_type":"Bearer"}}"#
        ),
        None => format!(r#"{{"access_token":"{access}","expires_in":3599,"token_type":"Bearer"}}"#),
    }
}

/// Parse config.ini back as a TOML table.
pub fn read_config(path: &Path) -> toml::Value {
    toml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
