//! Google OAuth2 (authorization-code flow) for the Photos feed.
//!
//! Token order: cached access token, then refresh token, then the interactive
//! consent flow. Whatever the token endpoint hands back is persisted to
//! `config.ini` so later runs skip the browser.

pub mod prompt;
pub mod store;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::AuthError;
use store::{CredentialStore, ServiceCredentials};

pub const PHOTOS_SCOPE: &str = "https://picasaweb.google.com/data/";
pub const EMAIL_SCOPE: &str = "https://www.googleapis.com/auth/userinfo.email";
pub const SERVICE: &str = "GooglePhotos";
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Refresh this long before the recorded expiry.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Photos + account email, space separated.
pub fn default_scope() -> String {
    format!("{} {}", PHOTOS_SCOPE, EMAIL_SCOPE)
}

/// Given the consent URL, return the authorization code the operator obtained.
pub type CodeSource = Box<dyn FnMut(&str) -> Result<String>>;

#[derive(Debug, Clone)]
pub struct OAuthEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl Default for OAuthEndpoints {
    fn default() -> Self {
        Self {
            auth_url: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_url: "https://www.googleapis.com/oauth2/v1/userinfo".to_string(),
        }
    }
}

impl OAuthEndpoints {
    /// `<base>/auth`, `<base>/token`, `<base>/userinfo`.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            auth_url: format!("{base}/auth"),
            token_url: format!("{base}/token"),
            userinfo_url: format!("{base}/userinfo"),
        }
    }
}

/// An authenticated OAuth session for one run.
#[derive(Clone)]
pub struct Session {
    pub access_token: String,
    pub scope: String,
    pub service: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("scope", &self.scope)
            .field("service", &self.service)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: Option<String>,
}

pub struct GoogleAuth {
    config_file: PathBuf,
    scope: String,
    service: String,
    endpoints: OAuthEndpoints,
    get_code: CodeSource,
}

impl GoogleAuth {
    pub fn new(config_file: impl Into<PathBuf>, scope: &str, service: &str) -> Self {
        Self {
            config_file: config_file.into(),
            scope: scope.to_string(),
            service: service.to_string(),
            endpoints: OAuthEndpoints::default(),
            get_code: Box::new(prompt::browser_prompt),
        }
    }

    pub fn with_endpoints(mut self, endpoints: OAuthEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Replace the browser + console prompt.
    pub fn with_code_source<F>(mut self, get_code: F) -> Self
    where
        F: FnMut(&str) -> Result<String> + 'static,
    {
        self.get_code = Box::new(get_code);
        self
    }

    /// Consent page URL for the given client.
    pub fn login_url(&self, creds: &ServiceCredentials) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&access_type=offline",
            self.endpoints.auth_url,
            urlencoding::encode(&creds.client_id),
            urlencoding::encode(redirect_uri(creds)),
            urlencoding::encode(&self.scope),
        )
    }

    pub fn authenticate(&mut self) -> Result<Session> {
        let mut store = CredentialStore::load(&self.config_file)?;
        let mut creds = store.get(&self.service).cloned().unwrap_or_default();
        apply_overrides(
            &mut creds,
            std::env::var("GPHOTOS_CLIENT_ID").ok(),
            std::env::var("GPHOTOS_CLIENT_SECRET").ok(),
        );

        if !creds.has_client() {
            if store.get(&self.service).is_none() {
                store.entry(&self.service);
                store.save()?;
                log::info!("Wrote [{}] template to {}", self.service, store.path().display());
            }
            return Err(AuthError::MissingClientCredentials {
                service: self.service.clone(),
                path: store.path().to_path_buf(),
            }
            .into());
        }

        let now = chrono::Utc::now().timestamp();
        if let Some(token) = creds.live_access_token(now, EXPIRY_MARGIN_SECS) {
            log::debug!("Using cached access token for {}", self.service);
            return Ok(self.session(token.to_string()));
        }

        let mut tokens = None;
        if let Some(refresh) = creds.refresh_token.clone().filter(|t| !t.is_empty()) {
            log::debug!("Refreshing access token for {}", self.service);
            match self.refresh(&creds, &refresh) {
                Ok(t) => tokens = Some(t),
                Err(e) => {
                    let invalid_grant = e
                        .downcast_ref::<AuthError>()
                        .is_some_and(AuthError::is_invalid_grant);
                    if !invalid_grant {
                        return Err(e);
                    }
                    log::warn!("Refresh token rejected, starting consent flow: {}", e);
                    creds.refresh_token = None;
                    store.entry(&self.service).refresh_token = None;
                    store.save()?;
                }
            }
        }
        let tokens = match tokens {
            Some(t) => t,
            None => {
                let url = self.login_url(&creds);
                log::debug!("No usable token, asking operator for an auth code");
                let code = (self.get_code)(&url)?;
                self.exchange_code(&creds, &code)?
            }
        };

        let access_token = tokens.access_token.ok_or(AuthError::MissingAccessToken)?;
        let entry = store.entry(&self.service);
        entry.access_token = Some(access_token.clone());
        entry.expires_at = tokens.expires_in.map(|secs| now + secs);
        entry.refresh_token = tokens.refresh_token.or(creds.refresh_token);
        entry.scope = Some(tokens.scope.unwrap_or_else(|| self.scope.clone()));
        store.save()?;
        log::debug!("Saved tokens to {}", store.path().display());

        Ok(self.session(access_token))
    }

    /// Email address of the authenticated account.
    pub fn google_get_email(&self, session: &Session) -> Result<String> {
        let resp = ureq::get(&self.endpoints.userinfo_url)
            .query("alt", "json")
            .set("Authorization", &format!("Bearer {}", session.access_token))
            .call()
            .context("fetching account info")?;
        let info: UserInfo = resp.into_json().context("decoding account info")?;
        info.email.ok_or_else(|| AuthError::MissingEmail.into())
    }

    fn session(&self, access_token: String) -> Session {
        Session {
            access_token,
            scope: self.scope.clone(),
            service: self.service.clone(),
        }
    }

    fn exchange_code(&self, creds: &ServiceCredentials, code: &str) -> Result<TokenResponse> {
        self.post_token(
            "authorization_code",
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("redirect_uri", redirect_uri(creds)),
            ],
        )
    }

    fn refresh(&self, creds: &ServiceCredentials, refresh_token: &str) -> Result<TokenResponse> {
        self.post_token(
            "refresh_token",
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
            ],
        )
    }

    fn post_token(&self, grant: &'static str, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let resp = match ureq::post(&self.endpoints.token_url).send_form(form) {
            Ok(r) => r,
            Err(ureq::Error::Status(status, r)) => {
                let body: serde_json::Value = r.into_json().unwrap_or(serde_json::Value::Null);
                return Err(AuthError::TokenRejected {
                    grant,
                    status,
                    error: body["error"].as_str().unwrap_or("unknown_error").to_string(),
                    description: body["error_description"].as_str().map(String::from),
                }
                .into());
            }
            Err(e) => {
                return Err(anyhow::Error::new(e).context("contacting token endpoint"));
            }
        };
        resp.into_json().context("decoding token response")
    }
}

fn redirect_uri(creds: &ServiceCredentials) -> &str {
    creds
        .redirect_uri
        .as_deref()
        .filter(|u| !u.is_empty())
        .unwrap_or(OOB_REDIRECT_URI)
}

/// Non-empty environment values win over the stored client.
fn apply_overrides(
    creds: &mut ServiceCredentials,
    client_id: Option<String>,
    client_secret: Option<String>,
) {
    if let Some(id) = client_id.filter(|v| !v.is_empty()) {
        creds.client_id = id;
    }
    if let Some(secret) = client_secret.filter(|v| !v.is_empty()) {
        creds.client_secret = secret;
    }
}
