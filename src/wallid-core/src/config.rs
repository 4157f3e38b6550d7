use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Public demo deployment of the credential API
pub const DEFAULT_API_URL: &str = "https://demo.eidcmp.wallid.io/api/v1";

pub const API_URL_ENV: &str = "WALLID_API_URL";
pub const API_TOKEN_ENV: &str = "WALLID_API_TOKEN";

/// Connection parameters for the remote credential API.
///
/// The base URL is used verbatim: operation paths are appended to it
/// without any slash normalization.
#[derive(Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            insecure_skip_verify: false,
        }
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read client config {}", path))?;
        let config: ClientConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse client config {}", path))?;
        Ok(config)
    }

    /// Build a config from `WALLID_API_URL` and `WALLID_API_TOKEN`.
    /// The URL falls back to the demo deployment, the token is required.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let token = std::env::var(API_TOKEN_ENV)
            .with_context(|| format!("{} is not set", API_TOKEN_ENV))?;
        Ok(Self::new(base_url, token))
    }

    /// Value of the `Authorization` header sent with every request
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .finish()
    }
}
