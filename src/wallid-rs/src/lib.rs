//! WalliD Client Library
//!
//! HTTP client for the WalliD credential issuance REST API: certificate
//! authorities, credential templates, credential issuance and
//! verification URLs.

mod client;

pub use client::Client;
pub use wallid_core::config::{ClientConfig, DEFAULT_API_URL};
pub use wallid_core::models::{new_guid, CredentialData, CredentialEntry};

/// Message used when a failed response carries no `message` field
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a status other than 200
    #[error("API Error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The API answered 200 with a body that is not JSON
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
