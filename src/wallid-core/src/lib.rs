//! WalliD Core Library
//!
//! Shared types for the WalliD credential API client:
//! - Connection configuration
//! - Request bodies for authorities, templates and credentials

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::ClientConfig;
pub use models::*;
