//! Wall-Archiver: a polite wall scraper
//!
//! This crate extracts posts and comments from a social-graph wall through a
//! rate-limited, paginated remote API and stores them durably in SQLite,
//! tolerating partial failures without losing previously-fetched data or
//! double-counting entities.

pub mod client;
pub mod config;
pub mod decode;
pub mod extract;
pub mod storage;

use thiserror::Error;

/// Main error type for archiver operations
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request to {endpoint} failed with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Request timeout for {endpoint}")]
    Timeout { endpoint: String },

    #[error("Transport error for {endpoint}: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("Failed to decode {context} response: {source}")]
    Decode {
        context: &'static str,
        source: serde_json::Error,
    },

    #[error("Comment extraction exhausted for owner {owner_id}, posts {post_ids:?}")]
    ChunkExhausted { owner_id: i64, post_ids: Vec<i64> },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for archiver operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{ApiClient, Pacer, RetryPolicy};
pub use config::Config;
pub use decode::{BatchCursor, Comment, Post};
pub use extract::{archive_page, CommentExtractor, PostExtractor};
pub use storage::{SqliteStore, Store};
