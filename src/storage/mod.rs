//! Storage module for persisting extracted entities
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Idempotent upserts for posts and comments
//! - Count queries for reporting and tests

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{Store, StorageError, StorageResult, UpsertOutcome};

/// A post row as stored, including the storage-side revision stamp
#[derive(Debug, Clone)]
pub struct PostRow {
    pub owner_id: i64,
    pub post_id: i64,
    pub from_id: i64,
    pub is_ad: Option<bool>,
    pub post_type: Option<String>,
    pub text: String,
    pub date: String,
    pub updated: Option<String>,
    pub n_comments: i64,
    pub n_likes: i64,
    pub n_reposts: i64,
    pub n_views: Option<i64>,
}

/// A comment row as stored, including the storage-side revision stamp
#[derive(Debug, Clone)]
pub struct CommentRow {
    pub owner_id: i64,
    pub post_id: i64,
    pub comment_id: i64,
    pub from_id: i64,
    pub text: String,
    pub date: String,
    pub updated: Option<String>,
    pub n_likes: Option<i64>,
    pub reply_to_comment: Option<i64>,
}
