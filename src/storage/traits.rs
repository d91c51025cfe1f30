//! Storage trait and error types

use crate::decode::{Comment, Post};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// What an upsert did with the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// First time this identity was seen; a new row was inserted
    Inserted,
    /// Identity already existed; the mutable field set was updated and
    /// `updated` was stamped
    Updated,
}

/// Idempotent upsert persistence for extracted entities
///
/// An insert that collides on the composite primary key is converted into an
/// update restricted to the mutable field set — identity fields, `from_id`,
/// `date`, and `post_type` never change after first insert. Each upsert is
/// atomic per entity.
pub trait Store {
    /// Inserts a post, or updates `text`, `n_comments`, `n_likes`,
    /// `n_reposts`, `n_views`, and `updated` when the key already exists
    fn upsert_post(&mut self, post: &Post) -> StorageResult<UpsertOutcome>;

    /// Inserts a comment, or updates `text`, `n_likes`, and `updated` when
    /// the key already exists
    fn upsert_comment(&mut self, comment: &Comment) -> StorageResult<UpsertOutcome>;
}
