//! Validated entities produced by the decoder

use chrono::{DateTime, Utc};

/// A wall post, keyed by `(owner_id, post_id)`
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub owner_id: i64,
    pub post_id: i64,
    pub from_id: i64,
    pub is_ad: Option<bool>,
    pub post_type: Option<String>,
    pub text: String,
    pub date: DateTime<Utc>,
    pub n_comments: i64,
    pub n_likes: i64,
    pub n_reposts: i64,
    pub n_views: Option<i64>,
}

/// A comment, keyed by `(owner_id, post_id, comment_id)`
///
/// Threaded replies are flattened into independent `Comment` values before
/// they leave the decoder; nesting is a presentation artifact of the API, not
/// a storage relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub owner_id: i64,
    pub post_id: i64,
    pub comment_id: i64,
    pub from_id: i64,
    pub text: String,
    pub date: DateTime<Utc>,
    pub n_likes: Option<i64>,
    pub reply_to_comment: Option<i64>,
}

/// One decoded page of wall posts plus the reported wall size
#[derive(Debug)]
pub struct WallPage {
    /// Total post count as reported by the API; may overcount actually
    /// retrievable items when posts were deleted or hidden
    pub total_count: u64,
    pub posts: Vec<Post>,
}

/// Continuation signals returned with every comment batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCursor {
    /// Index within the submitted chunk where the next call must resume;
    /// `None` when the chunk is fully drained
    pub resume_post_index: Option<usize>,
    /// Scalar comment offset to apply to the resumed sub-batch
    pub resume_offset: i64,
}

/// One decoded comment batch: flattened comments plus the continuation cursor
#[derive(Debug)]
pub struct CommentBatch {
    pub comments: Vec<Comment>,
    pub cursor: BatchCursor,
}
