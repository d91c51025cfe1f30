//! Wire-to-entity validation stage
//!
//! Pure functions from raw JSON values to validated entities. Nothing here
//! touches the network or the database, which keeps every invariant testable
//! with plain fixtures.

use crate::decode::entities::{BatchCursor, Comment, CommentBatch, Post, WallPage};
use crate::decode::raw::{Envelope, RawAliasBody, RawComment, RawCommentBatch, RawWall};
use crate::{ArchiveError, Result};
use serde_json::Value;

/// Decodes one page of wall posts
///
/// Posts with `id == 0` are decode artifacts for deleted or inaccessible
/// entries and are dropped here. `owner_id` falls back to the requested wall
/// owner when the wire omits it.
pub fn decode_wall(owner_id: i64, value: Value) -> Result<WallPage> {
    let raw: Envelope<RawWall> =
        serde_json::from_value(value).map_err(|source| ArchiveError::Decode {
            context: "wall",
            source,
        })?;

    let total_count = raw.response.count;
    let received = raw.response.items.len();

    let posts: Vec<Post> = raw
        .response
        .items
        .into_iter()
        .filter(|item| item.id != 0)
        .map(|item| Post {
            owner_id: item.owner_id.unwrap_or(owner_id),
            post_id: item.id,
            from_id: item.from_id,
            is_ad: item.marked_as_ads.map(|flag| flag != 0),
            post_type: item.post_type,
            text: item.text,
            date: item.date,
            n_comments: item.comments.map_or(0, |c| c.count),
            n_likes: item.likes.map_or(0, |c| c.count),
            n_reposts: item.reposts.map_or(0, |c| c.count),
            n_views: item.views.map(|c| c.count),
        })
        .collect();

    if posts.len() < received {
        tracing::debug!(dropped = received - posts.len(), "dropped zero-id posts");
    }

    Ok(WallPage { total_count, posts })
}

/// Decodes one batched comment response
///
/// Nested threads are flattened into independent comments via an explicit
/// worklist (no recursion, so arbitrarily deep threads cannot exhaust the
/// stack). A child missing `owner_id` inherits its parent's; a comment still
/// missing `owner_id`, `post_id`, or `comment_id` after that is dropped.
pub fn decode_comment_batch(value: Value) -> Result<CommentBatch> {
    let raw: Envelope<RawCommentBatch> =
        serde_json::from_value(value).map_err(|source| ArchiveError::Decode {
            context: "comments",
            source,
        })?;

    let cursor = BatchCursor {
        resume_post_index: raw
            .response
            .post_idx
            .and_then(|idx| usize::try_from(idx).ok()),
        resume_offset: raw.response.offset,
    };

    let comments = flatten_threads(raw.response.items);

    Ok(CommentBatch { comments, cursor })
}

/// Decodes the alias-resolution response
///
/// Returns `Ok(None)` when the remote reports no match; that is an answer,
/// not a failure.
pub fn decode_resolved_id(value: Value) -> Result<Option<i64>> {
    let raw: RawAliasBody =
        serde_json::from_value(value).map_err(|source| ArchiveError::Decode {
            context: "alias",
            source,
        })?;

    Ok(raw.response.and_then(|object| object.object_id))
}

/// Flattens nested threads depth-first, parent before children, back-filling
/// each child's missing `owner_id` from its parent
fn flatten_threads(items: Vec<RawComment>) -> Vec<Comment> {
    let mut out = Vec::new();
    let mut dropped = 0usize;

    // LIFO worklist; seeding and pushing children in reverse keeps output in
    // wire order.
    let mut work: Vec<(RawComment, Option<i64>)> =
        items.into_iter().rev().map(|item| (item, None)).collect();

    while let Some((mut item, inherited_owner)) = work.pop() {
        let owner_id = item.owner_id.or(inherited_owner);

        if let Some(thread) = item.thread.take() {
            for child in thread.items.into_iter().rev() {
                work.push((child, owner_id));
            }
        }

        match validate_comment(item, owner_id) {
            Some(comment) => out.push(comment),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "dropped comments missing identity fields");
    }

    out
}

/// Builds a comment only when its full composite identity is present
fn validate_comment(item: RawComment, owner_id: Option<i64>) -> Option<Comment> {
    let owner_id = owner_id.filter(|id| *id != 0)?;
    let post_id = item.post_id.filter(|id| *id != 0)?;
    let comment_id = item.id.filter(|id| *id != 0)?;

    Some(Comment {
        owner_id,
        post_id,
        comment_id,
        from_id: item.from_id,
        text: item.text,
        date: item.date,
        n_likes: item.likes.map(|c| c.count),
        reply_to_comment: item.reply_to_comment,
    })
}
