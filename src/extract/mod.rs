//! Extraction pipeline
//!
//! This module contains the drivers that turn one page identifier into
//! persisted rows:
//! - Paginated post retrieval
//! - Batched, continuation-aware comment retrieval with adaptive splitting
//! - Screen-name resolution
//! - The per-identifier orchestration tying them together

mod alias;
mod comments;
mod posts;

pub use alias::resolve_page_id;
pub use comments::CommentExtractor;
pub use posts::PostExtractor;

use crate::client::ApiClient;
use crate::config::CrawlerConfig;
use crate::storage::Store;
use crate::Result;

/// Archives one page: resolves the identifier if it is not numeric, extracts
/// all posts, then (when requested) all their comments
///
/// An identifier the remote cannot resolve is logged and skipped, not an
/// error. A resolved community name maps to the negated object id, which is
/// how the API addresses community walls.
pub async fn archive_page<S: Store>(
    client: &ApiClient,
    store: &mut S,
    config: &CrawlerConfig,
    target: &str,
    limit: Option<u64>,
    with_comments: bool,
) -> Result<()> {
    let owner_id = match target.parse::<i64>() {
        Ok(id) => id,
        Err(_) => match resolve_page_id(client, target).await? {
            Some(object_id) => -object_id,
            None => {
                tracing::warn!(page = %target, "no id found for page name, skipping");
                return Ok(());
            }
        },
    };

    let post_ids = PostExtractor::new(client, store, config)
        .extract_all(owner_id, limit)
        .await?;
    tracing::info!(owner_id, posts = post_ids.len(), "post extraction finished");

    if with_comments {
        CommentExtractor::new(client, store, config)
            .extract_all(owner_id, &post_ids)
            .await?;
        tracing::info!(owner_id, "comment extraction finished");
    }

    Ok(())
}
