//! Batched comment extraction with adaptive chunk-splitting
//!
//! The comment API takes up to 25 post ids per call but applies one shared
//! scalar offset across the whole batch, which forces a two-phase
//! continuation protocol per chunk:
//!
//! 1. Call the chunk at offset 0 and persist what comes back.
//! 2. If the response carries a resume index and a non-zero resume offset,
//!    call once more on the chunk's tail from that index at that offset.
//!
//! When a chunk keeps failing after retry exhaustion, the chunk is split in
//! half and each half retried, isolating whichever post poisons its batch
//! into progressively smaller chunks. Splitting stops at single posts: a
//! failing singleton is terminal and is reported, never silently dropped.

use crate::client::{ApiClient, MAX_POST_IDS_PER_CALL};
use crate::config::CrawlerConfig;
use crate::decode::{decode_comment_batch, BatchCursor};
use crate::storage::Store;
use crate::{ArchiveError, Result};

/// Drives batched retrieval of comments for a set of posts, persisting each
/// batch as it arrives
pub struct CommentExtractor<'a, S> {
    client: &'a ApiClient,
    store: &'a mut S,
    chunk_size: usize,
}

impl<'a, S: Store> CommentExtractor<'a, S> {
    pub fn new(client: &'a ApiClient, store: &'a mut S, config: &CrawlerConfig) -> Self {
        Self {
            client,
            store,
            chunk_size: (config.comment_chunk_size as usize).min(MAX_POST_IDS_PER_CALL),
        }
    }

    /// Extracts comments for every post id, splitting failing chunks until
    /// they succeed or bottom out at single posts
    ///
    /// Posts whose extraction bottomed out are reported together in one
    /// [`ArchiveError::ChunkExhausted`] after all remaining chunks were still
    /// processed — partial progress survives a poisoned post.
    pub async fn extract_all(&mut self, owner_id: i64, post_ids: &[i64]) -> Result<()> {
        let mut exhausted: Vec<i64> = Vec::new();

        // LIFO worklist seeded in reverse so chunks drain in wire order;
        // splits are pushed the same way, giving depth-first descent
        let mut work: Vec<Vec<i64>> = post_ids
            .chunks(self.chunk_size)
            .rev()
            .map(|chunk| chunk.to_vec())
            .collect();

        while let Some(chunk) = work.pop() {
            match self.drain_chunk(owner_id, &chunk).await {
                Ok(()) => {}
                Err(err) if chunk.len() > 1 => {
                    let half = chunk.len() / 2;
                    tracing::warn!(
                        owner_id,
                        chunk_len = chunk.len(),
                        split_size = half,
                        error = %err,
                        "comment chunk failed, splitting"
                    );
                    for sub in chunk.chunks(half).rev() {
                        work.push(sub.to_vec());
                    }
                }
                Err(err) => {
                    tracing::error!(
                        owner_id,
                        post_id = chunk[0],
                        error = %err,
                        "comment extraction exhausted for post"
                    );
                    exhausted.push(chunk[0]);
                }
            }
        }

        if exhausted.is_empty() {
            Ok(())
        } else {
            Err(ArchiveError::ChunkExhausted {
                owner_id,
                post_ids: exhausted,
            })
        }
    }

    /// Runs the two-phase continuation protocol for one chunk
    async fn drain_chunk(&mut self, owner_id: i64, chunk: &[i64]) -> Result<()> {
        let cursor = self.fetch_batch(owner_id, chunk, 0).await?;

        if let BatchCursor {
            resume_post_index: Some(index),
            resume_offset,
        } = cursor
        {
            if resume_offset != 0 && index < chunk.len() {
                self.fetch_batch(owner_id, &chunk[index..], resume_offset)
                    .await?;
            }
        }

        Ok(())
    }

    /// Fetches, decodes, and persists one batch; returns the continuation cursor
    async fn fetch_batch(
        &mut self,
        owner_id: i64,
        post_ids: &[i64],
        offset: i64,
    ) -> Result<BatchCursor> {
        let body = self.client.fetch_comments(owner_id, post_ids, offset).await?;
        let batch = decode_comment_batch(body)?;

        for comment in &batch.comments {
            self.store.upsert_comment(comment)?;
        }
        tracing::info!(
            owner_id,
            posts = post_ids.len(),
            offset,
            persisted = batch.comments.len(),
            "comment batch persisted"
        );

        Ok(batch.cursor)
    }
}
