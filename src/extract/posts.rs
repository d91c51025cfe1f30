//! Paginated post extraction
//!
//! The wall API reports a total count on the first call; the remaining index
//! range is then walked in fixed-size windows. Windows are computed from the
//! reported count, not from how many items each call actually returns —
//! deleted posts leave holes without shifting subsequent offsets.

use crate::client::ApiClient;
use crate::config::CrawlerConfig;
use crate::decode::decode_wall;
use crate::storage::Store;
use crate::Result;

/// Drives paginated retrieval of all posts on one wall, persisting each page
/// as it arrives
pub struct PostExtractor<'a, S> {
    client: &'a ApiClient,
    store: &'a mut S,
    first_chunk_size: u64,
    rest_chunk_size: u64,
}

impl<'a, S: Store> PostExtractor<'a, S> {
    pub fn new(client: &'a ApiClient, store: &'a mut S, config: &CrawlerConfig) -> Self {
        Self {
            client,
            store,
            first_chunk_size: config.first_chunk_size as u64,
            rest_chunk_size: config.rest_chunk_size as u64,
        }
    }

    /// Extracts every post on the wall (up to `limit` latest posts when
    /// given), returning post ids in discovery order
    pub async fn extract_all(&mut self, owner_id: i64, limit: Option<u64>) -> Result<Vec<i64>> {
        // First call doubles as the probe for the wall's total size
        let first_count = match limit {
            Some(limit) => self.first_chunk_size.min(limit),
            None => self.first_chunk_size,
        };
        let (reported_count, mut post_ids) = self.fetch_page(owner_id, first_count, 0).await?;

        let effective_total = match limit {
            Some(limit) => reported_count.min(limit),
            None => reported_count,
        };
        tracing::info!(owner_id, reported_count, effective_total, "wall size reported");

        // Walk the remaining index range in fixed windows; offsets derive
        // from the window start, so holes in earlier pages do not shift them
        let mut window_start = self.first_chunk_size + 1;
        while window_start <= effective_total {
            let window_end = effective_total.min(window_start + self.rest_chunk_size - 1);
            let count = window_end - window_start + 1;
            let offset = window_start - 1;

            let (_, ids) = self.fetch_page(owner_id, count, offset).await?;
            post_ids.extend(ids);

            window_start = window_end + 1;
        }

        Ok(post_ids)
    }

    /// Fetches, decodes, and persists one page; returns the reported total
    /// and the surviving post ids
    async fn fetch_page(
        &mut self,
        owner_id: i64,
        count: u64,
        offset: u64,
    ) -> Result<(u64, Vec<i64>)> {
        let body = self.client.fetch_posts(owner_id, count, offset).await?;
        let page = decode_wall(owner_id, body)?;

        for post in &page.posts {
            self.store.upsert_post(post)?;
        }
        tracing::info!(
            owner_id,
            offset,
            persisted = page.posts.len(),
            "post page persisted"
        );

        let ids = page.posts.iter().map(|post| post.post_id).collect();
        Ok((page.total_count, ids))
    }
}
