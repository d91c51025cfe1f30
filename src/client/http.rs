//! HTTP client for the remote wall API
//!
//! This module wraps the API's three logical operations:
//! - Post listing (paginated by count/offset)
//! - Comment listing (batched post ids with one shared offset)
//! - Screen-name resolution
//!
//! Every request passes through the shared [`Pacer`] and one of the two
//! [`RetryPolicy`] profiles. Retry wraps transport only; callers decode the
//! returned JSON value, and decode failures are never retried.

use crate::client::{Pacer, RetryPolicy};
use crate::config::{ApiConfig, CrawlerConfig};
use crate::{ArchiveError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

/// The comment API rejects calls carrying more than this many post ids
pub const MAX_POST_IDS_PER_CALL: usize = 25;

/// Client for the remote wall API
///
/// Owns the HTTP connection pool, the authentication query parameters, the
/// process-wide pacer, and both retry profiles.
pub struct ApiClient {
    http: Client,
    base_url: Url,
    access_token: String,
    api_version: String,
    posts_endpoint: String,
    comments_endpoint: String,
    pacer: Mutex<Pacer>,
    data_retry: RetryPolicy,
    alias_retry: RetryPolicy,
}

impl ApiClient {
    /// Builds a client from the API and crawler configuration sections
    ///
    /// # Returns
    ///
    /// * `Ok(ApiClient)` - Ready-to-use client
    /// * `Err(ArchiveError)` - Invalid base URL or HTTP client build failure
    pub fn new(api: &ApiConfig, crawler: &CrawlerConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(api.request_timeout))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        let base_url = Url::parse(&api.base_url)?;

        Ok(Self {
            http,
            base_url,
            access_token: api.access_token.clone(),
            api_version: api.api_version.clone(),
            posts_endpoint: format!("method/execute.{}", api.posts_function),
            comments_endpoint: format!("method/execute.{}", api.comments_function),
            pacer: Mutex::new(Pacer::new(Duration::from_millis(
                crawler.min_request_interval,
            ))),
            data_retry: RetryPolicy::new(
                crawler.retry_attempts,
                Duration::from_secs(crawler.retry_delay),
            ),
            alias_retry: RetryPolicy::new(
                crawler.retry_attempts,
                Duration::from_secs(crawler.alias_retry_delay),
            ),
        })
    }

    /// Fetches one page of wall posts
    pub async fn fetch_posts(&self, owner_id: i64, count: u64, offset: u64) -> Result<Value> {
        let query = [
            ("owner_id", owner_id.to_string()),
            ("count", count.to_string()),
            ("offset", offset.to_string()),
            ("extended", "0".to_string()),
        ];
        tracing::debug!(owner_id, count, offset, "requesting wall posts");
        self.data_retry
            .run(|| self.request(&self.posts_endpoint, &query))
            .await
    }

    /// Fetches one batch of comments for up to [`MAX_POST_IDS_PER_CALL`] posts,
    /// all sharing the single scalar `offset`
    pub async fn fetch_comments(
        &self,
        owner_id: i64,
        post_ids: &[i64],
        offset: i64,
    ) -> Result<Value> {
        debug_assert!(post_ids.len() <= MAX_POST_IDS_PER_CALL);

        let joined = post_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let query = [
            ("owner_id", owner_id.to_string()),
            ("offset", offset.to_string()),
            ("post_ids", joined),
        ];
        tracing::debug!(owner_id, posts = post_ids.len(), offset, "requesting comments");
        self.data_retry
            .run(|| self.request(&self.comments_endpoint, &query))
            .await
    }

    /// Resolves a human-readable page name through the lightweight retry profile
    pub async fn resolve_screen_name(&self, name: &str) -> Result<Value> {
        let query = [("screen_name", name.to_string())];
        tracing::debug!(name, "resolving screen name");
        self.alias_retry
            .run(|| self.request("method/utils.resolveScreenName", &query))
            .await
    }

    /// Issues one paced GET and returns the raw JSON body
    ///
    /// A non-success HTTP status is a transport failure; the body is not
    /// inspected in that case.
    async fn request(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value> {
        self.pacer.lock().await.wait().await;

        let url = self.base_url.join(endpoint)?;
        let response = self
            .http
            .get(url)
            .query(&[
                ("v", self.api_version.as_str()),
                ("access_token", self.access_token.as_str()),
            ])
            .query(query)
            .send()
            .await
            .map_err(|err| classify(endpoint, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        tracing::debug!(endpoint, status = status.as_u16(), "response received");

        response.json().await.map_err(|err| classify(endpoint, err))
    }
}

/// Maps a reqwest error onto the crate's transport taxonomy
fn classify(endpoint: &str, err: reqwest::Error) -> ArchiveError {
    if err.is_timeout() {
        ArchiveError::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else {
        ArchiveError::Transport {
            endpoint: endpoint.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;

    fn test_config() -> crate::config::Config {
        crate::config::Config {
            api: ApiConfig {
                base_url: "https://api.example.com/".to_string(),
                access_token: "token".to_string(),
                api_version: "5.131".to_string(),
                posts_function: "getPosts".to_string(),
                comments_function: "getComments".to_string(),
                request_timeout: 30,
            },
            crawler: CrawlerConfig {
                min_request_interval: 1000,
                first_chunk_size: 100,
                rest_chunk_size: 25,
                comment_chunk_size: 25,
                retry_attempts: 3,
                retry_delay: 60,
                alias_retry_delay: 5,
            },
            output: OutputConfig {
                database_path: "./wall.db".to_string(),
            },
        }
    }

    #[test]
    fn test_build_client() {
        let config = test_config();
        let client = ApiClient::new(&config.api, &config.crawler);
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = test_config();
        config.api.base_url = "not a url".to_string();
        let client = ApiClient::new(&config.api, &config.crawler);
        assert!(matches!(client, Err(ArchiveError::UrlParse(_))));
    }

    #[test]
    fn test_endpoints_built_from_function_names() {
        let config = test_config();
        let client = ApiClient::new(&config.api, &config.crawler).unwrap();
        assert_eq!(client.posts_endpoint, "method/execute.getPosts");
        assert_eq!(client.comments_endpoint, "method/execute.getComments");
    }
}
