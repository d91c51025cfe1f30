use serde::Deserialize;

/// Main configuration structure for Wall-Archiver
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Remote API access configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the remote API
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Access token appended to every request
    #[serde(rename = "access-token")]
    pub access_token: String,

    /// API version appended to every request
    #[serde(rename = "api-version")]
    pub api_version: String,

    /// Name of the server-side stored function that lists wall posts
    #[serde(rename = "posts-function")]
    pub posts_function: String,

    /// Name of the server-side stored function that lists batched comments
    #[serde(rename = "comments-function")]
    pub comments_function: String,

    /// Per-request deadline (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Minimum time between the starts of any two outbound requests (milliseconds)
    #[serde(rename = "min-request-interval")]
    pub min_request_interval: u64,

    /// Post count requested on the first wall call
    #[serde(rename = "first-chunk-size")]
    pub first_chunk_size: u32,

    /// Post count requested on every follow-up wall call
    #[serde(rename = "rest-chunk-size")]
    pub rest_chunk_size: u32,

    /// Number of post ids submitted per comment call
    #[serde(rename = "comment-chunk-size")]
    pub comment_chunk_size: u32,

    /// Total attempts per outbound call before the failure propagates
    #[serde(rename = "retry-attempts")]
    pub retry_attempts: u32,

    /// Delay between attempts for data calls (seconds)
    #[serde(rename = "retry-delay")]
    pub retry_delay: u64,

    /// Delay between attempts for the alias-resolution call (seconds)
    #[serde(rename = "alias-retry-delay")]
    pub alias_retry_delay: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}
