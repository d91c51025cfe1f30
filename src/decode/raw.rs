//! Intermediate wire types
//!
//! These mirror the JSON the API actually sends, quirks included: counters
//! nested one level deep (`likes.count`), unix-seconds timestamps, and `items`
//! fields that arrive as an empty string instead of an array when a batch has
//! nothing in it.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Standard success envelope: the payload lives under `response`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

/// Nested counter object (`{"count": n}`)
#[derive(Debug, Deserialize)]
pub struct RawCount {
    pub count: i64,
}

/// One page of wall posts
#[derive(Debug, Deserialize)]
pub struct RawWall {
    pub count: u64,
    #[serde(default, deserialize_with = "seq_or_empty")]
    pub items: Vec<RawPost>,
}

#[derive(Debug, Deserialize)]
pub struct RawPost {
    pub id: i64,
    #[serde(default)]
    pub owner_id: Option<i64>,
    pub from_id: i64,
    #[serde(default)]
    pub marked_as_ads: Option<i64>,
    #[serde(default)]
    pub post_type: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub comments: Option<RawCount>,
    #[serde(default)]
    pub likes: Option<RawCount>,
    #[serde(default)]
    pub reposts: Option<RawCount>,
    #[serde(default)]
    pub views: Option<RawCount>,
}

/// One batched comment response, covering up to 25 posts
#[derive(Debug, Deserialize)]
pub struct RawCommentBatch {
    #[serde(default)]
    pub post_idx: Option<i64>,
    #[serde(default)]
    pub offset: i64,
    #[serde(default, deserialize_with = "seq_or_empty")]
    pub items: Vec<RawComment>,
}

#[derive(Debug, Deserialize)]
pub struct RawComment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub post_id: Option<i64>,
    pub from_id: i64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub likes: Option<RawCount>,
    #[serde(default)]
    pub reply_to_comment: Option<i64>,
    #[serde(default)]
    pub thread: Option<RawThread>,
}

#[derive(Debug, Deserialize)]
pub struct RawThread {
    #[serde(default, deserialize_with = "seq_or_empty")]
    pub items: Vec<RawComment>,
}

/// Alias-resolution body; `response` is absent or empty when there is no match
#[derive(Debug, Deserialize)]
pub struct RawAliasBody {
    #[serde(default)]
    pub response: Option<RawAliasObject>,
}

#[derive(Debug, Deserialize)]
pub struct RawAliasObject {
    #[serde(default)]
    pub object_id: Option<i64>,
}

/// Accepts a JSON array, or treats any non-array (`""`, `null`, `false`) as empty
fn seq_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}
