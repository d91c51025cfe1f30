//! Screen-name resolution

use crate::client::ApiClient;
use crate::decode::decode_resolved_id;
use crate::Result;

/// Resolves a human-readable page name to its numeric object id
///
/// `Ok(None)` means the remote knows no such name; only transport/retry
/// exhaustion is an error.
pub async fn resolve_page_id(client: &ApiClient, name: &str) -> Result<Option<i64>> {
    let body = client.resolve_screen_name(name).await?;
    decode_resolved_id(body)
}
