//! Outbound request plumbing
//!
//! This module contains everything that touches the network:
//! - Minimum-interval pacing between requests
//! - Bounded fixed-delay retry
//! - The HTTP client wrapping the remote API's three operations
//!
//! All network access in the crate flows through [`ApiClient`], which owns the
//! single shared [`Pacer`] and both [`RetryPolicy`] profiles.

mod http;
mod pacer;
mod retry;

pub use http::{ApiClient, MAX_POST_IDS_PER_CALL};
pub use pacer::Pacer;
pub use retry::RetryPolicy;
