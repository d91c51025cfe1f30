//! Response decoding
//!
//! Decoding runs in two pure stages: raw JSON deserializes into intermediate
//! wire types, then validation functions turn those into entities fit for
//! persistence. Entities that fail their invariants (zero post ids, comments
//! missing identity) are dropped here, before they can reach storage.

mod decoder;
mod entities;
mod raw;

pub use decoder::{decode_comment_batch, decode_resolved_id, decode_wall};
pub use entities::{BatchCursor, Comment, CommentBatch, Post, WallPage};
