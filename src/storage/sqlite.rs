//! SQLite storage implementation

use crate::decode::{Comment, Post};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Store, StorageResult, UpsertOutcome};
use crate::storage::{CommentRow, PostRow};
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and initializes the schema
    pub fn new(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Total stored posts
    pub fn count_posts(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Total stored comments
    pub fn count_comments(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM comments", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Fetches one post row by its composite key
    pub fn get_post(&self, owner_id: i64, post_id: i64) -> StorageResult<Option<PostRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT owner_id, post_id, from_id, is_ad, post_type, text, date, updated,
                 n_comments, n_likes, n_reposts, n_views
                 FROM posts WHERE owner_id = ?1 AND post_id = ?2",
                params![owner_id, post_id],
                |row| {
                    Ok(PostRow {
                        owner_id: row.get(0)?,
                        post_id: row.get(1)?,
                        from_id: row.get(2)?,
                        is_ad: row.get(3)?,
                        post_type: row.get(4)?,
                        text: row.get(5)?,
                        date: row.get(6)?,
                        updated: row.get(7)?,
                        n_comments: row.get(8)?,
                        n_likes: row.get(9)?,
                        n_reposts: row.get(10)?,
                        n_views: row.get(11)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Fetches one comment row by its composite key
    pub fn get_comment(
        &self,
        owner_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> StorageResult<Option<CommentRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT owner_id, post_id, comment_id, from_id, text, date, updated,
                 n_likes, reply_to_comment
                 FROM comments WHERE owner_id = ?1 AND post_id = ?2 AND comment_id = ?3",
                params![owner_id, post_id, comment_id],
                |row| {
                    Ok(CommentRow {
                        owner_id: row.get(0)?,
                        post_id: row.get(1)?,
                        comment_id: row.get(2)?,
                        from_id: row.get(3)?,
                        text: row.get(4)?,
                        date: row.get(5)?,
                        updated: row.get(6)?,
                        n_likes: row.get(7)?,
                        reply_to_comment: row.get(8)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Comment ids stored for one post, in id order
    pub fn comment_ids_for_post(&self, owner_id: i64, post_id: i64) -> StorageResult<Vec<i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT comment_id FROM comments
             WHERE owner_id = ?1 AND post_id = ?2 ORDER BY comment_id",
        )?;
        let ids = stmt
            .query_map(params![owner_id, post_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }
}

impl Store for SqliteStore {
    fn upsert_post(&mut self, post: &Post) -> StorageResult<UpsertOutcome> {
        let inserted = self.conn.execute(
            "INSERT INTO posts (owner_id, post_id, from_id, is_ad, post_type, text, date,
             n_comments, n_likes, n_reposts, n_views)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                post.owner_id,
                post.post_id,
                post.from_id,
                post.is_ad,
                post.post_type,
                post.text,
                post.date.to_rfc3339(),
                post.n_comments,
                post.n_likes,
                post.n_reposts,
                post.n_views,
            ],
        );

        match inserted {
            Ok(_) => Ok(UpsertOutcome::Inserted),
            Err(err) if is_unique_violation(&err) => {
                self.conn.execute(
                    "UPDATE posts SET text = ?1, n_comments = ?2, n_likes = ?3,
                     n_reposts = ?4, n_views = ?5, updated = ?6
                     WHERE owner_id = ?7 AND post_id = ?8",
                    params![
                        post.text,
                        post.n_comments,
                        post.n_likes,
                        post.n_reposts,
                        post.n_views,
                        Utc::now().to_rfc3339(),
                        post.owner_id,
                        post.post_id,
                    ],
                )?;
                Ok(UpsertOutcome::Updated)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn upsert_comment(&mut self, comment: &Comment) -> StorageResult<UpsertOutcome> {
        let inserted = self.conn.execute(
            "INSERT INTO comments (owner_id, post_id, comment_id, from_id, text, date,
             n_likes, reply_to_comment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                comment.owner_id,
                comment.post_id,
                comment.comment_id,
                comment.from_id,
                comment.text,
                comment.date.to_rfc3339(),
                comment.n_likes,
                comment.reply_to_comment,
            ],
        );

        match inserted {
            Ok(_) => Ok(UpsertOutcome::Inserted),
            Err(err) if is_unique_violation(&err) => {
                self.conn.execute(
                    "UPDATE comments SET text = ?1, n_likes = ?2, updated = ?3
                     WHERE owner_id = ?4 AND post_id = ?5 AND comment_id = ?6",
                    params![
                        comment.text,
                        comment.n_likes,
                        Utc::now().to_rfc3339(),
                        comment.owner_id,
                        comment.post_id,
                        comment.comment_id,
                    ],
                )?;
                Ok(UpsertOutcome::Updated)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// True when an execute failed on the composite primary key
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_post() -> Post {
        Post {
            owner_id: -42,
            post_id: 11,
            from_id: -42,
            is_ad: Some(false),
            post_type: Some("post".to_string()),
            text: "first text".to_string(),
            date: chrono::Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            n_comments: 3,
            n_likes: 7,
            n_reposts: 1,
            n_views: Some(90),
        }
    }

    fn sample_comment() -> Comment {
        Comment {
            owner_id: -42,
            post_id: 11,
            comment_id: 100,
            from_id: 7,
            text: "first comment".to_string(),
            date: chrono::Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            n_likes: Some(2),
            reply_to_comment: None,
        }
    }

    #[test]
    fn test_insert_then_fetch_post() {
        let mut store = SqliteStore::new_in_memory().unwrap();

        let outcome = store.upsert_post(&sample_post()).unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let row = store.get_post(-42, 11).unwrap().unwrap();
        assert_eq!(row.text, "first text");
        assert_eq!(row.updated, None);
    }

    #[test]
    fn test_post_upsert_is_idempotent() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store.upsert_post(&sample_post()).unwrap();

        let mut revised = sample_post();
        revised.text = "revised text".to_string();
        revised.n_likes = 50;
        // Immutable fields must not change even if the wire sends new values
        revised.from_id = 999;
        revised.post_type = Some("repost".to_string());

        let outcome = store.upsert_post(&revised).unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(store.count_posts().unwrap(), 1);

        let row = store.get_post(-42, 11).unwrap().unwrap();
        assert_eq!(row.text, "revised text");
        assert_eq!(row.n_likes, 50);
        assert!(row.updated.is_some());
        assert_eq!(row.from_id, -42);
        assert_eq!(row.post_type, Some("post".to_string()));
        assert_eq!(row.date, sample_post().date.to_rfc3339());
    }

    #[test]
    fn test_comment_upsert_is_idempotent() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store.upsert_comment(&sample_comment()).unwrap();

        let mut revised = sample_comment();
        revised.text = "edited".to_string();
        revised.n_likes = Some(9);
        revised.from_id = 999;

        let outcome = store.upsert_comment(&revised).unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(store.count_comments().unwrap(), 1);

        let row = store.get_comment(-42, 11, 100).unwrap().unwrap();
        assert_eq!(row.text, "edited");
        assert_eq!(row.n_likes, Some(9));
        assert!(row.updated.is_some());
        assert_eq!(row.from_id, 7);
    }

    #[test]
    fn test_same_comment_id_under_different_posts() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store.upsert_comment(&sample_comment()).unwrap();

        let mut other_post = sample_comment();
        other_post.post_id = 12;
        let outcome = store.upsert_comment(&other_post).unwrap();

        assert_eq!(outcome, UpsertOutcome::Inserted);
        assert_eq!(store.count_comments().unwrap(), 2);
    }

    #[test]
    fn test_comment_ids_for_post_ordered() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        for id in [102, 100, 101] {
            let mut comment = sample_comment();
            comment.comment_id = id;
            store.upsert_comment(&comment).unwrap();
        }

        let ids = store.comment_ids_for_post(-42, 11).unwrap();
        assert_eq!(ids, vec![100, 101, 102]);
    }
}
