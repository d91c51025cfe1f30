//! Database schema definitions

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Wall posts, one row per (owner, post)
CREATE TABLE IF NOT EXISTS posts (
    owner_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    from_id INTEGER NOT NULL,
    is_ad INTEGER,
    post_type TEXT,
    text TEXT NOT NULL,
    date TEXT NOT NULL,
    updated TEXT,
    n_comments INTEGER NOT NULL,
    n_likes INTEGER NOT NULL,
    n_reposts INTEGER NOT NULL,
    n_views INTEGER,
    PRIMARY KEY (owner_id, post_id)
);

-- Comments, one row per (owner, post, comment); thread children are
-- independent rows
CREATE TABLE IF NOT EXISTS comments (
    owner_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    comment_id INTEGER NOT NULL,
    from_id INTEGER NOT NULL,
    text TEXT NOT NULL,
    date TEXT NOT NULL,
    updated TEXT,
    n_likes INTEGER,
    reply_to_comment INTEGER,
    PRIMARY KEY (owner_id, post_id, comment_id)
);

CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(owner_id, post_id);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_initializes() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize_schema(&conn).unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_tables_exist_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        for table in ["posts", "comments"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table {} should exist", table);
        }
    }
}
