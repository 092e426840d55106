// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cursor store: one last-seen watermark per tracked external identity.

use leetboard_core::LeetboardError;
use rusqlite::params;

use crate::database::Database;

/// Read the identity's last-seen timestamp. Absent row reads as 0
/// ("nothing seen yet").
pub async fn get_cursor(db: &Database, lc_username: &str) -> Result<i64, LeetboardError> {
    let lc_username = lc_username.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT last_seen_ts FROM cursors WHERE lc_username = ?1",
                params![lc_username],
                |row| row.get(0),
            );
            match result {
                Ok(ts) => Ok(ts),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Overwrite the identity's cursor unconditionally.
///
/// Used at link time to start the watermark at "now", suppressing
/// backfill of pre-existing history.
pub async fn set_cursor(db: &Database, lc_username: &str, ts: i64) -> Result<(), LeetboardError> {
    let lc_username = lc_username.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO cursors (lc_username, last_seen_ts) VALUES (?1, ?2)
                 ON CONFLICT(lc_username) DO UPDATE SET last_seen_ts = excluded.last_seen_ts",
                params![lc_username, ts],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Advance the identity's cursor to `ts`, never moving it backward.
///
/// The monotonic guard lives in the statement itself so a stale caller
/// cannot rewind the watermark.
pub async fn advance_cursor(
    db: &Database,
    lc_username: &str,
    ts: i64,
) -> Result<(), LeetboardError> {
    let lc_username = lc_username.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO cursors (lc_username, last_seen_ts) VALUES (?1, ?2)
                 ON CONFLICT(lc_username) DO UPDATE SET last_seen_ts = excluded.last_seen_ts
                 WHERE excluded.last_seen_ts > cursors.last_seen_ts",
                params![lc_username, ts],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove the identity's cursor row (part of unlink).
pub async fn delete_cursor(db: &Database, lc_username: &str) -> Result<(), LeetboardError> {
    let lc_username = lc_username.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM cursors WHERE lc_username = ?1",
                params![lc_username],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn absent_cursor_reads_as_zero() {
        let (db, _dir) = setup_db().await;
        assert_eq!(get_cursor(&db, "nobody").await.unwrap(), 0);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn advance_creates_and_moves_forward() {
        let (db, _dir) = setup_db().await;

        advance_cursor(&db, "alice", 100).await.unwrap();
        assert_eq!(get_cursor(&db, "alice").await.unwrap(), 100);

        advance_cursor(&db, "alice", 250).await.unwrap();
        assert_eq!(get_cursor(&db, "alice").await.unwrap(), 250);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn advance_never_moves_backward() {
        let (db, _dir) = setup_db().await;

        advance_cursor(&db, "alice", 300).await.unwrap();
        advance_cursor(&db, "alice", 200).await.unwrap();
        assert_eq!(get_cursor(&db, "alice").await.unwrap(), 300);

        // Equal timestamps are also a no-op.
        advance_cursor(&db, "alice", 300).await.unwrap();
        assert_eq!(get_cursor(&db, "alice").await.unwrap(), 300);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn set_overwrites_even_backward() {
        let (db, _dir) = setup_db().await;

        advance_cursor(&db, "alice", 500).await.unwrap();
        set_cursor(&db, "alice", 50).await.unwrap();
        assert_eq!(get_cursor(&db, "alice").await.unwrap(), 50);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_resets_to_zero() {
        let (db, _dir) = setup_db().await;

        advance_cursor(&db, "alice", 42).await.unwrap();
        delete_cursor(&db, "alice").await.unwrap();
        assert_eq!(get_cursor(&db, "alice").await.unwrap(), 0);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn cursors_are_independent_per_identity() {
        let (db, _dir) = setup_db().await;

        advance_cursor(&db, "alice", 10).await.unwrap();
        advance_cursor(&db, "bob", 20).await.unwrap();
        assert_eq!(get_cursor(&db, "alice").await.unwrap(), 10);
        assert_eq!(get_cursor(&db, "bob").await.unwrap(), 20);

        db.close().await.unwrap();
    }
}
