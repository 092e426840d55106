// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracked users, chats, and memberships.

use leetboard_core::types::{ChatSettings, TrackedUser};
use leetboard_core::LeetboardError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{ChatRow, LinkOutcome, UserRow};

/// Link a Telegram user to a LeetCode handle.
///
/// Upserts the user row and starts the handle's cursor at `now_ts` so
/// pre-existing history is not backfilled. When the user was previously
/// linked to a different handle, the stale cursor is removed in the same
/// transaction. Returns [`LinkOutcome::AlreadyClaimed`] when another
/// user already owns the handle.
pub async fn link_user(
    db: &Database,
    telegram_user_id: i64,
    tg_username: Option<&str>,
    lc_username: &str,
    now_ts: i64,
) -> Result<LinkOutcome, LeetboardError> {
    let tg_username = tg_username.map(str::to_string);
    let lc_username_param = lc_username.to_string();
    db.connection()
        .call(move |conn| -> Result<LinkOutcome, rusqlite::Error> {
            let tx = conn.transaction()?;

            let previous: Option<String> = match tx.query_row(
                "SELECT lc_username FROM users WHERE telegram_user_id = ?1",
                params![telegram_user_id],
                |row| row.get(0),
            ) {
                Ok(lc) => Some(lc),
                Err(rusqlite::Error::QueryReturnedNoRows) => None,
                Err(e) => return Err(e),
            };

            // The conflict target is the user id only; a collision on the
            // lc_username UNIQUE index means someone else owns the handle.
            match tx.execute(
                "INSERT INTO users (telegram_user_id, tg_username, lc_username, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(telegram_user_id) DO UPDATE SET
                   tg_username = excluded.tg_username,
                   lc_username = excluded.lc_username",
                params![telegram_user_id, tg_username, lc_username_param, now_ts],
            ) {
                Ok(_) => {}
                Err(e) if crate::queries::is_unique_violation(&e) => {
                    // Dropping the uncommitted transaction rolls back.
                    return Ok(LinkOutcome::AlreadyClaimed);
                }
                Err(e) => return Err(e),
            }

            if let Some(previous) = previous
                && previous != lc_username_param
            {
                tx.execute(
                    "DELETE FROM cursors WHERE lc_username = ?1",
                    params![previous],
                )?;
            }

            tx.execute(
                "INSERT INTO cursors (lc_username, last_seen_ts) VALUES (?1, ?2)
                 ON CONFLICT(lc_username) DO UPDATE SET last_seen_ts = excluded.last_seen_ts",
                params![lc_username_param, now_ts],
            )?;

            tx.commit()?;
            Ok(LinkOutcome::Linked)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove a tracked user.
///
/// Deletes the user row (cascading to completions and memberships) and
/// the handle's cursor in one transaction. `NotFound` if the user was
/// never linked.
pub async fn unlink_user(db: &Database, telegram_user_id: i64) -> Result<(), LeetboardError> {
    let found = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let lc_username: Option<String> = match tx.query_row(
                "SELECT lc_username FROM users WHERE telegram_user_id = ?1",
                params![telegram_user_id],
                |row| row.get(0),
            ) {
                Ok(lc) => Some(lc),
                Err(rusqlite::Error::QueryReturnedNoRows) => None,
                Err(e) => return Err(e),
            };

            if let Some(lc_username) = &lc_username {
                tx.execute(
                    "DELETE FROM users WHERE telegram_user_id = ?1",
                    params![telegram_user_id],
                )?;
                tx.execute(
                    "DELETE FROM cursors WHERE lc_username = ?1",
                    params![lc_username],
                )?;
            }

            tx.commit()?;
            Ok(lc_username.is_some())
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if found {
        Ok(())
    } else {
        Err(LeetboardError::NotFound(format!(
            "no linked LeetCode account for user {telegram_user_id}"
        )))
    }
}

/// Snapshot of all tracked identities, in link order.
pub async fn tracked_users(db: &Database) -> Result<Vec<TrackedUser>, LeetboardError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT telegram_user_id, lc_username FROM users ORDER BY created_at, telegram_user_id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(TrackedUser {
                    telegram_user_id: row.get(0)?,
                    lc_username: row.get(1)?,
                })
            })?;
            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            Ok(users)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch one user row by Telegram id.
pub async fn get_user(
    db: &Database,
    telegram_user_id: i64,
) -> Result<Option<UserRow>, LeetboardError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT telegram_user_id, tg_username, lc_username, created_at
                 FROM users WHERE telegram_user_id = ?1",
                params![telegram_user_id],
                map_user_row,
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch one user row by LeetCode handle.
pub async fn user_by_lc(db: &Database, lc_username: &str) -> Result<Option<UserRow>, LeetboardError> {
    let lc_username = lc_username.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT telegram_user_id, tg_username, lc_username, created_at
                 FROM users WHERE lc_username = ?1",
                params![lc_username],
                map_user_row,
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn map_user_row(row: &rusqlite::Row<'_>) -> Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        telegram_user_id: row.get(0)?,
        tg_username: row.get(1)?,
        lc_username: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Register a chat, updating the title on re-registration. Settings keep
/// their stored values.
pub async fn upsert_chat(
    db: &Database,
    chat_id: i64,
    title: Option<&str>,
) -> Result<(), LeetboardError> {
    let title = title.map(str::to_string);
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chats (chat_id, title) VALUES (?1, ?2)
                 ON CONFLICT(chat_id) DO UPDATE SET title = excluded.title",
                params![chat_id, title],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Toggle solve announcements for a chat.
pub async fn set_post_on_solve(
    db: &Database,
    chat_id: i64,
    enabled: bool,
) -> Result<(), LeetboardError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE chats SET post_on_solve = ?1 WHERE chat_id = ?2",
                params![enabled, chat_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch one chat row.
pub async fn get_chat(db: &Database, chat_id: i64) -> Result<Option<ChatRow>, LeetboardError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT chat_id, title, post_on_solve, scoring FROM chats WHERE chat_id = ?1",
                params![chat_id],
                map_chat_row,
            );
            match result {
                Ok(chat) => Ok(Some(chat)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All registered chats (weekly report fan-out).
pub async fn all_chats(db: &Database) -> Result<Vec<ChatRow>, LeetboardError> {
    db.connection()
        .call(|conn| {
            let mut stmt =
                conn.prepare("SELECT chat_id, title, post_on_solve, scoring FROM chats")?;
            let rows = stmt.query_map([], map_chat_row)?;
            let mut chats = Vec::new();
            for row in rows {
                chats.push(row?);
            }
            Ok(chats)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn map_chat_row(row: &rusqlite::Row<'_>) -> Result<ChatRow, rusqlite::Error> {
    Ok(ChatRow {
        chat_id: row.get(0)?,
        title: row.get(1)?,
        post_on_solve: row.get(2)?,
        scoring: row.get(3)?,
    })
}

/// Add a user to a chat's leaderboard. Idempotent; `NotFound` when the
/// user has not linked an account yet (FK enforcement).
pub async fn join_chat(
    db: &Database,
    chat_id: i64,
    telegram_user_id: i64,
) -> Result<(), LeetboardError> {
    let accepted = db
        .connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            match conn.execute(
                "INSERT OR IGNORE INTO memberships (chat_id, telegram_user_id) VALUES (?1, ?2)",
                params![chat_id, telegram_user_id],
            ) {
                Ok(_) => Ok(true),
                Err(e) if crate::queries::is_constraint_violation(&e) => Ok(false),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    if accepted {
        Ok(())
    } else {
        Err(LeetboardError::NotFound(format!(
            "user {telegram_user_id} has no linked account or chat {chat_id} is unknown"
        )))
    }
}

/// Remove a user from a chat's leaderboard. Only the relation goes away;
/// the user and their completions remain.
pub async fn leave_chat(
    db: &Database,
    chat_id: i64,
    telegram_user_id: i64,
) -> Result<(), LeetboardError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM memberships WHERE chat_id = ?1 AND telegram_user_id = ?2",
                params![chat_id, telegram_user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Chats the user belongs to, with the settings the poll engine needs
/// when announcing a solve.
pub async fn get_user_chats(
    db: &Database,
    telegram_user_id: i64,
) -> Result<Vec<ChatSettings>, LeetboardError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT c.chat_id, c.post_on_solve, c.scoring
                 FROM memberships m
                 JOIN chats c ON c.chat_id = m.chat_id
                 WHERE m.telegram_user_id = ?1",
            )?;
            let rows = stmt.query_map(params![telegram_user_id], |row| {
                Ok(ChatSettings {
                    chat_id: row.get(0)?,
                    post_on_solve: row.get(1)?,
                    scoring: row.get(2)?,
                })
            })?;
            let mut chats = Vec::new();
            for row in rows {
                chats.push(row?);
            }
            Ok(chats)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::cursors;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn link_creates_user_and_cursor_at_now() {
        let (db, _dir) = setup_db().await;

        let outcome = link_user(&db, 1, Some("alice_tg"), "alice", 1_700_000_000)
            .await
            .unwrap();
        assert_eq!(outcome, LinkOutcome::Linked);

        let user = get_user(&db, 1).await.unwrap().unwrap();
        assert_eq!(user.lc_username, "alice");
        assert_eq!(user.tg_username.as_deref(), Some("alice_tg"));

        // Backfill suppression: the watermark starts at link time.
        assert_eq!(cursors::get_cursor(&db, "alice").await.unwrap(), 1_700_000_000);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn handle_claimed_by_another_user_is_rejected() {
        let (db, _dir) = setup_db().await;

        link_user(&db, 1, None, "alice", 100).await.unwrap();
        let outcome = link_user(&db, 2, None, "alice", 200).await.unwrap();
        assert_eq!(outcome, LinkOutcome::AlreadyClaimed);

        // The original owner is untouched.
        let user = get_user(&db, 1).await.unwrap().unwrap();
        assert_eq!(user.lc_username, "alice");
        assert!(get_user(&db, 2).await.unwrap().is_none());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn relink_replaces_handle_and_drops_stale_cursor() {
        let (db, _dir) = setup_db().await;

        link_user(&db, 1, None, "alice", 100).await.unwrap();
        link_user(&db, 1, None, "alice_new", 200).await.unwrap();

        let user = get_user(&db, 1).await.unwrap().unwrap();
        assert_eq!(user.lc_username, "alice_new");
        assert_eq!(cursors::get_cursor(&db, "alice_new").await.unwrap(), 200);
        assert_eq!(cursors::get_cursor(&db, "alice").await.unwrap(), 0);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn unlink_removes_user_cursor_and_memberships() {
        let (db, _dir) = setup_db().await;

        link_user(&db, 1, None, "alice", 100).await.unwrap();
        upsert_chat(&db, 10, Some("club")).await.unwrap();
        join_chat(&db, 10, 1).await.unwrap();

        unlink_user(&db, 1).await.unwrap();

        assert!(get_user(&db, 1).await.unwrap().is_none());
        assert_eq!(cursors::get_cursor(&db, "alice").await.unwrap(), 0);
        assert!(get_user_chats(&db, 1).await.unwrap().is_empty());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn unlink_unknown_user_is_not_found() {
        let (db, _dir) = setup_db().await;
        let err = unlink_user(&db, 404).await.unwrap_err();
        assert!(matches!(err, LeetboardError::NotFound(_)));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn tracked_users_lists_in_link_order() {
        let (db, _dir) = setup_db().await;

        link_user(&db, 2, None, "bob", 100).await.unwrap();
        link_user(&db, 1, None, "alice", 200).await.unwrap();

        let users = tracked_users(&db).await.unwrap();
        let handles: Vec<_> = users.iter().map(|u| u.lc_username.as_str()).collect();
        assert_eq!(handles, vec!["bob", "alice"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn join_requires_linked_user() {
        let (db, _dir) = setup_db().await;
        upsert_chat(&db, 10, None).await.unwrap();

        let err = join_chat(&db, 10, 999).await.unwrap_err();
        assert!(matches!(err, LeetboardError::NotFound(_)));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn join_twice_is_idempotent_and_leave_removes_only_relation() {
        let (db, _dir) = setup_db().await;

        link_user(&db, 1, None, "alice", 0).await.unwrap();
        upsert_chat(&db, 10, Some("club")).await.unwrap();
        join_chat(&db, 10, 1).await.unwrap();
        join_chat(&db, 10, 1).await.unwrap();

        assert_eq!(get_user_chats(&db, 1).await.unwrap().len(), 1);

        leave_chat(&db, 10, 1).await.unwrap();
        assert!(get_user_chats(&db, 1).await.unwrap().is_empty());
        // The user survives leaving.
        assert!(get_user(&db, 1).await.unwrap().is_some());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn chat_defaults_and_toggle() {
        let (db, _dir) = setup_db().await;

        upsert_chat(&db, 10, Some("club")).await.unwrap();
        let chat = get_chat(&db, 10).await.unwrap().unwrap();
        assert!(chat.post_on_solve);
        assert_eq!(chat.scoring, "1,2,5");

        set_post_on_solve(&db, 10, false).await.unwrap();
        let chat = get_chat(&db, 10).await.unwrap().unwrap();
        assert!(!chat.post_on_solve);

        // Re-registration keeps settings, updates title.
        upsert_chat(&db, 10, Some("renamed")).await.unwrap();
        let chat = get_chat(&db, 10).await.unwrap().unwrap();
        assert_eq!(chat.title.as_deref(), Some("renamed"));
        assert!(!chat.post_on_solve);

        db.close().await.unwrap();
    }
}
