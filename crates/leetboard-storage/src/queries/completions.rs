// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion ledger: at most one credit per (user, problem), ever.
//!
//! The UNIQUE(telegram_user_id, slug) constraint is the authoritative
//! dedup gate. Callers attempt the insert and branch on `Duplicate`;
//! nothing here pre-checks existence.

use leetboard_core::types::{Difficulty, DifficultyCounts};
use leetboard_core::LeetboardError;
use rusqlite::params;

use crate::database::Database;
use crate::models::WeeklyCount;
use crate::queries::parse_difficulty;

/// Record a first-time solve.
///
/// Returns [`LeetboardError::Duplicate`] when the (user, slug) pair is
/// already credited; the existing row is never overwritten.
pub async fn insert_completion(
    db: &Database,
    telegram_user_id: i64,
    slug: &str,
    solved_at_utc: i64,
) -> Result<(), LeetboardError> {
    let slug_param = slug.to_string();
    let inserted = db
        .connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            match conn.execute(
                "INSERT INTO completions (telegram_user_id, slug, solved_at_utc)
                 VALUES (?1, ?2, ?3)",
                params![telegram_user_id, slug_param, solved_at_utc],
            ) {
                Ok(_) => Ok(true),
                Err(e) if crate::queries::is_unique_violation(&e) => Ok(false),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    if inserted {
        Ok(())
    } else {
        Err(LeetboardError::Duplicate {
            user_id: telegram_user_id,
            slug: slug.to_string(),
        })
    }
}

/// True if the (user, slug) pair is already credited.
pub async fn has_completion(
    db: &Database,
    telegram_user_id: i64,
    slug: &str,
) -> Result<bool, LeetboardError> {
    let slug = slug.to_string();
    db.connection()
        .call(move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM completions
                 WHERE telegram_user_id = ?1 AND slug = ?2)",
                params![telegram_user_id, slug],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Lifetime per-difficulty counts for one user.
pub async fn lifetime_counts(
    db: &Database,
    telegram_user_id: i64,
) -> Result<DifficultyCounts, LeetboardError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT p.difficulty, COUNT(*) FROM completions co
                 JOIN problems p ON p.slug = co.slug
                 WHERE co.telegram_user_id = ?1
                 GROUP BY 1",
            )?;
            collect_counts(&mut stmt, params![telegram_user_id])
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Per-difficulty counts for one user within `[start, end)`.
pub async fn window_counts(
    db: &Database,
    telegram_user_id: i64,
    start: i64,
    end: i64,
) -> Result<DifficultyCounts, LeetboardError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT p.difficulty, COUNT(*) FROM completions co
                 JOIN problems p ON p.slug = co.slug
                 WHERE co.telegram_user_id = ?1
                   AND co.solved_at_utc >= ?2 AND co.solved_at_utc < ?3
                 GROUP BY 1",
            )?;
            collect_counts(&mut stmt, params![telegram_user_id, start, end])
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Per-user, per-difficulty counts within `[start, end)` for one chat's
/// members. Feeds the leaderboard aggregation.
pub async fn weekly_counts_by_chat(
    db: &Database,
    chat_id: i64,
    start: i64,
    end: i64,
) -> Result<Vec<WeeklyCount>, LeetboardError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT co.telegram_user_id, p.difficulty, COUNT(*)
                 FROM completions co
                 JOIN problems p ON p.slug = co.slug
                 JOIN memberships m ON m.telegram_user_id = co.telegram_user_id
                 WHERE m.chat_id = ?1
                   AND co.solved_at_utc >= ?2 AND co.solved_at_utc < ?3
                 GROUP BY co.telegram_user_id, p.difficulty",
            )?;
            let rows = stmt.query_map(params![chat_id, start, end], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })?;
            let mut counts = Vec::new();
            for row in rows {
                let (telegram_user_id, difficulty, count) = row?;
                counts.push(WeeklyCount {
                    telegram_user_id,
                    difficulty: parse_difficulty(difficulty, 1)?,
                    count,
                });
            }
            Ok(counts)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn collect_counts(
    stmt: &mut rusqlite::Statement<'_>,
    params: &[&dyn rusqlite::ToSql],
) -> Result<DifficultyCounts, rusqlite::Error> {
    let rows = stmt.query_map(params, |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
    })?;
    let mut counts = DifficultyCounts::default();
    for row in rows {
        let (difficulty, count) = row?;
        counts.set(parse_difficulty(difficulty, 0)?, count);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{problems, users};
    use leetboard_core::types::ProblemMeta;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    async fn seed_user(db: &Database, id: i64, lc: &str) {
        users::link_user(db, id, Some("tester"), lc, 0).await.unwrap();
    }

    async fn seed_problem(db: &Database, slug: &str, difficulty: Difficulty) {
        problems::insert_problem_if_absent(
            db,
            slug,
            &ProblemMeta {
                title: slug.to_string(),
                difficulty,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn first_insert_succeeds_second_is_duplicate() {
        let (db, _dir) = setup_db().await;
        seed_user(&db, 1, "alice").await;
        seed_problem(&db, "two-sum", Difficulty::Easy).await;

        insert_completion(&db, 1, "two-sum", 100).await.unwrap();

        // Re-reporting the same solve, even at a different timestamp,
        // must be rejected without overwriting.
        let err = insert_completion(&db, 1, "two-sum", 999).await.unwrap_err();
        assert!(err.is_duplicate());
        assert!(has_completion(&db, 1, "two-sum").await.unwrap());

        let solved_at: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row(
                    "SELECT solved_at_utc FROM completions WHERE telegram_user_id = 1",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();
        assert_eq!(solved_at, 100);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn same_problem_different_users_both_credit() {
        let (db, _dir) = setup_db().await;
        seed_user(&db, 1, "alice").await;
        seed_user(&db, 2, "bob").await;
        seed_problem(&db, "two-sum", Difficulty::Easy).await;

        insert_completion(&db, 1, "two-sum", 100).await.unwrap();
        insert_completion(&db, 2, "two-sum", 150).await.unwrap();

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn insert_for_unknown_user_is_storage_error_not_duplicate() {
        let (db, _dir) = setup_db().await;
        seed_problem(&db, "two-sum", Difficulty::Easy).await;

        let err = insert_completion(&db, 99, "two-sum", 100).await.unwrap_err();
        assert!(!err.is_duplicate());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn window_counts_respect_half_open_bounds() {
        let (db, _dir) = setup_db().await;
        seed_user(&db, 1, "alice").await;
        seed_problem(&db, "p-easy", Difficulty::Easy).await;
        seed_problem(&db, "p-medium", Difficulty::Medium).await;
        seed_problem(&db, "p-hard", Difficulty::Hard).await;

        insert_completion(&db, 1, "p-easy", 100).await.unwrap();
        insert_completion(&db, 1, "p-medium", 200).await.unwrap();
        insert_completion(&db, 1, "p-hard", 300).await.unwrap();

        // [100, 300) includes 100 and 200 but not 300.
        let counts = window_counts(&db, 1, 100, 300).await.unwrap();
        assert_eq!(counts.easy, 1);
        assert_eq!(counts.medium, 1);
        assert_eq!(counts.hard, 0);

        let lifetime = lifetime_counts(&db, 1).await.unwrap();
        assert_eq!((lifetime.easy, lifetime.medium, lifetime.hard), (1, 1, 1));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn weekly_counts_by_chat_only_sees_members() {
        let (db, _dir) = setup_db().await;
        seed_user(&db, 1, "alice").await;
        seed_user(&db, 2, "bob").await;
        seed_problem(&db, "p-hard", Difficulty::Hard).await;

        users::upsert_chat(&db, 77, Some("algo club")).await.unwrap();
        users::join_chat(&db, 77, 1).await.unwrap();

        insert_completion(&db, 1, "p-hard", 100).await.unwrap();
        insert_completion(&db, 2, "p-hard", 100).await.unwrap();

        let counts = weekly_counts_by_chat(&db, 77, 0, 1_000).await.unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].telegram_user_id, 1);
        assert_eq!(counts[0].difficulty, Difficulty::Hard);
        assert_eq!(counts[0].count, 1);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn unlink_cascades_completions_away() {
        let (db, _dir) = setup_db().await;
        seed_user(&db, 1, "alice").await;
        seed_problem(&db, "two-sum", Difficulty::Easy).await;
        insert_completion(&db, 1, "two-sum", 100).await.unwrap();

        users::unlink_user(&db, 1).await.unwrap();
        assert!(!has_completion(&db, 1, "two-sum").await.unwrap());

        db.close().await.unwrap();
    }
}
