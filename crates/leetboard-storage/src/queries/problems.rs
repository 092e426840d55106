// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Problem metadata cache, populated lazily on first encounter.

use leetboard_core::types::ProblemMeta;
use leetboard_core::LeetboardError;
use rusqlite::params;

use crate::database::Database;
use crate::queries::parse_difficulty;

/// Look up cached metadata for a problem slug.
pub async fn get_problem(db: &Database, slug: &str) -> Result<Option<ProblemMeta>, LeetboardError> {
    let slug = slug.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT title, difficulty FROM problems WHERE slug = ?1",
                params![slug],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            );
            match result {
                Ok((title, difficulty)) => Ok(Some(ProblemMeta {
                    title,
                    difficulty: parse_difficulty(difficulty, 1)?,
                })),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert metadata for a slug unless a row already exists.
///
/// Rows are immutable after first insert; a racing loser's insert is a
/// no-op, so concurrent first-sight across identities cannot fail.
pub async fn insert_problem_if_absent(
    db: &Database,
    slug: &str,
    meta: &ProblemMeta,
) -> Result<(), LeetboardError> {
    let slug = slug.to_string();
    let title = meta.title.clone();
    let difficulty = meta.difficulty.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO problems (slug, title, difficulty) VALUES (?1, ?2, ?3)",
                params![slug, title, difficulty],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leetboard_core::types::Difficulty;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn two_sum() -> ProblemMeta {
        ProblemMeta {
            title: "Two Sum".to_string(),
            difficulty: Difficulty::Easy,
        }
    }

    #[tokio::test]
    async fn insert_and_get_round_trips() {
        let (db, _dir) = setup_db().await;

        insert_problem_if_absent(&db, "two-sum", &two_sum())
            .await
            .unwrap();
        let meta = get_problem(&db, "two-sum").await.unwrap().unwrap();
        assert_eq!(meta.title, "Two Sum");
        assert_eq!(meta.difficulty, Difficulty::Easy);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_unknown_slug_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_problem(&db, "missing").await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn second_insert_is_a_noop() {
        let (db, _dir) = setup_db().await;

        insert_problem_if_absent(&db, "two-sum", &two_sum())
            .await
            .unwrap();
        // A racing loser with different metadata must not overwrite.
        let other = ProblemMeta {
            title: "Renamed".to_string(),
            difficulty: Difficulty::Hard,
        };
        insert_problem_if_absent(&db, "two-sum", &other)
            .await
            .unwrap();

        let meta = get_problem(&db, "two-sum").await.unwrap().unwrap();
        assert_eq!(meta.title, "Two Sum");
        assert_eq!(meta.difficulty, Difficulty::Easy);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_first_sight_yields_one_row() {
        let (db, _dir) = setup_db().await;
        let db = std::sync::Arc::new(db);

        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                insert_problem_if_absent(&db, "lru-cache", &ProblemMeta {
                    title: "LRU Cache".to_string(),
                    difficulty: Difficulty::Medium,
                })
                .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT COUNT(*) FROM problems", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(count, 1);

        db.close().await.unwrap();
    }
}
