// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use leetboard_core::LeetboardError;
use tracing::debug;

/// Handle to the single SQLite connection used by all query modules.
///
/// One store operation maps to one `connection().call(..)` closure, which
/// SQLite runs as one transaction. Uniqueness constraints live in the
/// schema; callers get typed errors back, never partial writes.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path` with WAL mode enabled and
    /// run any pending migrations.
    pub async fn open(path: &str) -> Result<Self, LeetboardError> {
        Self::open_with(path, true).await
    }

    /// Open (or create) the database at `path`, optionally enabling WAL.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, LeetboardError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| LeetboardError::Storage { source: Box::new(e) })?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| LeetboardError::Storage { source: Box::new(e) })?;

        let pragmas = if wal_mode {
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;
             PRAGMA busy_timeout=5000;"
        } else {
            "PRAGMA foreign_keys=ON;
             PRAGMA busy_timeout=5000;"
        };
        conn.call(move |conn| {
            conn.execute_batch(pragmas)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        // Migrations produce refinery errors, which are not rusqlite
        // errors; run them as the closure's value instead.
        conn.call(|conn| Ok(crate::migrations::run_migrations(conn)))
            .await
            .map_err(map_tr_err)??;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(&self) -> Result<(), LeetboardError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite transport/query error into the shared error type.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> LeetboardError {
    LeetboardError::Storage {
        source: Box::new(e),
    }
}
