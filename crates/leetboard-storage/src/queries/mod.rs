// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per table group.

pub mod completions;
pub mod cursors;
pub mod problems;
pub mod users;

use leetboard_core::types::Difficulty;

/// Parse a difficulty column value, mapping failures into rusqlite's
/// conversion error so they surface through the normal storage path.
pub(crate) fn parse_difficulty(raw: String, column: usize) -> Result<Difficulty, rusqlite::Error> {
    raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// True only for UNIQUE/PRIMARY KEY violations. FK and CHECK failures
/// are real storage errors, not "row already exists".
pub(crate) fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

/// True for any SQLite constraint violation (unique, FK, check).
pub(crate) fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
