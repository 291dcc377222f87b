//! Roster repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full tower collection as one JSON blob under a fixed key.
//! - Restore that blob and validate it before handing it to callers.
//!
//! # Invariants
//! - `save_roster` replaces the whole blob; there are no partial writes.
//! - `load_roster` returns `Ok(None)` only when nothing was ever saved.
//! - Blobs that fail to parse or validate surface as `InvalidData`.

use crate::db::DbError;
use crate::model::roster::{validate_roster, RosterValidationError, Tower};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key of the serialized roster.
pub const ROSTER_STORAGE_KEY: &str = "water-bill-towers";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for roster persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Encode(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode roster: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted roster: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RosterValidationError> for RepoError {
    fn from(value: RosterValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Persistence contract for the full roster.
pub trait RosterRepository {
    /// Loads the saved roster, or `None` when nothing has been saved yet.
    fn load_roster(&self) -> RepoResult<Option<Vec<Tower>>>;
    /// Replaces the saved roster.
    fn save_roster(&self, towers: &[Tower]) -> RepoResult<()>;
}

/// SQLite-backed roster repository using the `kv_store` table.
pub struct SqliteRosterRepository<'conn> {
    conn: &'conn Connection,
    key: &'static str,
}

impl<'conn> SqliteRosterRepository<'conn> {
    /// Creates a repository bound to the default storage key.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            key: ROSTER_STORAGE_KEY,
        }
    }

    /// Storage key this repository reads and writes.
    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl RosterRepository for SqliteRosterRepository<'_> {
    fn load_roster(&self) -> RepoResult<Option<Vec<Tower>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![self.key],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let towers = decode_roster(&raw)?;
        Ok(Some(towers))
    }

    fn save_roster(&self, towers: &[Tower]) -> RepoResult<()> {
        let encoded = serde_json::to_string(towers).map_err(RepoError::Encode)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key, encoded],
        )?;
        Ok(())
    }
}

/// Decodes and validates a serialized roster blob.
pub fn decode_roster(raw: &str) -> RepoResult<Vec<Tower>> {
    let towers: Vec<Tower> = serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("unparsable roster json: {err}")))?;
    validate_roster(&towers)?;
    Ok(towers)
}
