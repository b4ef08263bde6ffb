// crates/scholarship-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Submission Store
// Description: Durable SubmissionStore backed by one SQLite table.
// Purpose: Persist applications with attachments using bound parameters.
// Dependencies: scholarship-core, rusqlite, serde, thiserror, time
// ============================================================================

//! ## Overview
//! The store owns one application table. Its layout is derived from the form
//! schema at startup: `guid` primary key, one `TEXT` column per general-info
//! field, `scholarships`, the attachment slot columns `filename{N}`,
//! `size{N}`, `filetype{N}`, `content{N}` for N in 0..5, and `submitted`.
//! Columns for fields added to the schema after the table was created are
//! added with `ALTER TABLE`; existing data is never dropped.
//!
//! Table and column names are validated SQL identifiers and are quoted on
//! use. Values are always bound parameters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;
use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;
use scholarship_core::FieldName;
use scholarship_core::FormValues;
use scholarship_core::MAX_FILE_SLOTS;
use scholarship_core::SlotIndex;
use scholarship_core::StoreError;
use scholarship_core::SubmissionId;
use scholarship_core::SubmissionRecord;
use scholarship_core::SubmissionStore;
use scholarship_core::UploadedFile;
use scholarship_core::is_sql_identifier;
use serde::Deserialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store metadata.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Default application table name.
pub const DEFAULT_TABLE: &str = "applications";
/// Separator used to join selected scholarships into one column.
const SCHOLARSHIP_SEPARATOR: &str = ", ";
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode.
    #[default]
    Wal,
    /// Delete journal mode.
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode.
    #[default]
    Full,
    /// Normal synchronous mode.
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` submission store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
    /// Application table name.
    #[serde(default = "default_table")]
    pub table: String,
}

impl SqliteStoreConfig {
    /// Creates a configuration with defaults for everything but the path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
            table: default_table(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

/// Returns the default application table name.
fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Stored row cannot be decoded.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid configuration or record.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

/// Maps a rusqlite error into [`SqliteStoreError::Db`].
fn db_err(err: rusqlite::Error) -> SqliteStoreError {
    SqliteStoreError::Db(err.to_string())
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed submission store.
#[derive(Clone)]
pub struct SqliteSubmissionStore {
    /// Quoted application table name.
    table: String,
    /// General-info field columns in schema order.
    fields: Vec<FieldName>,
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteSubmissionStore {
    /// Opens the store, creating or migrating the application table so it has
    /// a column for every field in `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path or table name is invalid or
    /// the database cannot be opened or initialized.
    pub fn new(config: &SqliteStoreConfig, fields: &[FieldName]) -> Result<Self, SqliteStoreError> {
        if !is_sql_identifier(&config.table) || config.table.eq_ignore_ascii_case("store_meta") {
            return Err(SqliteStoreError::Invalid(format!("invalid table name: {}", config.table)));
        }
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(config)?;
        let table = quote(&config.table);
        initialize_schema(&mut connection, &table, fields)?;
        Ok(Self { table, fields: fields.to_vec(), connection: Arc::new(Mutex::new(connection)) })
    }

    /// Locks the shared connection.
    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection.lock().map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))
    }

    /// Inserts a record in a single statement.
    fn insert_record(&self, record: &SubmissionRecord) -> Result<(), SqliteStoreError> {
        if record.files.len() > MAX_FILE_SLOTS {
            return Err(SqliteStoreError::Invalid(format!(
                "record has {} attachments; at most {MAX_FILE_SLOTS} slots exist",
                record.files.len()
            )));
        }
        if let Some((name, _)) =
            record.values.iter().find(|(name, _)| !self.fields.iter().any(|f| f.as_str() == *name))
        {
            return Err(SqliteStoreError::Invalid(format!("no column for field {name}")));
        }
        let submitted = record
            .submitted_at
            .format(&Rfc3339)
            .map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;

        let mut columns: Vec<String> = vec![quote("guid")];
        let mut values: Vec<SqlValue> = vec![SqlValue::Text(record.id.to_string())];
        for field in &self.fields {
            columns.push(quote(field.as_str()));
            values.push(
                record
                    .values
                    .get(field.as_str())
                    .map_or(SqlValue::Null, |value| SqlValue::Text(value.to_string())),
            );
        }
        columns.push(quote("scholarships"));
        values.push(SqlValue::Text(record.scholarships.join(SCHOLARSHIP_SEPARATOR)));
        for (slot, file) in record.files.iter().enumerate() {
            let size = i64::try_from(file.size)
                .map_err(|_| SqliteStoreError::Invalid("attachment too large".to_string()))?;
            columns.push(quote(&format!("filename{slot}")));
            values.push(SqlValue::Text(file.filename.clone()));
            columns.push(quote(&format!("size{slot}")));
            values.push(SqlValue::Integer(size));
            columns.push(quote(&format!("filetype{slot}")));
            values.push(SqlValue::Text(file.content_type.clone()));
            columns.push(quote(&format!("content{slot}")));
            values.push(SqlValue::Blob(file.content.clone()));
        }
        columns.push(quote("submitted"));
        values.push(SqlValue::Text(submitted));

        let placeholders: Vec<String> = (1 ..= values.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders.join(", ")
        );
        let guard = self.connection()?;
        guard.execute(&sql, params_from_iter(values)).map_err(db_err)?;
        drop(guard);
        Ok(())
    }

    /// Loads a full record.
    fn load_record(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, SqliteStoreError> {
        let mut columns = vec![quote("scholarships"), quote("submitted")];
        columns.extend(self.fields.iter().map(|field| quote(field.as_str())));
        for slot in SlotIndex::all() {
            columns.extend(slot_columns(slot));
        }
        let sql =
            format!("SELECT {} FROM {} WHERE guid = ?1 LIMIT 1", columns.join(", "), self.table);
        let guard = self.connection()?;
        let row = guard
            .query_row(&sql, params![id.as_str()], |row| self.decode_row(id, row))
            .optional()
            .map_err(db_err)?;
        drop(guard);
        row.transpose()
    }

    /// Decodes one selected row; decoding problems surface as the inner error.
    fn decode_row(
        &self,
        id: &SubmissionId,
        row: &Row<'_>,
    ) -> rusqlite::Result<Result<SubmissionRecord, SqliteStoreError>> {
        let scholarships: Option<String> = row.get(0)?;
        let submitted: String = row.get(1)?;
        let mut values = FormValues::new();
        let mut index = 2;
        for field in &self.fields {
            let value: Option<String> = row.get(index)?;
            if let Some(value) = value {
                values.insert(field.as_str(), value);
            }
            index += 1;
        }
        let mut files = Vec::new();
        for _ in SlotIndex::all() {
            let file = read_slot(row, index)?;
            index += 4;
            match file {
                Some(file) => files.push(file),
                None => break,
            }
        }
        let submitted_at = match OffsetDateTime::parse(&submitted, &Rfc3339) {
            Ok(value) => value,
            Err(err) => {
                return Ok(Err(SqliteStoreError::Corrupt(format!(
                    "invalid submitted timestamp for {id}: {err}"
                ))));
            }
        };
        let scholarships = scholarships
            .filter(|joined| !joined.is_empty())
            .map(|joined| joined.split(SCHOLARSHIP_SEPARATOR).map(ToString::to_string).collect())
            .unwrap_or_default();
        Ok(Ok(SubmissionRecord { id: id.clone(), values, scholarships, files, submitted_at }))
    }

    /// Loads one attachment slot.
    fn load_slot(
        &self,
        id: &SubmissionId,
        slot: SlotIndex,
    ) -> Result<Option<UploadedFile>, SqliteStoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE guid = ?1 LIMIT 1",
            slot_columns(slot).join(", "),
            self.table
        );
        let guard = self.connection()?;
        let file = guard
            .query_row(&sql, params![id.as_str()], |row| read_slot(row, 0))
            .optional()
            .map_err(db_err)?;
        drop(guard);
        Ok(file.flatten())
    }

    /// Counts stored records.
    fn count_records(&self) -> Result<u64, SqliteStoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table);
        let guard = self.connection()?;
        let count: i64 = guard.query_row(&sql, params![], |row| row.get(0)).map_err(db_err)?;
        drop(guard);
        u64::try_from(count).map_err(|_| SqliteStoreError::Corrupt("negative row count".to_string()))
    }
}

impl SubmissionStore for SqliteSubmissionStore {
    fn insert(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        self.insert_record(record).map_err(StoreError::from)
    }

    fn load(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, StoreError> {
        self.load_record(id).map_err(StoreError::from)
    }

    fn load_file(
        &self,
        id: &SubmissionId,
        slot: SlotIndex,
    ) -> Result<Option<UploadedFile>, StoreError> {
        self.load_slot(id, slot).map_err(StoreError::from)
    }

    fn count(&self) -> Result<u64, StoreError> {
        self.count_records().map_err(StoreError::from)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Quotes a validated identifier.
fn quote(identifier: &str) -> String {
    format!("\"{identifier}\"")
}

/// Returns the quoted column names of one attachment slot.
fn slot_columns(slot: SlotIndex) -> [String; 4] {
    [
        quote(&format!("filename{slot}")),
        quote(&format!("size{slot}")),
        quote(&format!("filetype{slot}")),
        quote(&format!("content{slot}")),
    ]
}

/// Reads a slot's four columns starting at `start`; an empty slot is `None`.
fn read_slot(row: &Row<'_>, start: usize) -> rusqlite::Result<Option<UploadedFile>> {
    let filename: Option<String> = row.get(start)?;
    let size: Option<i64> = row.get(start + 1)?;
    let content_type: Option<String> = row.get(start + 2)?;
    let content: Option<Vec<u8>> = row.get(start + 3)?;
    let (Some(filename), Some(content)) = (filename, content) else {
        return Ok(None);
    };
    let size = size.and_then(|size| u64::try_from(size).ok()).unwrap_or_else(|| {
        u64::try_from(content.len()).unwrap_or(u64::MAX)
    });
    Ok(Some(UploadedFile {
        filename,
        size,
        content_type: content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
        content,
    }))
}

/// Returns every expected column with its declared type, guid excluded.
fn expected_columns(fields: &[FieldName]) -> Vec<(String, &'static str)> {
    let mut columns: Vec<(String, &'static str)> =
        fields.iter().map(|field| (field.as_str().to_string(), "TEXT")).collect();
    columns.push(("scholarships".to_string(), "TEXT"));
    for slot in 0 .. MAX_FILE_SLOTS {
        columns.push((format!("filename{slot}"), "TEXT"));
        columns.push((format!("size{slot}"), "INTEGER"));
        columns.push((format!("filetype{slot}"), "TEXT"));
        columns.push((format!("content{slot}"), "BLOB"));
    }
    columns
}

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.display().to_string().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    if path
        .components()
        .any(|component| component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH)
    {
        return Err(SqliteStoreError::Invalid(
            "store path contains an overlong component".to_string(),
        ));
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection and applies pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags).map_err(db_err)?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(db_err)?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(db_err)?;
    connection.busy_timeout(Duration::from_millis(config.busy_timeout_ms)).map_err(db_err)?;
    Ok(connection)
}

/// Creates the metadata and application tables, or validates and migrates
/// existing ones.
fn initialize_schema(
    connection: &mut Connection,
    table: &str,
    fields: &[FieldName],
) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(db_err)?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(db_err)?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(db_err)?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(db_err)?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }

    let mut definitions = vec![format!("{} TEXT PRIMARY KEY", quote("guid"))];
    definitions.extend(
        expected_columns(fields).iter().map(|(name, kind)| format!("{} {kind}", quote(name))),
    );
    definitions.push(format!("{} TEXT NOT NULL", quote("submitted")));
    tx.execute_batch(&format!("CREATE TABLE IF NOT EXISTS {table} ({});", definitions.join(", ")))
        .map_err(db_err)?;

    let existing = existing_columns(&tx, table)?;
    if !existing.contains("guid") || !existing.contains("submitted") {
        return Err(SqliteStoreError::Corrupt(format!(
            "table {table} exists without guid/submitted columns"
        )));
    }
    for (name, kind) in expected_columns(fields) {
        if !existing.contains(&name.to_ascii_lowercase()) {
            tx.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {} {kind};", quote(&name)))
                .map_err(db_err)?;
        }
    }
    tx.commit().map_err(db_err)?;
    Ok(())
}

/// Returns the lower-cased column names of `table`.
fn existing_columns(
    tx: &rusqlite::Transaction<'_>,
    table: &str,
) -> Result<BTreeSet<String>, SqliteStoreError> {
    let mut statement = tx.prepare(&format!("PRAGMA table_info({table})")).map_err(db_err)?;
    let names = statement
        .query_map(params![], |row| row.get::<_, String>(1))
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(names.into_iter().map(|name| name.to_ascii_lowercase()).collect())
}
