use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by a [`crate::RecordStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The keyed row does not exist or is no longer live.
    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to encode timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error("database schema version {db_version} is newer than supported version {latest_supported}")]
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },

    #[error("database connection lock poisoned")]
    Poisoned,

    #[error("database task failed: {0}")]
    Task(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}
