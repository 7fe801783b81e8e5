//! Error kinds surfaced by the record store.

/// Errors returned by [`RecordStore`](crate::RecordStore) operations.
///
/// Every variant is recoverable: the store is left unchanged when one is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A record with the same business key (`num`) already exists.
    #[error("Pokemon with number {num} already exists")]
    DuplicateKey { num: String },
    /// No record carries the requested id.
    #[error("Pokemon not found")]
    NotFound { id: i64 },
    /// The candidate failed a presence check.
    #[error("{0}")]
    InvalidInput(String),
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;
