use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while synchronizing cells with the remote engine.
///
/// None of these are fatal: every failure is local to one edit or one
/// round trip and leaves the workbook usable for the next operation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Cell address is not valid A1 notation.
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Transport-level HTTP failure (connect, timeout, broken body).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-success status code.
    #[error("Server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded into the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Server answered 2xx but reported `success: false` in the body.
    #[error("Server rejected the request: {0}")]
    Rejected(String),

    /// A commit for this cell is still in flight.
    #[error("Commit already in flight for {address} on sheet '{sheet}'")]
    CommitInFlight { sheet: String, address: String },
}
