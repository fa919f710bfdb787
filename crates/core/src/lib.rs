//! # gridsync-core
//!
//! Data model for the client side of a remote-evaluated spreadsheet:
//! cell records, the per-workbook sheet cache with optimistic writes and
//! full-sheet refresh, the active-cell tracker, and shared error types.
//!
//! This crate is synchronous and I/O-free; the HTTP adapter lives in
//! `gridsync-client` and the edit/commit machinery in `gridsync-session`.

/// A1 address parsing and formatting.
pub mod a1;
/// Per-workbook cell cache.
pub mod cache;
/// Error types and result alias.
pub mod error;
/// Cell records and style attributes.
pub mod record;
/// Active-cell selection state.
pub mod tracker;

pub use cache::{SheetCache, SheetRecords};
pub use error::{SyncError, SyncResult};
pub use record::{CellRecord, StyleAttributes};
pub use tracker::ActiveCellTracker;
