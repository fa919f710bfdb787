//! # gridsync-client
//!
//! Typed adapter for the backend's set-cell / get-sheet HTTP contract.
//!
//! The [`RemoteSheetService`] trait is the seam the sync core depends on;
//! [`HttpSheetService`] is its reqwest implementation with bounded
//! timeouts. Tests substitute the trait with in-memory fakes.

/// Service trait and HTTP implementation.
pub mod service;
/// Request/response shapes.
pub mod wire;

pub use service::{HttpSheetService, RemoteSheetService};
pub use wire::{GetSheetResponse, SetCellRequest, SetCellResponse, SheetSnapshot};
