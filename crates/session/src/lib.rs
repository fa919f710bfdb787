//! # gridsync-session
//!
//! The edit-commit subsystem: a state machine for the single in-progress
//! edit, the commit protocol that reconciles typed drafts with the remote
//! engine's recomputation, and the workbook-view facade the UI drives.
//!
//! Commit flow: classify the draft as literal or formula, write it into the
//! cache optimistically, persist via set-cell, then replace the whole sheet
//! with the server's recomputed snapshot. Failures surface as values; the
//! session always returns to idle.

/// Commit protocol and outcomes.
pub mod commit;
/// Edit-session state machine.
pub mod session;
/// Workbook view facade.
pub mod workbook;

pub use commit::{CommitOutcome, CommitProtocol};
pub use session::{EditPhase, EditSession, PendingCommit};
pub use workbook::WorkbookView;
