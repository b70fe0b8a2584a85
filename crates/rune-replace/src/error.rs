//! Error types for the replace transition.

use thiserror::Error;

use crate::types::SlotKey;

/// Result type for replace transition operations.
pub type Result<T> = std::result::Result<T, ReplaceError>;

/// Errors that can occur while driving a replace transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplaceError {
    /// More than one child was supplied where zero or one is expected.
    #[error("expected at most one child, got {0}")]
    MultipleChildren(usize),

    /// A slot needed a live handle that was never registered.
    #[error("no child handle registered for slot {0}")]
    MissingHandle(SlotKey),
}
