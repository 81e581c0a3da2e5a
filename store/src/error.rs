//! Store error types.

use redline_core::RecordId;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store operations. Any of these aborts the current
/// validation pass or transition handler.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Record not found: {item_type} {id}")]
    NotFound { item_type: String, id: RecordId },

    #[error("Record {id} is not of type {expected}")]
    TypeMismatch { expected: String, id: RecordId },

    #[error("Apply rejected: {reason}")]
    Rejected { reason: String },

    #[error("Store backend failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn not_found(item_type: impl Into<String>, id: RecordId) -> Self {
        Self::NotFound {
            item_type: item_type.into(),
            id,
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, id: RecordId) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            id,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
