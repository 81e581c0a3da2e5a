//! Engine error types.

use redline_core::{ChangeKind, RecordId};
use redline_store::StoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur wiring up and driving one invocation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown change item type: {name}")]
    UnknownChangeType { name: String },

    #[error("Variant registry is missing {kind}")]
    IncompleteRegistry { kind: ChangeKind },

    #[error("Change item not found: {item_type} {id}")]
    ChangeItemNotFound { item_type: String, id: RecordId },

    #[error("Transition record {id} could not be resolved")]
    TransitionNotFound { id: RecordId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    pub fn unknown_change_type(name: impl Into<String>) -> Self {
        Self::UnknownChangeType { name: name.into() }
    }
}
