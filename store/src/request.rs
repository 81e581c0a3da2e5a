//! Apply requests and bulk-operation payloads.

use crate::Properties;
use redline_core::RecordId;

/// Action tag selecting the semantics of one `Store::apply` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyAction {
    /// Create a new record.
    Add,
    /// Merge properties into an existing record.
    Edit,
    /// Delete a record.
    Delete,
    /// Create the next generation of a record.
    Version,
    /// Create an independent copy with a fresh config id.
    Copy,
    /// Claim the record for editing.
    Lock,
    /// Release the claim.
    Unlock,
}

/// One store mutation: an action tag, the target, and the property payload.
#[derive(Debug, Clone)]
pub struct ApplyRequest {
    pub action: ApplyAction,
    pub item_type: String,
    /// Target record; `None` only for `Add`.
    pub id: Option<RecordId>,
    pub properties: Properties,
}

impl ApplyRequest {
    pub fn add(item_type: impl Into<String>, properties: Properties) -> Self {
        Self {
            action: ApplyAction::Add,
            item_type: item_type.into(),
            id: None,
            properties,
        }
    }

    pub fn edit(item_type: impl Into<String>, id: RecordId, properties: Properties) -> Self {
        Self {
            action: ApplyAction::Edit,
            item_type: item_type.into(),
            id: Some(id),
            properties,
        }
    }

    pub fn delete(item_type: impl Into<String>, id: RecordId) -> Self {
        Self::bare(ApplyAction::Delete, item_type, id)
    }

    pub fn version(item_type: impl Into<String>, id: RecordId) -> Self {
        Self::bare(ApplyAction::Version, item_type, id)
    }

    pub fn copy(item_type: impl Into<String>, id: RecordId) -> Self {
        Self::bare(ApplyAction::Copy, item_type, id)
    }

    pub fn lock(item_type: impl Into<String>, id: RecordId) -> Self {
        Self::bare(ApplyAction::Lock, item_type, id)
    }

    pub fn unlock(item_type: impl Into<String>, id: RecordId) -> Self {
        Self::bare(ApplyAction::Unlock, item_type, id)
    }

    fn bare(action: ApplyAction, item_type: impl Into<String>, id: RecordId) -> Self {
        Self {
            action,
            item_type: item_type.into(),
            id: Some(id),
            properties: Properties::new(),
        }
    }
}

/// One staged row for a set-based column update: the target id plus the
/// column values to join in.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedRow {
    pub id: RecordId,
    pub columns: Vec<(String, redline_core::Value)>,
}

/// A record reference qualified by its store type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedId {
    pub item_type: String,
    pub id: RecordId,
}

impl TypedId {
    pub fn new(item_type: impl Into<String>, id: RecordId) -> Self {
        Self {
            item_type: item_type.into(),
            id,
        }
    }
}
