//! The store interface required by the core.
//!
//! All calls are blocking and synchronous; batch variants exist to cut
//! round-trips, not to parallelize. Every call either succeeds with a valid
//! record (or unit) or fails with a `StoreError`.

use crate::{ApplyRequest, Record, StagedRow, StoreResult, TypedId};
use redline_core::RecordId;

/// Type filter accepted by `get_by_id` that matches records of any type.
/// Reference columns are polymorphic, so resolving them cannot name a
/// concrete type up front.
pub const ANY_TYPE: &str = "*";

/// Synchronous interface to the persistent object store.
pub trait Store {
    /// Fetch a record by id. `item_type` filters the lookup; pass
    /// [`ANY_TYPE`] to resolve a polymorphic reference.
    fn get_by_id(&self, item_type: &str, id: RecordId) -> StoreResult<Option<Record>>;

    /// Execute one mutation selected by the request's action tag. Returns
    /// the resulting record (for `Delete`, the record as it was removed).
    fn apply(&self, request: &ApplyRequest) -> StoreResult<Record>;

    /// Promote a single record to a new lifecycle state.
    fn promote(
        &self,
        item_type: &str,
        id: RecordId,
        to_state: &str,
        comment: &str,
    ) -> StoreResult<Record>;

    /// Promote a set of records of one type in a single call.
    fn promote_set(
        &self,
        item_type: &str,
        ids: &[RecordId],
        to_state: &str,
        comment: &str,
    ) -> StoreResult<()>;

    /// Version a set of records of one type in a single call. Each result
    /// pairs the source id with the new generation; the order of the pairs
    /// is not part of the contract.
    fn version_set(&self, item_type: &str, ids: &[RecordId])
        -> StoreResult<Vec<(RecordId, Record)>>;

    /// Lock a set of records of one type in a single call.
    fn lock_set(&self, item_type: &str, ids: &[RecordId]) -> StoreResult<()>;

    /// Unlock a set of records of one type in a single call.
    fn unlock_set(&self, item_type: &str, ids: &[RecordId]) -> StoreResult<()>;

    /// Stage rows for a set-based column update. Replaces any previously
    /// staged rows.
    fn stage_update_rows(&self, columns: &[String], rows: &[StagedRow]) -> StoreResult<()>;

    /// Run one set-based update joining the staged rows by id onto records
    /// of `item_type`.
    fn apply_staged_update(&self, item_type: &str) -> StoreResult<()>;

    /// Unconditional bulk update that marks records dirty and re-derives
    /// computed fields. Accepts mixed types; grouping happens inside the
    /// store.
    fn touch_all(&self, targets: &[TypedId]) -> StoreResult<()>;

    /// Fetch the child records of `relationship` under `source_id`, ordered
    /// by `sort_order` then id.
    fn children(&self, relationship: &str, source_id: RecordId) -> StoreResult<Vec<Record>>;

    /// True if any generation sharing `config_id` has been released.
    fn has_released_generation(&self, item_type: &str, config_id: &str) -> StoreResult<bool>;
}
