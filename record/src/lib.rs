//! Redline Record Wrappers
//!
//! Thin typed views over raw store records, reconstructed per request:
//! - `ChangeItem` with its optional in-flight `LifecycleTransition`
//! - `AffectedItem` with lazily resolved affected/new references
//! - `AffectedRelationship` and the shared `PropertyRecord` leaf
//! - `ChangeControlledItem` / `ChangeControlledRelationship`, the external
//!   records a change actually modifies
//!
//! Child collections and references are fetched lazily and memoized per
//! wrapper instance (`ChildList`, `LazyRef`). Invalidation is explicit: a
//! deletion hands back a signal the caller applies to the cached
//! collection. No wrapper survives the invocation that built it.

mod affected;
mod change;
mod children;
mod controlled;
mod lazy;
mod property;
mod relationship;
mod transition;
mod view;

pub use affected::{AffectedItem, AFFECTED_ITEM_PROPERTY, AFFECTED_ITEM_RELATIONSHIP};
pub use change::ChangeItem;
pub use children::ChildList;
pub use controlled::{ChangeControlledItem, ChangeControlledRelationship, PART_BOM};
pub use lazy::LazyRef;
pub use property::{PropertyRecord, AFFECTED_RELATIONSHIP_PROPERTY};
pub use relationship::AffectedRelationship;
pub use transition::{LifecycleTransition, TRANSITION_TYPE};
pub use view::RecordView;
