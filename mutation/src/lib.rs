//! Redline Mutation
//!
//! Transition processing. The processor dispatches a `{from}->{to}` pair to
//! a side-effecting handler over the change item's affected items; handlers
//! compose the batch mutation utility (grouped promote/version/lock/unlock/
//! bulk-update) with the relationship and property sub-processing.
//!
//! A store failure inside a handler is caught at the `process` boundary and
//! becomes a failed outcome; partial mutations already committed are not
//! rolled back. Violated processing invariants (a reference guaranteed by
//! validation that is absent, a slot lookup that is not exactly-one) panic.

pub mod batch;
mod handlers;
mod processor;
mod properties;
mod relationships;

pub use processor::{ProcessOutcome, TransitionProcessor};
pub use properties::process_affected_item_properties;
pub use relationships::process_affected_relationships;
