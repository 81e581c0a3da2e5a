//! Integration test support for Redline.
//!
//! Fixture builders seed a `MemoryStore` with change items, affected
//! items, and change-controlled records, and drive the engine the way the
//! entry point does.

pub mod fixtures;

pub mod prelude {
    pub use crate::fixtures::*;
    pub use redline_core::{
        ChangeKind, ErrorCode, RecordId, Value, IN_CHANGE, IN_PLANNING, IN_REVIEW, IN_WORK, NEW,
        OBSOLETE, PLAN_REVIEW, PRELIMINARY, RELEASED, SUPERSEDED,
    };
    pub use redline_engine::{ChangeEngine, MessageCatalog, RunOutcome, VariantRegistry};
    pub use redline_mutation::{ProcessOutcome, TransitionProcessor};
    pub use redline_record::{ChangeItem, RecordView};
    pub use redline_store::{ApplyRequest, MemoryStore, Record, Store};
    pub use redline_validation::Validator;
}
