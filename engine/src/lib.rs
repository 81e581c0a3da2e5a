//! Redline Engine
//!
//! The entry point. A `VariantRegistry` maps the record-type discriminator
//! to the matching change-item variant (validated exhaustively at
//! startup); `ChangeEngine` acquires the privilege scope, wraps the
//! record, validates, processes the transition when one is present, and
//! formats the outcome through the message lookup.

mod engine;
mod error;
mod messages;
mod privilege;
mod registry;

pub use engine::{ChangeEngine, RunOutcome};
pub use error::{EngineError, EngineResult};
pub use messages::{MessageCatalog, MessageLookup};
pub use privilege::{NullPrivileges, PrivilegeBroker, PrivilegeScope};
pub use registry::{VariantRegistry, VariantSpec};
