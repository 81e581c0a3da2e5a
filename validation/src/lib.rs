//! Redline Validation
//!
//! The validation rule engine. Rules are identified by tagged enums per
//! family (change item, affected item, extended affected item, affected
//! relationship); per-variant tables key the ordered rule sets by the
//! current state or by the `{from}->{to}` transition pair. The `Validator`
//! materializes what the selected rules need, applies them in table order,
//! and aggregates failures into a `ResultStatus`.
//!
//! Control flow: rules return `RuleFlow`, propagating either fail-fast
//! truncation (caught by the validator, partial status returned) or a store
//! failure (surfaced to the caller).

mod halt;
pub mod rules;
pub mod tables;
mod validator;

pub use halt::{Halt, RuleFlow};
pub use rules::{AffectedRule, ChangeRule, ExtendedRule, RelationshipRule, RuleKeying};
pub use tables::RuleSet;
pub use validator::Validator;
