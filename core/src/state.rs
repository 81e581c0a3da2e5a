//! Lifecycle state names.
//!
//! States are free-form strings per variant; these constants name the ones
//! the rule tables and transition handlers reference. A variant may carry
//! other states — they simply match no table entry.

/// Initial state of a change-controlled item generation.
pub const PRELIMINARY: &str = "Preliminary";

/// A generation that has been released to production.
pub const RELEASED: &str = "Released";

/// A released generation currently being changed.
pub const IN_CHANGE: &str = "In Change";

/// A generation replaced by a newer released one.
pub const SUPERSEDED: &str = "Superseded";

/// A generation withdrawn from use.
pub const OBSOLETE: &str = "Obsolete";

/// Change item being planned (ECN, Express ECO).
pub const IN_PLANNING: &str = "In Planning";

/// Express ECO plan under review.
pub const PLAN_REVIEW: &str = "Plan Review";

/// Freshly created change item (Simple ECO, Express DCO).
pub const NEW: &str = "New";

/// Change item being worked.
pub const IN_WORK: &str = "In Work";

/// Change item under review.
pub const IN_REVIEW: &str = "In Review";
