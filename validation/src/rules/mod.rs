//! Rule identifiers and implementations.
//!
//! Each family of rules is a tagged enum; `apply` maps `(rule, keying)` to
//! the implementing function. The extended variant (Express ECO) re-keys
//! seven of the nine affected rules on `item_action` instead of `action`;
//! the remaining two are shared. There is no rule-type hierarchy.

pub mod affected;
pub mod change;
pub mod extended;
pub mod relationship;

/// Which action property keys the affected-item rules for a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKeying {
    /// Key on `action` (ECN, Simple ECO, Express DCO).
    Action,
    /// Key on `item_action` (Express ECO).
    ItemAction,
}

/// Change-item level rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeRule {
    /// The change item itself exists in the store. Runs in every pass,
    /// before any table lookup.
    ItemExists,
    /// At least one affected item is attached.
    AffectedItemsExist,
    /// At least one affected item carries a non-none action.
    NonNoneActionExists,
}

/// Affected-item level rules (keyed per variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffectedRule {
    /// Affected and new references must be of the same type.
    CompareRefTypes,
    /// Neither reference may be locked.
    RefsNotLocked,
    /// The affected reference must be Released.
    AffectedReleased,
    /// The new reference must be Preliminary.
    NewPreliminary,
    /// Actions that change an existing record need an affected reference.
    AffectedRequired,
    /// Actions that produce a record need a new reference.
    NewRequired,
    /// Actions that produce the record themselves forbid a new reference.
    NewForbidden,
    /// Actions that start from nothing forbid an affected reference.
    AffectedForbidden,
    /// A brand-new record must not already have a released generation.
    NewHasNoReleasedGeneration,
}

/// Extended-only rules (Express ECO).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedRule {
    /// The Review item action is never processable.
    ReviewForbidden,
    /// Supersede's new reference must be Released.
    NewReleased,
    /// Obsolete's affected reference must be Released or Superseded.
    AffectedSupersededOrReleased,
    /// Supersede/Obsolete/None items may not carry relationships.
    RelationshipsForbidden,
    /// Every declared item property must have reached the new record.
    VerifyItemProperties,
}

/// Affected-relationship level rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipRule {
    /// Relationships under a Release item must use Attach.
    AttachRequired,
    /// Modify/Remove need an affected relationship reference.
    AffectedRelRequired,
    /// The affected relationship must belong to the parent's affected
    /// reference.
    SourceMatchesAffected,
    /// Attach/Modify need at least one property row.
    PropertyRequired,
    /// Post-hoc verification that processing left the new item's links in
    /// the declared shape.
    Verify,
}
