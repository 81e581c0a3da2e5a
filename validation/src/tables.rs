//! Per-variant rule tables.
//!
//! One table keys on the current state (state validation), the other on the
//! `{from}->{to}` transition pair (transition validation). An unlisted key
//! means no rules beyond the base item-exists check — states with no extra
//! requirements are deliberate, not an error.

use crate::rules::{AffectedRule, ChangeRule, ExtendedRule, RelationshipRule};
use redline_core::ChangeKind;

/// The ordered rules applied for one table key.
#[derive(Debug)]
pub struct RuleSet {
    pub change: &'static [ChangeRule],
    pub affected: &'static [AffectedRule],
    pub extended: &'static [ExtendedRule],
    pub relationship: &'static [RelationshipRule],
}

const CHANGE_RULES: &[ChangeRule] = &[
    ChangeRule::AffectedItemsExist,
    ChangeRule::NonNoneActionExists,
];

const AFFECTED_ALL: &[AffectedRule] = &[
    AffectedRule::CompareRefTypes,
    AffectedRule::RefsNotLocked,
    AffectedRule::AffectedReleased,
    AffectedRule::NewPreliminary,
    AffectedRule::AffectedRequired,
    AffectedRule::NewRequired,
    AffectedRule::NewForbidden,
    AffectedRule::AffectedForbidden,
    AffectedRule::NewHasNoReleasedGeneration,
];

const AFFECTED_COMPARE: &[AffectedRule] = &[AffectedRule::CompareRefTypes];

/// Full pre-work check of a basic variant's affected items.
pub const BASIC_FULL: RuleSet = RuleSet {
    change: CHANGE_RULES,
    affected: AFFECTED_ALL,
    extended: &[],
    relationship: &[],
};

/// Reference-type consistency only.
pub const BASIC_COMPARE: RuleSet = RuleSet {
    change: CHANGE_RULES,
    affected: AFFECTED_COMPARE,
    extended: &[],
    relationship: &[],
};

/// Full pre-work check of the extended variant, including its relationship
/// declarations.
pub const EXTENDED_FULL: RuleSet = RuleSet {
    change: CHANGE_RULES,
    affected: AFFECTED_ALL,
    extended: &[
        ExtendedRule::ReviewForbidden,
        ExtendedRule::NewReleased,
        ExtendedRule::AffectedSupersededOrReleased,
        ExtendedRule::RelationshipsForbidden,
    ],
    relationship: &[
        RelationshipRule::AttachRequired,
        RelationshipRule::AffectedRelRequired,
        RelationshipRule::SourceMatchesAffected,
        RelationshipRule::PropertyRequired,
    ],
};

/// Post-processing verification of the extended variant.
pub const EXTENDED_VERIFY: RuleSet = RuleSet {
    change: CHANGE_RULES,
    affected: AFFECTED_COMPARE,
    extended: &[ExtendedRule::VerifyItemProperties],
    relationship: &[RelationshipRule::Verify],
};

/// Rules applied when the change item rests in `state`.
pub fn state_rules(kind: ChangeKind, state: &str) -> Option<&'static RuleSet> {
    match (kind, state) {
        (ChangeKind::Ecn, "In Planning") => Some(&BASIC_FULL),
        (ChangeKind::Ecn, "In Work" | "In Review") => Some(&BASIC_COMPARE),

        (ChangeKind::SimpleEco, "New") => Some(&BASIC_FULL),
        (ChangeKind::SimpleEco, "In Work" | "In Review") => Some(&BASIC_COMPARE),

        (ChangeKind::ExpressEco, "In Planning" | "Plan Review") => Some(&EXTENDED_FULL),
        (ChangeKind::ExpressEco, "In Work" | "In Review") => Some(&EXTENDED_VERIFY),

        (ChangeKind::ExpressDco, "New") => Some(&BASIC_FULL),
        (ChangeKind::ExpressDco, "In Work" | "In Review") => Some(&BASIC_COMPARE),

        _ => None,
    }
}

/// Rules applied when the change item is promoted along `key`
/// (`"{from}->{to}"`).
pub fn transition_rules(kind: ChangeKind, key: &str) -> Option<&'static RuleSet> {
    match (kind, key) {
        (ChangeKind::Ecn, "In Planning->In Work") => Some(&BASIC_FULL),
        (ChangeKind::Ecn, "In Work->In Review" | "In Review->Released") => Some(&BASIC_COMPARE),

        (ChangeKind::SimpleEco, "New->In Work") => Some(&BASIC_FULL),
        (ChangeKind::SimpleEco, "In Work->In Review" | "In Review->Released") => {
            Some(&BASIC_COMPARE)
        }

        (ChangeKind::ExpressEco, "In Planning->In Work" | "Plan Review->In Work") => {
            Some(&EXTENDED_FULL)
        }
        (ChangeKind::ExpressEco, "In Work->In Review") => Some(&BASIC_COMPARE),
        (ChangeKind::ExpressEco, "In Work->Released" | "In Review->Released") => {
            Some(&EXTENDED_VERIFY)
        }

        (ChangeKind::ExpressDco, "New->In Work") => Some(&BASIC_FULL),
        (
            ChangeKind::ExpressDco,
            "In Work->In Review" | "In Work->Released" | "In Review->Released",
        ) => Some(&BASIC_COMPARE),

        _ => None,
    }
}
