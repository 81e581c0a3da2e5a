//! Human-readable message lookup.
//!
//! Rules accumulate codes and positional parameters; only the formatting
//! boundary turns them into text. `MessageCatalog` is the built-in English
//! catalog; deployments with their own message store implement
//! `MessageLookup` instead.

use redline_core::ErrorCode;

/// Resolves an error code plus parameters to display text.
pub trait MessageLookup {
    fn lookup(&self, code: ErrorCode, params: &[String]) -> String;
}

/// Built-in English message catalog with positional `{n}` substitution.
#[derive(Debug, Default)]
pub struct MessageCatalog;

impl MessageCatalog {
    pub fn new() -> Self {
        Self
    }

    fn template(code: ErrorCode) -> &'static str {
        use ErrorCode::*;
        match code {
            ChangeItemNotFound => "The change item does not exist.",
            AffectedItemsRequired => "{0} {1} has no affected items.",
            AffectedActionRequired => {
                "{0} {1} has no affected item with an action other than None."
            }
            AffectedItemActionRequired => {
                "{0} {1} has no affected item with an item action other than None."
            }

            RefTypeMismatch => {
                "Affected item {0} {1} and new item {2} {3} are of different types."
            }
            RefLocked => "{0} {1} is locked.",
            AffectedRefNotReleased => {
                "Affected item {0} {1} is in state {2}; Released is required."
            }
            NewRefNotPreliminary => "New item {0} {1} is in state {2}; Preliminary is required.",
            AffectedRefRequired => "An affected item is required for the Change and Delete actions.",
            NewRefRequired => "A new item is required for a non-interchangeable Change.",
            NewRefRequiredNamed => {
                "A new item is required for the non-interchangeable Change of {0} {1}."
            }
            NewRefRequiredForAdd => "A new item is required for the Add action.",
            NewRefForbiddenOnDelete => "A new item must not be set for the Delete action.",
            NewRefForbiddenOnDeleteNamed => {
                "A new item must not be set for the Delete of {0} {1}."
            }
            NewRefForbiddenOnChange => "A new item must not be set for an interchangeable Change.",
            NewRefForbiddenOnChangeNamed => {
                "A new item must not be set for the interchangeable Change of {0} {1}."
            }
            AffectedRefForbidden => "An affected item must not be set for the Add action.",
            AffectedRefForbiddenNamed => {
                "An affected item must not be set when adding {0} {1}."
            }
            NewRefHasReleasedGeneration => {
                "New item {0} {1} already has a released generation."
            }

            ItemActionAffectedRefNotReleased => {
                "{0} requires affected item {1} {2} to be Released; it is in state {3}."
            }
            ReleaseNewRefNotPreliminary => {
                "Release requires new item {0} {1} to be Preliminary; it is in state {2}."
            }
            ItemActionAffectedRefRequired => "An affected item is required for the {0} action.",
            ItemActionNewRefRequired => "A new item is required for the {0} action.",
            ItemActionNewRefRequiredNamed => "A new item is required for the {0} of {1} {2}.",
            ItemActionNewRefForbidden => "A new item must not be set for the {0} action.",
            ItemActionNewRefForbiddenNamed => {
                "A new item must not be set for the {0} of {1} {2}."
            }
            ReleaseAffectedRefForbidden => {
                "An affected item must not be set for the Release action."
            }
            ReleaseAffectedRefForbiddenNamed => {
                "An affected item must not be set when releasing {0} {1}."
            }
            ReleaseNewRefHasReleasedGeneration => {
                "New item {0} {1} already has a released generation."
            }

            ReviewActionUnsupported => "The Review item action cannot be processed.",
            SupersedeNewRefNotReleased => {
                "{0} requires new item {1} {2} to be Released; it is in state {3}."
            }
            ObsoleteAffectedRefNotReleasedOrSuperseded => {
                "{0} requires affected item {1} {2} to be Released or Superseded; it is in state {3}."
            }
            RelationshipsNotAllowed => {
                "Affected relationships are not allowed for the {0} item action."
            }
            ItemPropertyNotApplied => "Property {0} was not set to {1} on new item {2} {3}.",

            AttachActionRequired => {
                "Relationships of a Release affected item must use the Attach action."
            }
            AffectedRelRefRequired => {
                "An affected relationship is required for the {0} action."
            }
            AffectedRelSourceMismatch => {
                "The affected relationship does not belong to the parent's affected item."
            }
            RelPropertyRequired => {
                "At least one relationship property is required for the {0} action."
            }
            NewRelRefMissing => "No new relationship was recorded for the affected relationship.",
            NewItemMissingRelationship => {
                "Relationship {0} {1} no longer exists under new item {2} {3}."
            }
            RelPropertyNotApplied => "Property {0} was not set to {1} on relationship {2} {3}.",
            StaleRelationshipRemains => {
                "New item {0} {1} still carries relationship {2} {3} that should have been removed."
            }

            AdditionalErrors => "Additional errors exist.",
        }
    }
}

impl MessageLookup for MessageCatalog {
    fn lookup(&self, code: ErrorCode, params: &[String]) -> String {
        substitute(Self::template(code), params)
    }
}

/// Replace `{n}` placeholders with the positional parameters. A missing
/// parameter renders as an empty string.
fn substitute(template: &str, params: &[String]) -> String {
    let mut result = template.to_string();
    for (index, param) in params.iter().enumerate() {
        result = result.replace(&format!("{{{index}}}"), param);
    }
    // Clear placeholders that received no parameter.
    for index in params.len()..8 {
        result = result.replace(&format!("{{{index}}}"), "");
    }
    result
}
