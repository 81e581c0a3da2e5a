//! Validation error codes.
//!
//! A code names one way a change item can fail validation. Codes carry no
//! text; positional parameters travel with them in `ValidationError` and
//! both are rendered only at the result-formatting boundary. Codes with a
//! `Named` twin exist because the message differs when the offending record
//! can be pointed at.

/// All validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // -------------------- Change item --------------------
    /// The change item does not exist in the store.
    ChangeItemNotFound,
    /// No affected items are attached. Params: type, number.
    AffectedItemsRequired,
    /// Every affected item carries the `None` action. Params: type, number.
    AffectedActionRequired,
    /// Every affected item carries the `None` item action. Params: type,
    /// number.
    AffectedItemActionRequired,

    // -------------------- Affected item (action keying) --------------------
    /// Affected and new references are of different types. Params: affected
    /// type, number, new type, number.
    RefTypeMismatch,
    /// A referenced item is locked. Params: type, number.
    RefLocked,
    /// Affected reference is not Released. Params: type, number, state.
    AffectedRefNotReleased,
    /// New reference is not Preliminary. Params: type, number, state.
    NewRefNotPreliminary,
    /// Change/Delete needs an affected reference.
    AffectedRefRequired,
    /// Non-interchangeable Change needs a new reference.
    NewRefRequired,
    /// As `NewRefRequired`, naming the affected record. Params: type, number.
    NewRefRequiredNamed,
    /// Add needs a new reference.
    NewRefRequiredForAdd,
    /// Delete must not carry a new reference.
    NewRefForbiddenOnDelete,
    /// As above, naming the affected record. Params: type, number.
    NewRefForbiddenOnDeleteNamed,
    /// Interchangeable Change must not carry a new reference.
    NewRefForbiddenOnChange,
    /// As above, naming the affected record. Params: type, number.
    NewRefForbiddenOnChangeNamed,
    /// Add must not carry an affected reference.
    AffectedRefForbidden,
    /// As above, naming the new record. Params: type, number.
    AffectedRefForbiddenNamed,
    /// Add's new reference already has a released generation. Params: type,
    /// number.
    NewRefHasReleasedGeneration,

    // -------------------- Affected item (item-action keying) ---------------
    /// Revise/Renumber/Supersede affected reference is not Released.
    /// Params: action, type, number, state.
    ItemActionAffectedRefNotReleased,
    /// Release's new reference is not Preliminary. Params: type, number,
    /// state.
    ReleaseNewRefNotPreliminary,
    /// Revise/Renumber/Supersede/Obsolete needs an affected reference.
    /// Params: action.
    ItemActionAffectedRefRequired,
    /// Release/Supersede needs a new reference. Params: action.
    ItemActionNewRefRequired,
    /// As above, naming the affected record. Params: action, type, number.
    ItemActionNewRefRequiredNamed,
    /// Revise/Renumber/Obsolete must not carry a new reference. Params:
    /// action.
    ItemActionNewRefForbidden,
    /// As above, naming the affected record. Params: action, type, number.
    ItemActionNewRefForbiddenNamed,
    /// Release must not carry an affected reference.
    ReleaseAffectedRefForbidden,
    /// As above, naming the new record. Params: type, number.
    ReleaseAffectedRefForbiddenNamed,
    /// Release's new reference already has a released generation. Params:
    /// type, number.
    ReleaseNewRefHasReleasedGeneration,

    // -------------------- Extended affected item --------------------
    /// The Review item action is never processable.
    ReviewActionUnsupported,
    /// Supersede's new reference is not Released. Params: action, type,
    /// number, state.
    SupersedeNewRefNotReleased,
    /// Obsolete's affected reference is neither Released nor Superseded.
    /// Params: action, type, number, state.
    ObsoleteAffectedRefNotReleasedOrSuperseded,
    /// Supersede/Obsolete/None items must not carry affected relationships.
    /// Params: action.
    RelationshipsNotAllowed,
    /// A declared item property was not written to the new record. Params:
    /// property, value, type, number.
    ItemPropertyNotApplied,

    // -------------------- Affected relationship --------------------
    /// Relationships under a Release item must use the Attach action.
    AttachActionRequired,
    /// Modify/Remove needs an affected relationship reference. Params:
    /// action.
    AffectedRelRefRequired,
    /// The affected relationship's source is not the parent's affected
    /// reference.
    AffectedRelSourceMismatch,
    /// Attach/Modify needs at least one property row. Params: action.
    RelPropertyRequired,
    /// Verification found no new relationship reference recorded.
    NewRelRefMissing,
    /// The new item no longer carries the recorded relationship. Params:
    /// rel type, rel id, item type, item number.
    NewItemMissingRelationship,
    /// A declared relationship property was not written. Params: property,
    /// value, rel type, rel id.
    RelPropertyNotApplied,
    /// A removed relationship still exists under the new item. Params: item
    /// type, item number, rel type, rel id.
    StaleRelationshipRemains,

    // -------------------- Formatting --------------------
    /// Suffix notice appended when messages were omitted from the output.
    AdditionalErrors,
}
