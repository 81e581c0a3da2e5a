//! Rule-level validation scenarios across variants.

use redline_tests::prelude::*;

fn codes_of(store: &MemoryStore, change: RecordId) -> Vec<ErrorCode> {
    let mut item = wrap(store, change);
    Validator::new(store)
        .validate(&mut item)
        .unwrap()
        .errors()
        .iter()
        .map(|error| error.code)
        .collect()
}

#[test]
fn test_locked_reference_is_rejected() {
    // GIVEN - an affected reference someone still holds a claim on
    let store = MemoryStore::new();
    let mut part = Record::new("Part")
        .with_state(RELEASED)
        .with("item_number", "P-001")
        .with("is_released", true);
    part.locked = true;
    let part = store.seed(part);

    let ecn = change_item(&store, "ECN", "In Planning", "ECN-1");
    AffectedItemSeed::new("ECN Affected Item", ecn, 10)
        .action("Change")
        .interchangeable()
        .affected(part)
        .seed(&store);

    // WHEN / THEN
    assert!(codes_of(&store, ecn).contains(&ErrorCode::RefLocked));
}

#[test]
fn test_reference_type_mismatch_is_rejected() {
    // GIVEN - a Part replaced by a Document
    let store = MemoryStore::new();
    let part = released_part(&store, "P-002");
    let document = store.seed(
        Record::new("Document")
            .with_state(PRELIMINARY)
            .with("item_number", "DOC-1"),
    );
    let ecn = change_item(&store, "ECN", "In Planning", "ECN-2");
    AffectedItemSeed::new("ECN Affected Item", ecn, 10)
        .action("Change")
        .affected(part)
        .new_item(document)
        .seed(&store);

    // WHEN / THEN
    assert!(codes_of(&store, ecn).contains(&ErrorCode::RefTypeMismatch));
}

#[test]
fn test_review_item_action_is_rejected() {
    let store = MemoryStore::new();
    let part = released_part(&store, "P-003");
    let eco = change_item(&store, "Express ECO", "In Planning", "ECO-1");
    AffectedItemSeed::new("Express ECO Affected Item", eco, 10)
        .item_action("Review")
        .affected(part)
        .seed(&store);

    assert!(codes_of(&store, eco).contains(&ErrorCode::ReviewActionUnsupported));
}

#[test]
fn test_supersede_forbids_relationships() {
    // GIVEN - a Supersede declaration carrying an affected relationship
    let store = MemoryStore::new();
    let old = released_part(&store, "P-004");
    let replacement = released_part(&store, "P-005");
    let eco = change_item(&store, "Express ECO", "In Planning", "ECO-2");
    let row = AffectedItemSeed::new("Express ECO Affected Item", eco, 10)
        .item_action("Supersede")
        .affected(old)
        .new_item(replacement)
        .seed(&store);
    let rel = AffectedRelationshipSeed::new(row, 10, "Attach").seed(&store);
    property_row(&store, "Affected Relationship Property", rel, "quantity", "1");

    // WHEN / THEN
    assert!(codes_of(&store, eco).contains(&ErrorCode::RelationshipsNotAllowed));
}

#[test]
fn test_modify_requires_relationship_reference_and_properties() {
    // GIVEN - a Modify declaration with neither a reference nor properties
    let store = MemoryStore::new();
    let part = released_part(&store, "P-006");
    let eco = change_item(&store, "Express ECO", "In Planning", "ECO-3");
    let row = AffectedItemSeed::new("Express ECO Affected Item", eco, 10)
        .item_action("Revise")
        .affected(part)
        .seed(&store);
    AffectedRelationshipSeed::new(row, 10, "Modify").seed(&store);

    // WHEN
    let codes = codes_of(&store, eco);

    // THEN
    assert!(codes.contains(&ErrorCode::AffectedRelRefRequired));
    assert!(codes.contains(&ErrorCode::RelPropertyRequired));
}

#[test]
fn test_relationship_must_belong_to_affected_reference() {
    // GIVEN - a Remove whose relationship hangs off a different part
    let store = MemoryStore::new();
    let part = released_part(&store, "P-007");
    let other = released_part(&store, "P-008");
    let foreign_link = bom_link(&store, other, 10, "bolt");
    let eco = change_item(&store, "Express ECO", "In Planning", "ECO-4");
    let row = AffectedItemSeed::new("Express ECO Affected Item", eco, 10)
        .item_action("Revise")
        .affected(part)
        .seed(&store);
    AffectedRelationshipSeed::new(row, 10, "Remove")
        .affected_rel(foreign_link)
        .seed(&store);

    // WHEN / THEN
    assert!(codes_of(&store, eco).contains(&ErrorCode::AffectedRelSourceMismatch));
}

#[test]
fn test_release_item_under_release_requires_attach_action() {
    // GIVEN - a Release declaration whose relationship is a Modify
    let store = MemoryStore::new();
    let old = released_part(&store, "P-009");
    let target = preliminary_part(&store, "N-009");
    let link = bom_link(&store, old, 10, "bolt");
    let eco = change_item(&store, "Express ECO", "In Planning", "ECO-5");
    let row = AffectedItemSeed::new("Express ECO Affected Item", eco, 10)
        .item_action("Release")
        .new_item(target)
        .seed(&store);
    let rel = AffectedRelationshipSeed::new(row, 10, "Modify")
        .affected_rel(link)
        .seed(&store);
    property_row(&store, "Affected Relationship Property", rel, "quantity", "1");

    // WHEN / THEN
    assert!(codes_of(&store, eco).contains(&ErrorCode::AttachActionRequired));
}

#[test]
fn test_obsolete_requires_released_or_superseded_target() {
    // GIVEN - an Obsolete of a part still in change
    let store = MemoryStore::new();
    let part = store.seed(
        Record::new("Part")
            .with_state(IN_CHANGE)
            .with("item_number", "P-010"),
    );
    let eco = change_item(&store, "Express ECO", "In Planning", "ECO-6");
    AffectedItemSeed::new("Express ECO Affected Item", eco, 10)
        .item_action("Obsolete")
        .affected(part)
        .seed(&store);

    // WHEN / THEN
    assert!(codes_of(&store, eco)
        .contains(&ErrorCode::ObsoleteAffectedRefNotReleasedOrSuperseded));
}
