//! Simple ECO scenarios: same machinery as ECN, keyed off the New state.

use redline_tests::prelude::*;

#[test]
fn test_new_to_in_work_versions_interchangeable_changes() {
    // GIVEN
    let store = MemoryStore::new();
    let part = released_part(&store, "P-100");
    let eco = change_item_in_transition(&store, "Simple ECO", "ECO-1", "New", "In Work");
    let row = AffectedItemSeed::new("Simple ECO Affected Item", eco, 10)
        .action("Change")
        .interchangeable()
        .affected(part)
        .seed(&store);

    // WHEN
    let outcome = run(&store, "Simple ECO", eco);

    // THEN
    assert!(outcome.is_ok(), "unexpected outcome: {outcome:?}");
    assert_eq!(store.record(part).unwrap().state, IN_CHANGE);
    let new_id = store
        .record(row)
        .unwrap()
        .id_ref("new_item_id")
        .expect("new item assigned");
    assert_eq!(store.record(new_id).unwrap().state, PRELIMINARY);
}

#[test]
fn test_state_validation_requires_actionable_item() {
    // GIVEN - one affected item, but its action is None
    let store = MemoryStore::new();
    let part = released_part(&store, "P-101");
    let eco = change_item(&store, "Simple ECO", "New", "ECO-2");
    AffectedItemSeed::new("Simple ECO Affected Item", eco, 10)
        .affected(part)
        .seed(&store);

    // WHEN
    let mut item = wrap(&store, eco);
    let status = Validator::new(&store).validate(&mut item).unwrap();

    // THEN - the actionable-item error fires, the emptiness error does not
    let codes: Vec<ErrorCode> = status.errors().iter().map(|e| e.code).collect();
    assert!(codes.contains(&ErrorCode::AffectedActionRequired));
    assert!(!codes.contains(&ErrorCode::AffectedItemsRequired));
}
