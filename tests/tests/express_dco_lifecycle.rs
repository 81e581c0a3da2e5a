//! Express DCO scenarios: the document variant with coarse actions.

use redline_tests::prelude::*;

/// A DCO mid-promotion to In Work with a Change, a Delete, and an Add.
fn seeded_dco(store: &MemoryStore) -> (RecordId, [RecordId; 3], [RecordId; 3]) {
    let p1 = released_part(store, "D-001");
    let p2 = released_part(store, "D-002");
    let n3 = preliminary_part(store, "D-100");
    let dco = change_item_in_transition(store, "Express DCO", "DCO-1", "New", "In Work");
    let change_row = AffectedItemSeed::new("Express DCO Affected Item", dco, 10)
        .action("Change")
        .interchangeable()
        .affected(p1)
        .seed(store);
    let delete_row = AffectedItemSeed::new("Express DCO Affected Item", dco, 20)
        .action("Delete")
        .affected(p2)
        .seed(store);
    let add_row = AffectedItemSeed::new("Express DCO Affected Item", dco, 30)
        .action("Add")
        .new_item(n3)
        .seed(store);
    (dco, [p1, p2, n3], [change_row, delete_row, add_row])
}

#[test]
fn test_new_to_in_work_partitions_by_action() {
    // GIVEN
    let store = MemoryStore::new();
    let (dco, [p1, p2, n3], [change_row, ..]) = seeded_dco(&store);

    // WHEN
    let outcome = run(&store, "Express DCO", dco);

    // THEN
    assert!(outcome.is_ok(), "unexpected outcome: {outcome:?}");

    // Changed and deleted targets went into change; the added one did not.
    assert_eq!(store.record(p1).unwrap().state, IN_CHANGE);
    assert_eq!(store.record(p2).unwrap().state, IN_CHANGE);
    assert_eq!(store.record(n3).unwrap().state, PRELIMINARY);

    // The interchangeable change got its new generation.
    let new_id = store
        .record(change_row)
        .unwrap()
        .id_ref("new_item_id")
        .expect("new item assigned");
    assert_eq!(store.record(new_id).unwrap().int("generation"), 2);
}

#[test]
fn test_review_and_release_flow() {
    // GIVEN - a DCO advanced to work
    let store = MemoryStore::new();
    let (dco, [p1, p2, n3], [change_row, ..]) = seeded_dco(&store);
    assert!(run(&store, "Express DCO", dco).is_ok());
    let new_id = store.record(change_row).unwrap().id_ref("new_item_id").unwrap();

    // WHEN - into review: the Add and Change new references advance
    settle(&store, dco, IN_WORK);
    start_transition(&store, dco, "In Work", "In Review");
    assert!(run(&store, "Express DCO", dco).is_ok());
    assert_eq!(store.record(new_id).unwrap().state, IN_REVIEW);
    assert_eq!(store.record(n3).unwrap().state, IN_REVIEW);

    // WHEN - released from review
    settle(&store, dco, IN_REVIEW);
    start_transition(&store, dco, "In Review", "Released");
    assert!(run(&store, "Express DCO", dco).is_ok());

    // THEN - new references released; changed and deleted targets
    // superseded
    assert_eq!(store.record(new_id).unwrap().state, RELEASED);
    assert_eq!(store.record(n3).unwrap().state, RELEASED);
    assert_eq!(store.record(p1).unwrap().state, SUPERSEDED);
    assert_eq!(store.record(p2).unwrap().state, SUPERSEDED);
}

#[test]
fn test_add_rejects_previously_released_generation() {
    // GIVEN - an Add whose new reference shares a config with a released
    // generation
    let store = MemoryStore::new();
    let released = released_part(&store, "D-200");
    let config = store.record(released).unwrap().text("config_id").to_string();
    let reused = store.seed(
        Record::new("Part")
            .with_state(PRELIMINARY)
            .with("item_number", "D-200")
            .with("config_id", config),
    );
    let dco = change_item(&store, "Express DCO", "New", "DCO-2");
    AffectedItemSeed::new("Express DCO Affected Item", dco, 10)
        .action("Add")
        .new_item(reused)
        .seed(&store);

    // WHEN
    let mut item = wrap(&store, dco);
    let status = Validator::new(&store).validate(&mut item).unwrap();

    // THEN
    let codes: Vec<ErrorCode> = status.errors().iter().map(|e| e.code).collect();
    assert!(codes.contains(&ErrorCode::NewRefHasReleasedGeneration));
}
