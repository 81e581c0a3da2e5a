//! ECN lifecycle scenarios: plan, work, review, release.

use redline_tests::prelude::*;

/// An ECN mid-promotion to In Work, with one interchangeable Change of a
/// released part.
fn interchangeable_change(store: &MemoryStore) -> (RecordId, RecordId, RecordId) {
    let p1 = released_part(store, "P-001");
    let ecn = change_item_in_transition(store, "ECN", "ECN-1", "In Planning", "In Work");
    let row = AffectedItemSeed::new("ECN Affected Item", ecn, 10)
        .action("Change")
        .interchangeable()
        .affected(p1)
        .seed(store);
    (ecn, p1, row)
}

#[test]
fn test_advance_to_work_versions_and_assigns() {
    // GIVEN
    let store = MemoryStore::new();
    let (ecn, p1, row) = interchangeable_change(&store);
    store.clear_ops();

    // WHEN
    let outcome = run(&store, "ECN", ecn);

    // THEN
    assert!(outcome.is_ok(), "unexpected outcome: {outcome:?}");

    // The released part moved into change.
    assert_eq!(store.record(p1).unwrap().state, IN_CHANGE);

    // A new generation was created, unlocked, and wired in.
    let new_id = store
        .record(row)
        .unwrap()
        .id_ref("new_item_id")
        .expect("new item assigned");
    let new_generation = store.record(new_id).unwrap();
    assert_eq!(new_generation.int("generation"), 2);
    assert_eq!(new_generation.state, PRELIMINARY);
    assert!(!new_generation.locked);
    assert_eq!(
        new_generation.text("config_id"),
        store.record(p1).unwrap().text("config_id")
    );

    // Promote-to-In-Change precedes versioning; each is one bulk call.
    let ops = store.ops();
    let promote = ops
        .iter()
        .position(|op| op.starts_with("promote_set:Part:In Change"))
        .expect("bulk promote issued");
    let version = ops
        .iter()
        .position(|op| op.starts_with("version_set:Part"))
        .expect("bulk version issued");
    assert!(promote < version);

    // The reference column went through lock -> staged update -> unlock.
    assert_eq!(store.count_ops("lock_set:ECN Affected Item"), 1);
    assert_eq!(store.count_ops("apply_staged:ECN Affected Item"), 1);
    assert_eq!(store.count_ops("unlock_set:ECN Affected Item"), 1);
}

#[test]
fn test_full_lifecycle_to_release() {
    // GIVEN - an ECN driven through the advance-to-work processing
    let store = MemoryStore::new();
    let (ecn, p1, row) = interchangeable_change(&store);
    assert!(run(&store, "ECN", ecn).is_ok());
    let new_id = store.record(row).unwrap().id_ref("new_item_id").unwrap();

    // WHEN - at rest in In Work, validation alone runs and passes
    settle(&store, ecn, IN_WORK);
    assert!(run(&store, "ECN", ecn).is_ok());

    // WHEN - promoted into review
    start_transition(&store, ecn, "In Work", "In Review");
    assert!(run(&store, "ECN", ecn).is_ok());

    // THEN - the new generation advanced with it
    assert_eq!(store.record(new_id).unwrap().state, IN_REVIEW);

    // WHEN - released
    settle(&store, ecn, IN_REVIEW);
    start_transition(&store, ecn, "In Review", "Released");
    assert!(run(&store, "ECN", ecn).is_ok());

    // THEN - the new generation is released, the old one superseded
    let released = store.record(new_id).unwrap();
    assert_eq!(released.state, RELEASED);
    assert!(released.flag("is_released"));
    assert_eq!(store.record(p1).unwrap().state, SUPERSEDED);
}

#[test]
fn test_review_rework_returns_new_generation_to_preliminary() {
    // GIVEN - an ECN whose new generation reached In Review
    let store = MemoryStore::new();
    let (ecn, _, row) = interchangeable_change(&store);
    assert!(run(&store, "ECN", ecn).is_ok());
    let new_id = store.record(row).unwrap().id_ref("new_item_id").unwrap();
    settle(&store, ecn, IN_WORK);
    start_transition(&store, ecn, "In Work", "In Review");
    assert!(run(&store, "ECN", ecn).is_ok());
    assert_eq!(store.record(new_id).unwrap().state, IN_REVIEW);

    // WHEN - review sends it back to work
    settle(&store, ecn, IN_REVIEW);
    start_transition(&store, ecn, "In Review", "In Work");
    assert!(run(&store, "ECN", ecn).is_ok());

    // THEN
    assert_eq!(store.record(new_id).unwrap().state, PRELIMINARY);
}

#[test]
fn test_store_failure_surfaces_as_error_outcome() {
    // GIVEN
    let store = MemoryStore::new();
    let (ecn, p1, _) = interchangeable_change(&store);
    store.fail_next_op("promote_set");

    // WHEN
    let outcome = run(&store, "ECN", ecn);

    // THEN - the handler's store failure became an error result, and the
    // part was left untouched (the failing call was the first mutation)
    let message = outcome.message().expect("failed outcome");
    assert!(message.contains("injected failure"));
    assert_eq!(store.record(p1).unwrap().state, RELEASED);
}

#[test]
fn test_transition_validation_truncates_to_one_message() {
    // GIVEN - an affected item that breaks three rules: the new reference
    // is not Preliminary, the Delete has no affected reference, and the
    // Delete carries a new reference at all
    let store = MemoryStore::new();
    let wrong_state = released_part(&store, "P-900");
    let ecn = change_item_in_transition(&store, "ECN", "ECN-9", "In Planning", "In Work");
    AffectedItemSeed::new("ECN Affected Item", ecn, 10)
        .action("Delete")
        .new_item(wrong_state)
        .seed(&store);

    // WHEN - the validator records exactly two errors before truncating
    let mut item = wrap(&store, ecn);
    let status = Validator::new(&store).validate(&mut item).unwrap();
    assert_eq!(status.errors().len(), 2);

    // AND the displayed output is one message plus the truncation notice
    let outcome = run(&store, "ECN", ecn);
    let message = outcome.message().expect("failed outcome");
    assert_eq!(message.lines().filter(|line| !line.is_empty()).count(), 2);
    assert!(message.contains("Additional errors exist."));
}

#[test]
fn test_state_validation_reports_every_distinct_message() {
    // GIVEN - an ECN at rest in planning with no affected items
    let store = MemoryStore::new();
    let ecn = change_item(&store, "ECN", "In Planning", "ECN-2");

    // WHEN
    let outcome = run(&store, "ECN", ecn);

    // THEN - all messages shown, no truncation notice
    let message = outcome.message().expect("failed outcome");
    assert!(message.contains("has no affected items"));
    assert!(!message.contains("Additional errors exist."));
}
