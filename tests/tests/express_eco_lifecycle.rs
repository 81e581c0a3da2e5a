//! Express ECO scenarios: fine-grained item actions with relationship and
//! property declarations.

use redline_tests::prelude::*;

struct EcoScenario {
    eco: RecordId,
    p1: RecordId,
    new_part: RecordId,
    revise_row: RecordId,
    attach_rel: RecordId,
}

/// An Express ECO mid-promotion to In Work:
/// - a Revise of released part P-1, declaring a Remove of its first BOM
///   link, a Modify of its second, and an Attach of a new one;
/// - a Release of a preliminary part with one declared item property.
fn seeded_eco(store: &MemoryStore) -> EcoScenario {
    let p1 = released_part(store, "P-001");
    let l1 = bom_link(store, p1, 10, "bolt");
    let l2 = bom_link(store, p1, 30, "nut");
    let new_part = preliminary_part(store, "N-001");

    let eco = change_item_in_transition(store, "Express ECO", "ECO-1", "In Planning", "In Work");

    let revise_row = AffectedItemSeed::new("Express ECO Affected Item", eco, 10)
        .item_action("Revise")
        .affected(p1)
        .seed(store);
    AffectedRelationshipSeed::new(revise_row, 10, "Remove")
        .affected_rel(l1)
        .seed(store);
    let modify_rel = AffectedRelationshipSeed::new(revise_row, 20, "Modify")
        .affected_rel(l2)
        .seed(store);
    property_row(store, "Affected Relationship Property", modify_rel, "quantity", "4");
    let attach_rel = AffectedRelationshipSeed::new(revise_row, 30, "Attach").seed(store);
    property_row(store, "Affected Relationship Property", attach_rel, "sort_order", "50");
    property_row(store, "Affected Relationship Property", attach_rel, "itemtype", "washer");
    property_row(store, "Affected Relationship Property", attach_rel, "quantity", "2");

    let release_row = AffectedItemSeed::new("Express ECO Affected Item", eco, 20)
        .item_action("Release")
        .new_item(new_part)
        .seed(store);
    property_row(store, "Affected Item Property", release_row, "description", "Spacer kit");

    EcoScenario {
        eco,
        p1,
        new_part,
        revise_row,
        attach_rel,
    }
}

#[test]
fn test_advance_to_work_processes_relationships_and_properties() {
    // GIVEN
    let store = MemoryStore::new();
    let scenario = seeded_eco(&store);
    store.clear_ops();

    // WHEN
    let outcome = run(&store, "Express ECO", scenario.eco);

    // THEN
    assert!(outcome.is_ok(), "unexpected outcome: {outcome:?}");

    // The revised part moved into change and got a new generation.
    assert_eq!(store.record(scenario.p1).unwrap().state, IN_CHANGE);
    let new_gen_id = store
        .record(scenario.revise_row)
        .unwrap()
        .id_ref("new_item_id")
        .expect("new generation assigned");
    let new_generation = store.record(new_gen_id).unwrap();
    assert_eq!(new_generation.int("generation"), 2);
    assert!(!new_generation.locked);

    // The new generation's links: the bolt slot removed, the nut modified,
    // the washer attached.
    let links = store.children("Part BOM", new_gen_id).unwrap();
    let slots: Vec<(i64, String)> = links
        .iter()
        .map(|link| (link.sort_order(), link.text("itemtype").to_string()))
        .collect();
    assert_eq!(
        slots,
        vec![(30, "nut".to_string()), (50, "washer".to_string())]
    );
    let nut = links.iter().find(|l| l.text("itemtype") == "nut").unwrap();
    assert_eq!(nut.text("quantity"), "4");
    let washer = links.iter().find(|l| l.text("itemtype") == "washer").unwrap();
    assert_eq!(washer.text("quantity"), "2");
    assert_eq!(washer.id_ref("source_id"), Some(new_gen_id));

    // The attach declaration recorded the created link.
    assert_eq!(
        store.record(scenario.attach_rel).unwrap().id_ref("new_rel_id"),
        Some(washer.id)
    );

    // The declared item property reached the released part's new record.
    assert_eq!(
        store.record(scenario.new_part).unwrap().text("description"),
        "Spacer kit"
    );

    // Removes run before attaches, attaches before modifies. The modify is
    // the edit of the slot-matched nut clone under the new generation.
    let modify_op = format!("apply:edit:Part BOM:{}", nut.id);
    let ops = store.ops();
    let delete = ops
        .iter()
        .position(|op| op.starts_with("apply:delete:Part BOM"))
        .expect("remove processed");
    let add = ops
        .iter()
        .position(|op| op.starts_with("apply:add:Part BOM"))
        .expect("attach processed");
    let modify = ops
        .iter()
        .position(|op| op.starts_with(&modify_op))
        .expect("modify processed");
    assert!(delete < add, "remove must precede attach");
    assert!(add < modify, "attach must precede modify");
}

#[test]
fn test_verification_passes_after_processing() {
    // GIVEN - a processed ECO settled into In Work
    let store = MemoryStore::new();
    let scenario = seeded_eco(&store);
    assert!(run(&store, "Express ECO", scenario.eco).is_ok());
    settle(&store, scenario.eco, IN_WORK);

    // WHEN - state validation re-runs the declarations as verification
    let outcome = run(&store, "Express ECO", scenario.eco);

    // THEN
    assert!(outcome.is_ok(), "verification failed: {outcome:?}");
}

#[test]
fn test_verification_flags_tampered_property() {
    // GIVEN - a processed ECO whose applied property was overwritten
    let store = MemoryStore::new();
    let scenario = seeded_eco(&store);
    assert!(run(&store, "Express ECO", scenario.eco).is_ok());
    settle(&store, scenario.eco, IN_WORK);

    let mut tampered = redline_store::Properties::new();
    tampered.insert("description".to_string(), Value::String("changed".into()));
    store
        .apply(&ApplyRequest::edit("Part", scenario.new_part, tampered))
        .unwrap();

    // WHEN
    let mut item = wrap(&store, scenario.eco);
    let status = Validator::new(&store).validate(&mut item).unwrap();

    // THEN
    let codes: Vec<ErrorCode> = status.errors().iter().map(|e| e.code).collect();
    assert!(codes.contains(&ErrorCode::ItemPropertyNotApplied));
}

#[test]
fn test_release_transition_releases_and_supersedes() {
    // GIVEN - a processed ECO settled into In Work
    let store = MemoryStore::new();
    let scenario = seeded_eco(&store);
    assert!(run(&store, "Express ECO", scenario.eco).is_ok());
    let new_gen_id = store
        .record(scenario.revise_row)
        .unwrap()
        .id_ref("new_item_id")
        .unwrap();

    // WHEN - released straight from work
    settle(&store, scenario.eco, IN_WORK);
    start_transition(&store, scenario.eco, "In Work", "Released");
    let outcome = run(&store, "Express ECO", scenario.eco);

    // THEN
    assert!(outcome.is_ok(), "unexpected outcome: {outcome:?}");
    assert_eq!(store.record(scenario.new_part).unwrap().state, RELEASED);
    assert_eq!(store.record(new_gen_id).unwrap().state, RELEASED);
    assert_eq!(store.record(scenario.p1).unwrap().state, SUPERSEDED);
}

#[test]
fn test_renumber_copies_with_fresh_config() {
    // GIVEN - an ECO renumbering a released part
    let store = MemoryStore::new();
    let part = released_part(&store, "P-500");
    let eco = change_item_in_transition(&store, "Express ECO", "ECO-5", "In Planning", "In Work");
    let row = AffectedItemSeed::new("Express ECO Affected Item", eco, 10)
        .item_action("Renumber")
        .affected(part)
        .seed(&store);

    // WHEN
    let outcome = run(&store, "Express ECO", eco);

    // THEN - a copy, not a generation: fresh config id, generation 1
    assert!(outcome.is_ok(), "unexpected outcome: {outcome:?}");
    assert_eq!(store.record(part).unwrap().state, IN_CHANGE);
    let copy_id = store
        .record(row)
        .unwrap()
        .id_ref("new_item_id")
        .expect("copy assigned");
    let copy = store.record(copy_id).unwrap();
    assert_ne!(
        copy.text("config_id"),
        store.record(part).unwrap().text("config_id")
    );
    assert_eq!(copy.int("generation"), 1);
    assert!(!copy.locked);
}

#[test]
fn test_obsolete_flow_marks_target_obsolete() {
    // GIVEN - an ECO with an Obsolete of a superseded part, validated and
    // processed through release
    let store = MemoryStore::new();
    let part = store.seed(
        Record::new("Part")
            .with_state(SUPERSEDED)
            .with("item_number", "P-600"),
    );
    let eco = change_item_in_transition(&store, "Express ECO", "ECO-6", "In Work", "Released");
    AffectedItemSeed::new("Express ECO Affected Item", eco, 10)
        .item_action("Obsolete")
        .affected(part)
        .seed(&store);

    // WHEN
    let outcome = run(&store, "Express ECO", eco);

    // THEN
    assert!(outcome.is_ok(), "unexpected outcome: {outcome:?}");
    assert_eq!(store.record(part).unwrap().state, OBSOLETE);
}
