//! Affected-relationship processing.
//!
//! Relationships are processed in action-priority order — removes first,
//! so an attach or modify targeting the same `(sort_order, itemtype)` slot
//! never collides with the link it replaces — then attaches, modifies, and
//! finally the empty no-ops.

use redline_core::{RecordId, RelAction, Value};
use redline_record::{
    AffectedItem, ChangeControlledRelationship, RecordView, PART_BOM,
};
use redline_store::{ApplyRequest, Properties, Store, StoreResult};
use tracing::debug;

/// Processing priority of a relationship action.
pub(crate) fn action_priority(action: RelAction) -> u8 {
    match action {
        RelAction::Remove => 1,
        RelAction::Attach => 2,
        RelAction::Modify => 3,
        RelAction::Empty => 4,
    }
}

/// Process every affected relationship of one affected item in priority
/// order.
pub fn process_affected_relationships(
    store: &dyn Store,
    item: &mut AffectedItem,
) -> StoreResult<()> {
    {
        let rels = item.relationships(store)?;
        for rel in rels.iter_mut() {
            rel.resolve_refs(store)?;
            rel.properties(store)?;
        }
    }

    let order: Vec<usize> = {
        let rels = item.relationships.items();
        let mut indices: Vec<usize> = (0..rels.len()).collect();
        indices.sort_by_key(|&i| action_priority(rels[i].action));
        indices
    };

    for index in order {
        let action = item.relationships.items()[index].action;
        debug!(%action, "processing affected relationship");
        match action {
            RelAction::Attach => attach(store, item, index)?,
            RelAction::Modify => modify(store, item, index)?,
            RelAction::Remove => remove(store, item, index)?,
            RelAction::Empty => {}
        }
    }
    Ok(())
}

/// Attach: create a new link sourced from the new item, write the declared
/// properties, and record its id on the affected relationship row.
fn attach(store: &dyn Store, item: &mut AffectedItem, index: usize) -> StoreResult<()> {
    let new_item_id = required_new_item_id(item);

    let (rel_type, rel_id, created_id) = {
        let rels = item
            .relationships
            .loaded_mut()
            .expect("relationships materialized before processing");
        let rel = &mut rels[index];

        let mut properties = Properties::new();
        properties.insert("source_id".to_string(), Value::Id(new_item_id));
        for property in rel.properties.items() {
            properties.insert(
                property.property_name().to_string(),
                Value::String(property.new_value().to_string()),
            );
        }

        let created = store.apply(&ApplyRequest::add(PART_BOM, properties))?;
        let created = ChangeControlledRelationship::new(created);
        let created_id = created.id();
        rel.set_new_rel(created);
        (rel.item_type().to_string(), rel.id(), created_id)
    };

    persist_new_rel_column(store, &rel_type, rel_id, created_id)?;

    if let Some(new_item) = item.new_item.get_mut() {
        new_item.invalidate_relationships();
    }
    Ok(())
}

/// Modify: locate the link occupying the old relationship's slot under the
/// new item, record it, then rewrite its declared properties.
fn modify(store: &dyn Store, item: &mut AffectedItem, index: usize) -> StoreResult<()> {
    let located = locate_slot_match(store, item, index)?;

    let (rel_type, rel_id) = {
        let rels = item
            .relationships
            .loaded_mut()
            .expect("relationships materialized before processing");
        let rel = &mut rels[index];
        rel.set_new_rel(located.clone());
        (rel.item_type().to_string(), rel.id())
    };
    persist_new_rel_column(store, &rel_type, rel_id, located.id())?;

    let mut properties = Properties::new();
    for property in item.relationships.items()[index].cached_properties() {
        properties.insert(
            property.property_name().to_string(),
            Value::String(property.new_value().to_string()),
        );
    }
    store.apply(&ApplyRequest::edit(
        located.item_type().to_string(),
        located.id(),
        properties,
    ))?;

    if let Some(new_item) = item.new_item.get_mut() {
        new_item.invalidate_relationships();
    }
    Ok(())
}

/// Remove: locate the link occupying the old relationship's slot under the
/// new item, delete it, and apply the deletion signal to the cached
/// collection.
fn remove(store: &dyn Store, item: &mut AffectedItem, index: usize) -> StoreResult<()> {
    let located = locate_slot_match(store, item, index)?;

    store.apply(&ApplyRequest::delete(
        located.item_type().to_string(),
        located.id(),
    ))?;

    let new_item = item
        .new_item
        .get_mut()
        .expect("new item assigned before relationship processing");
    new_item.drop_relationship(located.id());
    Ok(())
}

/// Find the single link under the new item matching the old relationship's
/// `(source, sort_order, itemtype)` slot. Zero or several matches is a
/// defect, not a recoverable condition.
fn locate_slot_match(
    store: &dyn Store,
    item: &mut AffectedItem,
    index: usize,
) -> StoreResult<ChangeControlledRelationship> {
    let (sort_order, item_type_id) = {
        let rel = &item.relationships.items()[index];
        let old = rel
            .affected_rel()
            .expect("affected relationship reference checked during validation");
        (old.sort_order(), old.item_type_id().to_string())
    };

    let new_item = item
        .new_item
        .get_mut()
        .expect("new item assigned before relationship processing");
    let new_item_id = new_item.id();

    let links = new_item.relationships(store)?;
    let mut matches = links.iter().filter(|link| {
        link.source_id() == Some(new_item_id)
            && link.sort_order() == sort_order
            && link.item_type_id() == item_type_id
    });

    let first = matches.next().unwrap_or_else(|| {
        panic!("no relationship occupies slot (sort_order {sort_order}, itemtype {item_type_id})")
    });
    if matches.next().is_some() {
        panic!(
            "multiple relationships occupy slot (sort_order {sort_order}, itemtype {item_type_id})"
        );
    }
    Ok(first.clone())
}

fn persist_new_rel_column(
    store: &dyn Store,
    rel_type: &str,
    rel_id: RecordId,
    new_rel_id: RecordId,
) -> StoreResult<()> {
    let mut columns = Properties::new();
    columns.insert("new_rel_id".to_string(), Value::Id(new_rel_id));
    store
        .apply(&ApplyRequest::edit(rel_type.to_string(), rel_id, columns))
        .map(|_| ())
}

fn required_new_item_id(item: &AffectedItem) -> RecordId {
    item.new_item
        .get()
        .expect("new item assigned before relationship processing")
        .id()
}
