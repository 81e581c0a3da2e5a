//! The batch mutation utility.
//!
//! Generic operations over ordered sequences of wrapped records. Records of
//! different underlying types are never mixed in one store call: every
//! operation groups by exact type name (preserving first-seen order) and
//! issues one bulk call per group. Empty input always short-circuits before
//! contacting the store.

use redline_core::{RecordId, Value};
use redline_record::RecordView;
use redline_store::{ApplyRequest, Record, StagedRow, Store, StoreResult, TypedId};
use std::collections::HashMap;

const PROMOTE_COMMENT: &str = "Promote set";

/// Promote all items to `to_state`, one bulk call per underlying type.
pub fn promote_all<T: RecordView>(
    store: &dyn Store,
    items: &[&T],
    to_state: &str,
) -> StoreResult<()> {
    if items.is_empty() {
        return Ok(());
    }
    for (type_name, group) in group_by_type(items) {
        let ids = ids_of(&group);
        store.promote_set(&type_name, &ids, to_state, PROMOTE_COMMENT)?;
    }
    Ok(())
}

/// Version all items, one bulk call per underlying type. Results come back
/// re-mapped to the input order: the store reports `(source, new)` pairs
/// and its ordering is not trusted; callers depend on positional
/// correspondence with the input.
pub fn version_all<T: RecordView>(store: &dyn Store, items: &[&T]) -> StoreResult<Vec<Record>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let mut by_source: HashMap<RecordId, Record> = HashMap::new();
    for (type_name, group) in group_by_type(items) {
        let ids = ids_of(&group);
        for (source, record) in store.version_set(&type_name, &ids)? {
            by_source.insert(source, record);
        }
    }

    Ok(items
        .iter()
        .map(|item| {
            by_source
                .remove(&item.id())
                .unwrap_or_else(|| panic!("store returned no version result for {}", item.id()))
        })
        .collect())
}

/// Copy all items. The store has no bulk copy primitive; one call per item,
/// preserving input order.
pub fn copy_all<T: RecordView>(store: &dyn Store, items: &[&T]) -> StoreResult<Vec<Record>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }
    items
        .iter()
        .map(|item| store.apply(&ApplyRequest::copy(item.item_type(), item.id())))
        .collect()
}

/// Lock all items, one bulk call per underlying type.
pub fn lock_all<T: RecordView>(store: &dyn Store, items: &[&T]) -> StoreResult<()> {
    if items.is_empty() {
        return Ok(());
    }
    for (type_name, group) in group_by_type(items) {
        store.lock_set(&type_name, &ids_of(&group))?;
    }
    Ok(())
}

/// Unlock all items, one bulk call per underlying type.
pub fn unlock_all<T: RecordView>(store: &dyn Store, items: &[&T]) -> StoreResult<()> {
    if items.is_empty() {
        return Ok(());
    }
    for (type_name, group) in group_by_type(items) {
        store.unlock_set(&type_name, &ids_of(&group))?;
    }
    Ok(())
}

/// Push the named columns of all items to the store in one set-based pass:
/// stage `(id, col...)` rows for every item regardless of type, run one
/// staged update per distinct type, then finish with a single unconditional
/// bulk touch across the full id list.
pub fn apply_update<T: RecordView>(
    store: &dyn Store,
    items: &[&T],
    columns: &[&str],
) -> StoreResult<()> {
    if items.is_empty() {
        return Ok(());
    }

    if !columns.is_empty() {
        let names: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        let rows: Vec<StagedRow> = items
            .iter()
            .map(|item| StagedRow {
                id: item.id(),
                columns: columns
                    .iter()
                    .map(|column| {
                        let value = item.property(column).cloned().unwrap_or(Value::Null);
                        (column.to_string(), value)
                    })
                    .collect(),
            })
            .collect();
        store.stage_update_rows(&names, &rows)?;

        for (type_name, _) in group_by_type(items) {
            store.apply_staged_update(&type_name)?;
        }
    }

    let targets: Vec<TypedId> = items
        .iter()
        .map(|item| TypedId::new(item.item_type(), item.id()))
        .collect();
    store.touch_all(&targets)
}

fn ids_of<T: RecordView>(items: &[&T]) -> Vec<RecordId> {
    items.iter().map(|item| item.id()).collect()
}

/// Group by exact underlying type name, preserving first-seen group order
/// and input order within each group.
fn group_by_type<'a, T: RecordView>(items: &[&'a T]) -> Vec<(String, Vec<&'a T>)> {
    let mut groups: Vec<(String, Vec<&'a T>)> = Vec::new();
    for item in items {
        match groups
            .iter_mut()
            .find(|(type_name, _)| type_name.as_str() == item.item_type())
        {
            Some((_, group)) => group.push(*item),
            None => groups.push((item.item_type().to_string(), vec![*item])),
        }
    }
    groups
}
