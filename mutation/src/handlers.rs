//! Transition handler building blocks and per-variant handler bodies.
//!
//! Handlers partition the affected items by action, then drive the batch
//! utility: promote affected references, version or copy new generations
//! and assign them, advance new references through review states, and run
//! the release partitions. Variant-specific filters select the partitions;
//! the mechanics are shared.

use crate::batch;
use crate::properties::process_affected_item_properties;
use crate::relationships::process_affected_relationships;
use redline_core::{ChangeAction, ItemAction, IN_CHANGE};
use redline_record::{AffectedItem, ChangeControlledItem};
use redline_store::{Record, Store, StoreResult};

/// How a new generation is produced for an affected item.
pub(crate) enum NewItemSource {
    /// Next generation of the same item (Change, Revise).
    Version,
    /// Independent copy with a fresh config id (Renumber).
    Copy,
}

/// Promote the affected references of the matching items. Items whose
/// affected reference is null fall out of the selection.
pub(crate) fn promote_affected_refs(
    store: &dyn Store,
    items: &[AffectedItem],
    select: impl Fn(&AffectedItem) -> bool,
    to_state: &str,
) -> StoreResult<()> {
    let refs: Vec<&ChangeControlledItem> = items
        .iter()
        .filter(|item| select(item))
        .filter_map(|item| item.affected.get())
        .collect();
    batch::promote_all(store, &refs, to_state)
}

/// Promote the new references of the matching items. Items whose new
/// reference is null fall out of the selection.
pub(crate) fn promote_new_refs(
    store: &dyn Store,
    items: &[AffectedItem],
    select: impl Fn(&AffectedItem) -> bool,
    to_state: &str,
) -> StoreResult<()> {
    let refs: Vec<&ChangeControlledItem> = items
        .iter()
        .filter(|item| select(item))
        .filter_map(|item| item.new_item.get())
        .collect();
    batch::promote_all(store, &refs, to_state)
}

/// Produce a new generation for each selected item and wire it in: version
/// (or copy) the affected references in bulk, unlock the results, assign
/// each as the item's new reference, then lock → bulk-update the
/// `new_item_id` column → unlock the affected-item rows.
pub(crate) fn version_and_assign(
    store: &dyn Store,
    items: &mut [AffectedItem],
    indices: &[usize],
    source: NewItemSource,
) -> StoreResult<()> {
    if indices.is_empty() {
        return Ok(());
    }

    let produced: Vec<Record> = {
        let affected_refs: Vec<&ChangeControlledItem> = indices
            .iter()
            .map(|&index| {
                items[index]
                    .affected
                    .get()
                    .expect("affected reference checked during validation")
            })
            .collect();
        match source {
            NewItemSource::Version => batch::version_all(store, &affected_refs)?,
            NewItemSource::Copy => batch::copy_all(store, &affected_refs)?,
        }
    };

    let new_items: Vec<ChangeControlledItem> =
        produced.into_iter().map(ChangeControlledItem::new).collect();
    {
        let views: Vec<&ChangeControlledItem> = new_items.iter().collect();
        batch::unlock_all(store, &views)?;
    }

    for (&index, new_item) in indices.iter().zip(new_items) {
        items[index].set_new_item(new_item);
    }

    let rows: Vec<&AffectedItem> = indices.iter().map(|&index| &items[index]).collect();
    batch::lock_all(store, &rows)?;
    batch::apply_update(store, &rows, &["new_item_id"])?;
    batch::unlock_all(store, &rows)
}

/// Promote the affected references of the selected items (by index).
fn promote_indexed_affected(
    store: &dyn Store,
    items: &[AffectedItem],
    indices: &[usize],
    to_state: &str,
) -> StoreResult<()> {
    let refs: Vec<&ChangeControlledItem> = indices
        .iter()
        .map(|&index| {
            items[index]
                .affected
                .get()
                .expect("affected reference checked during validation")
        })
        .collect();
    batch::promote_all(store, &refs, to_state)
}

fn indices_where(
    items: &[AffectedItem],
    select: impl Fn(&AffectedItem) -> bool,
) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| select(item))
        .map(|(index, _)| index)
        .collect()
}

// -------------------- variant handler bodies --------------------

/// ECN `In Planning->In Work` / Simple ECO `New->In Work`: promote every
/// non-null affected reference to In Change, then version and wire in the
/// interchangeable changes.
pub(crate) fn advance_to_work_basic(
    store: &dyn Store,
    items: &mut [AffectedItem],
) -> StoreResult<()> {
    promote_affected_refs(store, items, |_| true, IN_CHANGE)?;

    let interchangeable_changes = indices_where(items, |item| {
        item.action == ChangeAction::Change && item.interchangeable
    });
    version_and_assign(store, items, &interchangeable_changes, NewItemSource::Version)
}

/// Express DCO `New->In Work`: version and wire in the interchangeable
/// changes, then move the changed and deleted targets into change.
pub(crate) fn advance_to_work_dco(
    store: &dyn Store,
    items: &mut [AffectedItem],
) -> StoreResult<()> {
    let interchangeable_changes = indices_where(items, |item| {
        item.action == ChangeAction::Change && item.interchangeable
    });
    version_and_assign(store, items, &interchangeable_changes, NewItemSource::Version)?;

    promote_affected_refs(store, items, |item| item.action == ChangeAction::Change, IN_CHANGE)?;
    promote_affected_refs(store, items, |item| item.action == ChangeAction::Delete, IN_CHANGE)
}

/// Express ECO `In Planning->In Work` / `Plan Review->In Work`: run the
/// Release, Revise, and Renumber partitions in order. Release only applies
/// declarations; Revise and Renumber first produce the new generation.
pub(crate) fn advance_to_work_eco(
    store: &dyn Store,
    items: &mut [AffectedItem],
) -> StoreResult<()> {
    let release = indices_where(items, |item| item.item_action == ItemAction::Release);
    for &index in &release {
        process_affected_relationships(store, &mut items[index])?;
    }
    process_affected_item_properties(store, items, &release)?;

    let revise = indices_where(items, |item| item.item_action == ItemAction::Revise);
    version_and_assign(store, items, &revise, NewItemSource::Version)?;
    promote_indexed_affected(store, items, &revise, IN_CHANGE)?;
    for &index in &revise {
        process_affected_relationships(store, &mut items[index])?;
    }
    process_affected_item_properties(store, items, &revise)?;

    let renumber = indices_where(items, |item| item.item_action == ItemAction::Renumber);
    version_and_assign(store, items, &renumber, NewItemSource::Copy)?;
    promote_indexed_affected(store, items, &renumber, IN_CHANGE)?;
    for &index in &renumber {
        process_affected_relationships(store, &mut items[index])?;
    }
    process_affected_item_properties(store, items, &renumber)
}

/// The Express ECO item actions that produce a new generation to advance
/// through review and release.
pub(crate) fn eco_produces_new(item: &AffectedItem) -> bool {
    matches!(
        item.item_action,
        ItemAction::Release | ItemAction::Revise | ItemAction::Renumber
    )
}

/// The Express DCO actions that carry a new reference through review and
/// release.
pub(crate) fn dco_produces_new(item: &AffectedItem) -> bool {
    matches!(item.action, ChangeAction::Add | ChangeAction::Change)
}
