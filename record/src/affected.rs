//! Affected item wrappers.

use crate::{
    AffectedRelationship, ChangeControlledItem, ChildList, LazyRef, PropertyRecord, RecordView,
};
use redline_core::{ChangeAction, ItemAction};
use redline_store::{Record, Store, StoreResult, ANY_TYPE};
use tracing::warn;

/// Relationship name of affected-relationship child rows.
pub const AFFECTED_ITEM_RELATIONSHIP: &str = "Affected Item Relationship";

/// Relationship name of affected-item property rows.
pub const AFFECTED_ITEM_PROPERTY: &str = "Affected Item Property";

/// One target of a change item: which existing record it touches
/// (`affected`), which new record replaces it (`new_item`), and how.
///
/// The coarse `action` drives ECN/Simple ECO/Express DCO behavior; the
/// fine-grained `item_action` plus the relationship and property children
/// drive Express ECO behavior. Both are always parsed; the rule tables
/// decide which one applies.
#[derive(Debug, Clone)]
pub struct AffectedItem {
    pub record: Record,
    pub action: ChangeAction,
    pub item_action: ItemAction,
    pub interchangeable: bool,
    pub affected: LazyRef<ChangeControlledItem>,
    pub new_item: LazyRef<ChangeControlledItem>,
    pub relationships: ChildList<AffectedRelationship>,
    pub properties: ChildList<PropertyRecord>,
}

impl AffectedItem {
    pub fn new(record: Record) -> Self {
        let raw_action = record.text("action");
        let action = ChangeAction::parse(raw_action);
        if action == ChangeAction::None && !raw_action.is_empty() && raw_action != "None" {
            warn!(value = raw_action, id = %record.id, "unknown action value");
        }
        let item_action = ItemAction::parse(record.text("item_action"));
        let interchangeable = record.flag("interchangeable");
        Self {
            record,
            action,
            item_action,
            interchangeable,
            affected: LazyRef::default(),
            new_item: LazyRef::default(),
            relationships: ChildList::new(AFFECTED_ITEM_RELATIONSHIP),
            properties: ChildList::new(AFFECTED_ITEM_PROPERTY),
        }
    }

    /// Resolve the affected and new references, once each.
    pub fn resolve_refs(&mut self, store: &dyn Store) -> StoreResult<()> {
        let affected_id = self.record.id_ref("affected_id");
        self.affected.resolve_with(|| match affected_id {
            Some(id) => Ok(store.get_by_id(ANY_TYPE, id)?.map(ChangeControlledItem::new)),
            None => Ok(None),
        })?;
        let new_id = self.record.id_ref("new_item_id");
        self.new_item.resolve_with(|| match new_id {
            Some(id) => Ok(store.get_by_id(ANY_TYPE, id)?.map(ChangeControlledItem::new)),
            None => Ok(None),
        })
    }

    /// The existing record this item changes, post-resolution.
    pub fn affected(&self) -> Option<&ChangeControlledItem> {
        self.affected.get()
    }

    /// Mutable view of the existing record.
    pub fn affected_mut(&mut self) -> Option<&mut ChangeControlledItem> {
        self.affected.get_mut()
    }

    /// The new/target record, post-resolution or post-assignment.
    pub fn new_item(&self) -> Option<&ChangeControlledItem> {
        self.new_item.get()
    }

    /// Mutable view of the new/target record.
    pub fn new_item_mut(&mut self) -> Option<&mut ChangeControlledItem> {
        self.new_item.get_mut()
    }

    /// Assign the new-item reference (in memory) after versioning or
    /// copying. The `new_item_id` column still has to be persisted.
    pub fn set_new_item(&mut self, item: ChangeControlledItem) {
        self.record.set("new_item_id", item.id());
        self.new_item.set(item);
    }

    /// Affected-relationship children, fetched once and cached.
    pub fn relationships(&mut self, store: &dyn Store) -> StoreResult<&mut Vec<AffectedRelationship>> {
        let id = self.record.id;
        self.relationships
            .get_or_load(store, id, AffectedRelationship::new)
    }

    /// Declared item-property rows, fetched once and cached.
    pub fn properties(&mut self, store: &dyn Store) -> StoreResult<&[PropertyRecord]> {
        let id = self.record.id;
        self.properties
            .get_or_load(store, id, PropertyRecord::new)
            .map(|items| &items[..])
    }
}

impl RecordView for AffectedItem {
    fn record(&self) -> &Record {
        &self.record
    }
    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }
}
