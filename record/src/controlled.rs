//! The external change-controlled records a change item modifies.

use crate::{ChildList, RecordView};
use redline_core::RecordId;
use redline_store::{Record, Store, StoreResult};

/// Concrete relationship type behind the change-controlled poly type.
// TODO: read the concrete type from the `itemtype` property once
// relationships other than Part BOM come under change control.
pub const PART_BOM: &str = "Part BOM";

/// A structural link (BOM line) under a change-controlled item.
#[derive(Debug, Clone)]
pub struct ChangeControlledRelationship {
    pub record: Record,
}

impl ChangeControlledRelationship {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    /// Owning item of this link.
    pub fn source_id(&self) -> Option<RecordId> {
        self.record.id_ref("source_id")
    }

    /// Position of the link under its owner.
    pub fn sort_order(&self) -> i64 {
        self.record.sort_order()
    }

    /// Type discriminator of the linked definition.
    pub fn item_type_id(&self) -> &str {
        self.record.text("itemtype")
    }

    /// Re-point the link at another owner (in memory).
    pub fn set_source_id(&mut self, id: RecordId) {
        self.record.set("source_id", id);
    }
}

impl RecordView for ChangeControlledRelationship {
    fn record(&self) -> &Record {
        &self.record
    }
    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }
}

/// A part or document under change control: the target of affected-item
/// references.
#[derive(Debug, Clone)]
pub struct ChangeControlledItem {
    pub record: Record,
    pub relationships: ChildList<ChangeControlledRelationship>,
}

impl ChangeControlledItem {
    pub fn new(record: Record) -> Self {
        Self {
            record,
            relationships: ChildList::new(PART_BOM),
        }
    }

    /// The item's structural links, fetched once and cached.
    pub fn relationships(
        &mut self,
        store: &dyn Store,
    ) -> StoreResult<&[ChangeControlledRelationship]> {
        let id = self.record.id;
        self.relationships
            .get_or_load(store, id, ChangeControlledRelationship::new)
            .map(|items| &items[..])
    }

    /// Cached links; panics if never fetched.
    pub fn cached_relationships(&self) -> &[ChangeControlledRelationship] {
        self.relationships.items()
    }

    /// Throw the cached links away; the next access re-fetches.
    pub fn invalidate_relationships(&mut self) {
        self.relationships.invalidate();
    }

    /// Apply a deletion signal for one link to the cache.
    pub fn drop_relationship(&mut self, id: RecordId) {
        self.relationships.drop_child(id);
    }

    /// True if any generation sharing this item's config id was released.
    pub fn has_released_generation(&self, store: &dyn Store) -> StoreResult<bool> {
        store.has_released_generation(self.item_type(), self.config_id())
    }

    /// Write a property in memory; persisting it goes through the store.
    pub fn set_property(&mut self, name: &str, value: &str) {
        self.record.set(name, value);
    }
}

impl RecordView for ChangeControlledItem {
    fn record(&self) -> &Record {
        &self.record
    }
    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }
}
