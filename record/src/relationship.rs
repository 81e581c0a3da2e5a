//! Affected relationship wrappers.

use crate::{
    ChangeControlledRelationship, ChildList, LazyRef, PropertyRecord, RecordView,
    AFFECTED_RELATIONSHIP_PROPERTY,
};
use redline_core::RelAction;
use redline_store::{Record, Store, StoreResult, ANY_TYPE};
use tracing::warn;

/// A declared change to one structural link of the affected item: attach a
/// new link, modify an existing one, or remove it.
#[derive(Debug, Clone)]
pub struct AffectedRelationship {
    pub record: Record,
    pub action: RelAction,
    /// The existing link being modified or removed.
    pub affected_rel: LazyRef<ChangeControlledRelationship>,
    /// The link created or located under the new item during processing.
    pub new_rel: LazyRef<ChangeControlledRelationship>,
    /// Declared `(property, value)` rows.
    pub properties: ChildList<PropertyRecord>,
}

impl AffectedRelationship {
    pub fn new(record: Record) -> Self {
        let raw = record.text("rel_action");
        let action = RelAction::parse(raw);
        if action == RelAction::Empty && !raw.is_empty() && raw != "Empty" {
            warn!(value = raw, id = %record.id, "unknown rel_action value");
        }
        Self {
            record,
            action,
            affected_rel: LazyRef::default(),
            new_rel: LazyRef::default(),
            properties: ChildList::new(AFFECTED_RELATIONSHIP_PROPERTY),
        }
    }

    /// Resolve both relationship references, once.
    pub fn resolve_refs(&mut self, store: &dyn Store) -> StoreResult<()> {
        let affected_id = self.record.id_ref("affected_rel_id");
        self.affected_rel.resolve_with(|| match affected_id {
            Some(id) => Ok(store
                .get_by_id(ANY_TYPE, id)?
                .map(ChangeControlledRelationship::new)),
            None => Ok(None),
        })?;
        let new_id = self.record.id_ref("new_rel_id");
        self.new_rel.resolve_with(|| match new_id {
            Some(id) => Ok(store
                .get_by_id(ANY_TYPE, id)?
                .map(ChangeControlledRelationship::new)),
            None => Ok(None),
        })
    }

    /// The existing link, post-resolution.
    pub fn affected_rel(&self) -> Option<&ChangeControlledRelationship> {
        self.affected_rel.get()
    }

    /// The new link, post-resolution or post-assignment.
    pub fn new_rel(&self) -> Option<&ChangeControlledRelationship> {
        self.new_rel.get()
    }

    /// Record a freshly created or located link as the new reference, in
    /// memory. The `new_rel_id` column still has to be persisted.
    pub fn set_new_rel(&mut self, rel: ChangeControlledRelationship) {
        self.record.set("new_rel_id", rel.id());
        self.new_rel.set(rel);
    }

    /// Declared property rows, fetched once and cached.
    pub fn properties(&mut self, store: &dyn Store) -> StoreResult<&[PropertyRecord]> {
        let id = self.record.id;
        self.properties
            .get_or_load(store, id, PropertyRecord::new)
            .map(|items| &items[..])
    }

    /// Cached property rows; panics if never fetched.
    pub fn cached_properties(&self) -> &[PropertyRecord] {
        self.properties.items()
    }
}

impl RecordView for AffectedRelationship {
    fn record(&self) -> &Record {
        &self.record
    }
    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }
}
