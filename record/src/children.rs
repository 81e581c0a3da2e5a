//! Lazily materialized child-record collections.

use crate::RecordView;
use redline_core::RecordId;
use redline_store::{Record, Store, StoreResult};

/// An ordered child collection fetched from the store on first access and
/// memoized for the rest of the invocation.
///
/// Invalidation is explicit: deleting a child returns control to the caller,
/// who applies the removal with [`drop_child`](Self::drop_child) or throws
/// the whole cache away with [`invalidate`](Self::invalidate). There is no
/// observer wiring between children and their collection.
#[derive(Debug, Clone)]
pub struct ChildList<T> {
    relationship: &'static str,
    items: Option<Vec<T>>,
}

impl<T> ChildList<T> {
    /// An unloaded collection for the named relationship.
    pub fn new(relationship: &'static str) -> Self {
        Self {
            relationship,
            items: None,
        }
    }

    /// The relationship this collection materializes.
    pub fn relationship(&self) -> &'static str {
        self.relationship
    }

    /// Fetch and wrap the children on first call; cached afterwards.
    pub fn get_or_load(
        &mut self,
        store: &dyn Store,
        source_id: RecordId,
        build: impl FnMut(Record) -> T,
    ) -> StoreResult<&mut Vec<T>> {
        if self.items.is_none() {
            let rows = store.children(self.relationship, source_id)?;
            self.items = Some(rows.into_iter().map(build).collect());
        }
        Ok(self.items.as_mut().unwrap())
    }

    /// The cached children.
    ///
    /// # Panics
    /// If the collection was never loaded.
    pub fn items(&self) -> &[T] {
        self.items
            .as_deref()
            .expect("child collection read before materialization")
    }

    /// Mutable view of the cached children, if loaded.
    pub fn loaded_mut(&mut self) -> Option<&mut Vec<T>> {
        self.items.as_mut()
    }

    /// True once the collection has been fetched.
    pub fn is_loaded(&self) -> bool {
        self.items.is_some()
    }

    /// Drop the cache; the next access re-fetches.
    pub fn invalidate(&mut self) {
        self.items = None;
    }
}

impl<T: RecordView> ChildList<T> {
    /// Apply a deletion signal: remove the child with the given id from the
    /// cache, if the cache is loaded.
    pub fn drop_child(&mut self, id: RecordId) {
        if let Some(items) = self.items.as_mut() {
            items.retain(|item| item.id() != id);
        }
    }
}
