//! The change item wrapper.

use crate::{AffectedItem, ChildList, LifecycleTransition, RecordView};
use redline_core::ChangeKind;
use redline_store::{Record, Store, StoreResult};

/// A change item (ECN, Simple ECO, Express ECO, Express DCO) under
/// validation or transition processing.
///
/// Exactly one of two modes holds per invocation: the item is at rest
/// (`transition` is `None`, state validation applies) or mid-promotion
/// (`transition` carries the from/to pair, transition validation and
/// processing apply).
#[derive(Debug, Clone)]
pub struct ChangeItem {
    pub kind: ChangeKind,
    /// True for variants whose affected items carry the fine-grained item
    /// action and relationship/property children (Express ECO).
    pub extended: bool,
    pub record: Record,
    pub transition: Option<LifecycleTransition>,
    pub affected_items: ChildList<AffectedItem>,
}

impl ChangeItem {
    /// Wrap a change-item record. `affected_relationship` names the child
    /// rows of this variant (e.g. "ECN Affected Item").
    pub fn new(
        kind: ChangeKind,
        extended: bool,
        affected_relationship: &'static str,
        record: Record,
        transition: Option<LifecycleTransition>,
    ) -> Self {
        Self {
            kind,
            extended,
            record,
            transition,
            affected_items: ChildList::new(affected_relationship),
        }
    }

    /// Human-facing change number.
    pub fn number(&self) -> &str {
        self.record.text("item_number")
    }

    /// The in-flight transition, when mid-promotion.
    pub fn transition(&self) -> Option<&LifecycleTransition> {
        self.transition.as_ref()
    }

    /// The affected-item children, fetched once and cached.
    pub fn affected_items(&mut self, store: &dyn Store) -> StoreResult<&mut Vec<AffectedItem>> {
        let id = self.record.id;
        self.affected_items.get_or_load(store, id, AffectedItem::new)
    }
}

impl RecordView for ChangeItem {
    fn record(&self) -> &Record {
        &self.record
    }
    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }
}
