//! The transition processor.

use crate::handlers;
use redline_core::{
    ChangeAction, ChangeKind, ItemAction, IN_CHANGE, IN_REVIEW, OBSOLETE, PRELIMINARY, RELEASED,
    SUPERSEDED,
};
use redline_record::{AffectedItem, ChangeItem, RecordView};
use redline_store::{Store, StoreError, StoreResult};
use tracing::{debug, warn};

/// How transition processing ended. A store failure inside a handler is
/// caught here and carried as the failed outcome; any other failure is a
/// violated invariant and propagates as a panic.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// The handler ran to completion — or no handler was mapped, which is a
    /// deliberate no-op, not an error.
    Completed,
    /// A store call failed mid-handler. Mutations already committed before
    /// the failing step remain in place.
    Failed(StoreError),
}

impl ProcessOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ProcessOutcome::Completed)
    }
}

/// Dispatches a validated change item's transition to its handler.
pub struct TransitionProcessor<'s> {
    store: &'s dyn Store,
}

impl<'s> TransitionProcessor<'s> {
    /// Create a processor over the given store.
    pub fn new(store: &'s dyn Store) -> Self {
        Self { store }
    }

    /// Process the change item's transition. Without a transition this is a
    /// no-op success.
    pub fn process(&self, item: &mut ChangeItem) -> ProcessOutcome {
        let Some(transition) = item.transition.as_ref() else {
            return ProcessOutcome::Completed;
        };
        let key = transition.key();
        debug!(kind = %item.kind, %key, "processing transition");

        match self.dispatch(item, &key) {
            Ok(()) => ProcessOutcome::Completed,
            Err(error) => {
                warn!(%error, "transition processing aborted");
                ProcessOutcome::Failed(error)
            }
        }
    }

    fn dispatch(&self, item: &mut ChangeItem, key: &str) -> StoreResult<()> {
        let store = self.store;
        let ChangeItem {
            kind,
            record,
            affected_items,
            ..
        } = item;

        let items = affected_items.get_or_load(store, record.id, AffectedItem::new)?;
        for entry in items.iter_mut() {
            entry.resolve_refs(store)?;
        }

        match (*kind, key) {
            // -------------------- ECN / Simple ECO --------------------
            (ChangeKind::Ecn, "In Planning->In Work")
            | (ChangeKind::SimpleEco, "New->In Work") => {
                handlers::advance_to_work_basic(store, items)
            }
            (ChangeKind::Ecn | ChangeKind::SimpleEco, "In Work->In Review") => {
                handlers::promote_new_refs(
                    store,
                    items,
                    |entry| {
                        entry.new_item.get().is_some_and(|new_item| {
                            new_item.state() != RELEASED && new_item.state() != IN_REVIEW
                        })
                    },
                    IN_REVIEW,
                )
            }
            (ChangeKind::Ecn | ChangeKind::SimpleEco, "In Review->In Work") => {
                handlers::promote_new_refs(
                    store,
                    items,
                    |entry| {
                        entry.new_item.get().is_some_and(|new_item| {
                            new_item.state() != RELEASED && new_item.state() != PRELIMINARY
                        })
                    },
                    PRELIMINARY,
                )
            }
            (ChangeKind::Ecn | ChangeKind::SimpleEco, "In Review->Released") => {
                handlers::promote_new_refs(
                    store,
                    items,
                    |entry| {
                        entry
                            .new_item
                            .get()
                            .is_some_and(|new_item| new_item.state() != RELEASED)
                    },
                    RELEASED,
                )?;
                handlers::promote_affected_refs(
                    store,
                    items,
                    |entry| {
                        entry
                            .affected
                            .get()
                            .is_some_and(|affected| affected.state() == IN_CHANGE)
                    },
                    SUPERSEDED,
                )
            }

            // -------------------- Express ECO --------------------
            (ChangeKind::ExpressEco, "In Planning->In Work" | "Plan Review->In Work") => {
                handlers::advance_to_work_eco(store, items)
            }
            (ChangeKind::ExpressEco, "In Work->In Review") => {
                handlers::promote_new_refs(store, items, handlers::eco_produces_new, IN_REVIEW)
            }
            (ChangeKind::ExpressEco, "In Review->In Work") => {
                handlers::promote_new_refs(store, items, handlers::eco_produces_new, PRELIMINARY)
            }
            (ChangeKind::ExpressEco, "In Work->Released" | "In Review->Released") => {
                handlers::promote_new_refs(store, items, handlers::eco_produces_new, RELEASED)?;
                handlers::promote_affected_refs(
                    store,
                    items,
                    |entry| {
                        matches!(
                            entry.item_action,
                            ItemAction::Revise | ItemAction::Renumber | ItemAction::Supersede
                        )
                    },
                    SUPERSEDED,
                )?;
                handlers::promote_affected_refs(
                    store,
                    items,
                    |entry| entry.item_action == ItemAction::Obsolete,
                    OBSOLETE,
                )
            }

            // -------------------- Express DCO --------------------
            (ChangeKind::ExpressDco, "New->In Work") => {
                handlers::advance_to_work_dco(store, items)
            }
            (ChangeKind::ExpressDco, "In Work->In Review") => {
                handlers::promote_new_refs(store, items, handlers::dco_produces_new, IN_REVIEW)
            }
            (ChangeKind::ExpressDco, "In Review->In Work") => {
                handlers::promote_new_refs(store, items, handlers::dco_produces_new, PRELIMINARY)
            }
            (ChangeKind::ExpressDco, "In Work->Released" | "In Review->Released") => {
                handlers::promote_new_refs(store, items, handlers::dco_produces_new, RELEASED)?;
                handlers::promote_affected_refs(
                    store,
                    items,
                    |entry| {
                        matches!(entry.action, ChangeAction::Delete | ChangeAction::Change)
                    },
                    SUPERSEDED,
                )
            }

            // Unmatched transitions run no handler: states with no extra
            // processing requirement.
            _ => {
                debug!(kind = %kind, %key, "no transition handler");
                Ok(())
            }
        }
    }
}
