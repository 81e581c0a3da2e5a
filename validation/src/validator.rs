//! The validator: materializes what the selected rules need and applies
//! them in table order.

use crate::rules::relationship::RelRuleContext;
use crate::rules::{self, ChangeRule, ExtendedRule, RuleKeying};
use crate::tables::{self, RuleSet};
use crate::{Halt, RuleFlow};
use redline_core::{ResultStatus, FAIL_FAST_LIMIT};
use redline_record::{AffectedItem, ChangeItem};
use redline_store::{Store, StoreError, StoreResult};
use tracing::debug;

/// Validates one change item per invocation.
pub struct Validator<'s> {
    store: &'s dyn Store,
}

impl<'s> Validator<'s> {
    /// Create a validator over the given store.
    pub fn new(store: &'s dyn Store) -> Self {
        Self { store }
    }

    /// Validate the change item: state mode when no transition is present,
    /// transition mode otherwise. Fail-fast truncation yields the partial
    /// status; a store failure during materialization is surfaced.
    pub fn validate(&self, item: &mut ChangeItem) -> Result<ResultStatus, StoreError> {
        let transition_mode = item.transition.is_some();
        let mut status = ResultStatus::new(transition_mode);

        let flow = if transition_mode {
            self.validate_transition(item, &mut status)
        } else {
            self.validate_state(item, &mut status)
        };

        match flow {
            Ok(()) => Ok(status),
            Err(Halt::Truncated(_)) => {
                debug!(limit = FAIL_FAST_LIMIT, "transition validation truncated");
                Ok(status)
            }
            Err(Halt::Store(error)) => Err(error),
        }
    }

    fn validate_state(&self, item: &mut ChangeItem, status: &mut ResultStatus) -> RuleFlow {
        self.check_item_exists(item, status)?;
        if !status.is_success() {
            return Ok(());
        }

        let Some(set) = tables::state_rules(item.kind, &item.record.state) else {
            debug!(kind = %item.kind, state = %item.record.state, "no state rules");
            return Ok(());
        };
        debug!(kind = %item.kind, state = %item.record.state, "state validation");
        self.run_set(item, set, status)
    }

    fn validate_transition(&self, item: &mut ChangeItem, status: &mut ResultStatus) -> RuleFlow {
        self.check_item_exists(item, status)?;
        if !status.is_success() {
            return Ok(());
        }

        let key = item
            .transition
            .as_ref()
            .expect("transition mode without a transition descriptor")
            .key();
        let Some(set) = tables::transition_rules(item.kind, &key) else {
            debug!(kind = %item.kind, %key, "no transition rules");
            return Ok(());
        };
        debug!(kind = %item.kind, %key, "transition validation");
        self.run_set(item, set, status)
    }

    fn check_item_exists(&self, item: &ChangeItem, status: &mut ResultStatus) -> RuleFlow {
        let keying = keying_of(item);
        rules::change::apply(
            ChangeRule::ItemExists,
            &item.record,
            &[],
            keying,
            self.store,
            status,
        )
    }

    fn run_set(&self, item: &mut ChangeItem, set: &RuleSet, status: &mut ResultStatus) -> RuleFlow {
        let keying = keying_of(item);

        let ChangeItem {
            record,
            affected_items,
            ..
        } = item;
        let items = affected_items.get_or_load(self.store, record.id, AffectedItem::new)?;

        for entry in items.iter_mut() {
            prepare_item(self.store, entry, set)?;
        }

        for rule in set.change {
            rules::change::apply(*rule, record, items, keying, self.store, status)?;
        }

        for entry in items.iter() {
            for rule in set.affected {
                rules::affected::apply(*rule, keying, entry, self.store, status)?;
            }
            for rule in set.extended {
                rules::extended::apply(*rule, entry, status)?;
            }

            if !set.relationship.is_empty() {
                let siblings = entry.relationships.items();
                let cx = RelRuleContext {
                    item_action: entry.item_action,
                    affected: entry.affected.get(),
                    new_item: entry.new_item.get(),
                    siblings,
                };
                for rel in siblings {
                    for rule in set.relationship {
                        rules::relationship::apply(*rule, rel, &cx, status)?;
                    }
                }
            }
        }

        Ok(())
    }
}

fn keying_of(item: &ChangeItem) -> RuleKeying {
    if item.extended {
        RuleKeying::ItemAction
    } else {
        RuleKeying::Action
    }
}

/// Materialize exactly what `set` needs from one affected item: references
/// always; relationship children (with their references and property rows)
/// when relationship rules apply; property rows and the new item's links
/// when the verify rules apply.
fn prepare_item(store: &dyn Store, item: &mut AffectedItem, set: &RuleSet) -> StoreResult<()> {
    item.resolve_refs(store)?;

    let needs_relationships = !set.relationship.is_empty()
        || set.extended.contains(&ExtendedRule::RelationshipsForbidden);
    if needs_relationships {
        let rels = item.relationships(store)?;
        for rel in rels.iter_mut() {
            rel.resolve_refs(store)?;
            rel.properties(store)?;
        }
    }

    if set.extended.contains(&ExtendedRule::VerifyItemProperties) {
        item.properties(store)?;
    }

    if set.relationship.contains(&crate::RelationshipRule::Verify) {
        if let Some(new_item) = item.new_item.get_mut() {
            new_item.relationships(store)?;
        }
    }

    Ok(())
}
