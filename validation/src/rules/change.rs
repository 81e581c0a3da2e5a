//! Change-item level rule implementations.

use crate::rules::{ChangeRule, RuleKeying};
use crate::RuleFlow;
use redline_core::{ChangeAction, ErrorCode, ItemAction, ResultStatus, ValidationError};
use redline_record::AffectedItem;
use redline_store::{Record, Store};

/// Apply one change-item rule.
pub fn apply(
    rule: ChangeRule,
    change: &Record,
    items: &[AffectedItem],
    keying: RuleKeying,
    store: &dyn Store,
    status: &mut ResultStatus,
) -> RuleFlow {
    match rule {
        ChangeRule::ItemExists => item_exists(change, store, status),
        ChangeRule::AffectedItemsExist => affected_items_exist(change, items, status),
        ChangeRule::NonNoneActionExists => non_none_action_exists(change, items, keying, status),
    }
}

/// The change item must be fetchable from the store. A store failure here
/// is recorded as a validation error, not raised.
fn item_exists(change: &Record, store: &dyn Store, status: &mut ResultStatus) -> RuleFlow {
    match store.get_by_id(&change.item_type, change.id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) | Err(_) => {
            status.add_code(ErrorCode::ChangeItemNotFound)?;
            Ok(())
        }
    }
}

fn affected_items_exist(
    change: &Record,
    items: &[AffectedItem],
    status: &mut ResultStatus,
) -> RuleFlow {
    if items.is_empty() {
        status.add(ValidationError::with_params(
            ErrorCode::AffectedItemsRequired,
            [change.item_type.as_str(), change.text("item_number")],
        ))?;
    }
    Ok(())
}

/// A change item whose affected items all carry the no-op action has
/// nothing to process. Gated on the collection being non-empty: an empty
/// collection is already the previous rule's error.
fn non_none_action_exists(
    change: &Record,
    items: &[AffectedItem],
    keying: RuleKeying,
    status: &mut ResultStatus,
) -> RuleFlow {
    if items.is_empty() {
        return Ok(());
    }

    let (actionable, code) = match keying {
        RuleKeying::Action => (
            items.iter().any(|item| item.action != ChangeAction::None),
            ErrorCode::AffectedActionRequired,
        ),
        RuleKeying::ItemAction => (
            items.iter().any(|item| item.item_action != ItemAction::None),
            ErrorCode::AffectedItemActionRequired,
        ),
    };

    if !actionable {
        status.add(ValidationError::with_params(
            code,
            [change.item_type.as_str(), change.text("item_number")],
        ))?;
    }
    Ok(())
}
