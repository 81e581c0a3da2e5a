//! Affected-item rule implementations, keyed per variant.
//!
//! Both keyings share the reference-type comparison and the lock check; the
//! other seven rules gate on different actions and report through different
//! codes, because the extended variant names the item action in its
//! messages.

use crate::rules::{AffectedRule, RuleKeying};
use crate::RuleFlow;
use redline_core::{
    ChangeAction, ErrorCode, ItemAction, ResultStatus, ValidationError, PRELIMINARY, RELEASED,
};
use redline_record::{AffectedItem, ChangeControlledItem, RecordView};
use redline_store::Store;

/// Apply one affected-item rule under the variant's keying.
pub fn apply(
    rule: AffectedRule,
    keying: RuleKeying,
    item: &AffectedItem,
    store: &dyn Store,
    status: &mut ResultStatus,
) -> RuleFlow {
    match (rule, keying) {
        (AffectedRule::CompareRefTypes, _) => compare_ref_types(item, status),
        (AffectedRule::RefsNotLocked, _) => refs_not_locked(item, status),
        (AffectedRule::AffectedReleased, RuleKeying::Action) => affected_released(item, status),
        (AffectedRule::AffectedReleased, RuleKeying::ItemAction) => {
            affected_released_for_item_action(item, status)
        }
        (AffectedRule::NewPreliminary, RuleKeying::Action) => new_preliminary(item, status),
        (AffectedRule::NewPreliminary, RuleKeying::ItemAction) => {
            new_preliminary_for_release(item, status)
        }
        (AffectedRule::AffectedRequired, RuleKeying::Action) => affected_required(item, status),
        (AffectedRule::AffectedRequired, RuleKeying::ItemAction) => {
            affected_required_for_item_action(item, status)
        }
        (AffectedRule::NewRequired, RuleKeying::Action) => new_required(item, status),
        (AffectedRule::NewRequired, RuleKeying::ItemAction) => {
            new_required_for_item_action(item, status)
        }
        (AffectedRule::NewForbidden, RuleKeying::Action) => new_forbidden(item, status),
        (AffectedRule::NewForbidden, RuleKeying::ItemAction) => {
            new_forbidden_for_item_action(item, status)
        }
        (AffectedRule::AffectedForbidden, RuleKeying::Action) => affected_forbidden(item, status),
        (AffectedRule::AffectedForbidden, RuleKeying::ItemAction) => {
            affected_forbidden_for_release(item, status)
        }
        (AffectedRule::NewHasNoReleasedGeneration, RuleKeying::Action) => {
            new_has_no_released_generation(item, store, status)
        }
        (AffectedRule::NewHasNoReleasedGeneration, RuleKeying::ItemAction) => {
            new_has_no_released_generation_for_release(item, store, status)
        }
    }
}

fn named(item: &ChangeControlledItem) -> [String; 2] {
    [item.item_type().to_string(), item.item_number().to_string()]
}

fn named_with_state(item: &ChangeControlledItem) -> [String; 3] {
    [
        item.item_type().to_string(),
        item.item_number().to_string(),
        item.state().to_string(),
    ]
}

// -------------------- shared between keyings --------------------

fn compare_ref_types(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    let (Some(affected), Some(new_item)) = (item.affected(), item.new_item()) else {
        return Ok(());
    };
    if affected.item_type() != new_item.item_type() {
        status.add(ValidationError::with_params(
            ErrorCode::RefTypeMismatch,
            [
                affected.item_type().to_string(),
                affected.item_number().to_string(),
                new_item.item_type().to_string(),
                new_item.item_number().to_string(),
            ],
        ))?;
    }
    Ok(())
}

fn refs_not_locked(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if let Some(affected) = item.affected() {
        if affected.is_locked() {
            status.add(ValidationError::with_params(
                ErrorCode::RefLocked,
                named(affected),
            ))?;
        }
    }
    if let Some(new_item) = item.new_item() {
        if new_item.is_locked() {
            status.add(ValidationError::with_params(
                ErrorCode::RefLocked,
                named(new_item),
            ))?;
        }
    }
    Ok(())
}

// -------------------- action keying --------------------

fn affected_released(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if let Some(affected) = item.affected() {
        if affected.state() != RELEASED {
            status.add(ValidationError::with_params(
                ErrorCode::AffectedRefNotReleased,
                named_with_state(affected),
            ))?;
        }
    }
    Ok(())
}

fn new_preliminary(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if let Some(new_item) = item.new_item() {
        if new_item.state() != PRELIMINARY {
            status.add(ValidationError::with_params(
                ErrorCode::NewRefNotPreliminary,
                named_with_state(new_item),
            ))?;
        }
    }
    Ok(())
}

fn affected_required(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    let needs_affected = matches!(item.action, ChangeAction::Change | ChangeAction::Delete);
    if needs_affected && item.affected().is_none() {
        status.add_code(ErrorCode::AffectedRefRequired)?;
    }
    Ok(())
}

fn new_required(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if item.action == ChangeAction::Change && !item.interchangeable && item.new_item().is_none() {
        match item.affected() {
            None => status.add_code(ErrorCode::NewRefRequired)?,
            Some(affected) => status.add(ValidationError::with_params(
                ErrorCode::NewRefRequiredNamed,
                named(affected),
            ))?,
        }
    }

    if item.action == ChangeAction::Add && item.new_item().is_none() {
        status.add_code(ErrorCode::NewRefRequiredForAdd)?;
    }
    Ok(())
}

fn new_forbidden(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if item.action == ChangeAction::Delete && item.new_item().is_some() {
        match item.affected() {
            None => status.add_code(ErrorCode::NewRefForbiddenOnDelete)?,
            Some(affected) => status.add(ValidationError::with_params(
                ErrorCode::NewRefForbiddenOnDeleteNamed,
                named(affected),
            ))?,
        }
    }

    if item.action == ChangeAction::Change && item.interchangeable && item.new_item().is_some() {
        match item.affected() {
            None => status.add_code(ErrorCode::NewRefForbiddenOnChange)?,
            Some(affected) => status.add(ValidationError::with_params(
                ErrorCode::NewRefForbiddenOnChangeNamed,
                named(affected),
            ))?,
        }
    }
    Ok(())
}

fn affected_forbidden(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if item.action == ChangeAction::Add && item.affected().is_some() {
        match item.new_item() {
            None => status.add_code(ErrorCode::AffectedRefForbidden)?,
            Some(new_item) => status.add(ValidationError::with_params(
                ErrorCode::AffectedRefForbiddenNamed,
                named(new_item),
            ))?,
        }
    }
    Ok(())
}

fn new_has_no_released_generation(
    item: &AffectedItem,
    store: &dyn Store,
    status: &mut ResultStatus,
) -> RuleFlow {
    let Some(new_item) = item.new_item() else {
        return Ok(());
    };
    if item.action == ChangeAction::Add && new_item.has_released_generation(store)? {
        status.add(ValidationError::with_params(
            ErrorCode::NewRefHasReleasedGeneration,
            named(new_item),
        ))?;
    }
    Ok(())
}

// -------------------- item-action keying --------------------

fn affected_released_for_item_action(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    let gated = matches!(
        item.item_action,
        ItemAction::Revise | ItemAction::Renumber | ItemAction::Supersede
    );
    if !gated {
        return Ok(());
    }
    if let Some(affected) = item.affected() {
        if affected.state() != RELEASED {
            status.add(ValidationError::with_params(
                ErrorCode::ItemActionAffectedRefNotReleased,
                action_params(item, named_with_state(affected)),
            ))?;
        }
    }
    Ok(())
}

fn new_preliminary_for_release(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if item.item_action != ItemAction::Release {
        return Ok(());
    }
    if let Some(new_item) = item.new_item() {
        if new_item.state() != PRELIMINARY {
            status.add(ValidationError::with_params(
                ErrorCode::ReleaseNewRefNotPreliminary,
                named_with_state(new_item),
            ))?;
        }
    }
    Ok(())
}

fn affected_required_for_item_action(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    let needs_affected = matches!(
        item.item_action,
        ItemAction::Revise | ItemAction::Renumber | ItemAction::Supersede | ItemAction::Obsolete
    );
    if needs_affected && item.affected().is_none() {
        status.add(ValidationError::with_params(
            ErrorCode::ItemActionAffectedRefRequired,
            [item.item_action.to_string()],
        ))?;
    }
    Ok(())
}

fn new_required_for_item_action(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    let needs_new = matches!(item.item_action, ItemAction::Release | ItemAction::Supersede);
    if needs_new && item.new_item().is_none() {
        match item.affected() {
            None => status.add(ValidationError::with_params(
                ErrorCode::ItemActionNewRefRequired,
                [item.item_action.to_string()],
            ))?,
            Some(affected) => status.add(ValidationError::with_params(
                ErrorCode::ItemActionNewRefRequiredNamed,
                action_params(item, named(affected)),
            ))?,
        }
    }
    Ok(())
}

fn new_forbidden_for_item_action(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    let forbids_new = matches!(
        item.item_action,
        ItemAction::Revise | ItemAction::Renumber | ItemAction::Obsolete
    );
    if forbids_new && item.new_item().is_some() {
        match item.affected() {
            None => status.add(ValidationError::with_params(
                ErrorCode::ItemActionNewRefForbidden,
                [item.item_action.to_string()],
            ))?,
            Some(affected) => status.add(ValidationError::with_params(
                ErrorCode::ItemActionNewRefForbiddenNamed,
                action_params(item, named(affected)),
            ))?,
        }
    }
    Ok(())
}

fn affected_forbidden_for_release(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if item.item_action == ItemAction::Release && item.affected().is_some() {
        match item.new_item() {
            None => status.add_code(ErrorCode::ReleaseAffectedRefForbidden)?,
            Some(new_item) => status.add(ValidationError::with_params(
                ErrorCode::ReleaseAffectedRefForbiddenNamed,
                named(new_item),
            ))?,
        }
    }
    Ok(())
}

fn new_has_no_released_generation_for_release(
    item: &AffectedItem,
    store: &dyn Store,
    status: &mut ResultStatus,
) -> RuleFlow {
    let Some(new_item) = item.new_item() else {
        return Ok(());
    };
    if item.item_action == ItemAction::Release && new_item.has_released_generation(store)? {
        status.add(ValidationError::with_params(
            ErrorCode::ReleaseNewRefHasReleasedGeneration,
            named(new_item),
        ))?;
    }
    Ok(())
}

fn action_params<const N: usize>(item: &AffectedItem, rest: [String; N]) -> Vec<String> {
    let mut params = vec![item.item_action.to_string()];
    params.extend(rest);
    params
}
