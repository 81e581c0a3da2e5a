//! Extended-only rule implementations (Express ECO).
//!
//! These run against materialized items: references resolved, property and
//! relationship children loaded by the validator before rule application.

use crate::rules::ExtendedRule;
use crate::RuleFlow;
use redline_core::{ErrorCode, ItemAction, ResultStatus, ValidationError, RELEASED, SUPERSEDED};
use redline_record::{AffectedItem, RecordView};

/// Apply one extended rule.
pub fn apply(rule: ExtendedRule, item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    match rule {
        ExtendedRule::ReviewForbidden => review_forbidden(item, status),
        ExtendedRule::NewReleased => new_released_for_supersede(item, status),
        ExtendedRule::AffectedSupersededOrReleased => {
            affected_superseded_or_released(item, status)
        }
        ExtendedRule::RelationshipsForbidden => relationships_forbidden(item, status),
        ExtendedRule::VerifyItemProperties => verify_item_properties(item, status),
    }
}

fn review_forbidden(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if item.item_action == ItemAction::Review {
        status.add_code(ErrorCode::ReviewActionUnsupported)?;
    }
    Ok(())
}

fn new_released_for_supersede(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if item.item_action != ItemAction::Supersede {
        return Ok(());
    }
    if let Some(new_item) = item.new_item() {
        if new_item.state() != RELEASED {
            status.add(ValidationError::with_params(
                ErrorCode::SupersedeNewRefNotReleased,
                [
                    item.item_action.to_string(),
                    new_item.item_type().to_string(),
                    new_item.item_number().to_string(),
                    new_item.state().to_string(),
                ],
            ))?;
        }
    }
    Ok(())
}

fn affected_superseded_or_released(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    if item.item_action != ItemAction::Obsolete {
        return Ok(());
    }
    if let Some(affected) = item.affected() {
        if affected.state() != SUPERSEDED && affected.state() != RELEASED {
            status.add(ValidationError::with_params(
                ErrorCode::ObsoleteAffectedRefNotReleasedOrSuperseded,
                [
                    item.item_action.to_string(),
                    affected.item_type().to_string(),
                    affected.item_number().to_string(),
                    affected.state().to_string(),
                ],
            ))?;
        }
    }
    Ok(())
}

fn relationships_forbidden(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    let forbids = matches!(
        item.item_action,
        ItemAction::Supersede | ItemAction::Obsolete | ItemAction::None
    );
    if forbids && !item.relationships.items().is_empty() {
        status.add(ValidationError::with_params(
            ErrorCode::RelationshipsNotAllowed,
            [item.item_action.to_string()],
        ))?;
    }
    Ok(())
}

/// Every declared item property must read back from the new record with
/// the declared value. A missing new record cannot have received anything.
fn verify_item_properties(item: &AffectedItem, status: &mut ResultStatus) -> RuleFlow {
    let new_item = item.new_item.get();
    for property in item.properties.items() {
        let applied = new_item.map(|n| n.record().text(property.property_name()));
        if applied != Some(property.new_value()) {
            let (type_name, number) = match new_item {
                Some(n) => (n.item_type().to_string(), n.item_number().to_string()),
                None => (String::new(), String::new()),
            };
            status.add(ValidationError::with_params(
                ErrorCode::ItemPropertyNotApplied,
                [
                    property.property_name().to_string(),
                    property.new_value().to_string(),
                    type_name,
                    number,
                ],
            ))?;
        }
    }
    Ok(())
}
