//! Affected-relationship rule implementations.
//!
//! Relationship rules see their parent through `RelRuleContext`: the parent
//! item action, its resolved references, and the sibling relationships (for
//! the replacing-Attach check during Remove verification).

use crate::rules::RelationshipRule;
use crate::RuleFlow;
use redline_core::{ErrorCode, ItemAction, RelAction, ResultStatus, ValidationError};
use redline_record::{
    AffectedRelationship, ChangeControlledItem, ChangeControlledRelationship, RecordView,
};

/// Parent context handed to every relationship rule.
pub struct RelRuleContext<'a> {
    pub item_action: ItemAction,
    pub affected: Option<&'a ChangeControlledItem>,
    pub new_item: Option<&'a ChangeControlledItem>,
    pub siblings: &'a [AffectedRelationship],
}

/// Apply one relationship rule.
pub fn apply(
    rule: RelationshipRule,
    rel: &AffectedRelationship,
    cx: &RelRuleContext<'_>,
    status: &mut ResultStatus,
) -> RuleFlow {
    match rule {
        RelationshipRule::AttachRequired => attach_required(rel, cx, status),
        RelationshipRule::AffectedRelRequired => affected_rel_required(rel, status),
        RelationshipRule::SourceMatchesAffected => source_matches_affected(rel, cx, status),
        RelationshipRule::PropertyRequired => property_required(rel, status),
        RelationshipRule::Verify => verify(rel, cx, status),
    }
}

fn attach_required(
    rel: &AffectedRelationship,
    cx: &RelRuleContext<'_>,
    status: &mut ResultStatus,
) -> RuleFlow {
    if cx.item_action == ItemAction::Release && rel.action != RelAction::Attach {
        status.add_code(ErrorCode::AttachActionRequired)?;
    }
    Ok(())
}

fn affected_rel_required(rel: &AffectedRelationship, status: &mut ResultStatus) -> RuleFlow {
    let needs_ref = matches!(rel.action, RelAction::Modify | RelAction::Remove);
    if needs_ref && rel.affected_rel().is_none() {
        status.add(ValidationError::with_params(
            ErrorCode::AffectedRelRefRequired,
            [rel.action.to_string()],
        ))?;
    }
    Ok(())
}

fn source_matches_affected(
    rel: &AffectedRelationship,
    cx: &RelRuleContext<'_>,
    status: &mut ResultStatus,
) -> RuleFlow {
    let (Some(affected), Some(affected_rel)) = (cx.affected, rel.affected_rel()) else {
        return Ok(());
    };
    if affected_rel.source_id() != Some(affected.id()) {
        status.add_code(ErrorCode::AffectedRelSourceMismatch)?;
    }
    Ok(())
}

fn property_required(rel: &AffectedRelationship, status: &mut ResultStatus) -> RuleFlow {
    let needs_property = matches!(rel.action, RelAction::Attach | RelAction::Modify);
    if needs_property && rel.properties.items().is_empty() {
        status.add(ValidationError::with_params(
            ErrorCode::RelPropertyRequired,
            [rel.action.to_string()],
        ))?;
    }
    Ok(())
}

/// Post-hoc verification, evaluated only for parents whose item action
/// actually processed relationships (Release, Revise, Renumber).
fn verify(
    rel: &AffectedRelationship,
    cx: &RelRuleContext<'_>,
    status: &mut ResultStatus,
) -> RuleFlow {
    let processed = matches!(
        cx.item_action,
        ItemAction::Release | ItemAction::Revise | ItemAction::Renumber
    );
    if !processed {
        return Ok(());
    }

    match rel.action {
        RelAction::Attach | RelAction::Modify => verify_applied(rel, cx, status),
        RelAction::Remove => verify_removed(rel, cx, status),
        RelAction::Empty => Ok(()),
    }
}

/// Attach/Modify must have recorded a new relationship that still hangs off
/// the new item and carries every declared property value.
fn verify_applied(
    rel: &AffectedRelationship,
    cx: &RelRuleContext<'_>,
    status: &mut ResultStatus,
) -> RuleFlow {
    let Some(new_rel) = rel.new_rel() else {
        status.add_code(ErrorCode::NewRelRefMissing)?;
        return Ok(());
    };

    let found = cx.new_item.and_then(|item| {
        item.cached_relationships()
            .iter()
            .find(|candidate| candidate.id() == new_rel.id())
    });

    let Some(found) = found else {
        let (type_name, number) = match cx.new_item {
            Some(item) => (item.item_type().to_string(), item.item_number().to_string()),
            None => (String::new(), String::new()),
        };
        status.add(ValidationError::with_params(
            ErrorCode::NewItemMissingRelationship,
            [
                new_rel.item_type().to_string(),
                new_rel.id().to_string(),
                type_name,
                number,
            ],
        ))?;
        return Ok(());
    };

    for property in rel.cached_properties() {
        if found.record().text(property.property_name()) != property.new_value() {
            status.add(ValidationError::with_params(
                ErrorCode::RelPropertyNotApplied,
                [
                    property.property_name().to_string(),
                    property.new_value().to_string(),
                    rel.item_type().to_string(),
                    rel.id().to_string(),
                ],
            ))?;
        }
    }
    Ok(())
}

/// Remove must have left no relationship in the old slot — unless a
/// distinct Attach put a replacement into exactly that slot.
fn verify_removed(
    rel: &AffectedRelationship,
    cx: &RelRuleContext<'_>,
    status: &mut ResultStatus,
) -> RuleFlow {
    let (Some(new_item), Some(old_rel)) = (cx.new_item, rel.affected_rel()) else {
        return Ok(());
    };

    let still_present = single_slot_match(
        new_item.cached_relationships(),
        new_item.id(),
        old_rel.sort_order(),
        old_rel.item_type_id(),
    );

    let Some(still_present) = still_present else {
        return Ok(());
    };

    let replaced = cx.siblings.iter().any(|sibling| {
        sibling.action == RelAction::Attach
            && sibling.new_rel().is_some_and(|attached| {
                attached.source_id() == Some(new_item.id())
                    && attached.sort_order() == old_rel.sort_order()
                    && attached.item_type_id() == old_rel.item_type_id()
            })
    });

    if !replaced {
        status.add(ValidationError::with_params(
            ErrorCode::StaleRelationshipRemains,
            [
                new_item.item_type().to_string(),
                new_item.item_number().to_string(),
                still_present.item_type().to_string(),
                still_present.id().to_string(),
            ],
        ))?;
    }
    Ok(())
}

/// At most one relationship may occupy a `(source, sort_order, itemtype)`
/// slot; several is a data defect, not a recoverable condition.
fn single_slot_match<'a>(
    relationships: &'a [ChangeControlledRelationship],
    source: redline_core::RecordId,
    sort_order: i64,
    item_type_id: &str,
) -> Option<&'a ChangeControlledRelationship> {
    let mut matches = relationships.iter().filter(|candidate| {
        candidate.source_id() == Some(source)
            && candidate.sort_order() == sort_order
            && candidate.item_type_id() == item_type_id
    });

    let first = matches.next()?;
    if matches.next().is_some() {
        panic!(
            "multiple relationships occupy slot (source {source}, sort_order {sort_order}, itemtype {item_type_id})"
        );
    }
    Some(first)
}
