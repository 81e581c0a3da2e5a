//! Fixture builders over `MemoryStore`.

use redline_core::{RecordId, Value, PRELIMINARY, RELEASED};
use redline_engine::{ChangeEngine, EngineResult, MessageCatalog, RunOutcome, VariantRegistry};
use redline_record::{ChangeItem, TRANSITION_TYPE};
use redline_store::{ApplyRequest, MemoryStore, Properties, Record, Store};

/// Seed a released Part with the given number.
pub fn released_part(store: &MemoryStore, number: &str) -> RecordId {
    store.seed(
        Record::new("Part")
            .with_state(RELEASED)
            .with("item_number", number)
            .with("is_released", true),
    )
}

/// Seed a preliminary (never released) Part.
pub fn preliminary_part(store: &MemoryStore, number: &str) -> RecordId {
    store.seed(
        Record::new("Part")
            .with_state(PRELIMINARY)
            .with("item_number", number),
    )
}

/// Seed a Part BOM row under `source`.
pub fn bom_link(store: &MemoryStore, source: RecordId, sort_order: i64, itemtype: &str) -> RecordId {
    store.seed(
        Record::new("Part BOM")
            .with("source_id", source)
            .with("sort_order", sort_order)
            .with("itemtype", itemtype),
    )
}

/// Seed a change item at rest in `state`.
pub fn change_item(store: &MemoryStore, type_name: &str, state: &str, number: &str) -> RecordId {
    store.seed(
        Record::new(type_name)
            .with_state(state)
            .with("item_number", number),
    )
}

/// Seed a change item carrying an in-flight transition descriptor.
pub fn change_item_in_transition(
    store: &MemoryStore,
    type_name: &str,
    number: &str,
    from: &str,
    to: &str,
) -> RecordId {
    let transition = store.seed(
        Record::new(TRANSITION_TYPE)
            .with("from_state", from)
            .with("to_state", to),
    );
    store.seed(
        Record::new(type_name)
            .with_state(from)
            .with("item_number", number)
            .with("transition", transition),
    )
}

/// Move an existing change item into a new in-flight transition, updating
/// its state to the from-side.
pub fn start_transition(store: &MemoryStore, change: RecordId, from: &str, to: &str) {
    let transition = store.seed(
        Record::new(TRANSITION_TYPE)
            .with("from_state", from)
            .with("to_state", to),
    );
    let item_type = store.record(change).unwrap().item_type;
    let mut properties = Properties::new();
    properties.insert("transition".to_string(), Value::Id(transition));
    store
        .apply(&ApplyRequest::edit(item_type, change, properties))
        .unwrap();
    set_state(store, change, from);
}

/// Settle a change item at rest in `state`: clear the transition and set
/// the state, as the surrounding lifecycle engine would after promotion.
pub fn settle(store: &MemoryStore, change: RecordId, state: &str) {
    let item_type = store.record(change).unwrap().item_type;
    let mut properties = Properties::new();
    properties.insert("transition".to_string(), Value::Null);
    store
        .apply(&ApplyRequest::edit(item_type, change, properties))
        .unwrap();
    set_state(store, change, state);
}

fn set_state(store: &MemoryStore, id: RecordId, state: &str) {
    let record = store.record(id).unwrap();
    store
        .promote(&record.item_type, id, state, "fixture")
        .unwrap();
}

/// Builder for affected-item child rows.
pub struct AffectedItemSeed {
    record: Record,
}

impl AffectedItemSeed {
    /// Start a child row of `change` under the given relationship name.
    pub fn new(relationship: &str, change: RecordId, sort_order: i64) -> Self {
        Self {
            record: Record::new(relationship)
                .with("source_id", change)
                .with("sort_order", sort_order),
        }
    }

    pub fn action(mut self, action: &str) -> Self {
        self.record.set("action", action);
        self
    }

    pub fn item_action(mut self, item_action: &str) -> Self {
        self.record.set("item_action", item_action);
        self
    }

    pub fn interchangeable(mut self) -> Self {
        self.record.set("interchangeable", true);
        self
    }

    pub fn affected(mut self, id: RecordId) -> Self {
        self.record.set("affected_id", id);
        self
    }

    pub fn new_item(mut self, id: RecordId) -> Self {
        self.record.set("new_item_id", id);
        self
    }

    pub fn seed(self, store: &MemoryStore) -> RecordId {
        store.seed(self.record)
    }
}

/// Seed an affected-relationship row under an affected item.
pub struct AffectedRelationshipSeed {
    record: Record,
}

impl AffectedRelationshipSeed {
    pub fn new(affected_item: RecordId, sort_order: i64, rel_action: &str) -> Self {
        Self {
            record: Record::new("Affected Item Relationship")
                .with("source_id", affected_item)
                .with("sort_order", sort_order)
                .with("rel_action", rel_action),
        }
    }

    pub fn affected_rel(mut self, id: RecordId) -> Self {
        self.record.set("affected_rel_id", id);
        self
    }

    pub fn seed(self, store: &MemoryStore) -> RecordId {
        store.seed(self.record)
    }
}

/// Seed a `(property, value)` row under an affected item or affected
/// relationship.
pub fn property_row(
    store: &MemoryStore,
    relationship: &str,
    parent: RecordId,
    name: &str,
    value: &str,
) -> RecordId {
    store.seed(
        Record::new(relationship)
            .with("source_id", parent)
            .with("property_name", name)
            .with("new_value", value),
    )
}

/// Run the engine entry point over a stored change item.
pub fn run(store: &MemoryStore, item_type: &str, id: RecordId) -> RunOutcome {
    try_run(store, item_type, id).expect("engine run failed")
}

/// Run the engine entry point, surfacing engine errors.
pub fn try_run(store: &MemoryStore, item_type: &str, id: RecordId) -> EngineResult<RunOutcome> {
    let catalog = MessageCatalog::new();
    let engine = ChangeEngine::new(store, &catalog)?;
    engine.run(item_type, id)
}

/// Wrap a stored change item the way the entry point would, for driving
/// the validator or processor directly.
pub fn wrap(store: &MemoryStore, id: RecordId) -> ChangeItem {
    VariantRegistry::standard()
        .build(store, store.record(id).unwrap())
        .expect("change item wraps")
}
