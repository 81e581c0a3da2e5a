//! The variant registry.
//!
//! Maps the record-type discriminator to a constructing specification
//! instead of switching on type strings at the call site. The registry is
//! immutable after construction and checked exhaustively: every
//! `ChangeKind` must be registered before the engine accepts it.

use crate::{EngineError, EngineResult};
use redline_core::ChangeKind;
use redline_record::{ChangeItem, LifecycleTransition, TRANSITION_TYPE};
use redline_store::{Record, Store};
use std::collections::HashMap;

/// How to build one change-item variant.
#[derive(Debug, Clone)]
pub struct VariantSpec {
    pub kind: ChangeKind,
    /// Relationship name of this variant's affected-item children.
    pub affected_relationship: &'static str,
    /// True when affected items carry the fine-grained item action and
    /// relationship/property children.
    pub extended: bool,
}

/// Registry of change-item variants, keyed by record type name.
#[derive(Debug)]
pub struct VariantRegistry {
    variants: HashMap<String, VariantSpec>,
}

impl VariantRegistry {
    /// An empty registry (use `standard` unless wiring a custom set).
    pub fn new() -> Self {
        Self {
            variants: HashMap::new(),
        }
    }

    /// The four standard variants.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(VariantSpec {
            kind: ChangeKind::Ecn,
            affected_relationship: "ECN Affected Item",
            extended: false,
        });
        registry.register(VariantSpec {
            kind: ChangeKind::SimpleEco,
            affected_relationship: "Simple ECO Affected Item",
            extended: false,
        });
        registry.register(VariantSpec {
            kind: ChangeKind::ExpressEco,
            affected_relationship: "Express ECO Affected Item",
            extended: true,
        });
        registry.register(VariantSpec {
            kind: ChangeKind::ExpressDco,
            affected_relationship: "Express DCO Affected Item",
            extended: false,
        });
        registry
    }

    /// Register a variant under its kind's type name.
    pub fn register(&mut self, spec: VariantSpec) {
        self.variants.insert(spec.kind.type_name().to_string(), spec);
    }

    /// Look a variant up by record type name.
    pub fn resolve(&self, type_name: &str) -> Option<&VariantSpec> {
        self.variants.get(type_name)
    }

    /// Verify every change kind is registered. Run once at startup.
    pub fn verify(&self) -> EngineResult<()> {
        for kind in ChangeKind::ALL {
            if !self
                .variants
                .values()
                .any(|spec| spec.kind == kind)
            {
                return Err(EngineError::IncompleteRegistry { kind });
            }
        }
        Ok(())
    }

    /// Wrap a change-item record, resolving the transition descriptor when
    /// the item is mid-promotion.
    pub fn build(&self, store: &dyn Store, record: Record) -> EngineResult<ChangeItem> {
        let spec = self
            .resolve(&record.item_type)
            .ok_or_else(|| EngineError::unknown_change_type(&record.item_type))?;

        let transition = match record.id_ref("transition") {
            None => None,
            Some(id) => {
                let transition_record = store
                    .get_by_id(TRANSITION_TYPE, id)?
                    .ok_or(EngineError::TransitionNotFound { id })?;
                Some(LifecycleTransition::new(transition_record))
            }
        };

        Ok(ChangeItem::new(
            spec.kind,
            spec.extended,
            spec.affected_relationship,
            record,
            transition,
        ))
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
