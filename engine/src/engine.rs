//! The entry point: validate, then process.

use crate::{
    EngineError, EngineResult, MessageLookup, NullPrivileges, PrivilegeBroker, PrivilegeScope,
    VariantRegistry,
};
use redline_core::{ErrorCode, RecordId, ResultStatus};
use redline_mutation::{ProcessOutcome, TransitionProcessor};
use redline_store::{Record, Store};
use redline_validation::Validator;
use tracing::debug;

/// Result of one engine run, as shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Validation passed and any transition processing completed.
    Ok,
    /// Validation failed or processing aborted; carries the formatted text.
    Error(String),
}

impl RunOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, RunOutcome::Ok)
    }

    /// The error text, when failed.
    pub fn message(&self) -> Option<&str> {
        match self {
            RunOutcome::Ok => None,
            RunOutcome::Error(message) => Some(message),
        }
    }
}

/// Drives one change item through validation and transition processing.
pub struct ChangeEngine<'a> {
    store: &'a dyn Store,
    lookup: &'a dyn MessageLookup,
    privileges: &'a dyn PrivilegeBroker,
    registry: VariantRegistry,
}

static NULL_PRIVILEGES: NullPrivileges = NullPrivileges;

impl<'a> ChangeEngine<'a> {
    /// Create an engine over the standard variant registry.
    pub fn new(store: &'a dyn Store, lookup: &'a dyn MessageLookup) -> EngineResult<Self> {
        Self::with_registry(store, lookup, VariantRegistry::standard())
    }

    /// Create an engine over a custom registry; the registry is verified
    /// exhaustively before the engine accepts it.
    pub fn with_registry(
        store: &'a dyn Store,
        lookup: &'a dyn MessageLookup,
        registry: VariantRegistry,
    ) -> EngineResult<Self> {
        registry.verify()?;
        Ok(Self {
            store,
            lookup,
            privileges: &NULL_PRIVILEGES,
            registry,
        })
    }

    /// Run under a privilege broker.
    pub fn with_privileges(mut self, privileges: &'a dyn PrivilegeBroker) -> Self {
        self.privileges = privileges;
        self
    }

    /// Fetch the change item and run it. Elevation spans the whole run and
    /// is released on every exit path.
    pub fn run(&self, item_type: &str, id: RecordId) -> EngineResult<RunOutcome> {
        let _scope = PrivilegeScope::acquire(self.privileges);

        let record = self
            .store
            .get_by_id(item_type, id)?
            .ok_or_else(|| EngineError::ChangeItemNotFound {
                item_type: item_type.to_string(),
                id,
            })?;
        self.run_record(record)
    }

    /// Run an already-fetched change-item record.
    pub fn run_record(&self, record: Record) -> EngineResult<RunOutcome> {
        let mut item = self.registry.build(self.store, record)?;
        let transition_present = item.transition.is_some();
        debug!(kind = %item.kind, transition = transition_present, "engine run");

        let status = Validator::new(self.store).validate(&mut item)?;

        if status.is_success() {
            if !transition_present {
                return Ok(RunOutcome::Ok);
            }
            return Ok(match TransitionProcessor::new(self.store).process(&mut item) {
                ProcessOutcome::Completed => RunOutcome::Ok,
                ProcessOutcome::Failed(error) => RunOutcome::Error(error.to_string()),
            });
        }

        let displayed = if transition_present {
            1
        } else {
            status.errors().len()
        };
        Ok(RunOutcome::Error(self.format_errors(&status, displayed)))
    }

    /// Render at most `displayed` distinct messages, appending the
    /// additional-errors notice when any were omitted.
    fn format_errors(&self, status: &ResultStatus, displayed: usize) -> String {
        let mut distinct: Vec<String> = Vec::new();
        for error in status.errors() {
            let text = self.lookup.lookup(error.code, &error.params);
            if !distinct.contains(&text) {
                distinct.push(text);
            }
        }

        let mut output = distinct
            .iter()
            .take(displayed)
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        if displayed < distinct.len() {
            output.push_str("\n\n");
            output.push_str(&self.lookup.lookup(ErrorCode::AdditionalErrors, &[]));
        }
        output
    }
}
