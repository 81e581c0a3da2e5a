//! The in-flight lifecycle transition descriptor.

use crate::RecordView;
use redline_store::Record;
use std::fmt;

/// Store type name of transition descriptor records.
pub const TRANSITION_TYPE: &str = "Life Cycle Transition";

/// Wraps the transition record attached to a change item mid-promotion.
#[derive(Debug, Clone)]
pub struct LifecycleTransition {
    pub record: Record,
}

impl LifecycleTransition {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    /// State the change item is leaving.
    pub fn from_state(&self) -> &str {
        self.record.text("from_state")
    }

    /// State the change item is entering.
    pub fn to_state(&self) -> &str {
        self.record.text("to_state")
    }

    /// Dispatch key used by the rule and handler tables.
    pub fn key(&self) -> String {
        format!("{}->{}", self.from_state(), self.to_state())
    }
}

impl RecordView for LifecycleTransition {
    fn record(&self) -> &Record {
        &self.record
    }
    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }
}

impl fmt::Display for LifecycleTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from_state(), self.to_state())
    }
}
