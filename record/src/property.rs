//! Property-assignment leaf records.

use crate::RecordView;
use redline_store::Record;

/// Store type name of relationship property rows.
pub const AFFECTED_RELATIONSHIP_PROPERTY: &str = "Affected Relationship Property";

/// One declared `(property_name, new_value)` pair. Used both for affected
/// item properties and affected relationship properties; the two row types
/// share this shape.
#[derive(Debug, Clone)]
pub struct PropertyRecord {
    pub record: Record,
}

impl PropertyRecord {
    pub fn new(record: Record) -> Self {
        Self { record }
    }

    /// Name of the property to write.
    pub fn property_name(&self) -> &str {
        self.record.text("property_name")
    }

    /// Value to write.
    pub fn new_value(&self) -> &str {
        self.record.text("new_value")
    }
}

impl RecordView for PropertyRecord {
    fn record(&self) -> &Record {
        &self.record
    }
    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }
}
