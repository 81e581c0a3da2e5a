//! Common accessor surface shared by every record wrapper.

use redline_core::{RecordId, Value};
use redline_store::Record;

/// A typed view over one raw store record. The batch mutation utility is
/// generic over this trait: anything that exposes its record can be
/// promoted, versioned, locked, and bulk-updated.
pub trait RecordView {
    /// The wrapped record.
    fn record(&self) -> &Record;

    /// Mutable access to the wrapped record (in-memory only; persisting a
    /// change always goes through the store).
    fn record_mut(&mut self) -> &mut Record;

    /// Record identity.
    fn id(&self) -> RecordId {
        self.record().id
    }

    /// Underlying store type name.
    fn item_type(&self) -> &str {
        &self.record().item_type
    }

    /// Current lifecycle state.
    fn state(&self) -> &str {
        &self.record().state
    }

    /// Lock flag.
    fn is_locked(&self) -> bool {
        self.record().locked
    }

    /// Human-facing item number.
    fn item_number(&self) -> &str {
        self.record().text("item_number")
    }

    /// Configuration id shared by all generations of one item.
    fn config_id(&self) -> &str {
        self.record().text("config_id")
    }

    /// Raw property access.
    fn property(&self, name: &str) -> Option<&Value> {
        self.record().get(name)
    }
}
