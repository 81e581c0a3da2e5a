//! Raw store records.
//!
//! A `Record` is one row of the external store: identity, type name,
//! lifecycle state, lock flag, and a property map. Reference columns
//! (`affected_id`, `new_item_id`, `transition`, ...) hold `Value::Id`.

use redline_core::{RecordId, Value};
use std::collections::HashMap;

/// Property map of a record.
pub type Properties = HashMap<String, Value>;

/// A raw store record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique identifier.
    pub id: RecordId,
    /// Store type name (e.g. "ECN", "Part", "ECN Affected Item").
    pub item_type: String,
    /// Current lifecycle state.
    pub state: String,
    /// Lock flag (claimed for editing).
    pub locked: bool,
    /// Property values.
    pub properties: Properties,
}

impl Record {
    /// Create an empty record of the given type. The id is assigned by the
    /// store on `apply`; until then it is the zero placeholder.
    pub fn new(item_type: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(0),
            item_type: item_type.into(),
            state: String::new(),
            locked: false,
            properties: Properties::new(),
        }
    }

    /// Get a property value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Get a property as text; missing or non-string maps to "".
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(Value::as_str).unwrap_or("")
    }

    /// Get a property as a record reference.
    pub fn id_ref(&self, name: &str) -> Option<RecordId> {
        self.get(name).and_then(Value::as_id)
    }

    /// Get a property as a flag; missing maps to false. String values
    /// coerce ("1"/"true"), since declared property rows carry text.
    pub fn flag(&self, name: &str) -> bool {
        match self.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Int(i)) => *i != 0,
            Some(Value::String(s)) => s == "1" || s == "true",
            _ => false,
        }
    }

    /// Get a property as an integer; missing maps to 0. String values
    /// coerce, since declared property rows carry text.
    pub fn int(&self, name: &str) -> i64 {
        match self.get(name) {
            Some(Value::Int(i)) => *i,
            Some(Value::String(s)) => s.parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Set a property value in memory. Persisting it is the caller's job.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Ordering key of child records under one parent.
    pub fn sort_order(&self) -> i64 {
        self.int("sort_order")
    }

    /// Builder-style state assignment, for seeding stores in tests.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Builder-style property assignment.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }
}

/// Build a property map from `name => value` pairs.
///
/// ```
/// use redline_store::props;
/// let p = props! { "action" => "Change", "interchangeable" => true };
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! props {
    () => { $crate::Properties::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Properties::new();
        $(map.insert($name.to_string(), redline_core::Value::from($value));)+
        map
    }};
}
