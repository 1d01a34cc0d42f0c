//! Raw and decoded event types.

use crate::felt::Felt;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A low-level emission as reported by the execution engine.
///
/// High-level events put their selector in `keys[0]`; anything emitted
/// directly through the syscall may carry arbitrary keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub keys: Vec<Felt>,
    pub data: Vec<Felt>,
}

impl RawEvent {
    pub fn new(keys: Vec<Felt>, data: Vec<Felt>) -> Self {
        Self { keys, data }
    }

    /// `keys[0]`, the candidate event selector, if present.
    pub fn selector(&self) -> Option<&Felt> {
        self.keys.first()
    }
}

/// A raw event matched against a declared event and rebuilt into values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    /// Declared event name, e.g. "Transfer"
    pub name: String,
    /// The selector the raw event was matched by
    pub selector: Felt,
    /// Key params then data params, in declaration order
    pub fields: Vec<(String, Value)>,
}

impl DecodedEvent {
    /// Get a field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_event_selector() {
        let ev = RawEvent::new(vec![Felt::from(99u64), Felt::from(7u64)], vec![]);
        assert_eq!(ev.selector(), Some(&Felt::from(99u64)));
        assert!(RawEvent::default().selector().is_none());
    }

    #[test]
    fn decoded_event_field_lookup() {
        let ev = DecodedEvent {
            name: "E".into(),
            selector: Felt::from(99u64),
            fields: vec![("a".into(), Value::felt(7u64))],
        };
        assert_eq!(ev.field("a"), Some(&Value::felt(7u64)));
        assert!(ev.field("b").is_none());
    }
}
