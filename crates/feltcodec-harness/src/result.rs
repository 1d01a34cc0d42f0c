//! Invocation outputs.

use crate::engine::RawExecution;
use feltcodec_core::{DecodedEvent, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded return values, named after the declared outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnValues {
    names: Vec<String>,
    values: Vec<Value>,
}

impl ReturnValues {
    pub fn new(names: Vec<String>, values: Vec<Value>) -> Self {
        Self { names, values }
    }

    /// Look up an output by its declared name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.values.get(i))
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for ReturnValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Tuple(self.values.clone()))
    }
}

/// The result of a successful call or invoke.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResult {
    /// Outputs rebuilt against the function's declared output types
    pub result: ReturnValues,
    /// Main-call events that matched a declared event, in emission order
    pub events: Vec<DecodedEvent>,
    /// The engine's raw report, including events with no declared counterpart
    pub raw: RawExecution,
}
