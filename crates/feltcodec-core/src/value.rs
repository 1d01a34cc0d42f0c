//! Structured values: what callers supply and what the building engine
//! reconstructs from flat felt sequences.

use crate::felt::Felt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A structured value shaped by an [`ArgType`](crate::types::ArgType).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Felt(Felt),
    Tuple(Vec<Value>),
    /// A named record; field order is the struct's declaration order.
    Struct {
        name: String,
        fields: Vec<(String, Value)>,
    },
    Array(Vec<Value>),
}

impl Value {
    pub fn felt(v: impl Into<Felt>) -> Self {
        Value::Felt(v.into())
    }

    pub fn tuple(members: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(members.into_iter().collect())
    }

    pub fn array(elems: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(elems.into_iter().collect())
    }

    /// Build a struct record from `(field, value)` pairs in declaration order.
    pub fn record<N, I>(name: impl Into<String>, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
    {
        Value::Struct {
            name: name.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// An array of felts.
    pub fn felts(values: impl IntoIterator<Item = u64>) -> Self {
        Value::Array(values.into_iter().map(Value::felt).collect())
    }

    pub fn as_felt(&self) -> Option<Felt> {
        match self {
            Value::Felt(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(v) | Value::Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Look up a struct field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct { fields, .. } => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Short description of this value's shape, used in mismatch reports.
    pub fn shape(&self) -> String {
        match self {
            Value::Felt(_) => "felt".into(),
            Value::Tuple(v) => format!("tuple of {} members", v.len()),
            Value::Struct { name, fields } => {
                let names: Vec<_> = fields.iter().map(|(n, _)| n.as_str()).collect();
                format!("struct {name} {{{}}}", names.join(", "))
            }
            Value::Array(v) => format!("array of {} elements", v.len()),
        }
    }
}

impl From<Felt> for Value {
    fn from(f: Felt) -> Self {
        Value::Felt(f)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Felt(Felt::from(v))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Felt(v) => write!(f, "{v}"),
            Value::Tuple(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                if parts.len() == 1 {
                    write!(f, "({},)", parts[0])
                } else {
                    write!(f, "({})", parts.join(", "))
                }
            }
            Value::Struct { name, fields } => {
                let parts: Vec<_> = fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{name} {{ {} }}", parts.join(", "))
            }
            Value::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}
