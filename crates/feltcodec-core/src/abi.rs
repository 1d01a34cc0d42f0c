//! Interface descriptor types: the in-memory form of a contract ABI.
//!
//! These are produced once by the ABI loader in `feltcodec-registry` and are
//! read-only afterwards.

use crate::felt::Felt;
use crate::selector::selector_from_name;
use crate::types::ArgType;
use serde::{Deserialize, Serialize};

/// A named, typed parameter (function input/output, event param, struct member).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: ArgType,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: ArgType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// What kind of entry point a function descriptor came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPointKind {
    #[default]
    Function,
    Constructor,
    L1Handler,
}

/// A callable entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionAbi {
    pub name: String,
    pub kind: EntryPointKind,
    /// Inputs in declaration order: this is the calldata order.
    pub inputs: Vec<Param>,
    /// Outputs in declaration order: this is the retdata order.
    pub outputs: Vec<Param>,
}

impl FunctionAbi {
    pub fn new(name: impl Into<String>, inputs: Vec<Param>, outputs: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            kind: EntryPointKind::Function,
            inputs,
            outputs,
        }
    }

    pub fn selector(&self) -> Felt {
        selector_from_name(&self.name)
    }

    pub fn input(&self, name: &str) -> Option<&Param> {
        self.inputs.iter().find(|p| p.name == name)
    }
}

/// A struct definition; member order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    pub members: Vec<Param>,
}

impl StructDef {
    pub fn new(name: impl Into<String>, members: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }
}

/// An event definition.
///
/// Key params occupy `keys[1..]` of a raw emission (`keys[0]` is the
/// selector); data params occupy the data slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAbi {
    pub name: String,
    pub keys: Vec<Param>,
    pub data: Vec<Param>,
}

impl EventAbi {
    pub fn new(name: impl Into<String>, keys: Vec<Param>, data: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            keys,
            data,
        }
    }

    pub fn selector(&self) -> Felt {
        selector_from_name(&self.name)
    }

    /// Key params then data params: the order a raw event is rebuilt in.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.keys.iter().chain(self.data.iter())
    }
}
