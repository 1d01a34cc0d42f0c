//! JSON ABI loader.
//!
//! Converts the compiler's JSON ABI (a list of `function`, `constructor`,
//! `l1_handler`, `struct` and `event` entries) into a validated
//! [`ContractInterface`].
//!
//! Arrays are declared as two entries, a `x_len: felt` followed by `x: T*`.
//! The loader folds every such pair into a single array parameter named `x`,
//! so callers never supply lengths themselves.

use crate::events::EventRegistry;
use crate::interface::ContractInterface;
use crate::structs::StructRegistry;
use feltcodec_core::{
    error::AbiError, ArgType, EntryPointKind, EventAbi, FunctionAbi, Param, StructDef,
};
use serde::Deserialize;
use tracing::debug;

// ─── Raw ABI serde types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AbiEntryRaw {
    Function(FunctionRaw),
    Constructor(FunctionRaw),
    L1Handler(FunctionRaw),
    Struct(StructRaw),
    Event(EventRaw),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct FunctionRaw {
    name: String,
    #[serde(default)]
    inputs: Vec<ParamRaw>,
    #[serde(default)]
    outputs: Vec<ParamRaw>,
}

#[derive(Debug, Deserialize)]
struct StructRaw {
    name: String,
    #[serde(default)]
    members: Vec<ParamRaw>,
}

#[derive(Debug, Deserialize)]
struct EventRaw {
    name: String,
    #[serde(default)]
    keys: Vec<ParamRaw>,
    #[serde(default)]
    data: Vec<ParamRaw>,
}

#[derive(Debug, Deserialize)]
struct ParamRaw {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

// ─── Loader ───────────────────────────────────────────────────────────────────

pub struct AbiLoader;

impl AbiLoader {
    /// Parse a JSON ABI document into a validated interface.
    pub fn parse(json: &str) -> Result<ContractInterface, AbiError> {
        let entries: Vec<AbiEntryRaw> = serde_json::from_str(json)?;

        let mut functions = Vec::new();
        let mut structs = Vec::new();
        let mut events = Vec::new();

        for entry in entries {
            match entry {
                AbiEntryRaw::Function(raw) => {
                    functions.push(Self::function(raw, EntryPointKind::Function)?)
                }
                AbiEntryRaw::Constructor(raw) => {
                    functions.push(Self::function(raw, EntryPointKind::Constructor)?)
                }
                AbiEntryRaw::L1Handler(raw) => {
                    functions.push(Self::function(raw, EntryPointKind::L1Handler)?)
                }
                AbiEntryRaw::Struct(raw) => {
                    // Struct members are real fields; no `_len` folding.
                    let mut members = Vec::with_capacity(raw.members.len());
                    for m in raw.members {
                        members.push(Param::new(m.name, m.ty.parse()?));
                    }
                    structs.push(StructDef::new(raw.name, members));
                }
                AbiEntryRaw::Event(raw) => {
                    let keys = fold_array_lengths(&raw.name, raw.keys)?;
                    let data = fold_array_lengths(&raw.name, raw.data)?;
                    events.push(EventAbi::new(raw.name, keys, data));
                }
                AbiEntryRaw::Unknown => {
                    debug!("skipping ABI entry of unsupported type");
                }
            }
        }

        ContractInterface::new(
            functions,
            StructRegistry::from_defs(structs)?,
            EventRegistry::from_defs(events)?,
        )
    }

    fn function(raw: FunctionRaw, kind: EntryPointKind) -> Result<FunctionAbi, AbiError> {
        let inputs = fold_array_lengths(&raw.name, raw.inputs)?;
        let outputs = fold_array_lengths(&raw.name, raw.outputs)?;
        Ok(FunctionAbi {
            name: raw.name,
            kind,
            inputs,
            outputs,
        })
    }
}

/// Parse parameter types and fold each `x_len: felt, x: T*` pair into one
/// array parameter `x`.
fn fold_array_lengths(owner: &str, raw: Vec<ParamRaw>) -> Result<Vec<Param>, AbiError> {
    let mut params: Vec<Param> = Vec::with_capacity(raw.len());
    for p in raw {
        let ty: ArgType = p.ty.parse()?;
        if ty.is_array() {
            let len_name = format!("{}_len", p.name);
            match params.last() {
                Some(prev) if prev.name == len_name && prev.ty == ArgType::Felt => {
                    params.pop();
                }
                _ => {
                    return Err(AbiError::MissingArrayLength {
                        owner: owner.to_string(),
                        param: p.name,
                    })
                }
            }
        }
        params.push(Param::new(p.name, ty));
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feltcodec_core::registry::StructResolver;

    const ABI: &str = r#"[
        {
            "type": "struct",
            "name": "Point",
            "size": 2,
            "members": [
                {"name": "x", "type": "felt", "offset": 0},
                {"name": "y", "type": "felt", "offset": 1}
            ]
        },
        {
            "type": "function",
            "name": "f",
            "inputs": [
                {"name": "a", "type": "felt"},
                {"name": "b_len", "type": "felt"},
                {"name": "b", "type": "felt*"}
            ],
            "outputs": [{"name": "res", "type": "felt"}],
            "stateMutability": "view"
        },
        {
            "type": "constructor",
            "name": "constructor",
            "inputs": [{"name": "owner", "type": "felt"}],
            "outputs": []
        },
        {
            "type": "event",
            "name": "Moved",
            "keys": [],
            "data": [{"name": "to", "type": "Point"}]
        }
    ]"#;

    #[test]
    fn folds_length_prefixed_arrays() {
        let iface = AbiLoader::parse(ABI).unwrap();
        let f = iface.function("f").unwrap();
        let names: Vec<_> = f.inputs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(f.inputs[1].ty, ArgType::array(ArgType::Felt));
        assert_eq!(f.outputs, vec![Param::new("res", ArgType::Felt)]);
    }

    #[test]
    fn loads_structs_events_and_constructor() {
        let iface = AbiLoader::parse(ABI).unwrap();
        assert!(iface.structs().get_struct("Point").is_some());
        assert!(iface.events().by_name("Moved").is_some());
        assert_eq!(iface.constructor().unwrap().name, "constructor");
    }

    #[test]
    fn array_without_length_is_rejected() {
        let abi = r#"[{"type": "function", "name": "g",
            "inputs": [{"name": "b", "type": "felt*"}], "outputs": []}]"#;
        let err = AbiLoader::parse(abi).unwrap_err();
        assert!(matches!(err, AbiError::MissingArrayLength { .. }));
    }

    #[test]
    fn unknown_entry_types_are_ignored() {
        let abi = r#"[{"type": "interface", "name": "IFoo"}]"#;
        let iface = AbiLoader::parse(abi).unwrap();
        assert_eq!(iface.functions().count(), 0);
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(matches!(AbiLoader::parse("{"), Err(AbiError::Json(_))));
    }
}
