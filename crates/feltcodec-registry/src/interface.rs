//! `ContractInterface`: functions, structs and events of one contract.

use crate::abi_json::AbiLoader;
use crate::events::EventRegistry;
use crate::structs::StructRegistry;
use feltcodec_core::{
    error::AbiError, registry::StructResolver, ArgType, EntryPointKind, EventAbi, FunctionAbi,
    Param, StructDef,
};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Everything the harness needs to know about a contract's ABI.
///
/// Built once, validated as a whole, and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct ContractInterface {
    functions: IndexMap<String, FunctionAbi>,
    structs: StructRegistry,
    events: EventRegistry,
}

impl ContractInterface {
    /// Assemble and validate an interface from already-parsed parts.
    ///
    /// Rejects duplicate function names, arrays below the top level of any
    /// parameter (directly or through a struct member), and recursive structs.
    pub fn new(
        functions: impl IntoIterator<Item = FunctionAbi>,
        structs: StructRegistry,
        events: EventRegistry,
    ) -> Result<Self, AbiError> {
        let mut by_name = IndexMap::new();
        for func in functions {
            if by_name.contains_key(&func.name) {
                return Err(AbiError::Duplicate {
                    kind: "function",
                    name: func.name,
                });
            }
            by_name.insert(func.name.clone(), func);
        }

        let interface = Self {
            functions: by_name,
            structs,
            events,
        };
        interface.validate()?;
        debug!(
            functions = interface.functions.len(),
            structs = interface.structs.len(),
            events = interface.events.len(),
            "contract interface loaded"
        );
        Ok(interface)
    }

    /// Parse a JSON ABI document.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        AbiLoader::parse(json)
    }

    /// Read and parse a JSON ABI file.
    pub fn from_file(path: &Path) -> Result<Self, AbiError> {
        let content = std::fs::read_to_string(path)?;
        AbiLoader::parse(&content)
    }

    /// Start assembling an interface in code instead of from JSON.
    pub fn builder() -> InterfaceBuilder {
        InterfaceBuilder::default()
    }

    pub fn function(&self, name: &str) -> Option<&FunctionAbi> {
        self.functions.get(name)
    }

    /// Functions in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionAbi> {
        self.functions.values()
    }

    pub fn constructor(&self) -> Option<&FunctionAbi> {
        self.functions
            .values()
            .find(|f| f.kind == EntryPointKind::Constructor)
    }

    pub fn structs(&self) -> &StructRegistry {
        &self.structs
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    fn validate(&self) -> Result<(), AbiError> {
        for func in self.functions.values() {
            for param in func.inputs.iter().chain(func.outputs.iter()) {
                self.validate_param(&func.name, param)?;
            }
        }
        for (_, event) in self.events.iter() {
            for param in event.params() {
                self.validate_param(&event.name, param)?;
            }
        }
        Ok(())
    }

    /// A parameter may be an array at its top level only, and every array
    /// element must occupy at least one felt.
    fn validate_param(&self, owner: &str, param: &Param) -> Result<(), AbiError> {
        let (nested, is_array) = match &param.ty {
            ArgType::Array(elem) => (elem.as_ref(), true),
            other => (other, false),
        };
        let mut visiting = HashSet::new();
        if self.nested_contains_array(nested, &mut visiting)? {
            return Err(AbiError::NestedArray {
                owner: owner.to_string(),
                param: param.name.clone(),
                ty: param.ty.to_string(),
            });
        }
        // A length prefix could otherwise claim any number of elements
        // without a single felt backing them.
        if is_array && self.is_zero_width(nested, &mut HashSet::new()) {
            return Err(AbiError::InvalidType {
                ty: param.ty.to_string(),
                reason: format!(
                    "elements of array '{}' in '{owner}' flatten to no felts",
                    param.name
                ),
            });
        }
        Ok(())
    }

    /// Whether `ty` flattens to zero felts (`()`, empty structs, or nestings
    /// of them). Unknown structs are assumed to carry data.
    fn is_zero_width<'a>(&'a self, ty: &'a ArgType, visiting: &mut HashSet<&'a str>) -> bool {
        match ty {
            ArgType::Felt | ArgType::Array(_) => false,
            ArgType::Tuple(members) => members.iter().all(|m| self.is_zero_width(m, visiting)),
            ArgType::Struct(name) => {
                let Some(def) = self.structs.get_struct(name) else {
                    return false;
                };
                if !visiting.insert(name.as_str()) {
                    return false;
                }
                let empty = def
                    .members
                    .iter()
                    .all(|m| self.is_zero_width(&m.ty, visiting));
                visiting.remove(name.as_str());
                empty
            }
        }
    }

    /// Whether `ty`, used in a nested position, contains an array anywhere,
    /// following struct members transitively. Unknown struct names are left
    /// for the engines to report as `UnknownType` when actually used.
    fn nested_contains_array<'a>(
        &'a self,
        ty: &'a ArgType,
        visiting: &mut HashSet<&'a str>,
    ) -> Result<bool, AbiError> {
        match ty {
            ArgType::Felt => Ok(false),
            ArgType::Array(_) => Ok(true),
            ArgType::Tuple(members) => {
                for m in members {
                    if self.nested_contains_array(m, visiting)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            ArgType::Struct(name) => {
                let Some(def) = self.structs.get_struct(name) else {
                    return Ok(false);
                };
                if !visiting.insert(name.as_str()) {
                    return Err(AbiError::InvalidType {
                        ty: name.clone(),
                        reason: "struct contains itself".into(),
                    });
                }
                for member in &def.members {
                    if self.nested_contains_array(&member.ty, visiting)? {
                        return Ok(true);
                    }
                }
                visiting.remove(name.as_str());
                Ok(false)
            }
        }
    }
}

/// Collects functions, structs and events, then validates them together.
#[derive(Debug, Default)]
pub struct InterfaceBuilder {
    functions: Vec<FunctionAbi>,
    structs: Vec<StructDef>,
    events: Vec<EventAbi>,
}

impl InterfaceBuilder {
    pub fn function(mut self, f: FunctionAbi) -> Self {
        self.functions.push(f);
        self
    }

    pub fn structure(mut self, s: StructDef) -> Self {
        self.structs.push(s);
        self
    }

    pub fn event(mut self, e: EventAbi) -> Self {
        self.events.push(e);
        self
    }

    pub fn build(self) -> Result<ContractInterface, AbiError> {
        ContractInterface::new(
            self.functions,
            StructRegistry::from_defs(self.structs)?,
            EventRegistry::from_defs(self.events)?,
        )
    }
}
