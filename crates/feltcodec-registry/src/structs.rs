//! In-memory struct registry.

use feltcodec_core::{error::AbiError, registry::StructResolver, StructDef};
use indexmap::IndexMap;

/// Named struct definitions in ABI declaration order.
#[derive(Debug, Clone, Default)]
pub struct StructRegistry {
    by_name: IndexMap<String, StructDef>,
}

impl StructRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from struct definitions, rejecting duplicate names.
    pub fn from_defs(defs: impl IntoIterator<Item = StructDef>) -> Result<Self, AbiError> {
        let mut by_name = IndexMap::new();
        for def in defs {
            if by_name.contains_key(&def.name) {
                return Err(AbiError::Duplicate {
                    kind: "struct",
                    name: def.name,
                });
            }
            by_name.insert(def.name.clone(), def);
        }
        Ok(Self { by_name })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Struct names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructDef> {
        self.by_name.values()
    }
}

impl StructResolver for StructRegistry {
    fn get_struct(&self, name: &str) -> Option<&StructDef> {
        self.by_name.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feltcodec_core::{ArgType, CodecError, Param};

    fn point() -> StructDef {
        StructDef::new(
            "Point",
            vec![Param::new("x", ArgType::Felt), Param::new("y", ArgType::Felt)],
        )
    }

    #[test]
    fn lookup_returns_members_in_order() {
        let reg = StructRegistry::from_defs([point()]).unwrap();
        let def = reg.resolve("Point").unwrap();
        let names: Vec<_> = def.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn unknown_type() {
        let reg = StructRegistry::new();
        assert_eq!(
            reg.resolve("Point").unwrap_err(),
            CodecError::UnknownType { name: "Point".into() }
        );
    }

    #[test]
    fn duplicate_rejected() {
        let err = StructRegistry::from_defs([point(), point()]).unwrap_err();
        assert!(matches!(err, AbiError::Duplicate { kind: "struct", .. }));
    }
}
