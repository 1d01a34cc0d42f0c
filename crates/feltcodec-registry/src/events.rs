//! In-memory event registry keyed by selector.

use feltcodec_core::{error::AbiError, registry::EventResolver, EventAbi, Felt};
use indexmap::IndexMap;

/// Event definitions indexed by the selector they emit as `keys[0]`,
/// iterated in declaration order.
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    by_selector: IndexMap<Felt, EventAbi>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from event definitions, rejecting duplicate names.
    pub fn from_defs(defs: impl IntoIterator<Item = EventAbi>) -> Result<Self, AbiError> {
        let mut by_selector = IndexMap::new();
        for def in defs {
            let selector = def.selector();
            if by_selector.contains_key(&selector) {
                return Err(AbiError::Duplicate {
                    kind: "event",
                    name: def.name,
                });
            }
            by_selector.insert(selector, def);
        }
        Ok(Self { by_selector })
    }

    /// Register an event under an explicit selector.
    ///
    /// Used when the engine embeds a selector that is not derived from the
    /// event name.
    pub fn with_selector(mut self, selector: Felt, def: EventAbi) -> Result<Self, AbiError> {
        if self.by_selector.contains_key(&selector) {
            return Err(AbiError::Duplicate {
                kind: "event",
                name: def.name,
            });
        }
        self.by_selector.insert(selector, def);
        Ok(self)
    }

    pub fn contains(&self, selector: &Felt) -> bool {
        self.by_selector.contains_key(selector)
    }

    pub fn by_name(&self, name: &str) -> Option<&EventAbi> {
        self.by_selector.values().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.by_selector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_selector.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Felt, &EventAbi)> {
        self.by_selector.iter()
    }
}

impl EventResolver for EventRegistry {
    fn get_by_selector(&self, selector: &Felt) -> Option<&EventAbi> {
        self.by_selector.get(selector)
    }
}
