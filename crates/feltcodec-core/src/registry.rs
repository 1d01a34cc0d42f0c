//! Read-only lookup traits over the registries.
//!
//! The marshaling engines only ever need to resolve a struct by name or an
//! event by selector; concrete registries live in `feltcodec-registry`.

use crate::abi::{EventAbi, StructDef};
use crate::error::CodecError;
use crate::felt::Felt;

/// Resolves named struct types to their ordered member lists.
///
/// Implementations are built once and never mutated, so they can be shared
/// across tasks without locking.
pub trait StructResolver: Send + Sync {
    /// Look up a struct definition by name.
    fn get_struct(&self, name: &str) -> Option<&StructDef>;

    /// Like [`get_struct`](Self::get_struct) but fails with `UnknownType`.
    fn resolve(&self, name: &str) -> Result<&StructDef, CodecError> {
        self.get_struct(name).ok_or_else(|| CodecError::UnknownType {
            name: name.to_string(),
        })
    }
}

/// Maps an event selector (`keys[0]` of a raw emission) to its definition.
pub trait EventResolver: Send + Sync {
    fn get_by_selector(&self, selector: &Felt) -> Option<&EventAbi>;
}
