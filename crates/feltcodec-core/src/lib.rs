//! # feltcodec-core
//!
//! Core types shared across all FeltCodec crates: the field element, the
//! recursive ABI type grammar, structured values, interface descriptors and
//! the error taxonomy. The registry, marshaling engines and the invocation
//! harness are all built on top of the definitions here.

pub mod abi;
pub mod error;
pub mod event;
pub mod felt;
pub mod registry;
pub mod selector;
pub mod types;
pub mod value;

pub use abi::{EntryPointKind, EventAbi, FunctionAbi, Param, StructDef};
pub use error::{AbiError, CodecError, FeltError, ParseFailure};
pub use event::{DecodedEvent, RawEvent};
pub use felt::Felt;
pub use registry::{EventResolver, StructResolver};
pub use selector::{constructor_selector, selector_from_name};
pub use types::ArgType;
pub use value::Value;
