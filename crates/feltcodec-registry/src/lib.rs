//! # feltcodec-registry
//!
//! Registries built once per contract interface and read many times:
//!
//! 1. **Struct registry**: named struct → ordered member list
//! 2. **Event registry**: event selector → key/data parameter shapes
//! 3. **Contract interface**: functions plus both registries, validated as a
//!    whole when the ABI is loaded
//!
//! None of them are mutated after construction, so they are shared through
//! `Arc` and read concurrently without locking.

pub mod abi_json;
pub mod events;
pub mod interface;
pub mod structs;

pub use abi_json::AbiLoader;
pub use events::EventRegistry;
pub use interface::ContractInterface;
pub use structs::StructRegistry;
