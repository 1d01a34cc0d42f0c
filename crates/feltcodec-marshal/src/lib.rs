//! # feltcodec-marshal
//!
//! Conversion between structured values and the flat felt sequences the
//! execution engine understands, driven by the ABI type grammar.
//!
//! - [`flatten`]: structured value → felts, validating shape on the way
//! - [`build`]: felts → structured value, through a forward-only [`Cursor`]
//! - [`events`]: best-effort decoding of raw emissions into declared events

pub mod build;
pub mod events;
pub mod flatten;

pub use build::{build, build_arguments, Cursor};
pub use events::{decode_event, decode_events};
pub use flatten::{flatten, flatten_arguments, flatten_arguments_into, Arguments};
