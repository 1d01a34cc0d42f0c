//! Event decoding: matching raw emissions against declared events.
//!
//! A raw event is a candidate when its `keys[0]` equals a registered event
//! selector. Selector space is not collision-free against arbitrary raw
//! emissions, so a candidate counts as that event only if `keys[1..] ++ data`
//! builds exactly against the event's key params followed by its data params.
//! Candidates that do not fit are dropped, never reported as errors.

use crate::build::build_arguments;
use feltcodec_core::{
    error::CodecError,
    registry::{EventResolver, StructResolver},
    DecodedEvent, Param, RawEvent,
};
use tracing::debug;

/// Decode every raw event that is a valid instance of a declared event,
/// preserving emission order.
///
/// Only definition problems (such as an event referencing an unknown struct)
/// are returned as errors.
pub fn decode_events(
    raw_events: &[RawEvent],
    events: &dyn EventResolver,
    structs: &dyn StructResolver,
) -> Result<Vec<DecodedEvent>, CodecError> {
    let mut decoded = Vec::new();
    for raw in raw_events {
        if let Some(event) = decode_event(raw, events, structs)? {
            decoded.push(event);
        }
    }
    Ok(decoded)
}

/// Decode a single raw event; `Ok(None)` means it has no structured counterpart.
pub fn decode_event(
    raw: &RawEvent,
    events: &dyn EventResolver,
    structs: &dyn StructResolver,
) -> Result<Option<DecodedEvent>, CodecError> {
    let Some(selector) = raw.selector() else {
        return Ok(None);
    };
    let Some(abi) = events.get_by_selector(selector) else {
        return Ok(None);
    };

    let felts: Vec<_> = raw.keys[1..].iter().chain(raw.data.iter()).copied().collect();
    let params: Vec<Param> = abi.params().cloned().collect();

    match build_arguments(&params, &felts, structs) {
        Ok(values) => Ok(Some(DecodedEvent {
            name: abi.name.clone(),
            selector: *selector,
            fields: params.into_iter().map(|p| p.name).zip(values).collect(),
        })),
        Err(err @ CodecError::ArgumentParsingFailed { .. }) => {
            debug!(event = %abi.name, %err, "raw event matches selector but not shape, skipped");
            Ok(None)
        }
        Err(other) => Err(other),
    }
}
