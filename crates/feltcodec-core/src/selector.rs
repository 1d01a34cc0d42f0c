//! Selector derivation for functions and events.
//!
//! A selector is the keccak-256 of the entry point or event name, truncated
//! to its low 250 bits so it always fits in a felt:
//!   selector("transfer")
//!   → 0x83afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e
//!
//! Events are recognised by comparing `keys[0]` of a raw emission against the
//! selector of each declared event name.

use crate::felt::Felt;
use alloy_primitives::U256;
use tiny_keccak::{Hasher, Keccak};

const MASK_250: U256 = U256::from_limbs([u64::MAX, u64::MAX, u64::MAX, 0x03ff_ffff_ffff_ffff]);

/// Compute the selector of a function or event name.
pub fn selector_from_name(name: &str) -> Felt {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(name.as_bytes());
    hasher.finalize(&mut output);
    let masked = U256::from_be_bytes(output) & MASK_250;
    // 2^250 - 1 is below the field prime, so the masked value always fits.
    Felt::new(masked).unwrap_or_default()
}

/// Selector of the constructor entry point.
pub fn constructor_selector() -> Felt {
    selector_from_name("constructor")
}
