//! The field element: the only primitive the execution engine understands.

use crate::error::FeltError;
use alloy_primitives::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The field prime `2^251 + 17 * 2^192 + 1`.
pub const PRIME: U256 = U256::from_limbs([1, 0, 0, 0x0800_0000_0000_0011]);

/// A non-negative integer strictly below [`PRIME`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Felt(U256);

impl Felt {
    pub const ZERO: Felt = Felt(U256::ZERO);
    pub const ONE: Felt = Felt(U256::from_limbs([1, 0, 0, 0]));

    /// Wrap a 256-bit integer, rejecting values outside the field.
    pub fn new(value: U256) -> Result<Self, FeltError> {
        if value >= PRIME {
            return Err(FeltError::OutOfRange {
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Map a signed integer into the field; negatives wrap to `PRIME - |v|`.
    pub fn from_signed(value: i128) -> Self {
        let magnitude = U256::from(value.unsigned_abs());
        if value < 0 {
            Self(PRIME - magnitude)
        } else {
            Self(magnitude)
        }
    }

    /// Interpret 32 big-endian bytes as a felt.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Result<Self, FeltError> {
        Self::new(U256::from_be_bytes(bytes))
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Narrow to `u64` if the value fits.
    pub fn to_u64(&self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }

    /// Narrow to `usize` if the value fits; used for array lengths.
    pub fn to_usize(&self) -> Option<usize> {
        self.to_u64().and_then(|v| usize::try_from(v).ok())
    }

    /// Lower-case `0x` hex representation.
    pub fn to_hex(&self) -> String {
        format!("0x{:x}", self.0)
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u32> for Felt {
    fn from(value: u32) -> Self {
        Self(U256::from(value))
    }
}

impl From<bool> for Felt {
    fn from(value: bool) -> Self {
        if value {
            Self::ONE
        } else {
            Self::ZERO
        }
    }
}

impl TryFrom<U256> for Felt {
    type Error = FeltError;

    fn try_from(value: U256) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Felt> for U256 {
    fn from(felt: Felt) -> Self {
        felt.0
    }
}

impl FromStr for Felt {
    type Err = FeltError;

    /// Accepts `0x`-prefixed hex or plain decimal, optionally negated with a
    /// leading `-` (wrapping modulo [`PRIME`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, trimmed) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (digits, radix) = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => (hex, 16),
            None => (trimmed, 10),
        };
        let parse_error = |reason: String| FeltError::Parse {
            input: s.to_string(),
            reason,
        };
        // `from_str_radix` takes "" as zero and skips `_` separators.
        if digits.is_empty() {
            return Err(parse_error("no digits".into()));
        }
        if let Some(c) = digits.chars().find(|c| !c.is_digit(radix)) {
            return Err(parse_error(format!("invalid digit '{c}'")));
        }
        let value =
            U256::from_str_radix(digits, radix as u64).map_err(|e| parse_error(e.to_string()))?;
        let felt = Self::new(value)?;
        if negative && felt != Self::ZERO {
            Ok(Self(PRIME - felt.0))
        } else {
            Ok(felt)
        }
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::LowerHex for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

// Felts travel as hex strings on the wire, like every other JSON surface of
// the platform.
impl Serialize for Felt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Felt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FeltVisitor)
    }
}

struct FeltVisitor;

impl<'de> de::Visitor<'de> for FeltVisitor {
    type Value = Felt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a lower-case 0x hex string, a decimal string, or an integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Felt, E> {
        Ok(Felt::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Felt, E> {
        Ok(Felt::from_signed(i128::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Felt, E> {
        if let Some(hex) = v.strip_prefix("0x") {
            let well_formed = !hex.is_empty()
                && hex
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
            if !well_formed {
                return Err(E::custom(format!("Expected hex string, got: \"{v}\".")));
            }
        }
        v.parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prime_is_rejected() {
        assert!(Felt::new(PRIME).is_err());
        assert!(Felt::new(PRIME - U256::from(1u64)).is_ok());
    }

    #[test]
    fn negative_values_wrap_into_the_field() {
        let minus_one = Felt::from_signed(-1);
        assert_eq!(minus_one.as_u256(), PRIME - U256::from(1u64));
        assert_eq!(Felt::from_signed(7), Felt::from(7u64));
    }

    #[test]
    fn parses_negative_strings_modulo_prime() {
        assert_eq!("-1".parse::<Felt>().unwrap(), Felt::from_signed(-1));
        assert_eq!("-0x10".parse::<Felt>().unwrap(), Felt::from_signed(-16));
        assert_eq!("-0".parse::<Felt>().unwrap(), Felt::ZERO);
    }

    #[test]
    fn rejects_empty_and_separated_literals() {
        for input in ["", "0x", "-", "-0x", "1_0", "0x_ff", "+1", "1 0"] {
            assert!(
                matches!(input.parse::<Felt>(), Err(FeltError::Parse { .. })),
                "accepted {input:?}"
            );
        }
        assert!(serde_json::from_str::<Felt>("\"\"").is_err());
        assert!(serde_json::from_str::<Felt>("\"1_000\"").is_err());
    }

    #[test]
    fn parses_hex_and_decimal() {
        assert_eq!("0x2a".parse::<Felt>().unwrap(), Felt::from(42u64));
        assert_eq!("42".parse::<Felt>().unwrap(), Felt::from(42u64));
        assert!("0xzz".parse::<Felt>().is_err());
        assert!(
            "0x800000000000011000000000000000000000000000000000000000000000001"
                .parse::<Felt>()
                .is_err()
        );
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Felt::from(255u64)).unwrap();
        assert_eq!(json, "\"0xff\"");
        let back: Felt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Felt::from(255u64));
        let from_int: Felt = serde_json::from_str("17").unwrap();
        assert_eq!(from_int, Felt::from(17u64));
        assert!(serde_json::from_str::<Felt>("\"0xFF\"").is_err());
    }

    #[test]
    fn narrowing() {
        assert_eq!(Felt::from(3u64).to_usize(), Some(3));
        assert_eq!(Felt::from_signed(-1).to_u64(), None);
    }
}
