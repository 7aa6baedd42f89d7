//! The Starknet field element.
//!
//! Every value in a Starknet event log (keys, data, addresses, hashes) is a
//! [`Felt`]: an element of the prime field of order
//! `2^251 + 17 * 2^192 + 1`, carried as 32 big-endian bytes.

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::str::FromStr;

/// Big-endian bytes of the field modulus.
const MODULUS: [u8; 32] = [
    0x08, 0, 0, 0, 0, 0, 0, 0x11, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0x01,
];

/// Maximum number of hex digits in a field element.
const MAX_HEX_DIGITS: usize = 64;

/// A Starknet field element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Felt([u8; 32]);

/// Error returned when a hex string does not describe a valid [`Felt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FeltParseError {
    #[error("invalid hex character {0:?}")]
    InvalidCharacter(char),

    #[error("more than {max} hex digits found: {actual}")]
    InvalidLength { max: usize, actual: usize },

    #[error("value exceeds the field modulus")]
    Overflow,
}

impl From<hex::FromHexError> for FeltParseError {
    fn from(err: hex::FromHexError) -> Self {
        match err {
            hex::FromHexError::InvalidHexCharacter { c, .. } => Self::InvalidCharacter(c),
            // Input is padded to an even length and sized to fit before decoding.
            hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                Self::InvalidLength {
                    max: MAX_HEX_DIGITS,
                    actual: MAX_HEX_DIGITS + 1,
                }
            }
        }
    }
}

impl Felt {
    pub const ZERO: Felt = Felt([0u8; 32]);

    pub fn is_zero(&self) -> bool {
        self == &Felt::ZERO
    }

    /// Creates a [`Felt`] from big-endian bytes.
    ///
    /// Returns [`FeltParseError::Overflow`] if the value is not less than the
    /// field modulus.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Result<Self, FeltParseError> {
        // Lexicographic order on big-endian bytes is numeric order.
        if bytes < MODULUS {
            Ok(Self(bytes))
        } else {
            Err(FeltParseError::Overflow)
        }
    }

    /// Returns the big-endian representation of this [`Felt`].
    pub const fn to_be_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Parses a hex string into a [`Felt`].
    ///
    /// Accepts upper and lower case digits, an optional `0x` prefix, leading
    /// zeros and an odd number of digits. The value is right-aligned into the
    /// 32-byte buffer.
    pub fn from_hex_str(hex_str: &str) -> Result<Self, FeltParseError> {
        let digits = hex_str
            .strip_prefix("0x")
            .or_else(|| hex_str.strip_prefix("0X"))
            .unwrap_or(hex_str);

        if digits.len() > MAX_HEX_DIGITS {
            return Err(FeltParseError::InvalidLength {
                max: MAX_HEX_DIGITS,
                actual: digits.len(),
            });
        }

        let digits: Cow<'_, str> = if digits.len() % 2 == 1 {
            Cow::Owned(format!("0{digits}"))
        } else {
            Cow::Borrowed(digits)
        };

        let mut buf = [0u8; 32];
        let start = buf.len() - digits.len() / 2;
        hex::decode_to_slice(digits.as_bytes(), &mut buf[start..])?;

        Self::from_be_bytes(buf)
    }

    /// Produces the canonical textual form used in Starknet event logs:
    /// `0x` followed by lowercase hex digits without leading zeros.
    pub fn to_hex_str(&self) -> String {
        let encoded = hex::encode(self.0);
        let trimmed = encoded.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_owned()
        } else {
            format!("0x{trimmed}")
        }
    }

    /// Truncates the value to its least significant 64 bits.
    pub fn to_u64(&self) -> u64 {
        let mut tail = [0u8; 8];
        tail.copy_from_slice(&self.0[24..]);
        u64::from_be_bytes(tail)
    }

    /// Exact arbitrary-precision value of this element.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl FromStr for Felt {
    type Err = FeltParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl std::fmt::Debug for Felt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Felt({self})")
    }
}

impl std::fmt::Display for Felt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_str())
    }
}

impl std::fmt::LowerHex for Felt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|&b| write!(f, "{b:02x}"))
    }
}

impl Serialize for Felt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_str())
    }
}

impl<'de> Deserialize<'de> for Felt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Felt::from_hex_str(&s).map_err(serde::de::Error::custom)
    }
}
