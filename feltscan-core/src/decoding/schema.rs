//! Declarative event shapes and the generic decoder that interprets them.
//!
//! An event's data layout is described once as a table of [`Field`]s; a
//! single interpreter ([`decode_shape`]) walks the table over the event's
//! parameters using the combinators in [`params`](super::params).

use super::params::{Decoded, FeltReader, parse_array, parse_big_int, parse_string, parse_u64};
use feltscan_sdk::Felt;
use num_bigint::BigUint;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Display name of an enum discriminant outside the declared variants.
pub const UNKNOWN_VARIANT: &str = "UNKNOWN";

/// Layout of a value inside an event's data list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One element, truncated to 64 bits.
    Uint64,
    /// One element, as an exact unsigned integer.
    BigInt,
    /// One element rendered as its canonical hex string (addresses,
    /// short strings).
    String,
    /// One element holding a discriminant into the listed variant names.
    Enum(&'static [&'static str]),
    /// Length-prefixed sequence of the inner shape.
    Array(&'static Shape),
    /// Fields laid out back to back, in declaration order.
    Struct(&'static [Field]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
}

/// A known event: its ABI name, the hex signature hash that appears as the
/// event's primary key, and its data layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchema {
    pub name: &'static str,
    pub signature: &'static str,
    pub fields: &'static [Field],
}

/// A value produced by interpreting a [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Uint64(u64),
    BigInt(BigUint),
    String(String),
    Enum {
        discriminant: u64,
        variant: &'static str,
    },
    Array(Vec<DecodedValue>),
    Struct(Vec<(&'static str, DecodedValue)>),
}

impl DecodedValue {
    /// Looks up a field of a struct value by name.
    pub fn field(&self, name: &str) -> Option<&DecodedValue> {
        match self {
            DecodedValue::Struct(fields) => fields
                .iter()
                .find(|(field, _)| *field == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            DecodedValue::Uint64(v) => Some(*v),
            DecodedValue::Enum { discriminant, .. } => Some(*discriminant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::String(s) => Some(s.as_str()),
            DecodedValue::Enum { variant, .. } => Some(*variant),
            _ => None,
        }
    }

    pub fn as_big_int(&self) -> Option<&BigUint> {
        match self {
            DecodedValue::BigInt(v) => Some(v),
            _ => None,
        }
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DecodedValue::Uint64(v) => serializer.serialize_u64(*v),
            DecodedValue::BigInt(v) => {
                // Emitted as an exact JSON number, however wide.
                let number: serde_json::Number = v
                    .to_string()
                    .parse()
                    .map_err(<S::Error as serde::ser::Error>::custom)?;
                number.serialize(serializer)
            }
            DecodedValue::String(s) => serializer.serialize_str(s),
            DecodedValue::Enum { discriminant, .. } => serializer.serialize_u64(*discriminant),
            DecodedValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DecodedValue::Struct(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// Decodes one value of the given shape from the front of `parameters`.
pub fn decode_shape(shape: &Shape, parameters: &[Felt]) -> Decoded<DecodedValue> {
    match shape {
        Shape::Uint64 => {
            parse_u64(parameters).map(|(v, consumed)| (DecodedValue::Uint64(v), consumed))
        }
        Shape::BigInt => {
            parse_big_int(parameters).map(|(v, consumed)| (DecodedValue::BigInt(v), consumed))
        }
        Shape::String => {
            parse_string(parameters).map(|(v, consumed)| (DecodedValue::String(v), consumed))
        }
        Shape::Enum(variants) => {
            let (discriminant, consumed) = parse_u64(parameters)?;
            let variant = usize::try_from(discriminant)
                .ok()
                .and_then(|index| variants.get(index))
                .copied()
                .unwrap_or(UNKNOWN_VARIANT);
            Ok((
                DecodedValue::Enum {
                    discriminant,
                    variant,
                },
                consumed,
            ))
        }
        Shape::Array(inner) => parse_array(|p: &[Felt]| decode_shape(inner, p))(parameters)
            .map(|(items, consumed)| (DecodedValue::Array(items), consumed)),
        Shape::Struct(fields) => decode_fields(fields, parameters)
            .map(|(values, consumed)| (DecodedValue::Struct(values), consumed)),
    }
}

/// Decodes struct fields left to right over a shared cursor.
///
/// Any field failure aborts the whole decode; no partial struct is returned.
pub fn decode_fields(
    fields: &[Field],
    parameters: &[Felt],
) -> Decoded<Vec<(&'static str, DecodedValue)>> {
    let mut reader = FeltReader::new(parameters);
    let mut values = Vec::with_capacity(fields.len());
    for field in fields {
        let value = reader.read(|p: &[Felt]| decode_shape(&field.shape, p))?;
        values.push((field.name, value));
    }
    Ok((values, reader.consumed()))
}
