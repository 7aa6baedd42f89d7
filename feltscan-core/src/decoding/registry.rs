//! Dispatch of raw events to their schemas by signature hash.

use super::params::DecodeError;
use super::schema::{DecodedValue, EventSchema, decode_fields};
use feltscan_sdk::{EVENT_UNKNOWN, Felt, FeltParseError, RawEvent};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use thiserror::Error;

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("malformed signature hash for event {event}: {source}")]
    MalformedSignature {
        event: &'static str,
        #[source]
        source: FeltParseError,
    },
}

/// Outcome of dispatching a raw event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedEvent {
    Known {
        name: &'static str,
        event: DecodedValue,
    },
    /// No schema is registered for the event's primary key.
    Unknown(RawEvent),
}

impl ParsedEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ParsedEvent::Known { name, .. } => *name,
            ParsedEvent::Unknown(_) => EVENT_UNKNOWN,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ParsedEvent::Unknown(_))
    }
}

/// Serializes as one line of the event stream: `{"Name": .., "Event": ..}`.
impl Serialize for ParsedEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut line = serializer.serialize_struct("ParsedEvent", 2)?;
        line.serialize_field("Name", self.name())?;
        match self {
            ParsedEvent::Known { event, .. } => line.serialize_field("Event", event)?,
            ParsedEvent::Unknown(raw) => line.serialize_field("Event", raw)?,
        }
        line.end()
    }
}

/// A known event whose data did not fit its schema.
///
/// Carries the untouched raw event as an [`ParsedEvent::Unknown`] so the
/// caller can log the failure and pass the event through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode {name} event: {source}")]
pub struct ParseFailure {
    pub name: &'static str,
    pub passthrough: ParsedEvent,
    #[source]
    pub source: DecodeError,
}

/// Read-only table from signature hash to event schema.
///
/// Built once at startup and shared freely across decode calls.
#[derive(Debug, Clone, Default)]
pub struct EventSchemaRegistry {
    schemas: HashMap<Felt, &'static EventSchema>,
}

impl EventSchemaRegistry {
    /// Builds a registry, converting every signature hash up front.
    ///
    /// When two schemas share a signature the first one registered wins.
    pub fn new<I>(schemas: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = &'static EventSchema>,
    {
        let mut table = HashMap::new();
        for schema in schemas {
            let signature = Felt::from_hex_str(schema.signature).map_err(|source| {
                RegistryError::MalformedSignature {
                    event: schema.name,
                    source,
                }
            })?;
            if let Entry::Vacant(slot) = table.entry(signature) {
                slot.insert(schema);
            }
        }
        Ok(Self { schemas: table })
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Schema registered for a signature hash, if any.
    pub fn schema(&self, signature: &Felt) -> Option<&'static EventSchema> {
        self.schemas.get(signature).copied()
    }

    /// Decodes a raw event with the schema matching its primary key.
    ///
    /// An unregistered signature is a normal outcome, not an error.
    pub fn parse(&self, raw: RawEvent) -> Result<ParsedEvent, ParseFailure> {
        let Some(schema) = self.schema(&raw.primary_key) else {
            return Ok(ParsedEvent::Unknown(raw));
        };

        match decode_fields(schema.fields, &raw.parameters) {
            Ok((fields, _)) => Ok(ParsedEvent::Known {
                name: schema.name,
                event: DecodedValue::Struct(fields),
            }),
            Err(source) => Err(ParseFailure {
                name: schema.name,
                passthrough: ParsedEvent::Unknown(raw),
                source,
            }),
        }
    }
}
