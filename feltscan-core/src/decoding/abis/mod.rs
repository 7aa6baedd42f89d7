//! Built-in event schemas.

pub mod corelib;
pub mod crew;

use super::registry::{EventSchemaRegistry, RegistryError};

pub use corelib::{CORE_ARRAY_SPAN_FELT252, CORE_BOOL};

/// Registry preloaded with every built-in schema.
pub fn builtin_registry() -> Result<EventSchemaRegistry, RegistryError> {
    EventSchemaRegistry::new(crew::EVENTS.iter().copied())
}
