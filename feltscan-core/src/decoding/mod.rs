//! Decoding of raw event parameters into typed values.
//!
//! - [`params`]: combinators over flat field element lists
//! - [`schema`]: declarative event shapes and their interpreter
//! - [`registry`]: dispatch by signature hash
//! - [`abis`]: built-in schema tables

pub mod abis;
pub mod params;
pub mod registry;
pub mod schema;

pub use abis::builtin_registry;
pub use params::{DecodeError, Decoded, FeltReader};
pub use registry::{EventSchemaRegistry, ParseFailure, ParsedEvent, RegistryError};
pub use schema::{DecodedValue, EventSchema, Field, Shape};
