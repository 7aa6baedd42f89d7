//! Shapes of Cairo core library types that appear inside contract events.

use crate::decoding::schema::{Field, Shape};

/// `core::bool`.
pub const CORE_BOOL: Shape = Shape::Enum(&["False", "True"]);

/// `core::array::Span::<core::felt252>`.
pub const CORE_ARRAY_SPAN_FELT252: Shape = Shape::Struct(&[Field {
    name: "Snapshot",
    shape: Shape::Array(&Shape::String),
}]);
