//! Grid containers and direction-addressed vector fields.

pub mod direction;
pub mod grid;
pub mod vector_field;

pub use direction::{Direction, ALL_DIRECTIONS};
pub use grid::{DynGrid, GridStorage, StaticGrid};
pub use vector_field::VectorField;
