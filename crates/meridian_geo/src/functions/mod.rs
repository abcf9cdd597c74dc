//! Scalar functions over the geometry types.

pub mod accessors;
pub mod constructors;
pub mod geography;
