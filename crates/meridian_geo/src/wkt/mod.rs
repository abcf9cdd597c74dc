//! Reading and writing well-known text.
//!
//! Writing goes through the `Display` impl on `Geometry`.

mod reader;
mod writer;

pub use reader::parse;
