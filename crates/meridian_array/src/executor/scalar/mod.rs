mod unary;
pub use unary::*;

mod binary;
pub use binary::*;
