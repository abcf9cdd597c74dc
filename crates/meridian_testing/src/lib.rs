//! Test tooling for running queries end to end.
//!
//! The [`QueryRunner`] wraps an engine and session behind a blocking
//! interface, returning results with all values rendered as strings so tests
//! can assert on them directly:
//!
//! ```no_run
//! use meridian_testing::{MaterializedResult, QueryRunner};
//!
//! # fn main() -> meridian_error::Result<()> {
//! let mut runner = QueryRunner::builder().build()?;
//! let result = runner.query("SELECT 1 + 2")?;
//! assert_eq!(
//!     MaterializedResult::builder(["Int64"]).row(["3"]).build(),
//!     result,
//! );
//! # Ok(())
//! # }
//! ```

pub mod result;
pub mod runner;

pub use result::MaterializedResult;
pub use runner::QueryRunner;
