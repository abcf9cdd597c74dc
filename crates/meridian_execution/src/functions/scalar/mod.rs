pub mod arith;
pub mod concat;
pub mod negate;
pub mod string;

pub(crate) mod macros;

use dyn_clone::DynClone;
use meridian_array::array::Array;
use meridian_array::datatype::DataType;
use meridian_error::Result;
use once_cell::sync::Lazy;
use std::fmt::Debug;
use std::sync::Arc;

use super::FunctionInfo;

// List of all scalar functions.
pub static BUILTIN_SCALAR_FUNCTIONS: Lazy<Vec<Box<dyn ScalarFunction>>> = Lazy::new(|| {
    vec![
        // Arith
        Box::new(arith::Add),
        Box::new(arith::Sub),
        Box::new(arith::Mul),
        Box::new(arith::Div),
        Box::new(arith::Rem),
        // String
        Box::new(concat::Concat),
        Box::new(string::Lower),
        Box::new(string::Upper),
        Box::new(string::Repeat),
        // Unary
        Box::new(negate::Negate),
    ]
});

/// A generic scalar function that can be planned into a concrete function
/// based on input types.
///
/// Scalar functions must be cheaply cloneable.
pub trait ScalarFunction: FunctionInfo + Debug + Sync + Send + DynClone {
    /// Plan the function given concrete input types.
    ///
    /// The inputs are the types the arguments will have after any implicit
    /// casts have been applied.
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>>;
}

impl Clone for Box<dyn ScalarFunction> {
    fn clone(&self) -> Self {
        dyn_clone::clone_box(&**self)
    }
}

impl PartialEq<dyn ScalarFunction> for Box<dyn ScalarFunction + '_> {
    fn eq(&self, other: &dyn ScalarFunction) -> bool {
        self.as_ref() == other
    }
}

impl PartialEq for dyn ScalarFunction + '_ {
    fn eq(&self, other: &dyn ScalarFunction) -> bool {
        self.name() == other.name() && self.signatures() == other.signatures()
    }
}

/// A scalar function that's been planned against concrete input types.
///
/// Execution happens on columns at a time, with null handling left up to the
/// implementation. Most functions propagate nulls by skipping invalid rows
/// through the array executors.
pub trait PlannedScalarFunction: Debug + Sync + Send + DynClone {
    /// The generic scalar function this was planned from.
    fn scalar_function(&self) -> &dyn ScalarFunction;

    /// Return type of the planned function.
    fn return_type(&self) -> DataType;

    /// Execute the function against the given arrays.
    ///
    /// The number and types of the arrays must match what this function was
    /// planned with.
    fn execute(&self, inputs: &[&Arc<Array>]) -> Result<Array>;
}

impl Clone for Box<dyn PlannedScalarFunction> {
    fn clone(&self) -> Self {
        dyn_clone::clone_box(&**self)
    }
}

impl PartialEq<dyn PlannedScalarFunction> for Box<dyn PlannedScalarFunction + '_> {
    fn eq(&self, other: &dyn PlannedScalarFunction) -> bool {
        self.as_ref() == other
    }
}

impl PartialEq for dyn PlannedScalarFunction + '_ {
    fn eq(&self, other: &dyn PlannedScalarFunction) -> bool {
        self.scalar_function() == other.scalar_function()
            && self.return_type() == other.return_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanity_eq_check() {
        let fn1 = Box::new(arith::Add) as Box<dyn ScalarFunction>;
        let fn2 = Box::new(arith::Sub) as Box<dyn ScalarFunction>;
        let fn3 = Box::new(arith::Sub) as Box<dyn ScalarFunction>;

        assert_ne!(fn1, fn2);
        assert_eq!(fn2, fn3);
    }

    #[test]
    fn builtin_names_unique() {
        let mut names = std::collections::HashSet::new();
        for func in BUILTIN_SCALAR_FUNCTIONS.iter() {
            assert!(names.insert(func.name()), "duplicate name: {}", func.name());
            for alias in func.aliases() {
                assert!(names.insert(alias), "duplicate alias: {alias}");
            }
        }
    }
}
