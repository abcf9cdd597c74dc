use crate::functions::scalar::macros::primitive_unary_execute;
use crate::functions::{invalid_input_types_error, plan_check_num_args, FunctionInfo, Signature};

use crate::functions::scalar::{PlannedScalarFunction, ScalarFunction};
use meridian_array::array::Array;
use meridian_array::datatype::{DataType, DataTypeId};
use meridian_error::Result;
use std::fmt::Debug;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Negate;

impl FunctionInfo for Negate {
    fn name(&self) -> &'static str {
        "negate"
    }

    fn signatures(&self) -> &[Signature] {
        &[
            Signature {
                input: &[DataTypeId::Int64],
                variadic: None,
                return_type: DataTypeId::Int64,
            },
            Signature {
                input: &[DataTypeId::Float64],
                variadic: None,
                return_type: DataTypeId::Float64,
            },
        ]
    }
}

impl ScalarFunction for Negate {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 1)?;
        match &inputs[0] {
            DataType::Int64 | DataType::Float64 => Ok(Box::new(NegateImpl {
                datatype: inputs[0].clone(),
            })),
            other => Err(invalid_input_types_error(self, &[other])),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegateImpl {
    datatype: DataType,
}

impl PlannedScalarFunction for NegateImpl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &Negate
    }

    fn return_type(&self) -> DataType {
        self.datatype.clone()
    }

    fn execute(&self, arrays: &[&Arc<Array>]) -> Result<Array> {
        let input = arrays[0];
        Ok(match input.as_ref() {
            Array::Int64(input) => primitive_unary_execute!(input, Int64, |a| -a),
            Array::Float64(input) => primitive_unary_execute!(input, Float64, |a| -a),
            other => panic!("unexpected array type: {other:?}"),
        })
    }
}
