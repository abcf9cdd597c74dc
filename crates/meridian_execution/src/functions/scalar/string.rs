use crate::functions::scalar::{PlannedScalarFunction, ScalarFunction};
use crate::functions::{invalid_input_types_error, plan_check_num_args, FunctionInfo, Signature};
use meridian_array::array::{Array, VarlenArray, VarlenValuesBuffer};
use meridian_array::datatype::{DataType, DataTypeId};
use meridian_array::executor::scalar::{BinaryExecutor, UnaryExecutor};
use meridian_error::Result;
use std::fmt::Debug;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lower;

impl FunctionInfo for Lower {
    fn name(&self) -> &'static str {
        "lower"
    }

    fn signatures(&self) -> &[Signature] {
        &[Signature {
            input: &[DataTypeId::Utf8],
            variadic: None,
            return_type: DataTypeId::Utf8,
        }]
    }
}

impl ScalarFunction for Lower {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 1)?;
        match &inputs[0] {
            DataType::Utf8 => Ok(Box::new(LowerUtf8Impl)),
            other => Err(invalid_input_types_error(self, &[other])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowerUtf8Impl;

impl PlannedScalarFunction for LowerUtf8Impl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &Lower
    }

    fn return_type(&self) -> DataType {
        DataType::Utf8
    }

    fn execute(&self, arrays: &[&Arc<Array>]) -> Result<Array> {
        let input = arrays[0];
        Ok(match input.as_ref() {
            Array::Utf8(input) => {
                let mut buffer = VarlenValuesBuffer::default();
                let validity = UnaryExecutor::execute(input, |s| s.to_lowercase(), &mut buffer)?;
                Array::Utf8(VarlenArray::new(buffer, validity))
            }
            other => panic!("unexpected array type: {other:?}"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upper;

impl FunctionInfo for Upper {
    fn name(&self) -> &'static str {
        "upper"
    }

    fn signatures(&self) -> &[Signature] {
        &[Signature {
            input: &[DataTypeId::Utf8],
            variadic: None,
            return_type: DataTypeId::Utf8,
        }]
    }
}

impl ScalarFunction for Upper {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 1)?;
        match &inputs[0] {
            DataType::Utf8 => Ok(Box::new(UpperUtf8Impl)),
            other => Err(invalid_input_types_error(self, &[other])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpperUtf8Impl;

impl PlannedScalarFunction for UpperUtf8Impl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &Upper
    }

    fn return_type(&self) -> DataType {
        DataType::Utf8
    }

    fn execute(&self, arrays: &[&Arc<Array>]) -> Result<Array> {
        let input = arrays[0];
        Ok(match input.as_ref() {
            Array::Utf8(input) => {
                let mut buffer = VarlenValuesBuffer::default();
                let validity = UnaryExecutor::execute(input, |s| s.to_uppercase(), &mut buffer)?;
                Array::Utf8(VarlenArray::new(buffer, validity))
            }
            other => panic!("unexpected array type: {other:?}"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeat;

impl FunctionInfo for Repeat {
    fn name(&self) -> &'static str {
        "repeat"
    }

    fn signatures(&self) -> &[Signature] {
        &[Signature {
            input: &[DataTypeId::Utf8, DataTypeId::Int64],
            variadic: None,
            return_type: DataTypeId::Utf8,
        }]
    }
}

impl ScalarFunction for Repeat {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 2)?;
        match (&inputs[0], &inputs[1]) {
            (DataType::Utf8, DataType::Int64) => Ok(Box::new(RepeatUtf8Impl)),
            (a, b) => Err(invalid_input_types_error(self, &[a, b])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatUtf8Impl;

impl PlannedScalarFunction for RepeatUtf8Impl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &Repeat
    }

    fn return_type(&self) -> DataType {
        DataType::Utf8
    }

    fn execute(&self, arrays: &[&Arc<Array>]) -> Result<Array> {
        let strings = arrays[0];
        let nums = arrays[1];
        Ok(match (strings.as_ref(), nums.as_ref()) {
            (Array::Utf8(strings), Array::Int64(nums)) => {
                let mut buffer = VarlenValuesBuffer::default();
                let validity = BinaryExecutor::execute(
                    strings,
                    nums,
                    |s, count| s.repeat(count as usize),
                    &mut buffer,
                )?;
                Array::Utf8(VarlenArray::new(buffer, validity))
            }
            other => panic!("unexpected array type: {other:?}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use meridian_array::array::{Int64Array, Utf8Array};

    use super::*;

    #[test]
    fn lower_utf8() {
        let a = Arc::new(Array::Utf8(Utf8Array::from_iter(["Hello", "WORLD"])));

        let specialized = Lower.plan_from_datatypes(&[DataType::Utf8]).unwrap();

        let out = specialized.execute(&[&a]).unwrap();
        let expected = Array::Utf8(Utf8Array::from_iter(["hello", "world"]));

        assert_eq!(expected, out);
    }

    #[test]
    fn upper_utf8() {
        let a = Arc::new(Array::Utf8(Utf8Array::from_iter(["Hello", "world"])));

        let specialized = Upper.plan_from_datatypes(&[DataType::Utf8]).unwrap();

        let out = specialized.execute(&[&a]).unwrap();
        let expected = Array::Utf8(Utf8Array::from_iter(["HELLO", "WORLD"]));

        assert_eq!(expected, out);
    }

    #[test]
    fn repeat_utf8() {
        let strings = Arc::new(Array::Utf8(Utf8Array::from_iter(["abc", "xy"])));
        let nums = Arc::new(Array::Int64(Int64Array::from_iter([3, 2])));

        let specialized = Repeat
            .plan_from_datatypes(&[DataType::Utf8, DataType::Int64])
            .unwrap();

        let out = specialized.execute(&[&strings, &nums]).unwrap();
        let expected = Array::Utf8(Utf8Array::from_iter(["abcabcabc", "xyxy"]));

        assert_eq!(expected, out);
    }

    #[test]
    fn repeat_invalid_types() {
        Repeat
            .plan_from_datatypes(&[DataType::Int64, DataType::Int64])
            .unwrap_err();
    }
}
