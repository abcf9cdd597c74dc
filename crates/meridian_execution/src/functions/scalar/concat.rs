use crate::functions::scalar::{PlannedScalarFunction, ScalarFunction};
use crate::functions::{invalid_input_types_error, FunctionInfo, Signature};
use meridian_array::array::validity::union_validities;
use meridian_array::array::{Array, ValuesBuffer, VarlenArray, VarlenValuesBuffer};
use meridian_array::datatype::{DataType, DataTypeId};
use meridian_error::{MeridianError, Result};
use std::fmt::Debug;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concat;

impl FunctionInfo for Concat {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn signatures(&self) -> &[Signature] {
        &[Signature {
            input: &[],
            variadic: Some(DataTypeId::Utf8),
            return_type: DataTypeId::Utf8,
        }]
    }
}

impl ScalarFunction for Concat {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        if inputs.is_empty() {
            return Err(MeridianError::new(format!(
                "Expected at least 1 input for '{}', received 0",
                self.name()
            )));
        }
        for input in inputs {
            if input.datatype_id() != DataTypeId::Utf8 {
                let refs: Vec<_> = inputs.iter().collect();
                return Err(invalid_input_types_error(self, &refs));
            }
        }

        Ok(Box::new(StringConcatImpl))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringConcatImpl;

impl PlannedScalarFunction for StringConcatImpl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &Concat
    }

    fn return_type(&self) -> DataType {
        DataType::Utf8
    }

    fn execute(&self, arrays: &[&Arc<Array>]) -> Result<Array> {
        let inputs: Vec<_> = arrays
            .iter()
            .map(|arr| match arr.as_ref() {
                Array::Utf8(arr) => arr,
                other => panic!("unexpected array type: {other:?}"),
            })
            .collect();

        let len = inputs[0].len();
        for input in &inputs[1..] {
            if input.len() != len {
                return Err(MeridianError::new(format!(
                    "Differing lengths of arrays, got {} and {}",
                    len,
                    input.len()
                )));
            }
        }

        let validity = union_validities(inputs.iter().map(|arr| arr.validity()))?;

        let mut buffer = VarlenValuesBuffer::default();
        let mut string_buf = String::new();

        match &validity {
            Some(validity) => {
                for (idx, valid) in validity.iter().enumerate() {
                    if valid {
                        string_buf.clear();
                        for input in &inputs {
                            if let Some(s) = input.value(idx) {
                                string_buf.push_str(s);
                            }
                        }
                        buffer.push_value(string_buf.as_str());
                    } else {
                        ValuesBuffer::<&str>::push_null(&mut buffer);
                    }
                }
            }
            None => {
                for idx in 0..len {
                    string_buf.clear();
                    for input in &inputs {
                        if let Some(s) = input.value(idx) {
                            string_buf.push_str(s);
                        }
                    }
                    buffer.push_value(string_buf.as_str());
                }
            }
        }

        Ok(Array::Utf8(VarlenArray::new(buffer, validity)))
    }
}
