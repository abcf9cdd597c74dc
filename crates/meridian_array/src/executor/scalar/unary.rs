use meridian_error::Result;

use crate::array::{ArrayAccessor, ValuesBuffer};
use crate::bitmap::Bitmap;

/// Execute an operation on a single array.
#[derive(Debug, Clone, Copy)]
pub struct UnaryExecutor;

impl UnaryExecutor {
    /// Execute an infallible operation on an array.
    ///
    /// Returns the validity for the output array. The operation is not called
    /// for rows that are not valid.
    pub fn execute<Array, Type, Iter, Output>(
        array: Array,
        mut operation: impl FnMut(Type) -> Output,
        buffer: &mut impl ValuesBuffer<Output>,
    ) -> Result<Option<Bitmap>>
    where
        Array: ArrayAccessor<Type, ValueIter = Iter>,
        Iter: Iterator<Item = Type>,
    {
        match array.validity() {
            Some(validity) => {
                for (value, valid) in array.values_iter().zip(validity.iter()) {
                    if valid {
                        let out = operation(value);
                        buffer.push_value(out);
                    } else {
                        buffer.push_null();
                    }
                }
                Ok(Some(validity.clone()))
            }
            None => {
                for value in array.values_iter() {
                    let out = operation(value);
                    buffer.push_value(out);
                }
                Ok(None)
            }
        }
    }

    /// Execute a potentially fallible operation on an array.
    pub fn try_execute<Array, Type, Iter, Output>(
        array: Array,
        mut operation: impl FnMut(Type) -> Result<Output>,
        buffer: &mut impl ValuesBuffer<Output>,
    ) -> Result<Option<Bitmap>>
    where
        Array: ArrayAccessor<Type, ValueIter = Iter>,
        Iter: Iterator<Item = Type>,
    {
        match array.validity() {
            Some(validity) => {
                for (value, valid) in array.values_iter().zip(validity.iter()) {
                    if valid {
                        let out = operation(value)?;
                        buffer.push_value(out);
                    } else {
                        buffer.push_null();
                    }
                }
                Ok(Some(validity.clone()))
            }
            None => {
                for value in array.values_iter() {
                    let out = operation(value)?;
                    buffer.push_value(out);
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use meridian_error::MeridianError;

    use super::*;
    use crate::array::{Int64Array, PrimitiveArray, Utf8Array, VarlenArray, VarlenValuesBuffer};

    #[test]
    fn unary_simple_add() {
        let array = Int64Array::from_iter([1, 2, 3]);

        let mut buffer = Vec::with_capacity(3);
        let validity = UnaryExecutor::execute(&array, |v| v + 2, &mut buffer).unwrap();

        let got = PrimitiveArray::new(buffer, validity);
        let expected = Int64Array::from_iter([3, 4, 5]);

        assert_eq!(expected, got);
    }

    #[test]
    fn unary_skips_nulls() {
        let array = Int64Array::from_iter([Some(1), None, Some(3)]);

        let mut calls = 0;
        let mut buffer = Vec::new();
        let validity = UnaryExecutor::execute(
            &array,
            |v| {
                calls += 1;
                v * 10
            },
            &mut buffer,
        )
        .unwrap();

        assert_eq!(2, calls);

        let got = PrimitiveArray::new(buffer, validity);
        let expected = Int64Array::from_iter([Some(10), None, Some(30)]);

        assert_eq!(expected, got);
    }

    #[test]
    fn unary_string_uppercase() {
        let array = Utf8Array::from_iter(["a", "bb", "ccc"]);

        let mut buffer = VarlenValuesBuffer::default();
        let validity =
            UnaryExecutor::execute(&array, |s| s.to_uppercase(), &mut buffer).unwrap();

        let got = VarlenArray::new(buffer, validity);
        let expected = Utf8Array::from_iter(["A", "BB", "CCC"]);

        assert_eq!(expected, got);
    }

    #[test]
    fn try_unary_fallible() {
        let array = Utf8Array::from_iter(["1", "nope"]);

        let mut buffer = Vec::new();
        let result = UnaryExecutor::try_execute(
            &array,
            |s| {
                s.parse::<i64>()
                    .map_err(|_| MeridianError::new("bad parse"))
            },
            &mut buffer,
        );

        result.unwrap_err();
    }
}
