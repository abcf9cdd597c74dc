//! Casting between array types.
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use meridian_error::{MeridianError, Result, ResultExt};
use num::{NumCast, ToPrimitive};

use crate::array::{
    Array, ArrayAccessor, BooleanArray, PrimitiveArray, Utf8Array, VarlenArray, VarlenValuesBuffer,
};
use crate::bitmap::Bitmap;
use crate::datatype::DataType;
use crate::executor::scalar::UnaryExecutor;
use crate::format::{BoolFormatter, Float64Formatter, Formatter, Int64Formatter};

/// Logic for parsing a string into some type.
pub trait Parser {
    /// The type we'll be producing.
    type Type;

    /// Parse a string into `Type`, returning None if the parse cannot be done.
    fn parse(&mut self, s: &str) -> Option<Self::Type>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolParser;

impl Parser for BoolParser {
    type Type = bool;
    fn parse(&mut self, s: &str) -> Option<Self::Type> {
        match s {
            "t" | "true" | "TRUE" | "T" => Some(true),
            "f" | "false" | "FALSE" | "F" => Some(false),
            _ => None,
        }
    }
}

/// Parser that uses the stdlib `FromStr` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FromStrParser<T: FromStr> {
    _type: PhantomData<T>,
}

impl<T: FromStr> Parser for FromStrParser<T> {
    type Type = T;
    fn parse(&mut self, s: &str) -> Option<Self::Type> {
        T::from_str(s).ok()
    }
}

pub type Int64Parser = FromStrParser<i64>;
pub type Float64Parser = FromStrParser<f64>;

/// Cast an array to another type.
///
/// Null arrays cast to anything. Identity casts are expected to be handled by
/// the caller, they're not valid here.
pub fn cast_array(arr: &Array, to: &DataType) -> Result<Array> {
    Ok(match (arr, to) {
        (Array::Null(arr), to) => Array::new_nulls(to, arr.len()),
        (Array::Int64(arr), DataType::Float64) => Array::Float64(cast_primitive_numeric(arr)?),
        (Array::Float64(arr), DataType::Int64) => Array::Int64(cast_primitive_numeric(arr)?),
        (Array::Int64(arr), DataType::Utf8) => {
            Array::Utf8(cast_to_utf8(arr, Int64Formatter::default())?)
        }
        (Array::Float64(arr), DataType::Utf8) => {
            Array::Utf8(cast_to_utf8(arr, Float64Formatter::default())?)
        }
        (Array::Boolean(arr), DataType::Utf8) => {
            Array::Utf8(cast_to_utf8(arr, BoolFormatter::default())?)
        }
        (Array::Utf8(arr), DataType::Int64) => {
            Array::Int64(cast_from_utf8(arr, to, Int64Parser::default())?)
        }
        (Array::Utf8(arr), DataType::Float64) => {
            Array::Float64(cast_from_utf8(arr, to, Float64Parser::default())?)
        }
        (Array::Utf8(arr), DataType::Boolean) => {
            let mut buffer: Vec<bool> = Vec::with_capacity(arr.len());
            let validity = UnaryExecutor::try_execute(
                arr,
                |v| {
                    BoolParser.parse(v).ok_or_else(|| {
                        MeridianError::new(format!("Failed to parse '{v}' into Boolean"))
                    })
                },
                &mut buffer,
            )?;
            Array::Boolean(BooleanArray::new(Bitmap::from_iter(buffer), validity))
        }
        (arr, to) => {
            return Err(MeridianError::new(format!(
                "Unable to cast from {} to {to}",
                arr.datatype(),
            )))
        }
    })
}

/// Fallibly cast from primitive type A to primitive type B.
fn cast_primitive_numeric<A, B>(arr: &PrimitiveArray<A>) -> Result<PrimitiveArray<B>>
where
    A: Copy + ToPrimitive + fmt::Display,
    B: NumCast,
{
    let mut new_vals = Vec::with_capacity(arr.len());
    for val in arr.values().iter() {
        new_vals
            .push(B::from(*val).ok_or_else(|| MeridianError::new(format!("Failed to cast {val}")))?);
    }

    Ok(PrimitiveArray::new(new_vals, arr.validity().cloned()))
}

fn cast_to_utf8<A, T, I, F>(arr: A, mut formatter: F) -> Result<Utf8Array>
where
    A: ArrayAccessor<T, ValueIter = I>,
    I: Iterator<Item = T>,
    F: Formatter<Type = T>,
{
    let mut buffer = VarlenValuesBuffer::default();
    let validity = UnaryExecutor::try_execute(
        arr,
        |v| {
            let mut s = String::new();
            formatter.write(&v, &mut s).context("Failed to format value")?;
            Ok(s)
        },
        &mut buffer,
    )?;

    Ok(VarlenArray::new(buffer, validity))
}

fn cast_from_utf8<T, P>(arr: &Utf8Array, datatype: &DataType, mut parser: P) -> Result<PrimitiveArray<T>>
where
    T: Default,
    P: Parser<Type = T>,
{
    let mut buffer = Vec::with_capacity(arr.len());
    let validity = UnaryExecutor::try_execute(
        arr,
        |v| {
            parser
                .parse(v)
                .ok_or_else(|| MeridianError::new(format!("Failed to parse '{v}' into {datatype}")))
        },
        &mut buffer,
    )?;

    Ok(PrimitiveArray::new(buffer, validity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::ScalarValue;

    #[test]
    fn int64_to_float64() {
        let arr = Array::from_iter([Some(1_i64), None, Some(3)]);
        let got = cast_array(&arr, &DataType::Float64).unwrap();

        assert_eq!(DataType::Float64, got.datatype());
        assert_eq!(Some(ScalarValue::Float64(1.0)), got.scalar(0));
        assert_eq!(Some(ScalarValue::Null), got.scalar(1));
        assert_eq!(Some(ScalarValue::Float64(3.0)), got.scalar(2));
    }

    #[test]
    fn float64_to_int64_truncates() {
        let arr = Array::from_iter([1.9_f64, -2.5]);
        let got = cast_array(&arr, &DataType::Int64).unwrap();

        assert_eq!(Some(ScalarValue::Int64(1)), got.scalar(0));
        assert_eq!(Some(ScalarValue::Int64(-2)), got.scalar(1));
    }

    #[test]
    fn utf8_to_int64() {
        let arr = Array::from_iter(["13", "-5"]);
        let got = cast_array(&arr, &DataType::Int64).unwrap();

        assert_eq!(Some(ScalarValue::Int64(13)), got.scalar(0));
        assert_eq!(Some(ScalarValue::Int64(-5)), got.scalar(1));
    }

    #[test]
    fn utf8_to_int64_invalid() {
        let arr = Array::from_iter(["13", "nope"]);
        let err = cast_array(&arr, &DataType::Int64).unwrap_err();
        assert!(err.to_string().contains("'nope'"), "{err}");
    }

    #[test]
    fn int64_to_utf8() {
        let arr = Array::from_iter([42_i64]);
        let got = cast_array(&arr, &DataType::Utf8).unwrap();
        assert_eq!(Some(ScalarValue::Utf8("42".into())), got.scalar(0));
    }

    #[test]
    fn null_to_typed() {
        let arr = Array::new_nulls(&DataType::Null, 2);
        let got = cast_array(&arr, &DataType::Int64).unwrap();

        assert_eq!(DataType::Int64, got.datatype());
        assert_eq!(Some(ScalarValue::Null), got.scalar(0));
    }

    #[test]
    fn unsupported_cast() {
        let arr = Array::from_iter([true, false]);
        cast_array(&arr, &DataType::Int64).unwrap_err();
    }

    #[test]
    fn utf8_to_boolean() {
        let arr = Array::from_iter(["true", "f"]);
        let got = cast_array(&arr, &DataType::Boolean).unwrap();

        assert_eq!(Some(ScalarValue::Boolean(true)), got.scalar(0));
        assert_eq!(Some(ScalarValue::Boolean(false)), got.scalar(1));
    }
}
