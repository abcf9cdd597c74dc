use std::borrow::Cow;

use crate::array::{
    Array, BooleanArray, ExtensionArray, NullArray, PrimitiveArray, ValuesBuffer, VarlenArray,
    VarlenValuesBuffer,
};
use crate::datatype::{DataType, ExtensionTypeMeta};

/// A single scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue<'a> {
    /// Represents `DataType::Null` (castable to/from any other type)
    Null,

    /// True or false value
    Boolean(bool),

    /// Signed 64bit int
    Int64(i64),

    /// 64bit float
    Float64(f64),

    /// Utf-8 encoded string.
    Utf8(Cow<'a, str>),

    /// Binary
    Binary(Cow<'a, [u8]>),

    /// Value of an extension type, opaque bytes plus the type it belongs to.
    Extension(ExtensionScalar<'a>),
}

pub type OwnedScalarValue = ScalarValue<'static>;

/// Scalar for an extension type. The value is the type's binary encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionScalar<'a> {
    pub meta: ExtensionTypeMeta,
    pub value: Cow<'a, [u8]>,
}

impl<'a> ScalarValue<'a> {
    pub fn datatype(&self) -> DataType {
        match self {
            Self::Null => DataType::Null,
            Self::Boolean(_) => DataType::Boolean,
            Self::Int64(_) => DataType::Int64,
            Self::Float64(_) => DataType::Float64,
            Self::Utf8(_) => DataType::Utf8,
            Self::Binary(_) => DataType::Binary,
            Self::Extension(v) => DataType::Extension(v.meta.clone()),
        }
    }

    pub fn into_owned(self) -> OwnedScalarValue {
        match self {
            Self::Null => OwnedScalarValue::Null,
            Self::Boolean(v) => OwnedScalarValue::Boolean(v),
            Self::Int64(v) => OwnedScalarValue::Int64(v),
            Self::Float64(v) => OwnedScalarValue::Float64(v),
            Self::Utf8(v) => OwnedScalarValue::Utf8(v.into_owned().into()),
            Self::Binary(v) => OwnedScalarValue::Binary(v.into_owned().into()),
            Self::Extension(v) => OwnedScalarValue::Extension(ExtensionScalar {
                meta: v.meta,
                value: v.value.into_owned().into(),
            }),
        }
    }

    /// Create an array of size `len` by repeating this scalar.
    pub fn as_array(&self, len: usize) -> Array {
        match self {
            Self::Null => Array::Null(NullArray::new(len)),
            Self::Boolean(v) => Array::Boolean(BooleanArray::from_iter(
                std::iter::repeat(*v).take(len),
            )),
            Self::Int64(v) => Array::Int64(PrimitiveArray::from_iter(
                std::iter::repeat(*v).take(len),
            )),
            Self::Float64(v) => Array::Float64(PrimitiveArray::from_iter(
                std::iter::repeat(*v).take(len),
            )),
            Self::Utf8(v) => Array::Utf8(VarlenArray::from_iter(
                std::iter::repeat(v.as_ref()).take(len),
            )),
            Self::Binary(v) => Array::Binary(VarlenArray::from_iter(
                std::iter::repeat(v.as_ref()).take(len),
            )),
            Self::Extension(v) => {
                let mut buffer = VarlenValuesBuffer::default();
                for _ in 0..len {
                    buffer.push_value(v.value.as_ref());
                }
                Array::Extension(ExtensionArray::new(
                    v.meta.clone(),
                    VarlenArray::new(buffer, None),
                ))
            }
        }
    }
}

impl From<bool> for ScalarValue<'_> {
    fn from(value: bool) -> Self {
        ScalarValue::Boolean(value)
    }
}

impl From<i64> for ScalarValue<'_> {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<f64> for ScalarValue<'_> {
    fn from(value: f64) -> Self {
        ScalarValue::Float64(value)
    }
}

impl<'a> From<&'a str> for ScalarValue<'a> {
    fn from(value: &'a str) -> Self {
        ScalarValue::Utf8(value.into())
    }
}

impl From<String> for ScalarValue<'_> {
    fn from(value: String) -> Self {
        ScalarValue::Utf8(value.into())
    }
}

impl<'a> From<&'a [u8]> for ScalarValue<'a> {
    fn from(value: &'a [u8]) -> Self {
        ScalarValue::Binary(value.into())
    }
}

impl From<Vec<u8>> for ScalarValue<'_> {
    fn from(value: Vec<u8>) -> Self {
        ScalarValue::Binary(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_array_repeats() {
        let arr = ScalarValue::Int64(7).as_array(3);
        assert_eq!(3, arr.len());
        assert_eq!(Some(ScalarValue::Int64(7)), arr.scalar(2));
    }

    #[test]
    fn as_array_null() {
        let arr = ScalarValue::Null.as_array(2);
        assert_eq!(DataType::Null, arr.datatype());
        assert_eq!(Some(ScalarValue::Null), arr.scalar(0));
    }

    #[test]
    fn into_owned_detaches_borrow() {
        let s = String::from("hello");
        let scalar = ScalarValue::from(s.as_str());
        let owned: OwnedScalarValue = scalar.into_owned();
        drop(s);
        assert_eq!(OwnedScalarValue::Utf8("hello".into()), owned);
    }
}
