pub mod null;
pub use null::*;
pub mod boolean;
pub use boolean::*;
pub mod primitive;
pub use primitive::*;
pub mod varlen;
pub use varlen::*;
pub mod extension;
pub use extension::*;
pub mod validity;

use meridian_error::{MeridianError, Result};

use crate::bitmap::Bitmap;
use crate::datatype::DataType;
use crate::scalar::{ExtensionScalar, ScalarValue};

/// Helper for determining validity at a given index.
///
/// A missing bitmap means all values are valid.
pub(crate) fn is_valid(validity: Option<&Bitmap>, idx: usize) -> bool {
    validity.map(|bm| bm.value(idx)).unwrap_or(true)
}

/// Access to the values and validity of a typed array.
///
/// Implemented on references to arrays so that iteration can borrow from the
/// underlying data.
pub trait ArrayAccessor<T> {
    type ValueIter: Iterator<Item = T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterator over the raw values, ignoring validity.
    fn values_iter(&self) -> Self::ValueIter;

    fn validity(&self) -> Option<&Bitmap>;
}

/// Buffer for pushing computed values when building up a new array.
pub trait ValuesBuffer<T> {
    fn push_value(&mut self, value: T);

    /// Push a placeholder for a null value.
    fn push_null(&mut self);
}

impl<T: Default> ValuesBuffer<T> for Vec<T> {
    fn push_value(&mut self, value: T) {
        self.push(value);
    }

    fn push_null(&mut self) {
        self.push(T::default());
    }
}

#[derive(Debug, PartialEq)]
pub enum Array {
    Null(NullArray),
    Boolean(BooleanArray),
    Int64(Int64Array),
    Float64(Float64Array),
    Utf8(Utf8Array),
    Binary(BinaryArray),
    Extension(ExtensionArray),
}

impl Array {
    /// Create a new array of the given type with all values null.
    pub fn new_nulls(datatype: &DataType, len: usize) -> Self {
        match datatype {
            DataType::Null => Array::Null(NullArray::new(len)),
            DataType::Boolean => Array::Boolean(BooleanArray::new_nulls(len)),
            DataType::Int64 => Array::Int64(PrimitiveArray::new_nulls(len)),
            DataType::Float64 => Array::Float64(PrimitiveArray::new_nulls(len)),
            DataType::Utf8 => Array::Utf8(VarlenArray::new_nulls(len)),
            DataType::Binary => Array::Binary(VarlenArray::new_nulls(len)),
            DataType::Extension(meta) => {
                Array::Extension(ExtensionArray::new_nulls(meta.clone(), len))
            }
        }
    }

    pub fn datatype(&self) -> DataType {
        match self {
            Array::Null(_) => DataType::Null,
            Array::Boolean(_) => DataType::Boolean,
            Array::Int64(_) => DataType::Int64,
            Array::Float64(_) => DataType::Float64,
            Array::Utf8(_) => DataType::Utf8,
            Array::Binary(_) => DataType::Binary,
            Array::Extension(arr) => arr.datatype(),
        }
    }

    /// Get a scalar value at the given index.
    pub fn scalar(&self, idx: usize) -> Option<ScalarValue> {
        if !self.is_valid(idx)? {
            return Some(ScalarValue::Null);
        }

        Some(match self {
            Self::Null(_) => unreachable!("nulls handled by validity check"),
            Self::Boolean(arr) => ScalarValue::Boolean(arr.value(idx)?),
            Self::Int64(arr) => ScalarValue::Int64(*arr.value(idx)?),
            Self::Float64(arr) => ScalarValue::Float64(*arr.value(idx)?),
            Self::Utf8(arr) => ScalarValue::Utf8(arr.value(idx)?.into()),
            Self::Binary(arr) => ScalarValue::Binary(arr.value(idx)?.into()),
            Self::Extension(arr) => ScalarValue::Extension(ExtensionScalar {
                meta: arr.meta().clone(),
                value: arr.value(idx)?.into(),
            }),
        })
    }

    pub fn is_valid(&self, idx: usize) -> Option<bool> {
        match self {
            Self::Null(arr) => arr.is_valid(idx),
            Self::Boolean(arr) => arr.is_valid(idx),
            Self::Int64(arr) => arr.is_valid(idx),
            Self::Float64(arr) => arr.is_valid(idx),
            Self::Utf8(arr) => arr.is_valid(idx),
            Self::Binary(arr) => arr.is_valid(idx),
            Self::Extension(arr) => arr.is_valid(idx),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Null(arr) => arr.len(),
            Self::Boolean(arr) => arr.len(),
            Self::Int64(arr) => arr.len(),
            Self::Float64(arr) => arr.len(),
            Self::Utf8(arr) => arr.len(),
            Self::Binary(arr) => arr.len(),
            Self::Extension(arr) => arr.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validity(&self) -> Option<&Bitmap> {
        match self {
            Self::Null(_) => None,
            Self::Boolean(arr) => arr.validity(),
            Self::Int64(arr) => arr.validity(),
            Self::Float64(arr) => arr.validity(),
            Self::Utf8(arr) => arr.validity(),
            Self::Binary(arr) => arr.validity(),
            Self::Extension(arr) => arr.validity(),
        }
    }

    /// Try to convert an iterator of scalars of a given datatype into an array.
    ///
    /// Errors if any of the scalars are a different type than the provided
    /// datatype. Null scalars are accepted for any type.
    pub fn try_from_scalars<'a>(
        datatype: DataType,
        scalars: impl Iterator<Item = ScalarValue<'a>>,
    ) -> Result<Array> {
        fn unexpected(scalar: &ScalarValue, want: &DataType) -> MeridianError {
            MeridianError::new(format!(
                "Unexpected scalar value: {scalar:?}, want: {want}"
            ))
        }

        match &datatype {
            DataType::Null => {
                let mut len = 0;
                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => len += 1,
                        other => return Err(unexpected(&other, &datatype)),
                    }
                }
                Ok(Array::Null(NullArray::new(len)))
            }
            DataType::Boolean => {
                let mut validity = Bitmap::default();
                let mut values = Bitmap::default();
                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => {
                            validity.push(false);
                            values.push(false);
                        }
                        ScalarValue::Boolean(v) => {
                            validity.push(true);
                            values.push(v);
                        }
                        other => return Err(unexpected(&other, &datatype)),
                    }
                }
                Ok(Array::Boolean(BooleanArray::new(values, Some(validity))))
            }
            DataType::Int64 => {
                let mut validity = Bitmap::default();
                let mut values = Vec::new();
                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => {
                            validity.push(false);
                            values.push(0);
                        }
                        ScalarValue::Int64(v) => {
                            validity.push(true);
                            values.push(v);
                        }
                        other => return Err(unexpected(&other, &datatype)),
                    }
                }
                Ok(Array::Int64(PrimitiveArray::new(values, Some(validity))))
            }
            DataType::Float64 => {
                let mut validity = Bitmap::default();
                let mut values = Vec::new();
                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => {
                            validity.push(false);
                            values.push(0.0);
                        }
                        ScalarValue::Float64(v) => {
                            validity.push(true);
                            values.push(v);
                        }
                        other => return Err(unexpected(&other, &datatype)),
                    }
                }
                Ok(Array::Float64(PrimitiveArray::new(values, Some(validity))))
            }
            DataType::Utf8 => {
                let mut validity = Bitmap::default();
                let mut buffer = VarlenValuesBuffer::default();
                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => {
                            validity.push(false);
                            ValuesBuffer::<&str>::push_null(&mut buffer);
                        }
                        ScalarValue::Utf8(v) => {
                            validity.push(true);
                            buffer.push_value(v.as_ref());
                        }
                        other => return Err(unexpected(&other, &datatype)),
                    }
                }
                Ok(Array::Utf8(VarlenArray::new(buffer, Some(validity))))
            }
            DataType::Binary => {
                let mut validity = Bitmap::default();
                let mut buffer = VarlenValuesBuffer::default();
                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => {
                            validity.push(false);
                            ValuesBuffer::<&[u8]>::push_null(&mut buffer);
                        }
                        ScalarValue::Binary(v) => {
                            validity.push(true);
                            buffer.push_value(v.as_ref());
                        }
                        other => return Err(unexpected(&other, &datatype)),
                    }
                }
                Ok(Array::Binary(VarlenArray::new(buffer, Some(validity))))
            }
            DataType::Extension(meta) => {
                let mut validity = Bitmap::default();
                let mut buffer = VarlenValuesBuffer::default();
                for scalar in scalars {
                    match scalar {
                        ScalarValue::Null => {
                            validity.push(false);
                            ValuesBuffer::<&[u8]>::push_null(&mut buffer);
                        }
                        ScalarValue::Extension(v) if v.meta == *meta => {
                            validity.push(true);
                            buffer.push_value(v.value.as_ref());
                        }
                        other => return Err(unexpected(&other, &datatype)),
                    }
                }
                Ok(Array::Extension(ExtensionArray::new(
                    meta.clone(),
                    VarlenArray::new(buffer, Some(validity)),
                )))
            }
        }
    }
}

impl FromIterator<i64> for Array {
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        Array::Int64(PrimitiveArray::from_iter(iter))
    }
}

impl FromIterator<f64> for Array {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Array::Float64(PrimitiveArray::from_iter(iter))
    }
}

impl FromIterator<bool> for Array {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Array::Boolean(BooleanArray::from_iter(iter))
    }
}

impl<'a> FromIterator<&'a str> for Array {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Array::Utf8(VarlenArray::from_iter(iter))
    }
}

impl FromIterator<Option<i64>> for Array {
    fn from_iter<T: IntoIterator<Item = Option<i64>>>(iter: T) -> Self {
        Array::Int64(PrimitiveArray::from_iter(iter))
    }
}

impl FromIterator<Option<f64>> for Array {
    fn from_iter<T: IntoIterator<Item = Option<f64>>>(iter: T) -> Self {
        Array::Float64(PrimitiveArray::from_iter(iter))
    }
}
