//! Utilities for writing values into strings (and other buffers).
use std::fmt::{self, Display, Write as _};
use std::marker::PhantomData;

use meridian_error::Result;

use crate::scalar::ScalarValue;

/// Logic for formatting and writing a type to a buffer.
pub trait Formatter {
    /// Type we're formatting.
    type Type;

    /// Write the value to the buffer.
    fn write<W: fmt::Write>(&mut self, val: &Self::Type, buf: &mut W) -> fmt::Result;
}

/// Formatter that uses the type's `Display` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFormatter<T: Display> {
    _type: PhantomData<T>,
}

impl<T: Display> Formatter for DisplayFormatter<T> {
    type Type = T;
    fn write<W: fmt::Write>(&mut self, val: &Self::Type, buf: &mut W) -> fmt::Result {
        write!(buf, "{val}")
    }
}

pub type BoolFormatter = DisplayFormatter<bool>;
pub type Int64Formatter = DisplayFormatter<i64>;
pub type Float64Formatter = DisplayFormatter<f64>;

/// Format a scalar value into a string suitable for query output.
///
/// Null renders as "NULL", binary values hex encode, and extension values
/// delegate to the extension type's formatting.
pub fn format_scalar(scalar: &ScalarValue) -> Result<String> {
    let mut buf = String::new();

    match scalar {
        ScalarValue::Null => buf.push_str("NULL"),
        ScalarValue::Boolean(v) => BoolFormatter::default().write(v, &mut buf)?,
        ScalarValue::Int64(v) => Int64Formatter::default().write(v, &mut buf)?,
        ScalarValue::Float64(v) => Float64Formatter::default().write(v, &mut buf)?,
        ScalarValue::Utf8(v) => buf.push_str(v),
        ScalarValue::Binary(v) => {
            for byte in v.as_ref() {
                write!(buf, "{byte:02x}")?;
            }
        }
        ScalarValue::Extension(v) => {
            let formatted = v.meta.format_value(v.value.as_ref())?;
            buf.push_str(&formatted);
        }
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_primitives() {
        assert_eq!("NULL", format_scalar(&ScalarValue::Null).unwrap());
        assert_eq!("true", format_scalar(&ScalarValue::Boolean(true)).unwrap());
        assert_eq!("-4", format_scalar(&ScalarValue::Int64(-4)).unwrap());
        assert_eq!(
            "52.233",
            format_scalar(&ScalarValue::Float64(52.233)).unwrap()
        );
        assert_eq!(
            "hello",
            format_scalar(&ScalarValue::Utf8("hello".into())).unwrap()
        );
    }

    #[test]
    fn format_binary_hex() {
        assert_eq!(
            "00ff10",
            format_scalar(&ScalarValue::Binary(vec![0x00, 0xff, 0x10].into())).unwrap()
        );
    }

    #[test]
    fn float_display_no_trailing_zeros() {
        assert_eq!("21.016", format_scalar(&ScalarValue::Float64(21.016)).unwrap());
        assert_eq!("1", format_scalar(&ScalarValue::Float64(1.0)).unwrap());
    }
}
