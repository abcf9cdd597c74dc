use std::marker::PhantomData;

use crate::bitmap::Bitmap;

use super::{is_valid, ArrayAccessor, ValuesBuffer};

/// Types that can be stored in a variable length array.
pub trait VarlenType: PartialEq {
    fn as_bytes(&self) -> &[u8];

    /// Interpret a byte slice pushed by `as_bytes` back as this type.
    fn interpret(bytes: &[u8]) -> &Self;
}

impl VarlenType for str {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }

    fn interpret(bytes: &[u8]) -> &Self {
        std::str::from_utf8(bytes).expect("varlen data to contain valid utf8")
    }
}

impl VarlenType for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn interpret(bytes: &[u8]) -> &Self {
        bytes
    }
}

/// Array for storing variable length values.
#[derive(Debug, PartialEq)]
pub struct VarlenArray<T: VarlenType + ?Sized> {
    /// Validity bitmap.
    validity: Option<Bitmap>,

    /// Value offsets into the data buffer. Contains `len + 1` entries.
    offsets: Vec<usize>,

    /// The raw data.
    data: Vec<u8>,

    _type: PhantomData<T>,
}

pub type Utf8Array = VarlenArray<str>;
pub type BinaryArray = VarlenArray<[u8]>;

impl<T: VarlenType + ?Sized> VarlenArray<T> {
    pub fn new(mut buffer: VarlenValuesBuffer, validity: Option<Bitmap>) -> Self {
        buffer.ensure_initial_offset();
        VarlenArray {
            validity,
            offsets: buffer.offsets,
            data: buffer.data,
            _type: PhantomData,
        }
    }

    pub fn new_nulls(len: usize) -> Self {
        VarlenArray {
            validity: Some(Bitmap::new_with_all_false(len)),
            offsets: vec![0; len + 1],
            data: Vec::new(),
            _type: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the value at the given index.
    ///
    /// This does not take validity into account.
    pub fn value(&self, idx: usize) -> Option<&T> {
        if idx >= self.len() {
            return None;
        }

        let bytes = &self.data[self.offsets[idx]..self.offsets[idx + 1]];
        Some(T::interpret(bytes))
    }

    pub fn is_valid(&self, idx: usize) -> Option<bool> {
        if idx >= self.len() {
            return None;
        }

        Some(is_valid(self.validity.as_ref(), idx))
    }

    pub fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }

    pub fn iter(&self) -> VarlenArrayIter<T> {
        VarlenArrayIter {
            idx: 0,
            array: self,
        }
    }
}

impl<'a, T: VarlenType + AsRef<[u8]> + ?Sized> FromIterator<&'a T> for VarlenArray<T> {
    fn from_iter<I: IntoIterator<Item = &'a T>>(iter: I) -> Self {
        let mut buffer = VarlenValuesBuffer::default();
        for item in iter {
            buffer.push_value(item);
        }
        VarlenArray::new(buffer, None)
    }
}

impl<'a, T: VarlenType + AsRef<[u8]> + ?Sized> FromIterator<Option<&'a T>> for VarlenArray<T> {
    fn from_iter<I: IntoIterator<Item = Option<&'a T>>>(iter: I) -> Self {
        let mut validity = Bitmap::default();
        let mut buffer = VarlenValuesBuffer::default();

        for item in iter {
            match item {
                Some(value) => {
                    validity.push(true);
                    buffer.push_value(value);
                }
                None => {
                    validity.push(false);
                    ValuesBuffer::<&T>::push_null(&mut buffer);
                }
            }
        }

        VarlenArray::new(buffer, Some(validity))
    }
}

#[derive(Debug)]
pub struct VarlenArrayIter<'a, T: VarlenType + ?Sized> {
    idx: usize,
    array: &'a VarlenArray<T>,
}

impl<'a, T: VarlenType + ?Sized> Iterator for VarlenArrayIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let val = self.array.value(self.idx)?;
        self.idx += 1;
        Some(val)
    }
}

impl<'a, T: VarlenType + ?Sized> ArrayAccessor<&'a T> for &'a VarlenArray<T> {
    type ValueIter = VarlenArrayIter<'a, T>;

    fn len(&self) -> usize {
        VarlenArray::len(self)
    }

    fn values_iter(&self) -> Self::ValueIter {
        VarlenArrayIter {
            idx: 0,
            array: self,
        }
    }

    fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }
}

/// Buffer for appending variable length values.
#[derive(Debug, Default)]
pub struct VarlenValuesBuffer {
    offsets: Vec<usize>,
    data: Vec<u8>,
}

impl VarlenValuesBuffer {
    fn ensure_initial_offset(&mut self) {
        if self.offsets.is_empty() {
            self.offsets.push(0);
        }
    }
}

impl<V: AsRef<[u8]>> ValuesBuffer<V> for VarlenValuesBuffer {
    fn push_value(&mut self, value: V) {
        self.ensure_initial_offset();
        self.data.extend_from_slice(value.as_ref());
        self.offsets.push(self.data.len());
    }

    fn push_null(&mut self) {
        self.ensure_initial_offset();
        self.offsets.push(self.data.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_roundtrip() {
        let arr = Utf8Array::from_iter(["a", "", "longer value"]);
        assert_eq!(3, arr.len());
        assert_eq!(Some("a"), arr.value(0));
        assert_eq!(Some(""), arr.value(1));
        assert_eq!(Some("longer value"), arr.value(2));
        assert_eq!(None, arr.value(3));
    }

    #[test]
    fn nulls_tracked_in_validity() {
        let arr = Utf8Array::from_iter([Some("a"), None, Some("c")]);
        assert_eq!(Some(true), arr.is_valid(0));
        assert_eq!(Some(false), arr.is_valid(1));
        assert_eq!(Some(true), arr.is_valid(2));
    }

    #[test]
    fn binary_values() {
        let vals: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![], vec![255]];
        let arr = BinaryArray::from_iter(vals.iter().map(|v| v.as_slice()));
        assert_eq!(Some([1, 2, 3].as_slice()), arr.value(0));
        assert_eq!(Some([].as_slice()), arr.value(1));
        assert_eq!(Some([255].as_slice()), arr.value(2));
    }
}
