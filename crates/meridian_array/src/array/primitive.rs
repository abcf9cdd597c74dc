use crate::bitmap::Bitmap;

use super::{is_valid, ArrayAccessor};

/// Array for storing primitive values.
#[derive(Debug, PartialEq)]
pub struct PrimitiveArray<T> {
    /// Validity bitmap.
    ///
    /// "True" values indicate the value at index is valid, "false" indicates
    /// null.
    validity: Option<Bitmap>,

    /// Underlying primitive values.
    values: Vec<T>,
}

pub type Int64Array = PrimitiveArray<i64>;
pub type Float64Array = PrimitiveArray<f64>;

impl<T> PrimitiveArray<T> {
    pub fn new(values: Vec<T>, validity: Option<Bitmap>) -> Self {
        PrimitiveArray { values, validity }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the value at the given index.
    ///
    /// This does not take validity into account.
    pub fn value(&self, idx: usize) -> Option<&T> {
        self.values.get(idx)
    }

    /// Get the validity at the given index.
    pub fn is_valid(&self, idx: usize) -> Option<bool> {
        if idx >= self.len() {
            return None;
        }

        Some(is_valid(self.validity.as_ref(), idx))
    }

    pub fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> PrimitiveArrayIter<T> {
        PrimitiveArrayIter {
            idx: 0,
            values: &self.values,
        }
    }
}

impl<T: Default + Clone> PrimitiveArray<T> {
    pub fn new_nulls(len: usize) -> Self {
        PrimitiveArray {
            validity: Some(Bitmap::new_with_all_false(len)),
            values: vec![T::default(); len],
        }
    }
}

impl<A> FromIterator<A> for PrimitiveArray<A> {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        PrimitiveArray {
            validity: None,
            values: iter.into_iter().collect(),
        }
    }
}

impl<A: Default> FromIterator<Option<A>> for PrimitiveArray<A> {
    fn from_iter<T: IntoIterator<Item = Option<A>>>(iter: T) -> Self {
        let mut validity = Bitmap::default();
        let mut values = Vec::new();

        for item in iter {
            match item {
                Some(value) => {
                    validity.push(true);
                    values.push(value);
                }
                None => {
                    validity.push(false);
                    values.push(A::default());
                }
            }
        }

        PrimitiveArray {
            validity: Some(validity),
            values,
        }
    }
}

impl<T> From<Vec<T>> for PrimitiveArray<T> {
    fn from(values: Vec<T>) -> Self {
        PrimitiveArray {
            validity: None,
            values,
        }
    }
}

#[derive(Debug)]
pub struct PrimitiveArrayIter<'a, T> {
    idx: usize,
    values: &'a [T],
}

impl<T: Copy> Iterator for PrimitiveArrayIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx == self.values.len() {
            None
        } else {
            let val = self.values[self.idx];
            self.idx += 1;
            Some(val)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.values.len() - self.idx,
            Some(self.values.len() - self.idx),
        )
    }
}

impl<'a, T: Copy> ArrayAccessor<T> for &'a PrimitiveArray<T> {
    type ValueIter = PrimitiveArrayIter<'a, T>;

    fn len(&self) -> usize {
        self.values.len()
    }

    fn values_iter(&self) -> Self::ValueIter {
        PrimitiveArrayIter {
            idx: 0,
            values: &self.values,
        }
    }

    fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }
}
