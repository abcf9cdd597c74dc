use crate::bitmap::{Bitmap, BitmapIter};

use super::{is_valid, ArrayAccessor};

/// A logical array for representing bools.
#[derive(Debug, PartialEq)]
pub struct BooleanArray {
    validity: Option<Bitmap>,
    values: Bitmap,
}

impl BooleanArray {
    pub fn new(values: Bitmap, validity: Option<Bitmap>) -> Self {
        BooleanArray { validity, values }
    }

    pub fn new_nulls(len: usize) -> Self {
        BooleanArray {
            validity: Some(Bitmap::new_with_all_false(len)),
            values: Bitmap::new_with_all_false(len),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_valid(&self, idx: usize) -> Option<bool> {
        if idx >= self.len() {
            return None;
        }

        Some(is_valid(self.validity.as_ref(), idx))
    }

    pub fn value(&self, idx: usize) -> Option<bool> {
        if idx >= self.len() {
            return None;
        }

        Some(self.values.value(idx))
    }

    pub fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }

    pub fn values(&self) -> &Bitmap {
        &self.values
    }
}

impl FromIterator<bool> for BooleanArray {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        BooleanArray {
            validity: None,
            values: Bitmap::from_iter(iter),
        }
    }
}

impl FromIterator<Option<bool>> for BooleanArray {
    fn from_iter<T: IntoIterator<Item = Option<bool>>>(iter: T) -> Self {
        let mut validity = Bitmap::default();
        let mut values = Bitmap::default();

        for item in iter {
            match item {
                Some(value) => {
                    validity.push(true);
                    values.push(value);
                }
                None => {
                    validity.push(false);
                    values.push(false);
                }
            }
        }

        BooleanArray {
            validity: Some(validity),
            values,
        }
    }
}

impl<'a> ArrayAccessor<bool> for &'a BooleanArray {
    type ValueIter = BitmapIter<'a>;

    fn len(&self) -> usize {
        self.values.len()
    }

    fn values_iter(&self) -> Self::ValueIter {
        self.values.iter()
    }

    fn validity(&self) -> Option<&Bitmap> {
        self.validity.as_ref()
    }
}
