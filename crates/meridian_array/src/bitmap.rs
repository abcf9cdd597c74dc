use meridian_error::{MeridianError, Result};

/// An LSB ordered bitmap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    len: usize,
    data: Vec<u8>,
}

impl Bitmap {
    pub fn new_with_all_true(len: usize) -> Self {
        Bitmap {
            len,
            data: vec![u8::MAX; len.div_ceil(8)],
        }
    }

    pub fn new_with_all_false(len: usize) -> Self {
        Bitmap {
            len,
            data: vec![0; len.div_ceil(8)],
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the value at index.
    ///
    /// Panics if index is out of bounds.
    pub fn value(&self, idx: usize) -> bool {
        assert!(idx < self.len);
        self.data[idx / 8] & (1 << (idx % 8)) != 0
    }

    /// Set a bit at index.
    pub fn set(&mut self, idx: usize, val: bool) {
        assert!(idx < self.len);
        if val {
            self.data[idx / 8] |= 1 << (idx % 8);
        } else {
            self.data[idx / 8] &= !(1 << (idx % 8));
        }
    }

    /// Push a bit onto the end of the bitmap.
    pub fn push(&mut self, val: bool) {
        if self.len % 8 == 0 {
            self.data.push(0);
        }
        self.len += 1;
        self.set(self.len - 1, val);
    }

    /// Count the number of set bits.
    pub fn popcnt(&self) -> usize {
        self.iter().filter(|b| *b).count()
    }

    /// Bit AND this bitmap with some other bitmap, modifying in place.
    pub fn bit_and_mut(&mut self, other: &Bitmap) -> Result<()> {
        if self.len != other.len {
            return Err(MeridianError::new(format!(
                "Bitmap lengths differ, got {} and {}",
                self.len, other.len
            )));
        }

        for (byte, other) in self.data.iter_mut().zip(other.data.iter()) {
            *byte &= *other;
        }

        Ok(())
    }

    pub const fn iter(&self) -> BitmapIter {
        BitmapIter {
            idx: 0,
            bitmap: self,
        }
    }
}

impl FromIterator<bool> for Bitmap {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut bitmap = Bitmap::default();
        for val in iter {
            bitmap.push(val);
        }
        bitmap
    }
}

#[derive(Debug)]
pub struct BitmapIter<'a> {
    idx: usize,
    bitmap: &'a Bitmap,
}

impl Iterator for BitmapIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.bitmap.len() {
            return None;
        }

        let v = self.bitmap.value(self.idx);
        self.idx += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.bitmap.len() - self.idx,
            Some(self.bitmap.len() - self.idx),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple() {
        let bits = [true, false, true, false, true, true, true, true];
        let bm = Bitmap::from_iter(bits);

        assert_eq!(8, bm.len());

        let got: Vec<_> = bm.iter().collect();
        assert_eq!(bits.as_slice(), got);
    }

    #[test]
    fn not_multiple_of_eight() {
        let bits = [
            true, false, true, false, true, true, true, true, //
            true, false, true, false,
        ];
        let bm = Bitmap::from_iter(bits);

        assert_eq!(12, bm.len());

        let got: Vec<_> = bm.iter().collect();
        assert_eq!(bits.as_slice(), got);
    }

    #[test]
    fn set_simple() {
        let bits = [true, false, true, false, true, true, true, true];
        let mut bm = Bitmap::from_iter(bits);

        bm.set(0, false);
        assert!(!bm.value(0));

        bm.set(1, true);
        assert!(bm.value(1));
    }

    #[test]
    fn bit_and() {
        let mut a = Bitmap::from_iter([true, true, false, false]);
        let b = Bitmap::from_iter([true, false, true, false]);

        a.bit_and_mut(&b).unwrap();

        let got: Vec<_> = a.iter().collect();
        assert_eq!(vec![true, false, false, false], got);
    }

    #[test]
    fn bit_and_length_mismatch() {
        let mut a = Bitmap::from_iter([true, true]);
        let b = Bitmap::from_iter([true]);
        a.bit_and_mut(&b).unwrap_err();
    }

    #[test]
    fn all_true_all_false() {
        let t = Bitmap::new_with_all_true(12);
        assert_eq!(12, t.len());
        assert_eq!(12, t.popcnt());

        let f = Bitmap::new_with_all_false(12);
        assert_eq!(12, f.len());
        assert_eq!(0, f.popcnt());
    }
}
