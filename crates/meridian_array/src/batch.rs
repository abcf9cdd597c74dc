use std::sync::Arc;

use meridian_error::{MeridianError, Result};

use crate::array::Array;
use crate::scalar::ScalarValue;

/// A batch of same-length arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Columns that make up this batch.
    cols: Vec<Arc<Array>>,

    /// Number of rows in this batch. Needed to allow for a batch that has no
    /// columns but a non-zero number of rows.
    num_rows: usize,
}

impl Batch {
    pub const fn empty() -> Self {
        Batch {
            cols: Vec::new(),
            num_rows: 0,
        }
    }

    pub fn empty_with_num_rows(num_rows: usize) -> Self {
        Batch {
            cols: Vec::new(),
            num_rows,
        }
    }

    /// Create a new batch from some number of arrays.
    ///
    /// All arrays should be of the same length.
    pub fn try_new<A>(cols: impl IntoIterator<Item = A>) -> Result<Self>
    where
        A: Into<Arc<Array>>,
    {
        let cols: Vec<_> = cols.into_iter().map(|arr| arr.into()).collect();
        let len = match cols.first() {
            Some(arr) => arr.len(),
            None => return Ok(Self::empty()),
        };

        for (idx, col) in cols.iter().enumerate() {
            if col.len() != len {
                return Err(MeridianError::new(format!(
                    "Expected column length to be {len}, got {}. Column idx: {idx}",
                    col.len()
                )));
            }
        }

        Ok(Batch {
            cols,
            num_rows: len,
        })
    }

    /// Get the values of the row at some index.
    pub fn row(&self, idx: usize) -> Option<Vec<ScalarValue>> {
        if idx >= self.num_rows {
            return None;
        }

        // Non-zero number of rows, but no actual columns. Just return an empty
        // row.
        if self.cols.is_empty() {
            return Some(Vec::new());
        }

        let row = self.cols.iter().map(|col| col.scalar(idx).unwrap());

        Some(row.collect())
    }

    pub fn column(&self, idx: usize) -> Option<&Arc<Array>> {
        self.cols.get(idx)
    }

    pub fn columns(&self) -> &[Arc<Array>] {
        &self.cols
    }

    pub fn num_columns(&self) -> usize {
        self.cols.len()
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_mismatched_lengths() {
        Batch::try_new([
            Array::from_iter([1_i64, 2, 3]),
            Array::from_iter(["a", "b"]),
        ])
        .unwrap_err();
    }

    #[test]
    fn row_iteration() {
        let batch = Batch::try_new([
            Array::from_iter([1_i64, 2]),
            Array::from_iter(["hello", "world"]),
        ])
        .unwrap();

        assert_eq!(2, batch.num_rows());
        assert_eq!(2, batch.num_columns());

        let row = batch.row(1).unwrap();
        assert_eq!(
            vec![ScalarValue::Int64(2), ScalarValue::Utf8("world".into())],
            row
        );

        assert_eq!(None, batch.row(2));
    }

    #[test]
    fn empty_with_rows_has_empty_rows() {
        let batch = Batch::empty_with_num_rows(3);
        assert_eq!(3, batch.num_rows());
        assert_eq!(Some(Vec::new()), batch.row(0));
    }
}
