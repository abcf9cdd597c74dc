use crate::bitmap::Bitmap;
use crate::datatype::{DataType, ExtensionTypeMeta};

use super::BinaryArray;

/// Wrapper around a binary array for values of an extension type.
///
/// The extension metadata refines the plain binary values into the registered
/// type, including how the values are rendered.
#[derive(Debug, PartialEq)]
pub struct ExtensionArray {
    meta: ExtensionTypeMeta,
    array: BinaryArray,
}

impl ExtensionArray {
    pub fn new(meta: ExtensionTypeMeta, array: BinaryArray) -> Self {
        ExtensionArray { meta, array }
    }

    pub fn new_nulls(meta: ExtensionTypeMeta, len: usize) -> Self {
        ExtensionArray {
            meta,
            array: BinaryArray::new_nulls(len),
        }
    }

    pub fn meta(&self) -> &ExtensionTypeMeta {
        &self.meta
    }

    pub fn datatype(&self) -> DataType {
        DataType::Extension(self.meta.clone())
    }

    pub fn get_binary(&self) -> &BinaryArray {
        &self.array
    }

    /// Get the raw value at the given index.
    ///
    /// This does not take validity into account.
    pub fn value(&self, idx: usize) -> Option<&[u8]> {
        self.array.value(idx)
    }

    pub fn is_valid(&self, idx: usize) -> Option<bool> {
        self.array.is_valid(idx)
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    pub fn validity(&self) -> Option<&Bitmap> {
        self.array.validity()
    }
}
