use meridian_error::Result;

use crate::bitmap::Bitmap;

/// Union validity bitmaps from multiple arrays.
///
/// Returns None if no input has a bitmap, meaning every row is valid. A row in
/// the output is valid only if it's valid in every input.
pub fn union_validities<'a>(
    validities: impl IntoIterator<Item = Option<&'a Bitmap>>,
) -> Result<Option<Bitmap>> {
    let mut unioned: Option<Bitmap> = None;

    for validity in validities {
        match (&mut unioned, validity) {
            (Some(curr), Some(validity)) => curr.bit_and_mut(validity)?,
            (None, Some(validity)) => unioned = Some(validity.clone()),
            _ => (),
        }
    }

    Ok(unioned)
}
