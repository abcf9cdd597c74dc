/// Execute a unary operation on a primitive array, wrapping the result in the
/// given output array variant.
macro_rules! primitive_unary_execute {
    ($input:expr, $output_variant:ident, $operation:expr) => {{
        use meridian_array::array::{Array, PrimitiveArray};
        use meridian_array::executor::scalar::UnaryExecutor;

        let mut buffer = Vec::with_capacity($input.len());
        let validity = UnaryExecutor::execute($input, $operation, &mut buffer)?;
        Array::$output_variant(PrimitiveArray::new(buffer, validity))
    }};
}

pub(crate) use primitive_unary_execute;

/// Execute a binary operation on two primitive arrays, wrapping the result in
/// the given output array variant.
macro_rules! primitive_binary_execute {
    ($first:expr, $second:expr, $output_variant:ident, $operation:expr) => {{
        use meridian_array::array::{Array, PrimitiveArray};
        use meridian_array::executor::scalar::BinaryExecutor;

        let mut buffer = Vec::with_capacity($first.len());
        let validity = BinaryExecutor::execute($first, $second, $operation, &mut buffer)?;
        Array::$output_variant(PrimitiveArray::new(buffer, validity))
    }};
}

pub(crate) use primitive_binary_execute;
