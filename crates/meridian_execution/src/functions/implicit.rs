use meridian_array::datatype::{DataType, DataTypeId};

/// Return the score for casting from `have` to `want`.
///
/// A higher score indicates a more preferred cast.
///
/// This is a best-effort attempt to determine if casting from one type to
/// another is valid and won't lose precision.
pub const fn implicit_cast_score(have: &DataType, want: DataTypeId) -> i32 {
    // Cast NULL to anything.
    if have.is_null() {
        return target_score(want);
    }

    match have {
        // Integer casts.
        DataType::Int64 => return int64_cast_score(want),

        // String casts.
        DataType::Utf8 => match want {
            DataTypeId::Int64 | DataTypeId::Float64 => return target_score(want),
            _ => (),
        },

        _ => (),
    }

    // No valid cast found.
    -1
}

/// Determine the score for the target type we can cast to.
///
/// More "specific" types will have a higher target score.
const fn target_score(target: DataTypeId) -> i32 {
    match target {
        DataTypeId::Utf8 => 1,
        DataTypeId::Int64 => 101,
        DataTypeId::Float64 => 142,
        _ => 100,
    }
}

const fn int64_cast_score(want: DataTypeId) -> i32 {
    match want {
        DataTypeId::Int64 | DataTypeId::Float64 => target_score(want),
        _ => -1,
    }
}
