use std::fmt::Debug;
use std::sync::Arc;

use meridian_array::array::{Array, ExtensionArray, VarlenArray, VarlenValuesBuffer};
use meridian_array::datatype::{DataType, DataTypeId};
use meridian_array::executor::scalar::{BinaryExecutor, UnaryExecutor};
use meridian_error::Result;
use meridian_execution::functions::scalar::{PlannedScalarFunction, ScalarFunction};
use meridian_execution::functions::{
    invalid_input_types_error, plan_check_num_args, FunctionInfo, Signature,
};

use crate::geometry::{Coordinate, Geometry};
use crate::serde;
use crate::types::{GEOMETRY, GEOMETRY_TYPE_NAME};
use crate::wkt;

/// Construct a point from an x and y coordinate.
///
/// Coordinates are not range checked, any pair of doubles forms a valid
/// planar point. Range checks happen when converting to spherical geography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StPoint;

impl FunctionInfo for StPoint {
    fn name(&self) -> &'static str {
        "st_point"
    }

    fn signatures(&self) -> &[Signature] {
        &[Signature {
            input: &[DataTypeId::Float64, DataTypeId::Float64],
            variadic: None,
            return_type: DataTypeId::Extension(GEOMETRY_TYPE_NAME),
        }]
    }
}

impl ScalarFunction for StPoint {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 2)?;
        match (&inputs[0], &inputs[1]) {
            (DataType::Float64, DataType::Float64) => Ok(Box::new(StPointImpl)),
            (a, b) => Err(invalid_input_types_error(self, &[a, b])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StPointImpl;

impl PlannedScalarFunction for StPointImpl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &StPoint
    }

    fn return_type(&self) -> DataType {
        DataType::Extension(GEOMETRY.clone())
    }

    fn execute(&self, arrays: &[&Arc<Array>]) -> Result<Array> {
        let xs = arrays[0];
        let ys = arrays[1];
        Ok(match (xs.as_ref(), ys.as_ref()) {
            (Array::Float64(xs), Array::Float64(ys)) => {
                let mut buffer = VarlenValuesBuffer::default();
                let validity = BinaryExecutor::execute(
                    xs,
                    ys,
                    |x, y| serde::serialize(&Geometry::Point(Some(Coordinate::new(x, y)))),
                    &mut buffer,
                )?;
                Array::Extension(ExtensionArray::new(
                    GEOMETRY.clone(),
                    VarlenArray::new(buffer, validity),
                ))
            }
            other => panic!("unexpected array type: {other:?}"),
        })
    }
}

/// Parse well-known text into a geometry.
///
/// Polygon rings are normalized on construction, exterior rings
/// counter-clockwise and holes clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StGeometryFromText;

impl FunctionInfo for StGeometryFromText {
    fn name(&self) -> &'static str {
        "st_geometryfromtext"
    }

    fn signatures(&self) -> &[Signature] {
        &[Signature {
            input: &[DataTypeId::Utf8],
            variadic: None,
            return_type: DataTypeId::Extension(GEOMETRY_TYPE_NAME),
        }]
    }
}

impl ScalarFunction for StGeometryFromText {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 1)?;
        match &inputs[0] {
            DataType::Utf8 => Ok(Box::new(StGeometryFromTextImpl)),
            other => Err(invalid_input_types_error(self, &[other])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StGeometryFromTextImpl;

impl PlannedScalarFunction for StGeometryFromTextImpl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &StGeometryFromText
    }

    fn return_type(&self) -> DataType {
        DataType::Extension(GEOMETRY.clone())
    }

    fn execute(&self, arrays: &[&Arc<Array>]) -> Result<Array> {
        let input = arrays[0];
        Ok(match input.as_ref() {
            Array::Utf8(input) => {
                let mut buffer = VarlenValuesBuffer::default();
                let validity = UnaryExecutor::try_execute(
                    input,
                    |text| {
                        let mut geometry = wkt::parse(text)?;
                        geometry.normalize();
                        Ok(serde::serialize(&geometry))
                    },
                    &mut buffer,
                )?;
                Array::Extension(ExtensionArray::new(
                    GEOMETRY.clone(),
                    VarlenArray::new(buffer, validity),
                ))
            }
            other => panic!("unexpected array type: {other:?}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use meridian_array::array::{Float64Array, Utf8Array};

    use super::*;

    fn format_values(array: &Array) -> Vec<Option<String>> {
        let ext = match array {
            Array::Extension(ext) => ext,
            other => panic!("not an extension array: {other:?}"),
        };
        (0..ext.len())
            .map(|idx| {
                if !ext.is_valid(idx).unwrap() {
                    return None;
                }
                let buf = ext.value(idx).unwrap();
                Some(ext.meta().format_value(buf).unwrap())
            })
            .collect()
    }

    #[test]
    fn st_point_builds_points() {
        let xs = Arc::new(Array::Float64(Float64Array::from_iter([52.233, 0.0])));
        let ys = Arc::new(Array::Float64(Float64Array::from_iter([21.016, -1.5])));

        let planned = StPoint
            .plan_from_datatypes(&[DataType::Float64, DataType::Float64])
            .unwrap();
        assert_eq!(DataType::Extension(GEOMETRY.clone()), planned.return_type());

        let out = planned.execute(&[&xs, &ys]).unwrap();
        assert_eq!(
            vec![
                Some("POINT (52.233 21.016)".to_string()),
                Some("POINT (0 -1.5)".to_string()),
            ],
            format_values(&out)
        );
    }

    #[test]
    fn st_point_propagates_nulls() {
        let xs = Arc::new(Array::Float64(Float64Array::from_iter([
            Some(1.0),
            None,
        ])));
        let ys = Arc::new(Array::Float64(Float64Array::from_iter([
            Some(2.0),
            Some(3.0),
        ])));

        let planned = StPoint
            .plan_from_datatypes(&[DataType::Float64, DataType::Float64])
            .unwrap();
        let out = planned.execute(&[&xs, &ys]).unwrap();

        assert_eq!(
            vec![Some("POINT (1 2)".to_string()), None],
            format_values(&out)
        );
    }

    #[test]
    fn st_point_invalid_types() {
        StPoint
            .plan_from_datatypes(&[DataType::Utf8, DataType::Float64])
            .unwrap_err();
    }

    #[test]
    fn st_geometryfromtext_normalizes_rings() {
        let texts = Arc::new(Array::Utf8(Utf8Array::from_iter([
            "POLYGON ((0 0, 0 1, 1 1, 1 1, 1 0, 0 0))",
        ])));

        let planned = StGeometryFromText
            .plan_from_datatypes(&[DataType::Utf8])
            .unwrap();
        let out = planned.execute(&[&texts]).unwrap();

        // Ring reversed to counter-clockwise, repeated vertex kept.
        assert_eq!(
            vec![Some(
                "POLYGON ((0 0, 1 0, 1 1, 1 1, 0 1, 0 0))".to_string()
            )],
            format_values(&out)
        );
    }

    #[test]
    fn st_geometryfromtext_invalid_wkt_errors() {
        let texts = Arc::new(Array::Utf8(Utf8Array::from_iter(["POINT (1)"])));

        let planned = StGeometryFromText
            .plan_from_datatypes(&[DataType::Utf8])
            .unwrap();
        let err = planned.execute(&[&texts]).unwrap_err();
        assert!(err.to_string().contains("Invalid WKT"), "{err}");
    }

    #[test]
    fn st_geometryfromtext_skips_null_rows() {
        let texts = Arc::new(Array::Utf8(Utf8Array::from_iter([
            Some("POINT EMPTY"),
            None,
        ])));

        let planned = StGeometryFromText
            .plan_from_datatypes(&[DataType::Utf8])
            .unwrap();
        let out = planned.execute(&[&texts]).unwrap();

        assert_eq!(
            vec![Some("POINT EMPTY".to_string()), None],
            format_values(&out)
        );
    }
}
