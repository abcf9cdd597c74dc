use std::fmt::Debug;
use std::sync::Arc;

use meridian_array::array::{Array, ExtensionArray, VarlenArray, VarlenValuesBuffer};
use meridian_array::datatype::{DataType, DataTypeId};
use meridian_array::executor::scalar::UnaryExecutor;
use meridian_error::{MeridianError, Result};
use meridian_execution::functions::scalar::{PlannedScalarFunction, ScalarFunction};
use meridian_execution::functions::{
    invalid_input_types_error, plan_check_num_args, FunctionInfo, Signature,
};

use crate::geometry::{Coordinate, Geometry, Polygon};
use crate::serde;
use crate::types::{
    GEOMETRY, GEOMETRY_TYPE_NAME, SPHERICAL_GEOGRAPHY, SPHERICAL_GEOGRAPHY_TYPE_NAME,
};

const MIN_LONGITUDE: f64 = -180.0;
const MAX_LONGITUDE: f64 = 180.0;
const MIN_LATITUDE: f64 = -90.0;
const MAX_LATITUDE: f64 = 90.0;

/// Convert a planar geometry to spherical geography.
///
/// Every vertex must be a longitude/latitude pair in degrees. Geometry
/// collections cannot be converted. The stored value is otherwise unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToSphericalGeography;

impl FunctionInfo for ToSphericalGeography {
    fn name(&self) -> &'static str {
        "to_spherical_geography"
    }

    fn signatures(&self) -> &[Signature] {
        &[Signature {
            input: &[DataTypeId::Extension(GEOMETRY_TYPE_NAME)],
            variadic: None,
            return_type: DataTypeId::Extension(SPHERICAL_GEOGRAPHY_TYPE_NAME),
        }]
    }
}

impl ScalarFunction for ToSphericalGeography {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 1)?;
        match &inputs[0] {
            DataType::Extension(meta) if meta.name() == GEOMETRY_TYPE_NAME => {
                Ok(Box::new(ToSphericalGeographyImpl))
            }
            other => Err(invalid_input_types_error(self, &[other])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToSphericalGeographyImpl;

impl PlannedScalarFunction for ToSphericalGeographyImpl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &ToSphericalGeography
    }

    fn return_type(&self) -> DataType {
        DataType::Extension(SPHERICAL_GEOGRAPHY.clone())
    }

    fn execute(&self, arrays: &[&Arc<Array>]) -> Result<Array> {
        let input = arrays[0];
        Ok(match input.as_ref() {
            Array::Extension(input) => {
                let mut buffer = VarlenValuesBuffer::default();
                let validity = UnaryExecutor::try_execute(
                    input.get_binary(),
                    |buf| {
                        let geometry = serde::deserialize(buf)?;
                        check_geography_bounds(&geometry)?;
                        Ok(buf.to_vec())
                    },
                    &mut buffer,
                )?;
                Array::Extension(ExtensionArray::new(
                    SPHERICAL_GEOGRAPHY.clone(),
                    VarlenArray::new(buffer, validity),
                ))
            }
            other => panic!("unexpected array type: {other:?}"),
        })
    }
}

/// Convert spherical geography back to a planar geometry.
///
/// Geography values are always valid geometries, the stored value passes
/// through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToGeometry;

impl FunctionInfo for ToGeometry {
    fn name(&self) -> &'static str {
        "to_geometry"
    }

    fn signatures(&self) -> &[Signature] {
        &[Signature {
            input: &[DataTypeId::Extension(SPHERICAL_GEOGRAPHY_TYPE_NAME)],
            variadic: None,
            return_type: DataTypeId::Extension(GEOMETRY_TYPE_NAME),
        }]
    }
}

impl ScalarFunction for ToGeometry {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 1)?;
        match &inputs[0] {
            DataType::Extension(meta) if meta.name() == SPHERICAL_GEOGRAPHY_TYPE_NAME => {
                Ok(Box::new(ToGeometryImpl))
            }
            other => Err(invalid_input_types_error(self, &[other])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToGeometryImpl;

impl PlannedScalarFunction for ToGeometryImpl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &ToGeometry
    }

    fn return_type(&self) -> DataType {
        DataType::Extension(GEOMETRY.clone())
    }

    fn execute(&self, arrays: &[&Arc<Array>]) -> Result<Array> {
        let input = arrays[0];
        Ok(match input.as_ref() {
            Array::Extension(input) => {
                let mut buffer = VarlenValuesBuffer::default();
                let validity =
                    UnaryExecutor::execute(input.get_binary(), |buf| buf.to_vec(), &mut buffer)?;
                Array::Extension(ExtensionArray::new(
                    GEOMETRY.clone(),
                    VarlenArray::new(buffer, validity),
                ))
            }
            other => panic!("unexpected array type: {other:?}"),
        })
    }
}

/// Check every vertex is a valid longitude/latitude pair in degrees.
fn check_geography_bounds(geometry: &Geometry) -> Result<()> {
    match geometry {
        Geometry::Point(point) => point.iter().try_for_each(check_coordinate),
        Geometry::MultiPoint(points) | Geometry::LineString(points) => {
            points.iter().try_for_each(check_coordinate)
        }
        Geometry::MultiLineString(lines) => lines
            .iter()
            .flat_map(|line| line.iter())
            .try_for_each(check_coordinate),
        Geometry::Polygon(polygon) => check_polygon_bounds(polygon),
        Geometry::MultiPolygon(polygons) => polygons.iter().try_for_each(check_polygon_bounds),
        Geometry::GeometryCollection(_) => Err(MeridianError::new(
            "Cannot convert a geometry collection to spherical geography",
        )),
    }
}

fn check_polygon_bounds(polygon: &Polygon) -> Result<()> {
    polygon
        .rings
        .iter()
        .flat_map(|ring| ring.iter())
        .try_for_each(check_coordinate)
}

/// Longitude is the x coordinate, latitude the y coordinate. NaN and
/// infinities fail the range checks.
fn check_coordinate(coord: &Coordinate) -> Result<()> {
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&coord.x) {
        return Err(MeridianError::new(format!(
            "Longitude must be between -180 and 180, got {}",
            coord.x
        )));
    }
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&coord.y) {
        return Err(MeridianError::new(format!(
            "Latitude must be between -90 and 90, got {}",
            coord.y
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use meridian_array::array::{ExtensionArray, ValuesBuffer};
    use meridian_array::datatype::ExtensionTypeMeta;

    use crate::wkt;

    use super::*;

    fn extension_array(meta: ExtensionTypeMeta, wkts: &[&str]) -> Arc<Array> {
        let mut buffer = VarlenValuesBuffer::default();
        for text in wkts {
            let mut geometry = wkt::parse(text).unwrap();
            geometry.normalize();
            buffer.push_value(serde::serialize(&geometry));
        }
        Arc::new(Array::Extension(ExtensionArray::new(
            meta,
            VarlenArray::new(buffer, None),
        )))
    }

    fn plan_to_spherical() -> Box<dyn PlannedScalarFunction> {
        ToSphericalGeography
            .plan_from_datatypes(&[DataType::Extension(GEOMETRY.clone())])
            .unwrap()
    }

    #[test]
    fn to_spherical_geography_passes_bytes_through() {
        let input = extension_array(
            GEOMETRY.clone(),
            &["POINT (52.233 21.016)", "POLYGON ((0 0, 1 0, 1 1, 0 0))"],
        );

        let out = plan_to_spherical().execute(&[&input]).unwrap();

        let ext = match &out {
            Array::Extension(ext) => ext,
            other => panic!("not an extension array: {other:?}"),
        };
        assert_eq!("spherical_geography", ext.meta().name());

        let input_ext = match input.as_ref() {
            Array::Extension(ext) => ext,
            other => panic!("not an extension array: {other:?}"),
        };
        assert_eq!(input_ext.get_binary(), ext.get_binary());
    }

    #[test]
    fn to_spherical_geography_rejects_bad_longitude() {
        let input = extension_array(GEOMETRY.clone(), &["POINT (180.001 0)"]);
        let err = plan_to_spherical().execute(&[&input]).unwrap_err();
        assert!(
            err.to_string()
                .contains("Longitude must be between -180 and 180"),
            "{err}"
        );
    }

    #[test]
    fn to_spherical_geography_rejects_bad_latitude() {
        let input = extension_array(GEOMETRY.clone(), &["LINESTRING (0 0, 10 -90.5)"]);
        let err = plan_to_spherical().execute(&[&input]).unwrap_err();
        assert!(
            err.to_string()
                .contains("Latitude must be between -90 and 90"),
            "{err}"
        );
    }

    #[test]
    fn to_spherical_geography_rejects_non_finite() {
        let buf = serde::serialize(&Geometry::Point(Some(Coordinate::new(f64::NAN, 0.0))));
        let mut buffer = VarlenValuesBuffer::default();
        buffer.push_value(buf);
        let input = Arc::new(Array::Extension(ExtensionArray::new(
            GEOMETRY.clone(),
            VarlenArray::new(buffer, None),
        )));

        plan_to_spherical().execute(&[&input]).unwrap_err();
    }

    #[test]
    fn to_spherical_geography_rejects_collections() {
        let input = extension_array(
            GEOMETRY.clone(),
            &["GEOMETRYCOLLECTION (POINT (1 2))"],
        );
        let err = plan_to_spherical().execute(&[&input]).unwrap_err();
        assert!(err.to_string().contains("geometry collection"), "{err}");
    }

    #[test]
    fn to_spherical_geography_rejects_geography_input() {
        ToSphericalGeography
            .plan_from_datatypes(&[DataType::Extension(SPHERICAL_GEOGRAPHY.clone())])
            .unwrap_err();
    }

    #[test]
    fn to_geometry_converts_back() {
        let input = extension_array(SPHERICAL_GEOGRAPHY.clone(), &["POINT (10 20)"]);

        let planned = ToGeometry
            .plan_from_datatypes(&[DataType::Extension(SPHERICAL_GEOGRAPHY.clone())])
            .unwrap();
        let out = planned.execute(&[&input]).unwrap();

        let ext = match &out {
            Array::Extension(ext) => ext,
            other => panic!("not an extension array: {other:?}"),
        };
        assert_eq!("geometry", ext.meta().name());
        assert_eq!(
            "POINT (10 20)",
            ext.meta().format_value(ext.value(0).unwrap()).unwrap()
        );
    }
}
