use std::fmt::Debug;
use std::sync::Arc;

use meridian_array::array::{Array, VarlenArray, VarlenValuesBuffer};
use meridian_array::datatype::{DataType, DataTypeId};
use meridian_array::executor::scalar::UnaryExecutor;
use meridian_error::Result;
use meridian_execution::functions::scalar::{PlannedScalarFunction, ScalarFunction};
use meridian_execution::functions::{
    invalid_input_types_error, plan_check_num_args, FunctionInfo, Signature,
};

use crate::serde;
use crate::types::{GEOMETRY_TYPE_NAME, SPHERICAL_GEOGRAPHY_TYPE_NAME};

/// Render a geometry or geography as well-known text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StAsText;

impl FunctionInfo for StAsText {
    fn name(&self) -> &'static str {
        "st_astext"
    }

    fn signatures(&self) -> &[Signature] {
        &[
            Signature {
                input: &[DataTypeId::Extension(GEOMETRY_TYPE_NAME)],
                variadic: None,
                return_type: DataTypeId::Utf8,
            },
            Signature {
                input: &[DataTypeId::Extension(SPHERICAL_GEOGRAPHY_TYPE_NAME)],
                variadic: None,
                return_type: DataTypeId::Utf8,
            },
        ]
    }
}

impl ScalarFunction for StAsText {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 1)?;
        match &inputs[0] {
            DataType::Extension(meta)
                if meta.name() == GEOMETRY_TYPE_NAME
                    || meta.name() == SPHERICAL_GEOGRAPHY_TYPE_NAME =>
            {
                Ok(Box::new(StAsTextImpl))
            }
            other => Err(invalid_input_types_error(self, &[other])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StAsTextImpl;

impl PlannedScalarFunction for StAsTextImpl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &StAsText
    }

    fn return_type(&self) -> DataType {
        DataType::Utf8
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
                        Ok(geometry.to_string())
                    },
                    &mut buffer,
                )?;
                Array::Utf8(VarlenArray::new(buffer, validity))
            }
            other => panic!("unexpected array type: {other:?}"),
        })
    }
}

/// Return the name of the geometry type, e.g. "ST_Point".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StGeometryType;

impl FunctionInfo for StGeometryType {
    fn name(&self) -> &'static str {
        "st_geometrytype"
    }

    fn signatures(&self) -> &[Signature] {
        &[
            Signature {
                input: &[DataTypeId::Extension(GEOMETRY_TYPE_NAME)],
                variadic: None,
                return_type: DataTypeId::Utf8,
            },
            Signature {
                input: &[DataTypeId::Extension(SPHERICAL_GEOGRAPHY_TYPE_NAME)],
                variadic: None,
                return_type: DataTypeId::Utf8,
            },
        ]
    }
}

impl ScalarFunction for StGeometryType {
    fn plan_from_datatypes(&self, inputs: &[DataType]) -> Result<Box<dyn PlannedScalarFunction>> {
        plan_check_num_args(self, inputs, 1)?;
        match &inputs[0] {
            DataType::Extension(meta)
                if meta.name() == GEOMETRY_TYPE_NAME
                    || meta.name() == SPHERICAL_GEOGRAPHY_TYPE_NAME =>
            {
                Ok(Box::new(StGeometryTypeImpl))
            }
            other => Err(invalid_input_types_error(self, &[other])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StGeometryTypeImpl;

impl PlannedScalarFunction for StGeometryTypeImpl {
    fn scalar_function(&self) -> &dyn ScalarFunction {
        &StGeometryType
    }

    fn return_type(&self) -> DataType {
        DataType::Utf8
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
                        Ok(geometry.geometry_type().to_string())
                    },
                    &mut buffer,
                )?;
                Array::Utf8(VarlenArray::new(buffer, validity))
            }
            other => panic!("unexpected array type: {other:?}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use meridian_array::array::{ExtensionArray, Utf8Array, ValuesBuffer};
    use meridian_array::datatype::ExtensionTypeMeta;

    use crate::types::{GEOMETRY, SPHERICAL_GEOGRAPHY};
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

    #[test]
    fn st_astext_renders_wkt() {
        let input = extension_array(
            GEOMETRY.clone(),
            &["POINT (52.233 21.016)", "LINESTRING (0 0, 1 1)"],
        );

        let planned = StAsText
            .plan_from_datatypes(&[DataType::Extension(GEOMETRY.clone())])
            .unwrap();
        assert_eq!(DataType::Utf8, planned.return_type());

        let out = planned.execute(&[&input]).unwrap();
        let expected = Array::Utf8(Utf8Array::from_iter([
            "POINT (52.233 21.016)",
            "LINESTRING (0 0, 1 1)",
        ]));
        assert_eq!(expected, out);
    }

    #[test]
    fn st_astext_accepts_geography() {
        let input = extension_array(SPHERICAL_GEOGRAPHY.clone(), &["POINT (10 20)"]);

        let planned = StAsText
            .plan_from_datatypes(&[DataType::Extension(SPHERICAL_GEOGRAPHY.clone())])
            .unwrap();
        let out = planned.execute(&[&input]).unwrap();

        let expected = Array::Utf8(Utf8Array::from_iter(["POINT (10 20)"]));
        assert_eq!(expected, out);
    }

    #[test]
    fn st_astext_rejects_plain_strings() {
        StAsText.plan_from_datatypes(&[DataType::Utf8]).unwrap_err();
    }

    #[test]
    fn st_geometrytype_names() {
        let input = extension_array(
            GEOMETRY.clone(),
            &[
                "POINT (1 2)",
                "POLYGON ((0 0, 1 0, 1 1, 0 0))",
                "GEOMETRYCOLLECTION EMPTY",
            ],
        );

        let planned = StGeometryType
            .plan_from_datatypes(&[DataType::Extension(GEOMETRY.clone())])
            .unwrap();
        let out = planned.execute(&[&input]).unwrap();

        let expected = Array::Utf8(Utf8Array::from_iter([
            "ST_Point",
            "ST_Polygon",
            "ST_GeomCollection",
        ]));
        assert_eq!(expected, out);
    }
}
