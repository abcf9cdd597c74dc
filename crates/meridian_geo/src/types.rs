//! The geometry extension types.

use std::sync::Arc;

use meridian_array::datatype::{ExtensionType, ExtensionTypeMeta};
use meridian_error::Result;
use once_cell::sync::Lazy;

use crate::serde;

pub const GEOMETRY_TYPE_NAME: &str = "geometry";
pub const SPHERICAL_GEOGRAPHY_TYPE_NAME: &str = "spherical_geography";

/// Metadata for the planar geometry type.
pub static GEOMETRY: Lazy<ExtensionTypeMeta> =
    Lazy::new(|| ExtensionTypeMeta::new(Arc::new(GeometryType)));

/// Metadata for the spherical geography type.
pub static SPHERICAL_GEOGRAPHY: Lazy<ExtensionTypeMeta> =
    Lazy::new(|| ExtensionTypeMeta::new(Arc::new(SphericalGeographyType)));

/// Geometry in a planar coordinate space.
#[derive(Debug, Clone, Copy)]
pub struct GeometryType;

impl ExtensionType for GeometryType {
    fn name(&self) -> &'static str {
        GEOMETRY_TYPE_NAME
    }

    fn format_value(&self, value: &[u8]) -> Result<String> {
        format_geometry_value(value)
    }
}

/// Geography on a sphere.
///
/// Shares the storage encoding with the geometry type. Coordinates are
/// longitude/latitude pairs, enforced when converting from geometry.
#[derive(Debug, Clone, Copy)]
pub struct SphericalGeographyType;

impl ExtensionType for SphericalGeographyType {
    fn name(&self) -> &'static str {
        SPHERICAL_GEOGRAPHY_TYPE_NAME
    }

    fn format_value(&self, value: &[u8]) -> Result<String> {
        format_geometry_value(value)
    }
}

/// Values of both types render as WKT.
fn format_geometry_value(value: &[u8]) -> Result<String> {
    let geometry = serde::deserialize(value)?;
    Ok(geometry.to_string())
}
