//! Geospatial types and functions.
//!
//! Provides the `geometry` and `spherical_geography` extension types along
//! with scalar functions for constructing, converting, and inspecting them.
//! Register [`GeoExtension`] with an engine to make them available to
//! queries:
//!
//! ```text
//! SELECT st_astext(st_point(52.233, 21.016))
//! ```

pub mod functions;
pub mod geometry;
pub mod serde;
pub mod types;
pub mod wkt;

use meridian_array::datatype::ExtensionTypeMeta;
use meridian_execution::extension::Extension;
use meridian_execution::functions::scalar::ScalarFunction;

use functions::accessors::{StAsText, StGeometryType};
use functions::constructors::{StGeometryFromText, StPoint};
use functions::geography::{ToGeometry, ToSphericalGeography};
use types::{GEOMETRY, SPHERICAL_GEOGRAPHY};

/// Extension providing the geospatial types and functions.
#[derive(Debug, Clone, Copy)]
pub struct GeoExtension;

impl Extension for GeoExtension {
    fn name(&self) -> &'static str {
        "geo"
    }

    fn extension_types(&self) -> Vec<ExtensionTypeMeta> {
        vec![GEOMETRY.clone(), SPHERICAL_GEOGRAPHY.clone()]
    }

    fn scalar_functions(&self) -> Vec<Box<dyn ScalarFunction>> {
        vec![
            Box::new(StPoint),
            Box::new(StGeometryFromText),
            Box::new(StAsText),
            Box::new(StGeometryType),
            Box::new(ToSphericalGeography),
            Box::new(ToGeometry),
        ]
    }
}
