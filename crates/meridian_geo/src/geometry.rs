//! Planar geometry model.

/// A single x/y coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }
}

/// A polygon as a list of closed rings.
///
/// The first ring is the exterior boundary, any following rings are holes. A
/// ring stores its first coordinate again at the end. A polygon with no rings
/// is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub rings: Vec<Vec<Coordinate>>,
}

impl Polygon {
    /// Normalize ring orientation, exterior counter-clockwise and holes
    /// clockwise.
    ///
    /// A mis-oriented ring is reversed around its first vertex, keeping the
    /// same starting coordinate. Repeated vertices are kept as-is, and rings
    /// with zero signed area are left untouched.
    pub fn normalize(&mut self) {
        for (idx, ring) in self.rings.iter_mut().enumerate() {
            let area = signed_ring_area(ring);
            if area == 0.0 {
                continue;
            }
            let counter_clockwise = area > 0.0;
            let exterior = idx == 0;
            if counter_clockwise != exterior {
                reverse_keeping_start(ring);
            }
        }
    }
}

/// Geometry in the planar coordinate space.
///
/// Multi geometries and collections with no members are empty, as is a point
/// without a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Option<Coordinate>),
    MultiPoint(Vec<Coordinate>),
    LineString(Vec<Coordinate>),
    MultiLineString(Vec<Vec<Coordinate>>),
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// Return the geometry type name, e.g. "ST_Point".
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "ST_Point",
            Geometry::MultiPoint(_) => "ST_MultiPoint",
            Geometry::LineString(_) => "ST_LineString",
            Geometry::MultiLineString(_) => "ST_MultiLineString",
            Geometry::Polygon(_) => "ST_Polygon",
            Geometry::MultiPolygon(_) => "ST_MultiPolygon",
            Geometry::GeometryCollection(_) => "ST_GeomCollection",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(point) => point.is_none(),
            Geometry::MultiPoint(points) => points.is_empty(),
            Geometry::LineString(points) => points.is_empty(),
            Geometry::MultiLineString(lines) => lines.is_empty(),
            Geometry::Polygon(polygon) => polygon.rings.is_empty(),
            Geometry::MultiPolygon(polygons) => polygons.is_empty(),
            Geometry::GeometryCollection(geometries) => geometries.is_empty(),
        }
    }

    /// Normalize ring orientation of all polygons in this geometry.
    pub fn normalize(&mut self) {
        match self {
            Geometry::Polygon(polygon) => polygon.normalize(),
            Geometry::MultiPolygon(polygons) => {
                for polygon in polygons {
                    polygon.normalize();
                }
            }
            Geometry::GeometryCollection(geometries) => {
                for geometry in geometries {
                    geometry.normalize();
                }
            }
            _ => (),
        }
    }
}

/// Twice the signed area of a closed ring from the shoelace formula.
///
/// Positive for counter-clockwise winding, zero for degenerate rings.
fn signed_ring_area(ring: &[Coordinate]) -> f64 {
    let mut sum = 0.0;
    for window in ring.windows(2) {
        sum += window[0].x * window[1].y - window[1].x * window[0].y;
    }
    sum
}

/// Reverse the winding of a closed ring without changing its first vertex.
fn reverse_keeping_start(ring: &mut Vec<Coordinate>) {
    // Drop the closing vertex, reverse everything after the start, then close
    // the ring again.
    let start = ring[0];
    ring.pop();
    ring[1..].reverse();
    ring.push(start);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> Vec<Coordinate> {
        coords.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
    }

    #[test]
    fn normalize_reverses_clockwise_exterior() {
        let mut polygon = Polygon {
            rings: vec![ring(&[
                (0.0, 0.0),
                (0.0, 1.0),
                (1.0, 1.0),
                (1.0, 1.0),
                (1.0, 0.0),
                (0.0, 0.0),
            ])],
        };
        polygon.normalize();

        // Reversed around the first vertex, repeated vertex kept.
        let expected = ring(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]);
        assert_eq!(vec![expected], polygon.rings);
    }

    #[test]
    fn normalize_keeps_counter_clockwise_exterior() {
        let exterior = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        let mut polygon = Polygon {
            rings: vec![exterior.clone()],
        };
        polygon.normalize();
        assert_eq!(vec![exterior], polygon.rings);
    }

    #[test]
    fn normalize_orients_holes_clockwise() {
        let exterior = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        // Counter-clockwise hole, needs reversing.
        let hole = ring(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0), (1.0, 1.0)]);
        let mut polygon = Polygon {
            rings: vec![exterior.clone(), hole],
        };
        polygon.normalize();

        let expected_hole = ring(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0), (1.0, 1.0)]);
        assert_eq!(vec![exterior, expected_hole], polygon.rings);
    }

    #[test]
    fn normalize_ignores_zero_area_ring() {
        let degenerate = ring(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 0.0)]);
        let mut polygon = Polygon {
            rings: vec![degenerate.clone()],
        };
        polygon.normalize();
        assert_eq!(vec![degenerate], polygon.rings);
    }

    #[test]
    fn normalize_recurses_into_collections() {
        let mut geometry = Geometry::GeometryCollection(vec![Geometry::Polygon(Polygon {
            rings: vec![ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.0, 0.0)])],
        })]);
        geometry.normalize();

        let expected = Geometry::GeometryCollection(vec![Geometry::Polygon(Polygon {
            rings: vec![ring(&[(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)])],
        })]);
        assert_eq!(expected, geometry);
    }

    #[test]
    fn geometry_type_names() {
        assert_eq!("ST_Point", Geometry::Point(None).geometry_type());
        assert_eq!(
            "ST_Polygon",
            Geometry::Polygon(Polygon::default()).geometry_type()
        );
        assert_eq!(
            "ST_GeomCollection",
            Geometry::GeometryCollection(Vec::new()).geometry_type()
        );
    }

    #[test]
    fn empty_geometries() {
        assert!(Geometry::Point(None).is_empty());
        assert!(!Geometry::Point(Some(Coordinate::new(1.0, 2.0))).is_empty());
        assert!(Geometry::MultiPolygon(Vec::new()).is_empty());
        assert!(!Geometry::LineString(ring(&[(0.0, 0.0), (1.0, 1.0)])).is_empty());
    }
}
