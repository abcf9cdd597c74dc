use std::fmt;

use crate::geometry::{Coordinate, Geometry};

/// Geometries display as well-known text.
///
/// Empty geometries render with the EMPTY keyword, e.g. "POINT EMPTY".
impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_geometry(f, self)
    }
}

fn write_geometry(f: &mut impl fmt::Write, geometry: &Geometry) -> fmt::Result {
    if geometry.is_empty() {
        return write!(f, "{} EMPTY", wkt_tag(geometry));
    }

    match geometry {
        Geometry::Point(None) => write!(f, "POINT EMPTY"),
        Geometry::Point(Some(coord)) => {
            write!(f, "POINT (")?;
            write_coordinate(f, coord)?;
            write!(f, ")")
        }
        Geometry::MultiPoint(points) => {
            write!(f, "MULTIPOINT (")?;
            for (idx, point) in points.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "(")?;
                write_coordinate(f, point)?;
                write!(f, ")")?;
            }
            write!(f, ")")
        }
        Geometry::LineString(coords) => {
            write!(f, "LINESTRING ")?;
            write_coordinate_sequence(f, coords)
        }
        Geometry::MultiLineString(lines) => {
            write!(f, "MULTILINESTRING ")?;
            write_sequence_list(f, lines)
        }
        Geometry::Polygon(polygon) => {
            write!(f, "POLYGON ")?;
            write_sequence_list(f, &polygon.rings)
        }
        Geometry::MultiPolygon(polygons) => {
            write!(f, "MULTIPOLYGON (")?;
            for (idx, polygon) in polygons.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write_sequence_list(f, &polygon.rings)?;
            }
            write!(f, ")")
        }
        Geometry::GeometryCollection(geometries) => {
            write!(f, "GEOMETRYCOLLECTION (")?;
            for (idx, geometry) in geometries.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write_geometry(f, geometry)?;
            }
            write!(f, ")")
        }
    }
}

fn write_sequence_list(f: &mut impl fmt::Write, sequences: &[Vec<Coordinate>]) -> fmt::Result {
    write!(f, "(")?;
    for (idx, coords) in sequences.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write_coordinate_sequence(f, coords)?;
    }
    write!(f, ")")
}

fn write_coordinate_sequence(f: &mut impl fmt::Write, coords: &[Coordinate]) -> fmt::Result {
    write!(f, "(")?;
    for (idx, coord) in coords.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write_coordinate(f, coord)?;
    }
    write!(f, ")")
}

fn write_coordinate(f: &mut impl fmt::Write, coord: &Coordinate) -> fmt::Result {
    write!(f, "{} {}", coord.x, coord.y)
}

fn wkt_tag(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Point(_) => "POINT",
        Geometry::MultiPoint(_) => "MULTIPOINT",
        Geometry::LineString(_) => "LINESTRING",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
        Geometry::Polygon(_) => "POLYGON",
        Geometry::MultiPolygon(_) => "MULTIPOLYGON",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Polygon;
    use crate::wkt;

    use super::*;

    #[test]
    fn display_point() {
        let geometry = Geometry::Point(Some(Coordinate::new(52.233, 21.016)));
        assert_eq!("POINT (52.233 21.016)", geometry.to_string());
    }

    #[test]
    fn display_point_empty() {
        assert_eq!("POINT EMPTY", Geometry::Point(None).to_string());
    }

    #[test]
    fn display_whole_coordinates_without_fraction() {
        let geometry = Geometry::LineString(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, -2.5),
        ]);
        assert_eq!("LINESTRING (0 0, 1 -2.5)", geometry.to_string());
    }

    #[test]
    fn display_polygon_with_hole() {
        let geometry = Geometry::Polygon(Polygon {
            rings: vec![
                vec![
                    Coordinate::new(0.0, 0.0),
                    Coordinate::new(4.0, 0.0),
                    Coordinate::new(4.0, 4.0),
                    Coordinate::new(0.0, 4.0),
                    Coordinate::new(0.0, 0.0),
                ],
                vec![
                    Coordinate::new(1.0, 1.0),
                    Coordinate::new(1.0, 2.0),
                    Coordinate::new(2.0, 2.0),
                    Coordinate::new(2.0, 1.0),
                    Coordinate::new(1.0, 1.0),
                ],
            ],
        });
        assert_eq!(
            "POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0), (1 1, 1 2, 2 2, 2 1, 1 1))",
            geometry.to_string()
        );
    }

    #[test]
    fn display_multi_point_parenthesizes_members() {
        let geometry = Geometry::MultiPoint(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
        ]);
        assert_eq!("MULTIPOINT ((0 0), (1 1))", geometry.to_string());
    }

    #[test]
    fn display_geometry_collection() {
        let geometry = Geometry::GeometryCollection(vec![
            Geometry::Point(Some(Coordinate::new(1.0, 2.0))),
            Geometry::LineString(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]),
        ]);
        assert_eq!(
            "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 1 1))",
            geometry.to_string()
        );
    }

    #[test]
    fn display_empty_variants() {
        assert_eq!(
            "MULTIPOLYGON EMPTY",
            Geometry::MultiPolygon(Vec::new()).to_string()
        );
        assert_eq!(
            "GEOMETRYCOLLECTION EMPTY",
            Geometry::GeometryCollection(Vec::new()).to_string()
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let wkt = "MULTILINESTRING ((0 0, 1 1), (2 2, 3 3, 4 2))";
        let geometry = wkt::parse(wkt).unwrap();
        assert_eq!(wkt, geometry.to_string());
    }
}
