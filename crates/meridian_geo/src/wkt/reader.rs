use meridian_error::{MeridianError, Result};

use crate::geometry::{Coordinate, Geometry, Polygon};

/// Parse a well-known text string into a geometry.
///
/// Geometry type keywords are case-insensitive. Z/M dimension markers and
/// extra coordinate dimensions are rejected.
pub fn parse(s: &str) -> Result<Geometry> {
    let mut parser = WktParser { rest: s };
    let geometry = parser.parse_geometry()?;
    parser.skip_whitespace();
    if !parser.rest.is_empty() {
        return Err(invalid(format!("trailing input '{}'", parser.rest)));
    }
    Ok(geometry)
}

fn invalid(reason: impl Into<String>) -> MeridianError {
    MeridianError::new(format!("Invalid WKT: {}", reason.into()))
}

struct WktParser<'a> {
    rest: &'a str,
}

impl WktParser<'_> {
    fn parse_geometry(&mut self) -> Result<Geometry> {
        let tag = self.parse_tag()?;
        match tag.as_str() {
            "POINT" => self.parse_point(),
            "MULTIPOINT" => self.parse_multi_point(),
            "LINESTRING" => self.parse_line_string(),
            "MULTILINESTRING" => self.parse_multi_line_string(),
            "POLYGON" => {
                if self.parse_empty()? {
                    return Ok(Geometry::Polygon(Polygon::default()));
                }
                self.parse_polygon_rings().map(Geometry::Polygon)
            }
            "MULTIPOLYGON" => self.parse_multi_polygon(),
            "GEOMETRYCOLLECTION" => self.parse_geometry_collection(),
            other => Err(invalid(format!("unknown geometry type '{other}'"))),
        }
    }

    fn parse_point(&mut self) -> Result<Geometry> {
        if self.parse_empty()? {
            return Ok(Geometry::Point(None));
        }
        self.expect('(')?;
        let coord = self.parse_coordinate()?;
        self.expect(')')?;
        Ok(Geometry::Point(Some(coord)))
    }

    fn parse_multi_point(&mut self) -> Result<Geometry> {
        if self.parse_empty()? {
            return Ok(Geometry::MultiPoint(Vec::new()));
        }
        self.expect('(')?;
        let mut points = vec![self.parse_multi_point_member()?];
        while self.consume(',') {
            points.push(self.parse_multi_point_member()?);
        }
        self.expect(')')?;
        Ok(Geometry::MultiPoint(points))
    }

    /// Parse a single point of a multipoint. Both the parenthesized form
    /// `(0 0)` and the bare form `0 0` appear in the wild.
    fn parse_multi_point_member(&mut self) -> Result<Coordinate> {
        if self.consume('(') {
            let coord = self.parse_coordinate()?;
            self.expect(')')?;
            return Ok(coord);
        }
        self.parse_coordinate()
    }

    fn parse_line_string(&mut self) -> Result<Geometry> {
        if self.parse_empty()? {
            return Ok(Geometry::LineString(Vec::new()));
        }
        self.parse_line_coordinates().map(Geometry::LineString)
    }

    fn parse_multi_line_string(&mut self) -> Result<Geometry> {
        if self.parse_empty()? {
            return Ok(Geometry::MultiLineString(Vec::new()));
        }
        self.expect('(')?;
        let mut lines = vec![self.parse_line_coordinates()?];
        while self.consume(',') {
            lines.push(self.parse_line_coordinates()?);
        }
        self.expect(')')?;
        Ok(Geometry::MultiLineString(lines))
    }

    fn parse_line_coordinates(&mut self) -> Result<Vec<Coordinate>> {
        let coords = self.parse_coordinate_sequence()?;
        if coords.len() < 2 {
            return Err(invalid("line strings need at least 2 points"));
        }
        Ok(coords)
    }

    fn parse_polygon_rings(&mut self) -> Result<Polygon> {
        self.expect('(')?;
        let mut rings = vec![self.parse_ring()?];
        while self.consume(',') {
            rings.push(self.parse_ring()?);
        }
        self.expect(')')?;
        Ok(Polygon { rings })
    }

    fn parse_ring(&mut self) -> Result<Vec<Coordinate>> {
        let coords = self.parse_coordinate_sequence()?;
        if coords.len() < 4 {
            return Err(invalid("polygon rings need at least 4 points"));
        }
        if coords.first() != coords.last() {
            return Err(invalid("polygon rings must be closed"));
        }
        Ok(coords)
    }

    fn parse_multi_polygon(&mut self) -> Result<Geometry> {
        if self.parse_empty()? {
            return Ok(Geometry::MultiPolygon(Vec::new()));
        }
        self.expect('(')?;
        let mut polygons = vec![self.parse_polygon_rings()?];
        while self.consume(',') {
            polygons.push(self.parse_polygon_rings()?);
        }
        self.expect(')')?;
        Ok(Geometry::MultiPolygon(polygons))
    }

    fn parse_geometry_collection(&mut self) -> Result<Geometry> {
        if self.parse_empty()? {
            return Ok(Geometry::GeometryCollection(Vec::new()));
        }
        self.expect('(')?;
        let mut geometries = vec![self.parse_geometry()?];
        while self.consume(',') {
            geometries.push(self.parse_geometry()?);
        }
        self.expect(')')?;
        Ok(Geometry::GeometryCollection(geometries))
    }

    fn parse_coordinate_sequence(&mut self) -> Result<Vec<Coordinate>> {
        self.expect('(')?;
        let mut coords = vec![self.parse_coordinate()?];
        while self.consume(',') {
            coords.push(self.parse_coordinate()?);
        }
        self.expect(')')?;
        Ok(coords)
    }

    fn parse_coordinate(&mut self) -> Result<Coordinate> {
        let x = self.parse_number()?;
        let y = self.parse_number()?;
        Ok(Coordinate { x, y })
    }

    fn parse_number(&mut self) -> Result<f64> {
        self.skip_whitespace();
        let len = self
            .rest
            .find(|c: char| !matches!(c, '0'..='9' | '.' | '-' | '+' | 'e' | 'E'))
            .unwrap_or(self.rest.len());
        if len == 0 {
            return Err(invalid(format!("expected a number at '{}'", self.rest)));
        }
        let (num, rest) = self.rest.split_at(len);
        let num = num
            .parse::<f64>()
            .map_err(|_| invalid(format!("malformed number '{num}'")))?;
        self.rest = rest;
        Ok(num)
    }

    /// Consume the word after a geometry type keyword if there is one.
    ///
    /// Returns true for EMPTY. Z/M dimension markers appear in the same
    /// position and are rejected here.
    fn parse_empty(&mut self) -> Result<bool> {
        self.skip_whitespace();
        let len = self
            .rest
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        if len == 0 {
            return Ok(false);
        }
        let (word, rest) = self.rest.split_at(len);
        match word.to_ascii_uppercase().as_str() {
            "EMPTY" => {
                self.rest = rest;
                Ok(true)
            }
            "Z" | "M" | "ZM" => Err(invalid("Z/M coordinates are not supported")),
            other => Err(invalid(format!("unexpected token '{other}'"))),
        }
    }

    fn parse_tag(&mut self) -> Result<String> {
        self.skip_whitespace();
        let len = self
            .rest
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .count();
        if len == 0 {
            return Err(invalid(format!(
                "expected a geometry type at '{}'",
                self.rest
            )));
        }
        let (tag, rest) = self.rest.split_at(len);
        self.rest = rest;
        Ok(tag.to_ascii_uppercase())
    }

    fn consume(&mut self, c: char) -> bool {
        self.skip_whitespace();
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if !self.consume(c) {
            return Err(invalid(format!("expected '{c}' at '{}'", self.rest)));
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn parse_point() {
        let geometry = parse("POINT (52.233 21.016)").unwrap();
        assert_eq!(Geometry::Point(Some(coord(52.233, 21.016))), geometry);
    }

    #[test]
    fn parse_point_case_insensitive_no_space() {
        let geometry = parse("point(1 2)").unwrap();
        assert_eq!(Geometry::Point(Some(coord(1.0, 2.0))), geometry);
    }

    #[test]
    fn parse_point_empty() {
        let geometry = parse("POINT EMPTY").unwrap();
        assert_eq!(Geometry::Point(None), geometry);
    }

    #[test]
    fn parse_numbers_signed_and_exponent() {
        let geometry = parse("POINT (-1e-3 2.5E2)").unwrap();
        assert_eq!(Geometry::Point(Some(coord(-0.001, 250.0))), geometry);
    }

    #[test]
    fn parse_line_string() {
        let geometry = parse("LINESTRING (0 0, 1 1, 2 0)").unwrap();
        assert_eq!(
            Geometry::LineString(vec![coord(0.0, 0.0), coord(1.0, 1.0), coord(2.0, 0.0)]),
            geometry
        );
    }

    #[test]
    fn parse_line_string_single_point_errors() {
        let err = parse("LINESTRING (0 0)").unwrap_err();
        assert!(err.to_string().contains("at least 2 points"), "{err}");
    }

    #[test]
    fn parse_polygon_with_hole() {
        let geometry =
            parse("POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0), (1 1, 2 1, 2 2, 1 2, 1 1))").unwrap();
        let expected = Geometry::Polygon(Polygon {
            rings: vec![
                vec![
                    coord(0.0, 0.0),
                    coord(4.0, 0.0),
                    coord(4.0, 4.0),
                    coord(0.0, 4.0),
                    coord(0.0, 0.0),
                ],
                vec![
                    coord(1.0, 1.0),
                    coord(2.0, 1.0),
                    coord(2.0, 2.0),
                    coord(1.0, 2.0),
                    coord(1.0, 1.0),
                ],
            ],
        });
        assert_eq!(expected, geometry);
    }

    #[test]
    fn parse_polygon_unclosed_ring_errors() {
        let err = parse("POLYGON ((0 0, 1 0, 1 1, 0 1))").unwrap_err();
        assert!(err.to_string().contains("must be closed"), "{err}");
    }

    #[test]
    fn parse_polygon_short_ring_errors() {
        let err = parse("POLYGON ((0 0, 1 1, 0 0))").unwrap_err();
        assert!(err.to_string().contains("at least 4 points"), "{err}");
    }

    #[test]
    fn parse_multi_point_both_member_forms() {
        let parenthesized = parse("MULTIPOINT ((0 0), (1 1))").unwrap();
        let bare = parse("MULTIPOINT (0 0, 1 1)").unwrap();
        let expected = Geometry::MultiPoint(vec![coord(0.0, 0.0), coord(1.0, 1.0)]);
        assert_eq!(expected, parenthesized);
        assert_eq!(expected, bare);
    }

    #[test]
    fn parse_multi_polygon() {
        let geometry =
            parse("MULTIPOLYGON (((0 0, 1 0, 1 1, 0 0)), ((5 5, 6 5, 6 6, 5 5)))").unwrap();
        let expected = Geometry::MultiPolygon(vec![
            Polygon {
                rings: vec![vec![
                    coord(0.0, 0.0),
                    coord(1.0, 0.0),
                    coord(1.0, 1.0),
                    coord(0.0, 0.0),
                ]],
            },
            Polygon {
                rings: vec![vec![
                    coord(5.0, 5.0),
                    coord(6.0, 5.0),
                    coord(6.0, 6.0),
                    coord(5.0, 5.0),
                ]],
            },
        ]);
        assert_eq!(expected, geometry);
    }

    #[test]
    fn parse_geometry_collection_nested() {
        let geometry =
            parse("GEOMETRYCOLLECTION (POINT (1 2), GEOMETRYCOLLECTION (LINESTRING (0 0, 1 1)))")
                .unwrap();
        let expected = Geometry::GeometryCollection(vec![
            Geometry::Point(Some(coord(1.0, 2.0))),
            Geometry::GeometryCollection(vec![Geometry::LineString(vec![
                coord(0.0, 0.0),
                coord(1.0, 1.0),
            ])]),
        ]);
        assert_eq!(expected, geometry);
    }

    #[test]
    fn parse_geometry_collection_empty() {
        let geometry = parse("GEOMETRYCOLLECTION EMPTY").unwrap();
        assert_eq!(Geometry::GeometryCollection(Vec::new()), geometry);
    }

    #[test]
    fn parse_rejects_z_coordinates() {
        let err = parse("POINT Z (1 2 3)").unwrap_err();
        assert!(err.to_string().contains("Z/M"), "{err}");
    }

    #[test]
    fn parse_rejects_extra_dimensions() {
        parse("POINT (1 2 3)").unwrap_err();
    }

    #[test]
    fn parse_rejects_trailing_input() {
        let err = parse("POINT (1 2) extra").unwrap_err();
        assert!(err.to_string().contains("trailing input"), "{err}");
    }

    #[test]
    fn parse_rejects_unknown_type() {
        let err = parse("CIRCLE (1 2)").unwrap_err();
        assert!(err.to_string().contains("unknown geometry type"), "{err}");
    }

    #[test]
    fn parse_rejects_empty_input() {
        parse("").unwrap_err();
        parse("   ").unwrap_err();
    }
}
