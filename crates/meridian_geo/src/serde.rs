//! Binary encoding for geometry values.
//!
//! Geometries are stored in binary arrays as a one byte geometry tag followed
//! by the coordinate data. Counts are little-endian u32, coordinates
//! little-endian f64 pairs. Nested geometries in a collection are encoded
//! back to back, the encoding is self-delimiting.

use meridian_error::{MeridianError, Result};

use crate::geometry::{Coordinate, Geometry, Polygon};

const TAG_POINT: u8 = 0;
const TAG_MULTI_POINT: u8 = 1;
const TAG_LINE_STRING: u8 = 2;
const TAG_MULTI_LINE_STRING: u8 = 3;
const TAG_POLYGON: u8 = 4;
const TAG_MULTI_POLYGON: u8 = 5;
const TAG_GEOMETRY_COLLECTION: u8 = 6;

/// Encode a geometry.
pub fn serialize(geometry: &Geometry) -> Vec<u8> {
    let mut buf = Vec::new();
    write_geometry(&mut buf, geometry);
    buf
}

/// Decode a geometry, validating the full buffer.
///
/// Errors on unknown tags, truncated input, and trailing bytes.
pub fn deserialize(buf: &[u8]) -> Result<Geometry> {
    let mut reader = ByteReader { buf, pos: 0 };
    let geometry = read_geometry(&mut reader)?;
    reader.finish()?;
    Ok(geometry)
}

fn write_geometry(buf: &mut Vec<u8>, geometry: &Geometry) {
    match geometry {
        Geometry::Point(point) => {
            buf.push(TAG_POINT);
            match point {
                Some(coord) => {
                    buf.push(1);
                    write_coordinate(buf, coord);
                }
                None => buf.push(0),
            }
        }
        Geometry::MultiPoint(points) => {
            buf.push(TAG_MULTI_POINT);
            write_coordinates(buf, points);
        }
        Geometry::LineString(coords) => {
            buf.push(TAG_LINE_STRING);
            write_coordinates(buf, coords);
        }
        Geometry::MultiLineString(lines) => {
            buf.push(TAG_MULTI_LINE_STRING);
            write_len(buf, lines.len());
            for line in lines {
                write_coordinates(buf, line);
            }
        }
        Geometry::Polygon(polygon) => {
            buf.push(TAG_POLYGON);
            write_polygon(buf, polygon);
        }
        Geometry::MultiPolygon(polygons) => {
            buf.push(TAG_MULTI_POLYGON);
            write_len(buf, polygons.len());
            for polygon in polygons {
                write_polygon(buf, polygon);
            }
        }
        Geometry::GeometryCollection(geometries) => {
            buf.push(TAG_GEOMETRY_COLLECTION);
            write_len(buf, geometries.len());
            for geometry in geometries {
                write_geometry(buf, geometry);
            }
        }
    }
}

fn write_polygon(buf: &mut Vec<u8>, polygon: &Polygon) {
    write_len(buf, polygon.rings.len());
    for ring in &polygon.rings {
        write_coordinates(buf, ring);
    }
}

fn write_coordinates(buf: &mut Vec<u8>, coords: &[Coordinate]) {
    write_len(buf, coords.len());
    for coord in coords {
        write_coordinate(buf, coord);
    }
}

fn write_coordinate(buf: &mut Vec<u8>, coord: &Coordinate) {
    buf.extend_from_slice(&coord.x.to_le_bytes());
    buf.extend_from_slice(&coord.y.to_le_bytes());
}

fn write_len(buf: &mut Vec<u8>, len: usize) {
    buf.extend_from_slice(&(len as u32).to_le_bytes());
}

fn read_geometry(reader: &mut ByteReader) -> Result<Geometry> {
    let tag = reader.read_u8()?;
    Ok(match tag {
        TAG_POINT => match reader.read_u8()? {
            0 => Geometry::Point(None),
            1 => Geometry::Point(Some(read_coordinate(reader)?)),
            other => {
                return Err(MeridianError::new(format!(
                    "Invalid geometry encoding: bad point flag {other}"
                )))
            }
        },
        TAG_MULTI_POINT => Geometry::MultiPoint(read_coordinates(reader)?),
        TAG_LINE_STRING => Geometry::LineString(read_coordinates(reader)?),
        TAG_MULTI_LINE_STRING => {
            let len = reader.read_len()?;
            let mut lines = Vec::new();
            for _ in 0..len {
                lines.push(read_coordinates(reader)?);
            }
            Geometry::MultiLineString(lines)
        }
        TAG_POLYGON => Geometry::Polygon(read_polygon(reader)?),
        TAG_MULTI_POLYGON => {
            let len = reader.read_len()?;
            let mut polygons = Vec::new();
            for _ in 0..len {
                polygons.push(read_polygon(reader)?);
            }
            Geometry::MultiPolygon(polygons)
        }
        TAG_GEOMETRY_COLLECTION => {
            let len = reader.read_len()?;
            let mut geometries = Vec::new();
            for _ in 0..len {
                geometries.push(read_geometry(reader)?);
            }
            Geometry::GeometryCollection(geometries)
        }
        other => {
            return Err(MeridianError::new(format!(
                "Invalid geometry encoding: unknown tag {other}"
            )))
        }
    })
}

fn read_polygon(reader: &mut ByteReader) -> Result<Polygon> {
    let len = reader.read_len()?;
    let mut rings = Vec::new();
    for _ in 0..len {
        rings.push(read_coordinates(reader)?);
    }
    Ok(Polygon { rings })
}

fn read_coordinates(reader: &mut ByteReader) -> Result<Vec<Coordinate>> {
    let len = reader.read_len()?;
    // Decoded lengths are untrusted, let the vec grow as values decode.
    let mut coords = Vec::new();
    for _ in 0..len {
        coords.push(read_coordinate(reader)?);
    }
    Ok(coords)
}

fn read_coordinate(reader: &mut ByteReader) -> Result<Coordinate> {
    let x = reader.read_f64()?;
    let y = reader.read_f64()?;
    Ok(Coordinate { x, y })
}

struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self.pos + count;
        if end > self.buf.len() {
            return Err(MeridianError::new(
                "Invalid geometry encoding: unexpected end of input",
            ));
        }
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_len(&mut self) -> Result<usize> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize)
    }

    fn read_f64(&mut self) -> Result<f64> {
        let b = self.read_bytes(8)?;
        Ok(f64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn finish(self) -> Result<()> {
        if self.pos != self.buf.len() {
            return Err(MeridianError::new(format!(
                "Invalid geometry encoding: {} trailing bytes",
                self.buf.len() - self.pos
            )));
        }
        Ok(())
    }
}
