//! Points and paths decoded from well-known binary (WKB).
//!
//! Only the two geometry types records can hold are understood: `Point`
//! (WKB type 1) and `LineString` (WKB type 2), in either byte order. Columns
//! usually carry a 4 bytes SRID in front of the WKB payload, see
//! [`SRID_PREFIX_LEN`].

use crate::{Error, Result};

/// Length of the prefix that precedes the WKB payload in geometry columns.
pub const SRID_PREFIX_LEN: usize = 4;

const WKB_POINT: u32 = 1;
const WKB_LINE_STRING: u32 = 2;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An ordered list of points.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Path {
    pub points: Vec<Point>,
}

#[derive(Clone, Copy)]
enum ByteOrder {
    Big,
    Little,
}

struct WkbReader<'a> {
    input: &'a [u8],
    order: ByteOrder,
}

impl<'a> WkbReader<'a> {
    fn new(input: &'a [u8]) -> Result<Self> {
        let mut reader = Self {
            input,
            order: ByteOrder::Little,
        };
        reader.order = match reader.take::<1>()? {
            [0] => ByteOrder::Big,
            [1] => ByteOrder::Little,
            [v] => {
                return Err(Error::msg(format!(
                    "Invalid WKB byte order marker {}",
                    v
                )));
            }
        };
        Ok(reader)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let Some((head, tail)) = self.input.split_first_chunk::<N>() else {
            return Err(Error::msg(format!(
                "Unexpected end of WKB data, expected {} more bytes but {} are left",
                N,
                self.input.len()
            )));
        };
        self.input = tail;
        Ok(*head)
    }

    fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take::<4>()?;
        Ok(match self.order {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        })
    }

    fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.take::<8>()?;
        Ok(match self.order {
            ByteOrder::Big => f64::from_be_bytes(bytes),
            ByteOrder::Little => f64::from_le_bytes(bytes),
        })
    }

    fn read_point(&mut self) -> Result<Point> {
        Ok(Point {
            x: self.read_f64()?,
            y: self.read_f64()?,
        })
    }

    fn expect_type(&mut self, expected: u32, name: &str) -> Result<()> {
        let found = self.read_u32()?;
        if found != expected {
            return Err(Error::msg(format!(
                "Expected WKB {} (type {}), found type {}",
                name, expected, found
            )));
        }
        Ok(())
    }
}

fn write_header(out: &mut Vec<u8>, geometry_type: u32) {
    out.push(1);
    out.extend_from_slice(&geometry_type.to_le_bytes());
}

fn write_point(out: &mut Vec<u8>, point: &Point) {
    out.extend_from_slice(&point.x.to_le_bytes());
    out.extend_from_slice(&point.y.to_le_bytes());
}

fn prefixed(wkb: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(SRID_PREFIX_LEN + wkb.len());
    out.extend_from_slice(&[0; SRID_PREFIX_LEN]);
    out.extend(wkb);
    out
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_wkb(input: &[u8]) -> Result<Self> {
        let mut reader = WkbReader::new(input)?;
        reader.expect_type(WKB_POINT, "Point")?;
        reader.read_point()
    }

    pub fn to_wkb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(21);
        write_header(&mut out, WKB_POINT);
        write_point(&mut out, self);
        out
    }

    /// WKB preceded by a zero SRID, the layout of geometry columns.
    pub fn to_prefixed_wkb(&self) -> Vec<u8> {
        prefixed(self.to_wkb())
    }
}

impl Path {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    pub fn from_wkb(input: &[u8]) -> Result<Self> {
        let mut reader = WkbReader::new(input)?;
        reader.expect_type(WKB_LINE_STRING, "LineString")?;
        let count = reader.read_u32()? as usize;
        // Each point takes 16 bytes, refuse counts the input cannot hold
        if count > reader.input.len() / 16 {
            return Err(Error::msg(format!(
                "WKB LineString declares {} points but only {} bytes follow",
                count,
                reader.input.len()
            )));
        }
        let points = (0..count)
            .map(|_| reader.read_point())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { points })
    }

    pub fn to_wkb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(9 + self.points.len() * 16);
        write_header(&mut out, WKB_LINE_STRING);
        out.extend_from_slice(&(self.points.len() as u32).to_le_bytes());
        for point in &self.points {
            write_point(&mut out, point);
        }
        out
    }

    pub fn to_prefixed_wkb(&self) -> Vec<u8> {
        prefixed(self.to_wkb())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Path, Point};

    #[test]
    fn point_big_endian() {
        let mut wkb = vec![0, 0, 0, 0, 1];
        wkb.extend_from_slice(&1.5f64.to_be_bytes());
        wkb.extend_from_slice(&(-2.0f64).to_be_bytes());
        assert_eq!(Point::from_wkb(&wkb).unwrap(), Point::new(1.5, -2.0));
    }

    #[test]
    fn point_rejects_wrong_type() {
        let path = Path::new([Point::new(0.0, 0.0)]);
        let error = Point::from_wkb(&path.to_wkb()).unwrap_err();
        assert!(error.to_string().contains("Expected WKB Point"));
    }

    #[test]
    fn truncated_input() {
        let wkb = Point::new(3.0, 4.0).to_wkb();
        assert!(Point::from_wkb(&wkb[..12]).is_err());
        assert!(Point::from_wkb(&[]).is_err());
        assert!(Point::from_wkb(&[7, 1, 0, 0, 0]).is_err());
    }

    #[test]
    fn path_declared_count_too_large() {
        let mut wkb = vec![1, 2, 0, 0, 0];
        wkb.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(Path::from_wkb(&wkb).is_err());
    }

    #[test]
    fn path_little_endian() {
        let path = Path::new([Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        let wkb = path.to_wkb();
        assert_eq!(wkb.len(), 9 + 32);
        let decoded = Path::from_wkb(&wkb).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.points[1], Point::new(3.0, 4.0));
    }
}
