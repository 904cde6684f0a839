//! Polyline representation for route geometries.
//!
//! Routing providers hand back geometries in the encoded polyline format
//! (precision 5). Decoding happens here, at the boundary, so the rest of the
//! planner only ever sees coordinates.

use serde::{Deserialize, Serialize};

use crate::error::PolylineError;
use crate::model::{Coordinate, Envelope};

/// Fixed-point scale for precision-5 polylines.
const PRECISION: f64 = 1e5;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut latitude: i64 = 0;
        let mut longitude: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            latitude = accumulate(latitude, bytes, &mut index)?;
            if index >= bytes.len() {
                return Err(PolylineError::DanglingLatitude);
            }
            longitude = accumulate(longitude, bytes, &mut index)?;

            points.push(Coordinate::new(
                latitude as f64 / PRECISION,
                longitude as f64 / PRECISION,
            ));
        }

        Ok(Self { points })
    }

    /// Encodes the points back into the compact string form.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        let mut prev_lat: i64 = 0;
        let mut prev_lng: i64 = 0;

        for point in &self.points {
            let lat = (point.latitude * PRECISION).round() as i64;
            let lng = (point.longitude * PRECISION).round() as i64;
            push_value(&mut out, lat - prev_lat);
            push_value(&mut out, lng - prev_lng);
            prev_lat = lat;
            prev_lng = lng;
        }

        out
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Bounding envelope of the geometry. Empty for an empty polyline.
    pub fn envelope(&self) -> Envelope {
        Envelope::from_points(self.points.iter().copied())
    }
}

fn accumulate(total: i64, bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let position = *index;
    total
        .checked_add(next_value(bytes, index)?)
        .ok_or(PolylineError::Overflow { position })
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: u64 = 0;
    let mut shift = 0u32;

    loop {
        let position = *index;
        let byte = *bytes.get(position).ok_or(PolylineError::Truncated)?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                character: char::from(byte),
                position,
            });
        }
        if shift >= 64 {
            return Err(PolylineError::Overflow { position });
        }

        let chunk = u64::from(byte - 63);
        *index += 1;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    // Zig-zag decode.
    Ok(((result >> 1) as i64) ^ -((result & 1) as i64))
}

fn push_value(out: &mut String, value: i64) {
    let mut v = ((value << 1) ^ (value >> 63)) as u64;
    while v >= 0x20 {
        out.push(char::from((0x20 | (v & 0x1f)) as u8 + 63));
        v >>= 5;
    }
    out.push(char::from(v as u8 + 63));
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn sample_points() -> Vec<Coordinate> {
        vec![
            Coordinate::new(38.5, -120.2),
            Coordinate::new(40.7, -120.95),
            Coordinate::new(43.252, -126.453),
        ]
    }

    #[test]
    fn test_decode_reference_polyline() {
        let polyline = Polyline::decode(SAMPLE).unwrap();
        assert_eq!(polyline.points(), &sample_points()[..]);
    }

    #[test]
    fn test_encode_reference_polyline() {
        assert_eq!(Polyline::new(sample_points()).encode(), SAMPLE);
    }

    #[test]
    fn test_into_points() {
        let polyline = Polyline::decode(SAMPLE).unwrap();
        assert_eq!(polyline.into_points(), sample_points());
    }

    #[test]
    fn test_empty_polyline() {
        let polyline = Polyline::decode("").unwrap();
        assert!(polyline.points().is_empty());
        assert!(polyline.envelope().is_empty());
    }

    #[test]
    fn test_envelope() {
        let envelope = Polyline::decode(SAMPLE).unwrap().envelope();
        assert_eq!(envelope, Envelope::new(38.5, 43.252, -126.453, -120.2));
    }

    #[test]
    fn test_truncated_value() {
        // '_' carries the continuation bit, so the value never terminates.
        assert_eq!(Polyline::decode("_p~iF~ps|U_"), Err(PolylineError::Truncated));
    }

    #[test]
    fn test_dangling_latitude() {
        assert_eq!(Polyline::decode("_p~iF"), Err(PolylineError::DanglingLatitude));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            Polyline::decode("_p~iF ps|U"),
            Err(PolylineError::InvalidCharacter {
                character: ' ',
                position: 5
            })
        );
    }
}
