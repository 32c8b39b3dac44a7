//! Encoded polyline format
//!
//! Coordinates are scaled by 10^5, rounded half-to-even and stored as deltas from the
//! previous point. Each delta is zig-zag mapped and written in 5-bit chunks, lowest
//! first, as characters offset by 63; every chunk but the last carries the `0x20`
//! continuation bit. Latitude comes before longitude for each point.

use crate::{MapError, Result, TrackPoint};
use std::fmt;

/// Scale factor between degrees and encoded integer units
pub const PRECISION: f64 = 1e5;

const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: u64 = 0x1f;
const CONTINUATION: u64 = 0x20;
const CHAR_OFFSET: u8 = 63;

/// Last emitted point in scaled integer units, the base for the next deltas
///
/// The state is a plain value: [`EncoderState::push`] returns the successor instead of
/// mutating in place, so encoding is a fold over the points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncoderState {
    previous_lat_units: i64,
    previous_lon_units: i64,
}

impl EncoderState {
    /// Append the encoding of `point` to `out` and return the state for the next point
    #[must_use]
    pub fn push(self, point: TrackPoint, out: &mut String) -> Self {
        let lat_units = to_units(point.latitude);
        let lon_units = to_units(point.longitude);

        encode_value(lat_units.wrapping_sub(self.previous_lat_units), out);
        encode_value(lon_units.wrapping_sub(self.previous_lon_units), out);

        Self {
            previous_lat_units: lat_units,
            previous_lon_units: lon_units,
        }
    }

    /// Previous point as (latitude, longitude) units
    #[inline]
    pub fn previous_units(&self) -> (i64, i64) {
        (self.previous_lat_units, self.previous_lon_units)
    }
}

/// A finished polyline string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedPolyline(String);

impl EncodedPolyline {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for EncodedPolyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedPolyline {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encoder output together with the raw first and last encoded points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedTrack {
    pub polyline: EncodedPolyline,
    pub point_count: usize,
    pub first: Option<TrackPoint>,
    pub last: Option<TrackPoint>,
}

/// Encode a sequence of points into a polyline
pub fn encode<I>(points: I) -> EncodedPolyline
where
    I: IntoIterator<Item = TrackPoint>,
{
    encode_track(points).polyline
}

/// Encode a sequence of points, remembering how many there were and where the track
/// starts and ends
pub fn encode_track<I>(points: I) -> EncodedTrack
where
    I: IntoIterator<Item = TrackPoint>,
{
    #[cfg(feature = "profiling")]
    profiling::scope!("polyline::encode_track");

    let mut polyline = String::new();
    let mut point_count = 0;
    let mut first = None;
    let mut last = None;

    points
        .into_iter()
        .fold(EncoderState::default(), |state, point| {
            first.get_or_insert(point);
            last = Some(point);
            point_count += 1;
            state.push(point, &mut polyline)
        });

    tracing::debug!(
        "Encoded {} point(s) into {} polyline characters",
        point_count,
        polyline.len()
    );

    EncodedTrack {
        polyline: EncodedPolyline(polyline),
        point_count,
        first,
        last,
    }
}

/// Decode a polyline back into points, rounded to the encoding precision
pub fn decode(encoded: &str) -> Result<Vec<TrackPoint>> {
    let len = encoded.len();
    let mut position = 0;
    let mut lat_units: i64 = 0;
    let mut lon_units: i64 = 0;
    let mut points = Vec::new();

    while position < len {
        lat_units = lat_units.wrapping_add(decode_value(encoded, &mut position)?);
        if position == len {
            return Err(MapError::InvalidPolyline {
                position,
                reason: "latitude without longitude".to_string(),
            });
        }
        lon_units = lon_units.wrapping_add(decode_value(encoded, &mut position)?);
        points.push(TrackPoint::new(
            lat_units as f64 / PRECISION,
            lon_units as f64 / PRECISION,
        ));
    }

    Ok(points)
}

#[inline]
fn to_units(degrees: f64) -> i64 {
    round_units(degrees * PRECISION)
}

/// Ties go to the even neighbour
#[inline]
fn round_units(scaled: f64) -> i64 {
    scaled.round_ties_even() as i64
}

fn encode_value(delta: i64, out: &mut String) {
    let shifted = delta << 1;
    let mut value = (if delta < 0 { !shifted } else { shifted }) as u64;

    while value >= CONTINUATION {
        out.push(char::from(
            (CONTINUATION | (value & CHUNK_MASK)) as u8 + CHAR_OFFSET,
        ));
        value >>= CHUNK_BITS;
    }
    out.push(char::from(value as u8 + CHAR_OFFSET));
}

fn decode_value(encoded: &str, position: &mut usize) -> Result<i64> {
    let bytes = encoded.as_bytes();
    let mut value: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*position) else {
            return Err(MapError::InvalidPolyline {
                position: *position,
                reason: "truncated value".to_string(),
            });
        };
        if !(CHAR_OFFSET..=CHAR_OFFSET + 0x3f).contains(&byte) {
            // Every byte before `position` was ASCII, so it is a char boundary
            let found = encoded[*position..]
                .chars()
                .next()
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(MapError::InvalidPolyline {
                position: *position,
                reason: format!("unexpected character {found:?}"),
            });
        }

        let chunk = u64::from(byte - CHAR_OFFSET);
        let bits = chunk & CHUNK_MASK;
        // The 13th chunk only has room for the top 4 bits of a 64-bit value
        if shift >= u64::BITS
            || (shift > u64::BITS - CHUNK_BITS && bits >> (u64::BITS - shift) != 0)
        {
            return Err(MapError::InvalidPolyline {
                position: *position,
                reason: "value does not fit in 64 bits".to_string(),
            });
        }

        value |= bits << shift;
        shift += CHUNK_BITS;
        *position += 1;

        if chunk < CONTINUATION {
            break;
        }
    }

    let magnitude = (value >> 1) as i64;
    Ok(if value & 1 == 1 { !magnitude } else { magnitude })
}
