//! Track point type shared by the filter, the encoder and the marker builder

use geo::Point;

/// A single WGS84 position taken from a GPX file, in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl TrackPoint {
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// geo points are stored as (x = longitude, y = latitude)
impl From<Point<f64>> for TrackPoint {
    #[inline]
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<&gpx::Waypoint> for TrackPoint {
    #[inline]
    fn from(waypoint: &gpx::Waypoint) -> Self {
        waypoint.point().into()
    }
}
