//! Location markers drawn on top of the track

use crate::TrackPoint;
use std::fmt;

/// Marker icon requested from the map service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerStyle {
    /// Ordinary waypoint from a waypoint file
    Large,
    /// First retained track point
    Start,
    /// Last retained track point
    End,
}

impl MarkerStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerStyle::Large => "lg",
            MarkerStyle::Start => "start",
            MarkerStyle::End => "end",
        }
    }
}

/// A styled position, rendered as `{lat},{lon}|marker-{style}||`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    pub point: TrackPoint,
    pub style: MarkerStyle,
}

impl Marker {
    pub fn new(point: TrackPoint, style: MarkerStyle) -> Self {
        Self { point, style }
    }

    pub fn waypoint(point: TrackPoint) -> Self {
        Self::new(point, MarkerStyle::Large)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{}|marker-{}||",
            self.point.latitude,
            self.point.longitude,
            self.style.as_str()
        )
    }
}

/// Concatenate markers into the `locations` value, without separators between them
pub fn format_markers<'a, I>(markers: I) -> String
where
    I: IntoIterator<Item = &'a Marker>,
{
    markers.into_iter().map(Marker::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_waypoint_marker() {
        let marker = Marker::waypoint(TrackPoint::new(12.34, 56.78));
        assert_eq!(format_markers([&marker]), "12.34,56.78|marker-lg||");
    }

    #[test]
    fn test_markers_are_concatenated_in_order() {
        let markers = [
            Marker::waypoint(TrackPoint::new(1.5, -2.25)),
            Marker::new(TrackPoint::new(38.5, -120.2), MarkerStyle::Start),
            Marker::new(TrackPoint::new(43.252, -126.453), MarkerStyle::End),
        ];
        assert_eq!(
            format_markers(&markers),
            "1.5,-2.25|marker-lg||38.5,-120.2|marker-start||43.252,-126.453|marker-end||"
        );
    }

    #[test]
    fn test_no_markers() {
        assert_eq!(format_markers(&[]), "");
    }
}
