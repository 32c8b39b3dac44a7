//! GPX input: track points as a pull-style iterator, waypoints as marker positions

use crate::{Result, TrackPoint};
use std::io::{BufReader, Read};
use std::path::Path;

/// Iterator over every track point of a GPX document, in file order
///
/// Tracks and their segments are flattened, so the filter sees one continuous sequence
/// indexed from zero. The iterator owns the document and can only be consumed once.
#[derive(Debug)]
pub struct TrackPoints {
    tracks: std::vec::IntoIter<gpx::Track>,
    segments: std::vec::IntoIter<gpx::TrackSegment>,
    points: std::vec::IntoIter<gpx::Waypoint>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TrackPoints {
    /// Take ownership of a parsed document
    pub fn new(gpx_data: gpx::Gpx) -> Self {
        Self {
            tracks: gpx_data.tracks.into_iter(),
            segments: Vec::new().into_iter(),
            points: Vec::new().into_iter(),
        }
    }

    /// Parse a GPX document from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::new(gpx::read(reader)?))
    }
}

impl Iterator for TrackPoints {
    type Item = TrackPoint;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(waypoint) = self.points.next() {
                return Some(TrackPoint::from(&waypoint));
            }
            match self.segments.next() {
                Some(segment) => self.points = segment.points.into_iter(),
                None => self.segments = self.tracks.next()?.segments.into_iter(),
            }
        }
    }
}

/// Open and parse a GPX file, returning its track points
pub fn read_gpx<P: AsRef<Path>>(path: P) -> Result<TrackPoints> {
    let path = path.as_ref();
    #[cfg(feature = "profiling")]
    profiling::scope!("source::read_gpx");

    let file = std::fs::File::open(path)?;
    let gpx_data = gpx::read(BufReader::new(file))?;
    tracing::debug!(
        "Loaded {} track(s) from {}",
        gpx_data.tracks.len(),
        path.display()
    );
    Ok(TrackPoints::new(gpx_data))
}

/// Open and parse a GPX file, returning the positions of its `wpt` elements in file order
pub fn read_waypoints<P: AsRef<Path>>(path: P) -> Result<Vec<TrackPoint>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let waypoints = waypoints_from_reader(BufReader::new(file))?;
    tracing::debug!("Loaded {} waypoint(s) from {}", waypoints.len(), path.display());
    Ok(waypoints)
}

fn waypoints_from_reader<R: Read>(reader: R) -> Result<Vec<TrackPoint>> {
    let gpx_data = gpx::read(reader)?;
    Ok(gpx_data.waypoints.iter().map(TrackPoint::from).collect())
}
