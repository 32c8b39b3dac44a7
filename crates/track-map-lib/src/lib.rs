//! Track Map Library - Core pipeline for turning GPX tracks into static map requests
//!
//! This library reads GPX track points, selects the ones to draw, packs them into an
//! encoded polyline and assembles the static map request that renders them.
//!
//! # Architecture
//!
//! - **[`TrackPoints`]**: Pull-style iterator over the track points of a parsed GPX document
//! - **[`FilterConfig`]**: Lead/trail skipping and stride selection of track points
//! - **[`encode_track`]**: Stateful delta + variable-length polyline encoder
//! - **[`Marker`]**: Location markers for waypoints and track start/end
//! - **[`StaticMapRequest`]**: Deterministic query string assembly
//! - **[`MapClient`]**: Seam for the single blocking image fetch
//!
//! The pipeline is strictly sequential: the encoder carries the previous point of each
//! coordinate as state, so points are always processed in file order.

mod client;
mod filter;
mod marker;
mod point;
pub mod polyline;
mod request;
mod source;

// Public API exports
pub use client::{ClientConfig, MapClient, ReqwestMapClient};
pub use filter::{FilterConfig, Retained};
pub use marker::{Marker, MarkerStyle, format_markers};
pub use point::TrackPoint;
pub use polyline::{EncodedPolyline, EncodedTrack, EncoderState, decode, encode, encode_track};
pub use request::{DEFAULT_ENDPOINT, StaticMapRequest};
pub use reqwest::Url;
pub use source::{TrackPoints, read_gpx, read_waypoints};

/// Error types for the track map pipeline
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("GPX parsing error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid polyline at byte {position}: {reason}")]
    InvalidPolyline { position: usize, reason: String },

    /// The map service answered with something other than 200; `body` is its message.
    #[error("{body}")]
    Service { status: u16, body: String },

    #[error("Invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
