//! Static map request assembly

use crate::{EncodedPolyline, MapError, Result};
use reqwest::Url;

/// MapQuest static map v5 endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.mapquestapi.com/staticmap/v5/map";

/// Line style prefix for the shape parameter
const SHAPE_STYLE: &str = "cmp|enc:";

/// Everything needed to ask the map service for one image
///
/// Parameters are always emitted in the same order (`size`, `key`, `shape`, `zoom`,
/// `locations`) so identical inputs produce identical URLs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticMapRequest {
    pub endpoint: String,
    pub width: u32,
    pub height: u32,
    pub key: String,
    pub polyline: EncodedPolyline,
    /// Zoom level; 0 means "let the service fit the shape", like no zoom at all
    pub zoom: Option<u32>,
    /// Pre-formatted marker string, see [`crate::format_markers`]
    pub markers: String,
}

impl StaticMapRequest {
    /// A request against [`DEFAULT_ENDPOINT`] without zoom or markers
    pub fn new(width: u32, height: u32, key: impl Into<String>, polyline: EncodedPolyline) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            width,
            height,
            key: key.into(),
            polyline,
            zoom: None,
            markers: String::new(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_zoom(mut self, zoom: Option<u32>) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_markers(mut self, markers: impl Into<String>) -> Self {
        self.markers = markers.into();
        self
    }

    /// Query parameters in their fixed order, unescaped
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("size", format!("{},{}", self.width, self.height)),
            ("key", self.key.clone()),
            ("shape", format!("{SHAPE_STYLE}{}", self.polyline)),
        ];

        if let Some(zoom) = self.zoom.filter(|&zoom| zoom > 0) {
            pairs.push(("zoom", zoom.to_string()));
        }

        if !self.markers.is_empty() {
            pairs.push(("locations", self.markers.clone()));
        }

        pairs
    }

    /// The assembled request as readable text, values left unescaped
    pub fn url(&self) -> String {
        let query = self
            .query_pairs()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.endpoint, query)
    }

    /// The request URL to send, with every value form-encoded
    pub fn transport_url(&self) -> Result<Url> {
        Url::parse_with_params(&self.endpoint, self.query_pairs()).map_err(|e| {
            MapError::InvalidEndpoint {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            }
        })
    }
}
