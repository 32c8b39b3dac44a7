//! HTTP access to the map service
//!
//! The pipeline only needs "fetch this URL, give me the body or the error text", so the
//! transport sits behind [`MapClient`] and can be swapped out in tests.

use crate::{MapError, Result, Url};
use std::time::Duration;

/// Fetches a rendered map image
pub trait MapClient {
    /// Perform a single GET request for an already encoded URL
    ///
    /// Returns the complete body on HTTP 200. Any other status becomes
    /// [`MapError::Service`] carrying the response body as its message.
    fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Transport settings for [`ReqwestMapClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound for the whole request, `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            user_agent: concat!("track-map/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Blocking reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestMapClient {
    client: reqwest::blocking::Client,
}

impl ReqwestMapClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl MapClient for ReqwestMapClient {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        #[cfg(feature = "profiling")]
        profiling::scope!("client::fetch");

        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        tracing::debug!("Map service answered {status}");

        if status != reqwest::StatusCode::OK {
            let body = response.text()?;
            return Err(MapError::Service {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.user_agent.starts_with("track-map/"));
    }

    #[test]
    fn test_client_builds() {
        assert!(ReqwestMapClient::new(&ClientConfig::default()).is_ok());
    }
}
