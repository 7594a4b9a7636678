//! Device location detection.
//!
//! A terminal has no geolocation permission prompt, so the default source
//! approximates the device position from its public IP via the free
//! ip-api.com endpoint. The trait keeps the view testable and leaves room
//! for platform-native sources.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{error::LocationError, model::Coordinates};

/// One-shot "where am I" capability.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    /// Whether the capability exists at all. Queried before use.
    fn is_available(&self) -> bool {
        true
    }

    /// Resolve the current position once. No caching, no retry.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

const IP_API_URL: &str = "http://ip-api.com/json";

/// IP-based location source backed by ip-api.com.
#[derive(Debug, Clone)]
pub struct IpLocator {
    http: Client,
    endpoint: String,
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IpLocator {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            endpoint: IP_API_URL.to_string(),
        }
    }

    /// Point the locator at a different endpoint. Used by tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl LocationSource for IpLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        debug!(endpoint = %self.endpoint, "resolving position via IP geolocation");

        let res = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| LocationError::Denied(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, "IP geolocation returned non-success status");
            return Err(LocationError::Denied(format!("HTTP {status}")));
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|e| LocationError::Denied(e.to_string()))?;

        if body.status != "success" {
            let reason = body.message.unwrap_or_else(|| body.status.clone());
            warn!(%reason, "IP geolocation refused the lookup");
            return Err(LocationError::Denied(reason));
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(LocationError::Denied(
                "response carried no coordinates".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_reports_available_by_default() {
        assert!(IpLocator::new().is_available());
    }

    #[test]
    fn fail_payload_parses_with_message() {
        let body: IpApiResponse =
            serde_json::from_str(r#"{"status":"fail","message":"private range"}"#)
                .expect("valid JSON");
        assert_eq!(body.status, "fail");
        assert_eq!(body.message.as_deref(), Some("private range"));
        assert!(body.lat.is_none());
    }

    #[test]
    fn success_payload_parses_coordinates() {
        let body: IpApiResponse = serde_json::from_str(
            r#"{"status":"success","lat":51.5,"lon":-0.12,"city":"London"}"#,
        )
        .expect("valid JSON");
        assert_eq!(body.lat, Some(51.5));
        assert_eq!(body.lon, Some(-0.12));
    }
}
