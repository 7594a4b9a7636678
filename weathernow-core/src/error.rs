//! Error types for weather fetching, location detection and the view.
//!
//! The view collapses every failure into one of four fixed user-facing
//! messages, but the kind stays structured so callers and tests can
//! distinguish causes without parsing prose.

use thiserror::Error;

/// A weather fetch that did not produce a snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never completed (DNS, connect, timeout, ...).
    #[error("failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status. Status codes are not
    /// differentiated further; 400, 404 and 500 all land here.
    #[error("weather request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A 2xx body that did not match the expected shape.
    #[error("failed to parse weather response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A location lookup that did not produce coordinates.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The lookup was rejected or errored out.
    #[error("location request denied: {0}")]
    Denied(String),

    /// No location capability is present at all.
    #[error("no location capability available")]
    Unsupported,
}

/// The four user-facing failure kinds of the view.
///
/// Each renders as a fixed message; the kind itself is what tests and
/// downstream code match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    CityLookupFailed,
    CoordinateLookupFailed,
    LocationPermissionDenied,
    LocationUnsupported,
}

impl ViewError {
    pub const fn message(self) -> &'static str {
        match self {
            ViewError::CityLookupFailed => "Could not find weather for this city",
            ViewError::CoordinateLookupFailed => "Could not fetch weather data for your location",
            ViewError::LocationPermissionDenied => {
                "Could not get your location. Please allow location access."
            }
            ViewError::LocationUnsupported => {
                "Location detection is not supported on this system"
            }
        }
    }
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
