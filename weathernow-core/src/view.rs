//! The weather view state machine.
//!
//! Holds the query string, the last snapshot, and the loading, error and
//! geolocating flags, and mutates them through the fetch and detect
//! operations. Presentation precedence is loading > error > snapshot >
//! nothing; a new fetch always clears the previous error first, and a
//! failed fetch always clears the previous snapshot so a stale reading is
//! never shown for a failed lookup.
//!
//! All operations take `&mut self`, so fetches are strictly sequential:
//! there is no overlapping-request race to resolve and no cancellation.

use crate::{
    client::WeatherSource,
    error::{LocationError, ViewError},
    location::LocationSource,
    model::{Coordinates, WeatherSnapshot},
};

/// Backdrop shown before the first snapshot arrives.
pub const DEFAULT_BACKDROP: &str =
    "https://images.unsplash.com/photo-1504608524841-42fe6f032b4b?auto=format&fit=crop&q=80";

const CLEAR_BACKDROP: &str =
    "https://images.unsplash.com/photo-1601297183305-6df142704ea2?auto=format&fit=crop&q=80";

/// Pick a backdrop for a condition label, case-insensitively.
///
/// Unmapped conditions fall back to the clear-sky image, never to "no
/// image".
pub fn backdrop_for(condition: &str) -> &'static str {
    match condition.to_lowercase().as_str() {
        "clear" => CLEAR_BACKDROP,
        "clouds" => {
            "https://images.unsplash.com/photo-1534088568595-a066f410bcda?auto=format&fit=crop&q=80"
        }
        "rain" => {
            "https://images.unsplash.com/photo-1519692933481-e162a57d6721?auto=format&fit=crop&q=80"
        }
        "snow" => {
            "https://images.unsplash.com/photo-1491002052546-bf38f186af56?auto=format&fit=crop&q=80"
        }
        "thunderstorm" => {
            "https://images.unsplash.com/photo-1605727216801-e27ce1d0cc28?auto=format&fit=crop&q=80"
        }
        "drizzle" => {
            "https://images.unsplash.com/photo-1541919329513-35f7af297129?auto=format&fit=crop&q=80"
        }
        _ => CLEAR_BACKDROP,
    }
}

/// What the view should present right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Error,
    Ready,
    Idle,
}

impl Phase {
    /// Presentation precedence over the state flags: loading beats error
    /// beats snapshot beats nothing.
    pub fn from_flags(loading: bool, has_error: bool, has_snapshot: bool) -> Self {
        if loading {
            Phase::Loading
        } else if has_error {
            Phase::Error
        } else if has_snapshot {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }
}

/// The stateful weather lookup view.
#[derive(Debug)]
pub struct WeatherView {
    weather: Box<dyn WeatherSource>,
    location: Box<dyn LocationSource>,

    query: String,
    snapshot: Option<WeatherSnapshot>,
    loading: bool,
    error: Option<ViewError>,
    geolocating: bool,
}

impl WeatherView {
    pub fn new(
        weather: Box<dyn WeatherSource>,
        location: Box<dyn LocationSource>,
        initial_query: impl Into<String>,
    ) -> Self {
        Self {
            weather,
            location,
            query: initial_query.into(),
            snapshot: None,
            loading: false,
            error: None,
            geolocating: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Bind user input to the search field.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<ViewError> {
        self.error
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_geolocating(&self) -> bool {
        self.geolocating
    }

    pub fn phase(&self) -> Phase {
        Phase::from_flags(self.loading, self.error.is_some(), self.snapshot.is_some())
    }

    /// Backdrop for the current state: condition-mapped once a snapshot
    /// exists, a fixed default before that.
    pub fn backdrop(&self) -> &'static str {
        match &self.snapshot {
            Some(snap) => backdrop_for(&snap.condition),
            None => DEFAULT_BACKDROP,
        }
    }

    /// Fetch weather by city name. The query field is left untouched; it
    /// already reflects what the user typed.
    pub async fn fetch_by_city(&mut self, city: &str) {
        self.loading = true;
        self.error = None;

        match self.weather.by_city(city).await {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
            }
            Err(err) => {
                tracing::debug!(%err, city, "city lookup failed");
                self.error = Some(ViewError::CityLookupFailed);
                self.snapshot = None;
            }
        }

        self.loading = false;
    }

    /// Fetch weather by coordinates. On success the query field is
    /// overwritten with the resolved place name, so the search field
    /// reflects the detected city.
    pub async fn fetch_by_coordinates(&mut self, coords: Coordinates) {
        self.loading = true;
        self.error = None;

        match self.weather.by_coordinates(coords).await {
            Ok(snapshot) => {
                self.query = snapshot.place_name.clone();
                self.snapshot = Some(snapshot);
            }
            Err(err) => {
                tracing::debug!(%err, "coordinate lookup failed");
                self.error = Some(ViewError::CoordinateLookupFailed);
                self.snapshot = None;
            }
        }

        self.loading = false;
        self.geolocating = false;
    }

    /// Detect the device position and fetch weather for it. Re-triggerable
    /// any number of times; a denied or unsupported lookup never issues a
    /// weather request.
    pub async fn detect_location(&mut self) {
        self.geolocating = true;

        if !self.location.is_available() {
            self.error = Some(ViewError::LocationUnsupported);
            self.geolocating = false;
            return;
        }

        match self.location.current_position().await {
            Ok(coords) => {
                self.fetch_by_coordinates(coords).await;
            }
            Err(LocationError::Unsupported) => {
                self.error = Some(ViewError::LocationUnsupported);
                self.geolocating = false;
            }
            Err(LocationError::Denied(reason)) => {
                tracing::debug!(%reason, "location request denied");
                self.error = Some(ViewError::LocationPermissionDenied);
                self.geolocating = false;
            }
        }
    }

    /// Submit the search field: exactly one city fetch for the query value
    /// as it stands at submit time.
    pub async fn submit_search(&mut self) {
        let city = self.query.clone();
        self.fetch_by_city(&city).await;
    }
}
