use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    config::Config,
    error::FetchError,
    model::{Coordinates, WeatherSnapshot},
};

/// A source of current-weather snapshots, by city name or by coordinates.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn by_city(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    async fn by_coordinates(&self, coords: Coordinates) -> Result<WeatherSnapshot, FetchError>;
}

/// OpenWeather `/weather` endpoint client. Always queries metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            http: Client::new(),
        }
    }

    /// Build a client from configuration (injected key and base URL).
    ///
    /// # Errors
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?;
        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            http: Client::new(),
        })
    }

    /// Point the client at a different endpoint base. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch(&self, query: &[(&str, &str)]) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/weather", self.base_url);

        debug!(url = %url, "fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(parsed.into())
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn by_city(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        self.fetch(&[("q", city)]).await
    }

    async fn by_coordinates(&self, coords: Coordinates) -> Result<WeatherSnapshot, FetchError> {
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();
        self.fetch(&[("lat", lat.as_str()), ("lon", lon.as_str())]).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(raw: OwCurrentResponse) -> Self {
        let (condition, description, icon) = raw
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new(), String::new()));

        WeatherSnapshot {
            place_name: raw.name,
            country_code: raw.sys.country,
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            humidity_pct: raw.main.humidity,
            pressure_hpa: raw.main.pressure,
            wind_speed_mps: raw.wind.speed,
            wind_direction_deg: raw.wind.deg,
            condition,
            description,
            icon,
            observed_at: unix_to_utc(raw.dt).unwrap_or_else(Utc::now),
        }
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Back up to a char boundary so multi-byte text never splits mid-char.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}
