use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coordinates as reported by a location source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One current-weather reading for a place.
///
/// Received whole from the remote API and never partially mutated:
/// every successful fetch replaces the previous snapshot entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Resolved place name, e.g. "London".
    pub place_name: String,
    /// ISO country code, e.g. "GB".
    pub country_code: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: u16,
    /// Primary condition label, e.g. "Clear" or "Rain". Used to pick a
    /// backdrop; distinct from the longer `description`.
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub observed_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    /// Temperature as displayed: rounded to the nearest whole degree.
    pub fn temperature_rounded(&self) -> i64 {
        self.temperature_c.round() as i64
    }

    /// Feels-like temperature as displayed.
    pub fn feels_like_rounded(&self) -> i64 {
        self.feels_like_c.round() as i64
    }

    /// "Place, CC" header, e.g. "Paris, FR".
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.place_name, self.country_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(temp: f64, feels: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            place_name: "Paris".to_string(),
            country_code: "FR".to_string(),
            temperature_c: temp,
            feels_like_c: feels,
            humidity_pct: 60,
            pressure_hpa: 1013,
            wind_speed_mps: 3.2,
            wind_direction_deg: 210,
            condition: "Rain".to_string(),
            description: "light rain".to_string(),
            icon: "10d".to_string(),
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn temperature_rounds_to_nearest_degree() {
        assert_eq!(snapshot(18.4, 17.2).temperature_rounded(), 18);
        assert_eq!(snapshot(18.5, 17.2).temperature_rounded(), 19);
        assert_eq!(snapshot(-0.4, -0.4).temperature_rounded(), 0);
        assert_eq!(snapshot(-2.6, -2.6).temperature_rounded(), -3);
    }

    #[test]
    fn feels_like_rounds_independently() {
        assert_eq!(snapshot(18.4, 16.7).feels_like_rounded(), 17);
    }

    #[test]
    fn location_label_joins_name_and_country() {
        assert_eq!(snapshot(18.4, 17.2).location_label(), "Paris, FR");
    }
}
