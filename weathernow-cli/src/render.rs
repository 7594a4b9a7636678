//! Text rendering of the view state: one panel per presentation phase.

use weathernow_core::{Phase, WeatherSnapshot, WeatherView};

/// Render whatever the view should present right now.
///
/// Precedence matches the view itself: loading text beats the error
/// message beats the result panel beats the bare idle hint.
pub fn panel(view: &WeatherView) -> String {
    match view.phase() {
        Phase::Loading => "Loading...".to_string(),
        Phase::Error => view
            .error()
            .map(|e| e.message().to_string())
            .unwrap_or_default(),
        Phase::Ready => view
            .snapshot()
            .map(|snap| snapshot_panel(snap, view.backdrop()))
            .unwrap_or_default(),
        Phase::Idle => "Enter a city name to look up the weather.".to_string(),
    }
}

/// Label for the detect-location affordance.
pub fn detect_label(geolocating: bool) -> &'static str {
    if geolocating {
        "Detecting..."
    } else {
        "Detect Location"
    }
}

fn snapshot_panel(snap: &WeatherSnapshot, backdrop: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}   {}°C\n",
        snap.location_label(),
        snap.temperature_rounded()
    ));
    out.push_str(&format!("{}\n\n", capitalize_words(&snap.description)));
    out.push_str(&format!("Feels Like      {}°C\n", snap.feels_like_rounded()));
    out.push_str(&format!("Humidity        {}%\n", snap.humidity_pct));
    out.push_str(&format!("Wind Speed      {} m/s\n", snap.wind_speed_mps));
    out.push_str(&format!("Wind Direction  {}°\n", snap.wind_direction_deg));
    out.push_str(&format!("Pressure        {} hPa\n", snap.pressure_hpa));
    out.push_str(&format!(
        "Observed        {}\n",
        snap.observed_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("\nBackdrop: {backdrop}\n"));

    out
}

/// Uppercase the first letter of each word in the description text.
fn capitalize_words(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
