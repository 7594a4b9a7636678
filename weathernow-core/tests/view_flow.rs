//! End-to-end view flows: the real OpenWeather client against a mock
//! server, driven through the view exactly as a frontend would drive it.

use async_trait::async_trait;
use weathernow_core::{
    Coordinates, IpLocator, LocationError, LocationSource, OpenWeatherClient, Phase, ViewError,
    WeatherView,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn body(name: &str, country: &str, condition: &str, temp: f64) -> serde_json::Value {
    serde_json::json!({
        "weather": [
            { "id": 500, "main": condition, "description": condition.to_lowercase(), "icon": "10d" }
        ],
        "main": { "temp": temp, "feels_like": temp - 0.5, "pressure": 1015, "humidity": 62 },
        "wind": { "speed": 3.2, "deg": 210 },
        "dt": 1735689600,
        "sys": { "country": country },
        "name": name,
        "cod": 200
    })
}

#[derive(Debug)]
struct FixedPosition(Coordinates);

#[async_trait]
impl LocationSource for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

#[derive(Debug)]
struct DeniedPosition;

#[async_trait]
impl LocationSource for DeniedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Denied("permission rejected".to_string()))
    }
}

async fn view_against(server: &MockServer, locator: Box<dyn LocationSource>) -> WeatherView {
    let client = OpenWeatherClient::new("test-key".to_string()).with_base_url(server.uri());
    WeatherView::new(Box::new(client), locator, "London")
}

#[tokio::test]
async fn search_renders_paris_scenario() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body("Paris", "FR", "Rain", 18.4)))
        .mount(&server)
        .await;

    let mut view = view_against(&server, Box::new(DeniedPosition)).await;
    view.set_query("Paris");
    view.submit_search().await;

    assert_eq!(view.phase(), Phase::Ready);
    let snap = view.snapshot().expect("snapshot present");
    assert_eq!(format!("{}°C", snap.temperature_rounded()), "18°C");
    assert_eq!(snap.location_label(), "Paris, FR");
    assert_eq!(view.backdrop(), weathernow_core::view::backdrop_for("rain"));
}

#[tokio::test]
async fn unknown_city_renders_verbatim_error_and_no_panel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let mut view = view_against(&server, Box::new(DeniedPosition)).await;
    view.set_query("Zzzznotacity");
    view.submit_search().await;

    assert_eq!(view.phase(), Phase::Error);
    assert_eq!(
        view.error().map(ViewError::message),
        Some("Could not find weather for this city")
    );
    assert!(view.snapshot().is_none());
}

#[tokio::test]
async fn startup_detection_fetches_by_coordinates_and_updates_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(body("London", "GB", "Clouds", 9.6)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut view = view_against(
        &server,
        Box::new(FixedPosition(Coordinates {
            latitude: 51.5,
            longitude: -0.12,
        })),
    )
    .await;

    // Session start detects the location once automatically.
    view.detect_location().await;

    assert_eq!(view.query(), "London");
    assert_eq!(view.phase(), Phase::Ready);
    assert!(!view.is_geolocating());
}

#[tokio::test]
async fn denied_startup_detection_leaves_default_city_unfetched() {
    let server = MockServer::start().await;
    // No mock mounted: any request to the server would 404 and the
    // expectations below would still catch an unexpected fetch.

    let mut view = view_against(&server, Box::new(DeniedPosition)).await;
    view.detect_location().await;

    assert_eq!(view.error(), Some(ViewError::LocationPermissionDenied));
    assert_eq!(view.query(), "London");
    assert!(view.snapshot().is_none(), "no fetch may happen on denial");
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 0);
}

#[tokio::test]
async fn ip_locator_parses_mocked_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 51.5,
            "lon": -0.12,
            "city": "London"
        })))
        .mount(&server)
        .await;

    let locator = IpLocator::new().with_endpoint(format!("{}/json", server.uri()));
    let coords = locator.current_position().await.expect("lookup succeeds");
    assert!((coords.latitude - 51.5).abs() < f64::EPSILON);
    assert!((coords.longitude + 0.12).abs() < f64::EPSILON);
}

#[tokio::test]
async fn ip_locator_fail_status_maps_to_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "reserved range"
        })))
        .mount(&server)
        .await;

    let locator = IpLocator::new().with_endpoint(format!("{}/json", server.uri()));
    let err = locator
        .current_position()
        .await
        .expect_err("fail status must not yield coordinates");
    assert!(matches!(err, LocationError::Denied(_)));
}
