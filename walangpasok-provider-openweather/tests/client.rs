//! HTTP behaviour of the OpenWeather client against a mock server.

use reqwest::Client;
use serde_json::json;
use walangpasok_core::{Coordinates, IconKind, PortError, WeatherPort};
use walangpasok_provider_openweather::OpenWeatherClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MANILA: Coordinates = Coordinates {
    latitude: 14.5995,
    longitude: 120.9842,
};

fn client(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new(Client::new(), "test-key").with_base_url(server.uri())
}

#[tokio::test]
async fn sends_coordinates_key_and_metric_units() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "14.5995"))
        .and(query_param("lon", "120.9842"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coord": { "lon": 120.9842, "lat": 14.5995 },
            "weather": [{ "id": 502, "main": "Rain", "description": "heavy intensity rain", "icon": "10d" }],
            "main": { "temp": 25.4, "feels_like": 26.1, "humidity": 94, "pressure": 1001 },
            "visibility": 4000,
            "wind": { "speed": 18.0, "deg": 240 },
            "rain": { "1h": 24.5 },
            "clouds": { "all": 100 },
            "name": "Manila"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reading = client(&server)
        .current(MANILA)
        .await
        .expect("mock answers with a valid payload");

    assert_eq!(reading.temperature, 25);
    assert_eq!(reading.wind_speed, 65);
    assert!((reading.rainfall - 24.5).abs() < f64::EPSILON);
    assert_eq!(reading.visibility, Some(4.0));
    assert_eq!(reading.icon, IconKind::Rain);
}

#[tokio::test]
async fn non_success_status_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "cod": 401,
            "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let result = client(&server).current(MANILA).await;

    assert!(matches!(result, Err(PortError::Network(_))));
}

#[tokio::test]
async fn payload_without_required_fields_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{ "main": "Clear", "description": "clear sky" }]
        })))
        .mount(&server)
        .await;

    let result = client(&server).current(MANILA).await;

    assert!(result.is_err());
}
