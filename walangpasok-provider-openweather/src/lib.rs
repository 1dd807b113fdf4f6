//! Weather backend using the OpenWeather current-weather API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use walangpasok_core::{
    model::{Coordinates, IconKind, WeatherReading},
    ports::{PortError, WeatherPort},
};

/// Production endpoint of the OpenWeather 2.5 API.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const MS_TO_KMH: f64 = 3.6;
const METERS_PER_KM: f64 = 1000.0;

/// Response from /weather
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: MainBlock,
    weather: Vec<ConditionEntry>,
    wind: WindBlock,
    // absent when it has not rained recently
    #[serde(default)]
    rain: Option<RainBlock>,
    // some stations leave it out
    visibility: Option<f64>,
    clouds: CloudBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: u32,
    pressure: u32,
}

/// Single condition from the `weather` array; the first one is the primary condition.
#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64, // m/s with units=metric
}

#[derive(Debug, Deserialize)]
struct RainBlock {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CloudBlock {
    all: u32,
}

/// Current-weather client for OpenWeather.
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a client against the production endpoint.
    #[must_use]
    pub fn new<K: Into<String>>(client: Client, api_key: K) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at another endpoint, e.g. a proxy or a mock server.
    #[must_use]
    pub fn with_base_url<U: Into<String>>(mut self, base_url: U) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }
}

#[async_trait]
impl WeatherPort for OpenWeatherClient {
    async fn current(&self, coordinates: Coordinates) -> Result<WeatherReading, PortError> {
        let req = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", String::from("metric")),
            ]);

        let resp = fetch_json::<CurrentResponse>(req).await?;
        let reading = normalize(resp)?;
        debug!(
            lat = coordinates.latitude,
            lon = coordinates.longitude,
            condition = %reading.condition,
            "openweather reading"
        );
        Ok(reading)
    }
}

/// Convert the upstream shape into a [`WeatherReading`].
fn normalize(resp: CurrentResponse) -> Result<WeatherReading, PortError> {
    let primary = resp
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| PortError::MalformedPayload("empty weather array".into()))?;

    Ok(WeatherReading {
        temperature: round_to_i32(resp.main.temp),
        condition: primary.description,
        humidity: resp.main.humidity,
        wind_speed: round_to_u32(resp.wind.speed * MS_TO_KMH),
        rainfall: resp.rain.and_then(|rain| rain.one_hour).unwrap_or(0.0),
        pressure: resp.main.pressure,
        visibility: resp.visibility.map(|metres| metres / METERS_PER_KM),
        cloudiness: resp.clouds.all,
        icon: IconKind::from_condition(&primary.main),
    })
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "temperatures are far inside the i32 range"
)]
fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "negative speeds saturate to zero and realistic values fit in u32"
)]
fn round_to_u32(value: f64) -> u32 {
    value.round() as u32
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
