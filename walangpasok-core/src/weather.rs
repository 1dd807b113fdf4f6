//! Weather lookup by city name.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::directory::CityDirectory;
use crate::model::{CityId, WeatherReading};
use crate::ports::WeatherPort;

/// Resolves a city through the directory and asks the weather backend for its conditions.
pub struct WeatherClient {
    directory: Arc<CityDirectory>,
    port: Arc<dyn WeatherPort>,
}

impl WeatherClient {
    /// Create a client bound to a directory and a weather backend.
    #[must_use]
    pub fn new(directory: Arc<CityDirectory>, port: Arc<dyn WeatherPort>) -> Self {
        Self { directory, port }
    }

    /// Current weather for a city.
    ///
    /// Returns `None` when the city has no coordinates or the backend fails. `None` means
    /// "unknown", not "clear weather".
    pub async fn fetch_weather(&self, city: &CityId) -> Option<WeatherReading> {
        let coordinates = match self.directory.coordinates(city) {
            Ok(coordinates) => coordinates,
            Err(err) => {
                warn!(%city, error = %err, "cannot resolve city for weather lookup");
                return None;
            }
        };

        match self.port.current(coordinates).await {
            Ok(reading) => {
                debug!(%city, icon = ?reading.icon, rainfall = reading.rainfall, "weather fetched");
                Some(reading)
            }
            Err(err) => {
                warn!(%city, error = %err, "weather unavailable");
                None
            }
        }
    }
}
