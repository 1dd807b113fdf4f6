//! Domain data structures for cities, weather readings, and announcements.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Identifier for a city, which is also its display name (e.g. "Quezon City").
pub struct CityId(pub String);

impl CityId {
    /// Build an identifier from a city name.
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Borrow the city name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for CityId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Geographic position used for weather lookups.
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a city known to the directory.
pub struct CityMeta {
    /// Unique identifier.
    pub id: CityId,
    /// Display name.
    pub name: String,
    /// Position used for weather lookups.
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Small fixed set of weather icons.
pub enum IconKind {
    /// Clear sky.
    Clear,
    /// Clouds, mist, fog and anything unrecognized.
    Cloud,
    /// Rain.
    Rain,
    /// Drizzle.
    Drizzle,
    /// Thunderstorm.
    Thunderstorm,
    /// Snow.
    Snow,
}

impl IconKind {
    /// Map an upstream primary condition (`Clear`, `Clouds`, `Rain`, ...) to an icon.
    #[must_use]
    pub fn from_condition(condition: &str) -> Self {
        match condition {
            "Clear" => Self::Clear,
            "Rain" => Self::Rain,
            "Drizzle" => Self::Drizzle,
            "Thunderstorm" => Self::Thunderstorm,
            "Snow" => Self::Snow,
            _ => Self::Cloud,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Normalized current weather observation.
pub struct WeatherReading {
    /// Temperature in °C, rounded.
    pub temperature: i32,
    /// Upstream description, e.g. "light rain".
    pub condition: String,
    /// Relative humidity in percent.
    pub humidity: u32,
    /// Wind speed in km/h, rounded.
    pub wind_speed: u32,
    /// Rainfall over the last hour in mm.
    pub rainfall: f64,
    /// Sea-level pressure in hPa.
    pub pressure: u32,
    /// Visibility in km, `None` when the station does not report it.
    pub visibility: Option<f64>,
    /// Cloud cover in percent.
    pub cloudiness: u32,
    /// Icon describing the primary condition.
    pub icon: IconKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Whether classes are suspended or running normally.
pub enum Status {
    /// Classes are suspended.
    Suspended,
    /// Classes proceed as normal.
    Normal,
}

impl fmt::Display for Status {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Suspended => "suspended",
            Status::Normal => "normal",
        };
        formatter.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Announcement normalized from any source.
pub struct AnnouncementRecord {
    /// Identity of the underlying source event, stable within one refresh.
    pub id: String,
    /// City the announcement concerns.
    pub city: CityId,
    /// Suspension status.
    pub status: Status,
    /// Publication or issue time.
    pub date: DateTime<Utc>,
    /// Short canonical reason.
    pub reason: String,
    /// Display name of the origin.
    pub source: String,
    /// Link to the original announcement, when known.
    pub source_url: Option<String>,
    /// Scope of the announcement, e.g. "All levels".
    pub level: String,
    /// Whether the source is an official one.
    pub verified: bool,
    /// Original headline, when the record came from an article.
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// News article as returned by a news upstream.
pub struct NewsArticle {
    /// Identity of the article; the URL.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Teaser text, if any.
    pub description: Option<String>,
    /// Link to the article.
    pub url: String,
    /// Name of the publishing outlet.
    pub source: String,
    /// Publication time.
    pub published_at: DateTime<Utc>,
    /// Lead image, if any.
    pub url_to_image: Option<String>,
}

impl NewsArticle {
    /// Headline and description joined for classification.
    #[must_use]
    pub fn classification_text(&self) -> String {
        format!(
            "{} {}",
            self.title,
            self.description.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Offices to call about suspensions in a city.
pub struct EmergencyContacts {
    /// Division office of the Department of Education.
    pub deped_office: String,
    /// Phone number of the education office.
    pub deped_phone: String,
    /// Office of the mayor.
    pub mayor_office: String,
    /// Phone number of the mayor's office.
    pub mayor_phone: String,
    /// Emergency hotline.
    pub emergency: String,
}
