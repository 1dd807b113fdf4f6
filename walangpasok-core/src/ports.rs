//! Traits describing upstream clients and announcement sources, plus the shared error type.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{AnnouncementRecord, CityId, Coordinates, NewsArticle, WeatherReading};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to upstream services.
pub enum PortError {
    /// Network layer failed or the upstream answered with a non-success status.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Upstream reported an error inside an otherwise readable body.
    #[error("Upstream error: {0}")]
    Upstream(String),
    /// Payload was readable but lacked data we depend on.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    /// The city is not in the directory.
    #[error("Unsupported city: {0}")]
    UnsupportedCity(CityId),
    /// Internal error, e.g. a source task that could not be joined.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Free-text query against a news upstream.
pub struct NewsQuery {
    /// Search expression, possibly containing quoted phrases and `OR`.
    pub text: String,
    /// Maximum number of articles to request, if the upstream supports it.
    pub page_size: Option<u32>,
}

impl NewsQuery {
    /// Construct a query without a page size.
    #[must_use]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            page_size: None,
        }
    }

    /// Limit the number of requested articles.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

#[async_trait]
/// Trait for current-weather backends.
pub trait WeatherPort: Send + Sync {
    /// Fetch and normalize the current observation at the given position.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the payload cannot be normalized.
    async fn current(&self, coordinates: Coordinates) -> Result<WeatherReading, PortError>;
}

#[async_trait]
/// Trait for news search backends.
pub trait NewsPort: Send + Sync {
    /// Search articles, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the upstream reports an error.
    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsArticle>, PortError>;
}

#[async_trait]
/// A fetch-and-normalize unit producing announcements for a city.
pub trait AnnouncementSource: Send + Sync {
    /// Short tag identifying the source, also used as the id prefix of its records.
    fn kind(&self) -> &str;

    /// Produce announcements for the city.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the backing upstream fails.
    async fn fetch(&self, city: &CityId) -> Result<Vec<AnnouncementRecord>, PortError>;
}
