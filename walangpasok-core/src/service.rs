//! High-level service facade aggregating all sources for a city.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::directory::CityDirectory;
use crate::model::{
    AnnouncementRecord, CityId, CityMeta, EmergencyContacts, NewsArticle, WeatherReading,
};
use crate::ports::{AnnouncementSource, NewsPort, NewsQuery, PortError, WeatherPort};
use crate::sources::{NewsProfile, NewsSource, WeatherThresholdSource};
use crate::weather::WeatherClient;

const SCHOOL_NEWS_QUERY: &str = "\"school suspension\" OR \"walang pasok\"";
const SCHOOL_NEWS_PAGE_SIZE: u32 = 5;

/// Public entry point for announcements, weather, news and contacts.
pub struct WalangPasokService {
    directory: Arc<CityDirectory>,
    weather: Arc<WeatherClient>,
    news: Arc<dyn NewsPort>,
    sources: Vec<Arc<dyn AnnouncementSource>>,
}

impl WalangPasokService {
    /// Create a service with the standard four announcement sources.
    #[must_use]
    pub fn new(
        directory: Arc<CityDirectory>,
        weather_port: Arc<dyn WeatherPort>,
        news: Arc<dyn NewsPort>,
    ) -> Self {
        let weather = Arc::new(WeatherClient::new(Arc::clone(&directory), weather_port));
        let sources: Vec<Arc<dyn AnnouncementSource>> = vec![
            Arc::new(NewsSource::new(
                NewsProfile::education_office(),
                Arc::clone(&news),
            )),
            Arc::new(NewsSource::new(
                NewsProfile::local_government(),
                Arc::clone(&news),
            )),
            Arc::new(WeatherThresholdSource::new(Arc::clone(&weather))),
            Arc::new(NewsSource::new(
                NewsProfile::disaster_agency(),
                Arc::clone(&news),
            )),
        ];

        Self {
            directory,
            weather,
            news,
            sources,
        }
    }

    /// Replace the announcement sources.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<Arc<dyn AnnouncementSource>>) -> Self {
        self.sources = sources;
        self
    }

    /// List all supported cities, sorted by name.
    #[must_use]
    pub fn cities(&self) -> Vec<CityMeta> {
        self.directory.cities()
    }

    /// Emergency contacts for a city.
    #[must_use]
    pub fn emergency_contacts(&self, city: &CityId) -> EmergencyContacts {
        self.directory.contacts(city)
    }

    /// Current weather for a city, `None` when unknown.
    pub async fn fetch_weather(&self, city: &CityId) -> Option<WeatherReading> {
        self.weather.fetch_weather(city).await
    }

    /// Merged announcements from every source, newest first.
    ///
    /// Sources run concurrently, each on its own task. A source that fails or panics is logged
    /// and contributes nothing.
    pub async fn fetch_announcements(&self, city: &CityId) -> Vec<AnnouncementRecord> {
        let tasks = self.sources.iter().map(|source| {
            let source = Arc::clone(source);
            let city = city.clone();
            tokio::spawn(async move { source.fetch(&city).await })
        });

        let mut batches = Vec::with_capacity(self.sources.len());
        for (source, joined) in self.sources.iter().zip(join_all(tasks).await) {
            let outcome = joined
                .map_err(|err| PortError::Internal(err.to_string()))
                .and_then(|result| result);
            match outcome {
                Ok(records) => {
                    debug!(%city, source = source.kind(), count = records.len(), "source fetched");
                    batches.push(records);
                }
                Err(err) => {
                    warn!(%city, source = source.kind(), error = %err, "source failed");
                }
            }
        }

        let merged = merge_announcements(batches);
        info!(%city, count = merged.len(), "announcements aggregated");
        merged
    }

    /// Latest school-suspension news for a city.
    pub async fn fetch_school_news(&self, city: &CityId) -> Vec<NewsArticle> {
        let query = NewsQuery::new(format!("{SCHOOL_NEWS_QUERY} {city}"))
            .with_page_size(SCHOOL_NEWS_PAGE_SIZE);

        match self.news.search(&query).await {
            Ok(articles) => articles,
            Err(err) => {
                warn!(%city, error = %err, "school news unavailable");
                Vec::new()
            }
        }
    }
}

/// Flatten source batches, drop records without identity, de-duplicate by id and sort newest
/// first.
///
/// The first record seen for an id wins. The sort is stable, so records with equal dates keep
/// the order of their batches.
#[must_use]
pub fn merge_announcements(batches: Vec<Vec<AnnouncementRecord>>) -> Vec<AnnouncementRecord> {
    let mut seen = HashSet::new();
    let mut merged: Vec<AnnouncementRecord> = batches
        .into_iter()
        .flatten()
        .filter(|record| !record.id.is_empty())
        .filter(|record| seen.insert(record.id.clone()))
        .collect();

    merged.sort_by(|left, right| right.date.cmp(&left.date));
    merged
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::model::Status;

    fn record(id: &str, date: &str) -> AnnouncementRecord {
        let date: DateTime<Utc> = format!("{date}T00:00:00Z").parse().expect("timestamp");
        AnnouncementRecord {
            id: id.to_owned(),
            city: CityId::from("Manila"),
            status: Status::Suspended,
            date,
            reason: String::from("Due to typhoon"),
            source: String::from("NDRRMC"),
            source_url: None,
            level: String::from("All levels"),
            verified: true,
            title: None,
        }
    }

    fn ids(records: &[AnnouncementRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn merge_sorts_newest_first_across_batches() {
        let merged = merge_announcements(vec![
            vec![record("a", "2024-01-10")],
            vec![record("b", "2024-01-15")],
            Vec::new(),
            vec![record("c", "2024-01-05")],
        ]);
        assert_eq!(ids(&merged), ["b", "a", "c"]);
    }

    #[test]
    fn merge_drops_empty_ids_and_duplicates() {
        let merged = merge_announcements(vec![
            vec![record("", "2024-01-20"), record("a", "2024-01-10")],
            vec![record("a", "2024-01-12"), record("b", "2024-01-11")],
        ]);
        assert_eq!(ids(&merged), ["b", "a"]);
        assert_eq!(
            merged.last().map(|record| record.date.to_rfc3339()),
            Some(String::from("2024-01-10T00:00:00+00:00")),
            "first occurrence of a duplicate id is kept"
        );
    }

    #[test]
    fn merge_keeps_batch_order_for_equal_dates() {
        let merged = merge_announcements(vec![
            vec![record("first", "2024-01-10")],
            vec![record("second", "2024-01-10")],
        ]);
        assert_eq!(ids(&merged), ["first", "second"]);
    }
}
