//! Announcement sources: news-backed profiles and weather thresholds.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::classify::{classify_status, extract_reason};
use crate::model::{AnnouncementRecord, CityId, NewsArticle, Status, WeatherReading};
use crate::ports::{AnnouncementSource, NewsPort, NewsQuery, PortError};
use crate::weather::WeatherClient;

/// Scope text attached to every announcement.
pub const ALL_LEVELS: &str = "All levels";

/// Rainfall above this many mm in the last hour triggers an advisory.
pub const HEAVY_RAINFALL_MM: f64 = 20.0;
/// Wind above this many km/h triggers an advisory.
pub const STRONG_WIND_KMH: u32 = 60;

const PAGASA_KIND: &str = "pagasa";
const PAGASA_SOURCE: &str = "PAGASA Weather Bureau";
const PAGASA_URL: &str = "https://www.pagasa.dost.gov.ph";

const CITY_PLACEHOLDER: &str = "{city}";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Configuration of a news-backed source.
pub struct NewsProfile {
    /// Id prefix and log tag.
    pub kind: &'static str,
    /// Search expression; `{city}` is replaced by the city name.
    pub query_template: &'static str,
    /// Display name of the origin; `{city}` is replaced by the city name.
    pub source_template: &'static str,
    /// Maximum number of articles kept, newest first.
    pub cap: usize,
}

impl NewsProfile {
    /// Regional office of the Department of Education.
    #[must_use]
    pub fn education_office() -> Self {
        Self {
            kind: "deped",
            query_template: "\"class suspension\" {city} DepEd",
            source_template: "DepEd Regional Office",
            cap: 3,
        }
    }

    /// City mayor's office.
    #[must_use]
    pub fn local_government() -> Self {
        Self {
            kind: "lgu",
            query_template: "\"walang pasok\" {city} mayor",
            source_template: "{city} Mayor's Office",
            cap: 2,
        }
    }

    /// National disaster risk reduction council.
    #[must_use]
    pub fn disaster_agency() -> Self {
        Self {
            kind: "ndrrmc",
            query_template: "\"NDRRMC\" {city} disaster",
            source_template: "NDRRMC",
            cap: 1,
        }
    }

    /// Search query for a city.
    #[must_use]
    pub fn query(&self, city: &CityId) -> NewsQuery {
        NewsQuery::new(self.query_template.replace(CITY_PLACEHOLDER, city.as_str()))
    }

    /// Source display name for a city.
    #[must_use]
    pub fn source_name(&self, city: &CityId) -> String {
        self.source_template
            .replace(CITY_PLACEHOLDER, city.as_str())
    }

    /// Turn an article into an announcement, classifying its text.
    #[must_use]
    pub fn to_record(&self, city: &CityId, article: &NewsArticle) -> AnnouncementRecord {
        let text = article.classification_text();
        AnnouncementRecord {
            id: format!("{}-{}", self.kind, article.url),
            city: city.clone(),
            status: classify_status(&text),
            date: article.published_at,
            reason: extract_reason(&text),
            source: self.source_name(city),
            source_url: Some(article.url.clone()),
            level: ALL_LEVELS.to_owned(),
            verified: true,
            title: Some(article.title.clone()),
        }
    }
}

/// Announcement source backed by a news search.
pub struct NewsSource {
    profile: NewsProfile,
    news: Arc<dyn NewsPort>,
}

impl NewsSource {
    /// Create a source for the given profile.
    #[must_use]
    pub fn new(profile: NewsProfile, news: Arc<dyn NewsPort>) -> Self {
        Self { profile, news }
    }
}

#[async_trait]
impl AnnouncementSource for NewsSource {
    fn kind(&self) -> &str {
        self.profile.kind
    }

    async fn fetch(&self, city: &CityId) -> Result<Vec<AnnouncementRecord>, PortError> {
        let mut articles = self.news.search(&self.profile.query(city)).await?;

        // The upstream sorts by publication date already, but the cap must keep the newest.
        articles.sort_by(|left, right| right.published_at.cmp(&left.published_at));
        articles.truncate(self.profile.cap);

        Ok(articles
            .iter()
            .map(|article| self.profile.to_record(city, article))
            .collect())
    }
}

/// Announcement source synthesizing advisories from weather thresholds.
pub struct WeatherThresholdSource {
    weather: Arc<WeatherClient>,
}

impl WeatherThresholdSource {
    /// Create a source on top of the weather client.
    #[must_use]
    pub fn new(weather: Arc<WeatherClient>) -> Self {
        Self { weather }
    }
}

#[async_trait]
impl AnnouncementSource for WeatherThresholdSource {
    fn kind(&self) -> &str {
        PAGASA_KIND
    }

    async fn fetch(&self, city: &CityId) -> Result<Vec<AnnouncementRecord>, PortError> {
        let Some(reading) = self.weather.fetch_weather(city).await else {
            return Ok(Vec::new());
        };
        Ok(threshold_announcements(city, &reading, Utc::now()))
    }
}

/// Advisories implied by a reading: one for heavy rainfall, one for strong winds.
#[must_use]
pub fn threshold_announcements(
    city: &CityId,
    reading: &WeatherReading,
    issued: DateTime<Utc>,
) -> Vec<AnnouncementRecord> {
    let stamp = issued.to_rfc3339();
    let mut records = Vec::new();

    if reading.rainfall > HEAVY_RAINFALL_MM {
        records.push(advisory(
            city,
            format!("{PAGASA_KIND}-{stamp}"),
            issued,
            format!("Heavy rainfall warning: {}mm recorded", reading.rainfall),
            "Weather Advisory: Heavy Rainfall",
        ));
    }

    if reading.wind_speed > STRONG_WIND_KMH {
        records.push(advisory(
            city,
            format!("{PAGASA_KIND}-wind-{stamp}"),
            issued,
            format!("Strong winds: {}km/h recorded", reading.wind_speed),
            "Weather Advisory: Strong Winds",
        ));
    }

    records
}

fn advisory(
    city: &CityId,
    id: String,
    issued: DateTime<Utc>,
    reason: String,
    title: &str,
) -> AnnouncementRecord {
    AnnouncementRecord {
        id,
        city: city.clone(),
        status: Status::Suspended,
        date: issued,
        reason,
        source: PAGASA_SOURCE.to_owned(),
        source_url: Some(PAGASA_URL.to_owned()),
        level: ALL_LEVELS.to_owned(),
        verified: true,
        title: Some(title.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IconKind;

    fn reading(rainfall: f64, wind_speed: u32) -> WeatherReading {
        WeatherReading {
            temperature: 27,
            condition: String::from("moderate rain"),
            humidity: 88,
            wind_speed,
            rainfall,
            pressure: 1008,
            visibility: Some(6.0),
            cloudiness: 90,
            icon: IconKind::Rain,
        }
    }

    fn advisories(rainfall: f64, wind_speed: u32) -> Vec<AnnouncementRecord> {
        threshold_announcements(
            &CityId::from("Manila"),
            &reading(rainfall, wind_speed),
            Utc::now(),
        )
    }

    #[test]
    fn heavy_rain_alone_yields_one_advisory() {
        let records = advisories(25.0, 30);
        assert_eq!(records.len(), 1);
        let record = records.first().expect("one record");
        assert!(record.reason.contains("25mm"), "reason: {}", record.reason);
        assert_eq!(record.reason, "Heavy rainfall warning: 25mm recorded");
        assert_eq!(record.status, Status::Suspended);
        assert_eq!(record.source, PAGASA_SOURCE);
    }

    #[test]
    fn strong_wind_alone_yields_one_advisory() {
        let records = advisories(5.0, 70);
        assert_eq!(records.len(), 1);
        let record = records.first().expect("one record");
        assert!(record.reason.contains("70km/h"), "reason: {}", record.reason);
        assert!(record.id.starts_with("pagasa-wind-"));
    }

    #[test]
    fn both_thresholds_fire_independently() {
        let records = advisories(25.0, 70);
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id, "ids must be distinct");
    }

    #[test]
    fn calm_weather_yields_nothing() {
        assert!(advisories(5.0, 10).is_empty());
        // thresholds are strict
        assert!(advisories(20.0, 60).is_empty());
    }

    #[test]
    fn fractional_rainfall_is_reported_as_is() {
        let records = advisories(20.5, 0);
        assert_eq!(
            records.first().map(|record| record.reason.as_str()),
            Some("Heavy rainfall warning: 20.5mm recorded")
        );
    }

    #[test]
    fn profiles_fill_in_the_city() {
        let city = CityId::from("Pasig");
        let lgu = NewsProfile::local_government();
        assert_eq!(lgu.query(&city).text, "\"walang pasok\" Pasig mayor");
        assert_eq!(lgu.source_name(&city), "Pasig Mayor's Office");

        let deped = NewsProfile::education_office();
        assert_eq!(deped.query(&city).text, "\"class suspension\" Pasig DepEd");
        assert_eq!(deped.source_name(&city), "DepEd Regional Office");
    }

    #[test]
    fn article_becomes_classified_record() {
        let published_at: DateTime<Utc> = "2024-01-15T06:30:00Z".parse().expect("timestamp");
        let article = NewsArticle {
            id: String::from("https://news.example/ph/1"),
            title: String::from("Classes suspended in Pasig"),
            description: Some(String::from("Typhoon signal no. 2 raised")),
            url: String::from("https://news.example/ph/1"),
            source: String::from("Example News"),
            published_at,
            url_to_image: None,
        };

        let record = NewsProfile::disaster_agency().to_record(&CityId::from("Pasig"), &article);

        assert_eq!(record.id, "ndrrmc-https://news.example/ph/1");
        assert_eq!(record.status, Status::Suspended);
        assert_eq!(record.reason, "Due to typhoon");
        assert_eq!(record.source, "NDRRMC");
        assert_eq!(record.source_url.as_deref(), Some("https://news.example/ph/1"));
        assert_eq!(record.title.as_deref(), Some("Classes suspended in Pasig"));
        assert_eq!(record.level, ALL_LEVELS);
        assert!(record.verified);
    }
}
