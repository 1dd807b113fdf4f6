//! In-memory weather and news backends shared by the integration suites.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use walangpasok_core::{
    Coordinates, IconKind, NewsArticle, NewsPort, NewsQuery, PortError, WeatherPort,
    WeatherReading,
};

pub(crate) fn timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("valid RFC 3339 timestamp")
}

pub(crate) fn reading(rainfall: f64, wind_speed: u32) -> WeatherReading {
    WeatherReading {
        temperature: 26,
        condition: String::from("heavy intensity rain"),
        humidity: 94,
        wind_speed,
        rainfall,
        pressure: 1002,
        visibility: Some(4.0),
        cloudiness: 100,
        icon: IconKind::Rain,
    }
}

pub(crate) fn article(title: &str, published_at: &str) -> NewsArticle {
    let url = format!("https://news.example/{}", title.replace(' ', "-"));
    NewsArticle {
        id: url.clone(),
        title: title.to_owned(),
        description: None,
        url,
        source: String::from("Example News"),
        published_at: timestamp(published_at),
        url_to_image: None,
    }
}

/// Weather backend returning a fixed reading, or failing when it has none.
pub(crate) struct FakeWeather {
    reading: Option<WeatherReading>,
    calls: AtomicUsize,
}

impl FakeWeather {
    pub(crate) fn returning(reading: WeatherReading) -> Self {
        Self {
            reading: Some(reading),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reading: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherPort for FakeWeather {
    async fn current(&self, _coordinates: Coordinates) -> Result<WeatherReading, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reading
            .clone()
            .ok_or_else(|| PortError::Upstream(String::from("weather down")))
    }
}

/// News backend returning the same articles for every query and recording the queries.
pub(crate) struct FakeNews {
    articles: Option<Vec<NewsArticle>>,
    queries: Mutex<Vec<NewsQuery>>,
}

impl FakeNews {
    pub(crate) fn returning(articles: Vec<NewsArticle>) -> Self {
        Self {
            articles: Some(articles),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            articles: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn queries(&self) -> Vec<NewsQuery> {
        self.queries.lock().expect("lock").clone()
    }
}

#[async_trait]
impl NewsPort for FakeNews {
    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsArticle>, PortError> {
        self.queries.lock().expect("lock").push(query.clone());
        self.articles
            .clone()
            .ok_or_else(|| PortError::Upstream(String::from("news down")))
    }
}
