//! News backend using the NewsAPI `everything` endpoint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use walangpasok_core::{
    model::NewsArticle,
    ports::{NewsPort, NewsQuery, PortError},
};

/// Production endpoint of NewsAPI v2.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

const STATUS_OK: &str = "ok";

/// Response wrapper from /everything
#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<ArticleEntry>,
    // only present when status is "error"
    message: Option<String>,
}

/// Single article from /everything
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticleEntry {
    source: SourceEntry,
    title: Option<String>,
    description: Option<String>,
    url: String,
    url_to_image: Option<String>,
    published_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    name: Option<String>,
}

/// News search client for NewsAPI.
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
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
impl NewsPort for NewsApiClient {
    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsArticle>, PortError> {
        let mut req = self
            .client
            .get(format!("{}/everything", self.base_url))
            .query(&[
                ("q", query.text.as_str()),
                ("sortBy", "publishedAt"),
                ("apiKey", self.api_key.as_str()),
            ]);

        if let Some(page_size) = query.page_size {
            req = req.query(&[("pageSize", page_size)]);
        }

        let resp = fetch_json::<EverythingResponse>(req).await?;

        if resp.status != STATUS_OK {
            return Err(PortError::Upstream(resp.message.unwrap_or(resp.status)));
        }

        debug!(query = %query.text, count = resp.articles.len(), "newsapi search");

        Ok(resp.articles.into_iter().map(into_article).collect())
    }
}

fn into_article(entry: ArticleEntry) -> NewsArticle {
    NewsArticle {
        id: entry.url.clone(),
        title: entry.title.unwrap_or_default(),
        description: entry.description,
        url: entry.url,
        source: entry.source.name.unwrap_or_default(),
        published_at: entry.published_at,
        url_to_image: entry.url_to_image,
    }
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
