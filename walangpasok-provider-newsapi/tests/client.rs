//! HTTP behaviour of the NewsAPI client against a mock server.

use reqwest::Client;
use serde_json::json;
use walangpasok_core::{NewsPort, NewsQuery, PortError};
use walangpasok_provider_newsapi::NewsApiClient;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> NewsApiClient {
    NewsApiClient::new(Client::new(), "news-key").with_base_url(format!("{}/", server.uri()))
}

#[tokio::test]
async fn maps_articles_and_sends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "\"walang pasok\" Pasig mayor"))
        .and(query_param("sortBy", "publishedAt"))
        .and(query_param("apiKey", "news-key"))
        .and(query_param_is_missing("pageSize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": { "id": null, "name": "Rappler" },
                    "author": "Staff",
                    "title": "Pasig suspends classes",
                    "description": "Mayor announces walang pasok due to flooding",
                    "url": "https://rappler.example/pasig",
                    "urlToImage": "https://rappler.example/pasig.jpg",
                    "publishedAt": "2024-01-15T06:30:00Z",
                    "content": "..."
                },
                {
                    "source": { "id": null, "name": null },
                    "title": "Update on classes",
                    "description": null,
                    "url": "https://inquirer.example/update",
                    "urlToImage": null,
                    "publishedAt": "2024-01-14T22:00:00Z"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let articles = client(&server)
        .search(&NewsQuery::new("\"walang pasok\" Pasig mayor"))
        .await
        .expect("mock answers with a valid payload");

    assert_eq!(articles.len(), 2);
    let first = articles.first().expect("two articles");
    assert_eq!(first.id, "https://rappler.example/pasig");
    assert_eq!(first.source, "Rappler");
    assert_eq!(
        first.url_to_image.as_deref(),
        Some("https://rappler.example/pasig.jpg")
    );
    assert_eq!(first.published_at.to_rfc3339(), "2024-01-15T06:30:00+00:00");

    let second = articles.last().expect("two articles");
    assert_eq!(second.source, "");
    assert_eq!(second.description, None);
}

#[tokio::test]
async fn page_size_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "totalResults": 0,
            "articles": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let articles = client(&server)
        .search(&NewsQuery::new("\"school suspension\" Manila").with_page_size(5))
        .await
        .expect("empty result is fine");

    assert!(articles.is_empty());
}

#[tokio::test]
async fn error_status_in_body_is_an_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "code": "maximumResultsReached",
            "message": "You have requested too many results."
        })))
        .mount(&server)
        .await;

    let result = client(&server).search(&NewsQuery::new("NDRRMC")).await;

    match result {
        Err(PortError::Upstream(message)) => {
            assert_eq!(message, "You have requested too many results.");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_key_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid."
        })))
        .mount(&server)
        .await;

    let result = client(&server).search(&NewsQuery::new("NDRRMC")).await;

    assert!(matches!(result, Err(PortError::Network(_))));
}
