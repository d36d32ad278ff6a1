use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::RemoteError;

pub const BASE_URL: &str = "https://api.spacexdata.com/v4";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the public SpaceX v4 REST API. Every call is a single request
/// with no retries; the API returns whole collections without paging.
#[derive(Debug, Clone)]
pub struct SpaceXClient {
    http: Client,
    base_url: String,
}

impl SpaceXClient {
    pub fn new() -> Result<Self, RemoteError> {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(TIMEOUT)
            .user_agent("reqwest")
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Every launch the API knows about, as raw v4 launch objects.
    pub async fn fetch_all(&self) -> Result<Vec<Value>, RemoteError> {
        self.fetch("launches", "/launches").await
    }

    /// Only launches that have not happened yet.
    pub async fn fetch_upcoming(&self) -> Result<Vec<Value>, RemoteError> {
        self.fetch("upcoming launches", "/launches/upcoming").await
    }

    async fn fetch(&self, what: &'static str, path: &str) -> Result<Vec<Value>, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if status != StatusCode::OK {
            return Err(RemoteError::Status {
                what,
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let launches: Vec<Value> = serde_json::from_slice(&body)?;
        tracing::info!("downloaded {} :: {} entries", what, launches.len());

        Ok(launches)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client_for(server: &MockServer) -> SpaceXClient {
        SpaceXClient::with_base_url(&server.uri()).unwrap()
    }

    #[tokio::test]
    async fn fetch_all_returns_raw_launches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/launches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "1", "name": "M1"},
                {"id": "2", "name": "M2"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let launches = client_for(&server).await.fetch_all().await.unwrap();
        assert_eq!(launches.len(), 2);
        assert_eq!(launches[1]["name"], "M2");
    }

    #[tokio::test]
    async fn fetch_upcoming_hits_the_upcoming_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/launches/upcoming"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "9", "upcoming": true}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let launches = client_for(&server).await.fetch_upcoming().await.unwrap();
        assert_eq!(launches.len(), 1);
    }

    #[tokio::test]
    async fn non_200_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/launches"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_all().await.unwrap_err();
        match &err {
            RemoteError::Status { status, body, .. } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Failed to fetch launches: 500 - boom");
    }

    #[tokio::test]
    async fn upcoming_errors_name_the_upcoming_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/launches/upcoming"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_upcoming().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch upcoming launches: 404 - missing"
        );
    }

    #[tokio::test]
    async fn unparseable_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/launches"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_all().await.unwrap_err();
        assert!(matches!(err, RemoteError::Parse(_)));
    }

    #[tokio::test]
    async fn non_array_json_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/launches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"docs": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_all().await.unwrap_err();
        assert!(matches!(err, RemoteError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let err = SpaceXClient::with_base_url(&uri)
            .unwrap()
            .fetch_all()
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Transport(_)));
    }
}
