//! Metadata API access.
//!
//! `MetadataApi` is the seam the fetcher retries against; `TmdbClient` is the
//! reqwest-backed implementation that talks to TMDB.

use crate::config::FetcherConfig;
use crate::error::{FetchError, Result};
use async_trait::async_trait;
use data_loader::MovieId;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::debug;

/// The subset of `GET /movie/{id}` we read.
///
/// Every field is optional: TMDB sends `null` for missing artwork, and a body
/// without a field is treated the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// Source of movie metadata.
///
/// One call is one attempt; retrying is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataApi: Send + Sync {
    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails>;
}

/// TMDB v3 client
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_base: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }

    /// Details endpoint for a movie, without query parameters
    pub fn movie_url(&self, movie_id: MovieId) -> String {
        format!("{}/movie/{}", self.api_base, movie_id)
    }
}

#[async_trait]
impl MetadataApi for TmdbClient {
    async fn movie_details(&self, movie_id: MovieId) -> Result<MovieDetails> {
        let url = self.movie_url(movie_id);
        debug!(movie_id, "GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a random port.
    ///
    /// The join handle yields the raw request the client sent.
    async fn start_mock_tmdb(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock TMDB service");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept failed");
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.expect("read failed");
            let request = String::from_utf8_lossy(&buf[..n]).into_owned();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.expect("write failed");
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}", addr), handle)
    }

    fn client_for(api_base: &str) -> TmdbClient {
        let mut config = FetcherConfig::new("test-key");
        config.api_base = api_base.to_string();
        config.request_timeout_secs = 5;
        TmdbClient::new(&config).expect("client builds")
    }

    #[tokio::test]
    async fn test_movie_details_success() {
        let (addr, handle) = start_mock_tmdb(
            "200 OK",
            r#"{"id":550,"title":"Fight Club","poster_path":"/pB8.jpg","backdrop_path":null}"#,
        )
        .await;

        let details = client_for(&addr).movie_details(550).await.unwrap();
        assert_eq!(details.title.as_deref(), Some("Fight Club"));
        assert_eq!(details.poster_path.as_deref(), Some("/pB8.jpg"));
        assert_eq!(details.backdrop_path, None);

        let request = handle.await.unwrap();
        let request_line = request.lines().next().unwrap_or_default();
        assert_eq!(
            request_line,
            "GET /movie/550?api_key=test-key&language=en-US HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_movie_details_missing_fields() {
        let (addr, handle) = start_mock_tmdb("200 OK", r#"{"id":1}"#).await;

        let details = client_for(&addr).movie_details(1).await.unwrap();
        assert_eq!(details, MovieDetails::default());

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_movie_details_error_status() {
        let (addr, handle) =
            start_mock_tmdb("404 Not Found", r#"{"status_message":"not found"}"#).await;

        let err = client_for(&addr).movie_details(9).await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("unexpected error: {other}"),
        }

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_movie_details_invalid_json() {
        let (addr, handle) = start_mock_tmdb("200 OK", "<html>").await;

        let err = client_for(&addr).movie_details(9).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidResponse(_)));

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_movie_details_connection_refused() {
        // Bind then drop so the port is known to be closed
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local address");
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .movie_details(9)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn test_movie_url_trims_trailing_slash() {
        let client = client_for("https://api.themoviedb.org/3/");
        assert_eq!(client.movie_url(19995), "https://api.themoviedb.org/3/movie/19995");
    }
}
