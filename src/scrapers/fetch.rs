//! Listing page retrieval.
//!
//! The pipeline depends on the [`PageSource`] trait rather than on `reqwest`
//! directly, so a run can be driven by any source of page markup:
//! - [`HttpFetcher`]: plain HTTP GET with a per-request timeout
//! - in-memory stubs in the pipeline tests

use crate::error::FetchError;
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Something that can hand back the markup of a listing page.
pub trait PageSource {
    /// Fetch the document at `url`.
    ///
    /// # Returns
    ///
    /// The decoded document text, or a [`FetchError`] naming the URL.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP implementation of [`PageSource`].
///
/// One client is built per run and reused for every page. Response bodies
/// are always decoded as UTF-8, whatever charset the server declares; invalid
/// sequences are replaced rather than failing the page.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching listing page");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let bytes = resp.bytes().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(
            bytes = bytes.len(),
            %status,
            preview = %truncate_for_log(&body, 120),
            "Fetched listing page"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(10)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/modules/tadnews/index.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&mock_server)
            .await;

        let url = format!("{}/modules/tadnews/index.php", mock_server.uri());
        let body = fetcher().fetch(&url).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_http_404() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let url = format!("{}/missing", mock_server.uri());
        let err = fetcher().fetch(&url).await.unwrap_err();
        match err {
            FetchError::Status { url: failed, status } => {
                assert_eq!(failed, url);
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = fetcher().fetch(&mock_server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { .. }));
    }

    #[tokio::test]
    async fn test_fetch_ignores_declared_charset() {
        let mock_server = MockServer::start().await;
        let html = "<td>2024-10-01 段考公告</td>";
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(html.as_bytes().to_vec(), "text/html; charset=big5"),
            )
            .mount(&mock_server)
            .await;

        let body = fetcher().fetch(&mock_server.uri()).await.unwrap();
        assert_eq!(body, html);
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&mock_server)
            .await;

        let slow = HttpFetcher::new(Duration::from_millis(200)).unwrap();
        let err = slow.fetch(&mock_server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Request { .. }));
    }
}
