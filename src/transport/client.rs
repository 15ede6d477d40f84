//! `HttpClient` implementation over reqwest.

use http::header::{ACCEPT, HeaderMap, HeaderValue};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("elastic-trib/", env!("CARGO_PKG_VERSION"));

/// Production [`HttpClient`] backed by `reqwest`.
///
/// Requests carry [`USER_AGENT`] and `Accept: application/json`. Timeouts
/// are left at reqwest's defaults.
///
/// # Example
///
/// ```no_run
/// use elastic_trib::transport::{ReqwestClient, HttpClient, HttpRequest};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("http://127.0.0.1:9200/_cluster/health")?;
/// let response = client.request(HttpRequest::get(url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the elastic-trib defaults.
    ///
    /// Falls back to a plain `reqwest::Client` if the configured one cannot
    /// be built.
    #[must_use]
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let inner = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to configure HTTP client, using defaults: {e}");
                reqwest::Client::new()
            });

        Self { inner }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = req;

        let mut builder = self.inner.request(method, url.as_str()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?;

        Ok(HttpResponse::new(status, headers, body.to_vec()))
    }
}

/// Maps a reqwest failure onto [`HttpError`].
fn classify(error: reqwest::Error) -> HttpError {
    if error.is_timeout() {
        HttpError::Timeout
    } else if error.is_builder() {
        HttpError::InvalidUrl(error.to_string())
    } else {
        HttpError::Connection(Box::new(error))
    }
}
