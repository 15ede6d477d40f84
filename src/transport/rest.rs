//! JSON-over-HTTP calls against one cluster.

use base64::{Engine as _, engine::general_purpose};
use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ConnectionTarget;

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// REST client bound to a single [`ConnectionTarget`].
///
/// Joins relative API paths onto the target address, attaches the basic
/// auth header when credentials were resolved, and turns non-2xx statuses
/// and undecodable bodies into [`TransportError`]. Each call is exactly one
/// HTTP request.
#[derive(Debug)]
pub struct RestClient<H> {
    client: H,
    target: ConnectionTarget,
}

impl<H> RestClient<H> {
    /// Creates a REST client for the given target.
    #[must_use]
    pub const fn new(client: H, target: ConnectionTarget) -> Self {
        Self { client, target }
    }

    /// Returns the connection target.
    #[must_use]
    pub const fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    /// Resolves a relative API path (e.g. `_cluster/health`) against the target address.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidPath`] if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.target
            .address()
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        let Some(credentials) = self.target.credentials() else {
            return request;
        };

        let token = general_purpose::STANDARD
            .encode(format!("{}:{}", credentials.user, credentials.password));
        match HeaderValue::from_str(&format!("Basic {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.with_header(AUTHORIZATION, value)
            }
            // base64 output is always a valid header value
            Err(_) => request,
        }
    }
}

impl<H: HttpClient> RestClient<H> {
    /// Sends a GET request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on connection failure, non-2xx status,
    /// or a body that does not decode into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = self.endpoint(path)?;
        let response = self.send(HttpRequest::get(url.clone())).await?;
        decode(&response, &url)
    }

    /// Sends a PUT request with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on connection failure, non-2xx status,
    /// or a body that does not decode into `T`.
    pub async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<T, TransportError> {
        let url = self.endpoint(path)?;
        self.write(HttpRequest::put(url), Some(body)).await
    }

    /// Sends a POST request, with an optional JSON body, and decodes the response.
    ///
    /// # Errors
    ///
    /// Same as [`Self::put_json`].
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T, TransportError> {
        let url = self.endpoint(path)?;
        self.write(HttpRequest::post(url), body).await
    }

    /// Sends a DELETE request and decodes the response.
    ///
    /// # Errors
    ///
    /// Same as [`Self::put_json`].
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = self.endpoint(path)?;
        self.write(HttpRequest::delete(url), None).await
    }

    async fn write<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        body: Option<Vec<u8>>,
    ) -> Result<T, TransportError> {
        let url = request.url.clone();
        let request = match body {
            Some(body) => request
                .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .with_body(body),
            None => request,
        };
        let response = self.send(request).await?;
        decode(&response, &url)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request = self.authorize(request);
        let method = request.method.clone();
        let url = request.url.to_string();

        tracing::debug!("{method} {url}");

        let response = self
            .client
            .request(request)
            .await
            .map_err(|source| TransportError::Http {
                method: method.clone(),
                url: url.clone(),
                source,
            })?;

        if !response.is_success() {
            return Err(TransportError::Status {
                method,
                url,
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse, url: &Url) -> Result<T, TransportError> {
    serde_json::from_slice(&response.body).map_err(|source| TransportError::Decode {
        url: url.to_string(),
        source,
    })
}
