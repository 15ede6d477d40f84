//! Shared test fixtures for code that talks to the cluster.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::config::{ConnectionTarget, Credentials};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Spy HTTP client that records every request and replays scripted responses.
///
/// When the script runs out, further requests get a connection error.
#[derive(Debug, Default)]
pub struct SpyClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl SpyClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Responds 200 with each JSON body in turn.
    pub fn with_json(bodies: &[&str]) -> Self {
        Self::new(
            bodies
                .iter()
                .map(|body| Ok(HttpResponse::ok(body.as_bytes())))
                .collect(),
        )
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &http::Method) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == *method)
            .count()
    }

    pub fn reads(&self) -> usize {
        self.count(&http::Method::GET)
    }

    /// Every request that is not a GET.
    pub fn writes(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method != http::Method::GET)
            .count()
    }
}

impl HttpClient for SpyClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Connection("no scripted response".into())))
    }
}

pub fn local_target() -> ConnectionTarget {
    ConnectionTarget::new(url::Url::parse("http://127.0.0.1:9200").unwrap(), None)
}

pub fn authenticated_target() -> ConnectionTarget {
    ConnectionTarget::new(
        url::Url::parse("http://127.0.0.1:9200").unwrap(),
        Some(Credentials {
            user: "elastic".to_string(),
            password: "changeme".to_string(),
        }),
    )
}

pub fn settings_response(exclude: Option<&str>) -> String {
    exclude.map_or_else(
        || r#"{"persistent":{},"transient":{}}"#.to_string(),
        |ips| {
            format!(
                r#"{{"persistent":{{"cluster.routing.allocation.exclude._ip":"{ips}"}},"transient":{{}}}}"#
            )
        },
    )
}
