//! Tests for `ReqwestClient`.
//!
//! Nothing here needs a running cluster.

use super::client::USER_AGENT;
use super::*;

#[test]
fn user_agent_names_crate_and_version() {
    assert_eq!(
        USER_AGENT,
        format!("elastic-trib/{}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn client_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestClient>();
}

#[test]
fn default_matches_new() {
    let client = ReqwestClient::default();

    assert!(format!("{client:?}").contains("ReqwestClient"));
}

#[tokio::test]
async fn unresolvable_host_is_connection_error() {
    let client = ReqwestClient::new();
    let url = url::Url::parse("http://es-node.invalid:9200/_cluster/health").unwrap();

    let result = client.request(HttpRequest::get(url)).await;

    // A proxy in the environment may answer with an error status instead.
    match result {
        Err(HttpError::Connection(_)) => {}
        Ok(resp) if !resp.is_success() => {}
        other => panic!("expected connection error, got {other:?}"),
    }
}
