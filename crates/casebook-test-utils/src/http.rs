//! Mock case API server built on wiremock.

use serde::Serialize;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of a case's status history.
pub fn status_history_path(case_id: &str) -> String {
    format!("/api/criminals/{case_id}/status-history")
}

/// Path of a case's audit log.
pub fn audit_log_path(case_id: &str) -> String {
    format!("/api/criminals/{case_id}/audit-logs")
}

/// Mock server wrapper with case API shortcuts.
pub struct TestHttpServer {
    server: MockServer,
}

impl TestHttpServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the server.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// URL for a specific path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Access the underlying MockServer.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Serve JSON on a GET endpoint.
    pub async fn get_json<T: Serialize>(&self, endpoint: &str, body: &T) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serve JSON on a GET endpoint only when the bearer token matches.
    /// Exactly one such request is expected.
    pub async fn get_json_authorized<T: Serialize>(&self, endpoint: &str, token: &str, body: &T) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Serve a raw body on a GET endpoint.
    pub async fn get_raw(&self, endpoint: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Answer an endpoint with an error status.
    pub async fn error(&self, endpoint: &str, status: u16, message: &str) {
        Mock::given(path(endpoint))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(serde_json::json!({ "message": message })),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve JSON after a delay.
    pub async fn with_latency<T: Serialize>(&self, endpoint: &str, body: &T, latency: Duration) {
        Mock::given(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(latency))
            .mount(&self.server)
            .await;
    }

    /// Serve both history feeds of a case.
    pub async fn case_history<S: Serialize, A: Serialize>(&self, case_id: &str, status: &S, audit: &A) {
        self.get_json(&status_history_path(case_id), status).await;
        self.get_json(&audit_log_path(case_id), audit).await;
    }
}
