// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Harness
//!
//! An in-process harness that drives the portal router end to end with
//! `tower::ServiceExt::oneshot`, without binding a socket.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use portal_api::auth::SessionStore;
use portal_api::{ApiConfig, ApiServer, AppState};
use portal_directory::InMemoryDirectory;

use super::fixtures::{identity_token, seeded_directory};

// =============================================================================
// TestApp
// =============================================================================

/// A portal backend wired to an in-memory directory.
pub struct TestApp {
    router: Router,
    /// The session store behind the router, for direct inspection.
    pub sessions: Arc<SessionStore>,
    /// The directory behind the router, for seeding and failure injection.
    pub directory: Arc<InMemoryDirectory>,
}

impl TestApp {
    /// Creates a harness around the fixture roster.
    pub fn new() -> Self {
        Self::with_directory(seeded_directory())
    }

    /// Creates a harness around a specific directory.
    pub fn with_directory(directory: InMemoryDirectory) -> Self {
        let config = ApiConfig::default();
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(3600)));
        let directory = Arc::new(directory);

        let state = AppState::builder()
            .config(config)
            .sessions(sessions.clone())
            .directory(directory.clone())
            .build()
            .expect("Failed to build app state");

        let router = ApiServer::new(state).router();
        Self {
            router,
            sessions,
            directory,
        }
    }

    /// Signs in as `email` and returns the session id.
    ///
    /// Panics if the sign-in is denied; tests exercising denials should
    /// call [`TestApp::post`] on the login route directly.
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .post(
                "/api/v1/auth/login",
                None,
                serde_json::json!({ "credential": identity_token(email) }),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "sign-in denied: {}",
            response.body
        );
        response.body["data"]["session_id"]
            .as_str()
            .expect("login response carries a session id")
            .to_string()
    }

    /// Performs a GET request.
    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, path, token, None).await
    }

    /// Performs a POST request with a JSON body.
    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> TestResponse {
        self.request(Method::POST, path, token, Some(body)).await
    }

    /// Performs a PATCH request with a JSON body.
    pub async fn patch(
        &self,
        path: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> TestResponse {
        self.request(Method::PATCH, path, token, Some(body)).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router call failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        TestResponse { status, body }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TestResponse
// =============================================================================

/// A collected response: status plus parsed JSON body.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body; `Null` when empty or not JSON.
    pub body: serde_json::Value,
}

impl TestResponse {
    /// The `error.code` field of a failure envelope, if present.
    pub fn error_code(&self) -> Option<&str> {
        self.body["error"]["code"].as_str()
    }

    /// The `data` field of a success envelope.
    pub fn data(&self) -> &serde_json::Value {
        &self.body["data"]
    }
}
