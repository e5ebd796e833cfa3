// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use portal_core::AccessRule;
use portal_directory::DirectoryClient;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::handlers;
use crate::middleware::{RequireAccessLayer, SessionLayer};
use crate::state::AppState;

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
///
/// This is the main entry point for creating and running the HTTP server.
pub struct ApiServer {
    state: AppState,
    config: Arc<ApiConfig>,
}

impl ApiServer {
    /// Creates a new API server with the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Creates the router with all routes, guards and middleware.
    pub fn router(&self) -> Router {
        let cors = create_cors_layer(&self.config);
        let session = SessionLayer::new(self.state.sessions.clone()).with_default_public_paths();

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(cors)
            .layer(session);

        let people = || RequireAccessLayer::new(AccessRule::people_management());
        let directors = || RequireAccessLayer::new(AccessRule::roles(["director"]));

        Router::new()
            // Health (public)
            .route("/health", get(handlers::health))
            // Auth
            .route("/api/v1/auth/login", post(handlers::login))
            .route("/api/v1/auth/logout", post(handlers::logout))
            .route("/api/v1/auth/me", get(handlers::current_member))
            // Profile
            .route("/api/v1/me/profile", patch(handlers::update_profile))
            // Roster
            .route("/api/v1/members", get(handlers::list_members))
            .route(
                "/api/v1/members",
                post(handlers::create_member).route_layer(people()),
            )
            .route(
                "/api/v1/members",
                patch(handlers::update_member).route_layer(people()),
            )
            // Attendance
            .route("/api/v1/attendance", get(handlers::list_attendance))
            .route(
                "/api/v1/attendance",
                post(handlers::create_attendance).route_layer(directors()),
            )
            .route(
                "/api/v1/attendance/record",
                post(handlers::record_attendance).route_layer(directors()),
            )
            // Vacations
            .route("/api/v1/vacations", get(handlers::list_vacations))
            .route("/api/v1/vacations", post(handlers::create_vacation))
            // Feedback
            .route(
                "/api/v1/feedback",
                get(handlers::list_feedback).route_layer(people()),
            )
            .route("/api/v1/feedback", post(handlers::create_feedback))
            // Forms
            .route("/api/v1/forms", get(handlers::list_forms))
            .route(
                "/api/v1/forms",
                post(handlers::create_form).route_layer(people()),
            )
            .route(
                "/api/v1/forms",
                patch(handlers::update_form).route_layer(people()),
            )
            // Apply middleware and state
            .layer(middleware_stack)
            .with_state(self.state.clone())
    }

    /// Runs the server.
    pub async fn run(self) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the server address.
    pub fn addr(&self) -> SocketAddr {
        self.config.socket_addr()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer from configuration.
fn create_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = &config.cors;

    let mut layer = CorsLayer::new().max_age(Duration::from_secs(cors.max_age));

    if cors.allowed_origins.contains(&"*".to_string()) {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    layer = layer.allow_methods(methods);

    layer.allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}

// =============================================================================
// Server Builder
// =============================================================================

/// Builder for creating the API server.
pub struct ApiServerBuilder {
    state_builder: crate::state::AppStateBuilder,
}

impl ApiServerBuilder {
    /// Creates a new server builder.
    pub fn new() -> Self {
        Self {
            state_builder: AppState::builder(),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.state_builder = self.state_builder.config(config);
        self
    }

    /// Sets the directory client.
    pub fn directory(mut self, directory: Arc<dyn DirectoryClient>) -> Self {
        self.state_builder = self.state_builder.directory(directory);
        self
    }

    /// Builds the server.
    pub fn build(self) -> ApiResult<ApiServer> {
        let state = self.state_builder.build()?;
        Ok(ApiServer::new(state))
    }
}

impl Default for ApiServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
