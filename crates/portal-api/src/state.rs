// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use portal_directory::{DirectoryClient, HttpDirectoryClient};

use crate::auth::{AssertionDecoder, IdentityVerifier, SessionStore};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// This is the central state container that is passed to all handlers via
/// Axum's state extraction mechanism.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Session store.
    pub sessions: Arc<SessionStore>,
    /// Assertion decoder.
    pub decoder: Arc<AssertionDecoder>,
    /// Identity verifier.
    pub verifier: Arc<IdentityVerifier>,
    /// Member directory client.
    pub directory: Arc<dyn DirectoryClient>,
}

impl AppState {
    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing AppState.
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<ApiConfig>,
    sessions: Option<Arc<SessionStore>>,
    directory: Option<Arc<dyn DirectoryClient>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the session store.
    pub fn sessions(mut self, sessions: Arc<SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Sets the directory client. When unset, an HTTP client is built from
    /// the configured endpoint.
    pub fn directory(mut self, directory: Arc<dyn DirectoryClient>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Builds the AppState.
    pub fn build(self) -> ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let directory: Arc<dyn DirectoryClient> = match self.directory {
            Some(directory) => directory,
            None => Arc::new(
                HttpDirectoryClient::with_timeout(
                    config.directory.endpoint.clone(),
                    config.directory.timeout,
                )
                .map_err(|e| ApiError::internal(format!("directory client: {}", e)))?,
            ),
        };

        let sessions = self
            .sessions
            .unwrap_or_else(|| Arc::new(SessionStore::new(config.auth.session_ttl)));

        let decoder = Arc::new(AssertionDecoder::new(
            config.auth.trusted_issuers.iter().cloned(),
        ));
        let verifier = Arc::new(IdentityVerifier::new(&config.auth, directory.clone()));

        Ok(AppState {
            config: Arc::new(config),
            sessions,
            decoder,
            verifier,
            directory,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
