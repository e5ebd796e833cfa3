// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session gate middleware.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use portal_core::Principal;

use crate::auth::SessionStore;
use crate::error::ApiError;

// =============================================================================
// SessionContext
// =============================================================================

/// Per-request session information, stored in the request extensions.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// The raw session id, when the request carried one that resolved.
    pub session_id: Option<String>,
    /// The signed-in member, when the session resolved.
    pub principal: Option<Principal>,
}

impl SessionContext {
    fn anonymous() -> Self {
        Self::default()
    }

    fn signed_in(session_id: String, principal: Principal) -> Self {
        Self {
            session_id: Some(session_id),
            principal: Some(principal),
        }
    }
}

// =============================================================================
// SessionLayer
// =============================================================================

/// Layer that resolves the bearer session id into a [`Principal`].
///
/// Requests to public paths pass through with an anonymous context. For
/// every other path, a missing session and a session that fails to resolve
/// are treated identically: 401, with nothing to distinguish "never signed
/// in" from "session went bad".
#[derive(Clone)]
pub struct SessionLayer {
    sessions: Arc<SessionStore>,
    public_paths: Arc<HashSet<String>>,
}

impl SessionLayer {
    /// Creates a new session layer.
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self {
            sessions,
            public_paths: Arc::new(HashSet::new()),
        }
    }

    /// Adds public paths that don't require a session.
    pub fn with_public_paths(mut self, paths: Vec<String>) -> Self {
        self.public_paths = Arc::new(paths.into_iter().collect());
        self
    }

    /// Creates with default public paths.
    pub fn with_default_public_paths(self) -> Self {
        self.with_public_paths(vec![
            "/health".to_string(),
            "/api/v1/auth/login".to_string(),
            "/api/v1/auth/logout".to_string(),
        ])
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionMiddleware {
            inner,
            sessions: self.sessions.clone(),
            public_paths: self.public_paths.clone(),
        }
    }
}

// =============================================================================
// SessionMiddleware
// =============================================================================

/// Middleware resolving the session for each request.
#[derive(Clone)]
pub struct SessionMiddleware<S> {
    inner: S,
    sessions: Arc<SessionStore>,
    public_paths: Arc<HashSet<String>>,
}

impl<S> SessionMiddleware<S> {
    fn is_public_path(&self, path: &str) -> bool {
        self.public_paths.contains(path)
    }
}

impl<S> Service<Request<Body>> for SessionMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let sessions = self.sessions.clone();
        let is_public = self.is_public_path(req.uri().path());
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let token = extract_bearer_token(&req);

            // Logout and login must see the session id when there is one,
            // but never require it.
            if is_public {
                let ctx = match &token {
                    Some(id) => match sessions.resolve(id) {
                        Some(principal) => SessionContext::signed_in(id.clone(), principal),
                        None => SessionContext {
                            session_id: Some(id.clone()),
                            principal: None,
                        },
                    },
                    None => SessionContext::anonymous(),
                };
                req.extensions_mut().insert(ctx);
                return inner.call(req).await;
            }

            let Some(token) = token else {
                tracing::debug!("no session token provided");
                return Ok(ApiError::no_session().into_response());
            };

            let Some(principal) = sessions.resolve(&token) else {
                tracing::debug!("session did not resolve");
                return Ok(ApiError::no_session().into_response());
            };

            req.extensions_mut()
                .insert(SessionContext::signed_in(token, principal));

            inner.call(req).await
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer ").map(|s| s.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
