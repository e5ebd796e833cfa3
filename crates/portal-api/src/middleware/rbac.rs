// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! RBAC route guard middleware.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use portal_core::AccessRule;

use crate::error::ApiError;
use crate::middleware::SessionContext;

// =============================================================================
// RequireAccessLayer
// =============================================================================

/// Layer that gates a route behind an [`AccessRule`].
///
/// Applied per-route with `route_layer`, after the session middleware has
/// resolved the principal. No principal means 401; a principal the rule
/// rejects means 403.
#[derive(Clone)]
pub struct RequireAccessLayer {
    rule: Arc<AccessRule>,
}

impl RequireAccessLayer {
    /// Creates a guard for the given rule.
    pub fn new(rule: AccessRule) -> Self {
        Self { rule: Arc::new(rule) }
    }
}

impl<S> Layer<S> for RequireAccessLayer {
    type Service = RequireAccessMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequireAccessMiddleware {
            inner,
            rule: self.rule.clone(),
        }
    }
}

// =============================================================================
// RequireAccessMiddleware
// =============================================================================

/// Middleware evaluating the access rule for each request.
#[derive(Clone)]
pub struct RequireAccessMiddleware<S> {
    inner: S,
    rule: Arc<AccessRule>,
}

impl<S> Service<Request<Body>> for RequireAccessMiddleware<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let rule = self.rule.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let principal = req
                .extensions()
                .get::<SessionContext>()
                .and_then(|ctx| ctx.principal.clone());

            let Some(principal) = principal else {
                return Ok(ApiError::no_session().into_response());
            };

            if !rule.evaluate(&principal) {
                tracing::debug!(
                    email = %principal.email,
                    role = %principal.role,
                    department = %principal.department,
                    "access rule denied request"
                );
                return Ok(ApiError::access_denied().into_response());
            }

            inner.call(req).await
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
