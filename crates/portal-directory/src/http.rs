// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The reqwest-backed directory client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use portal_core::error::{DirectoryError, DirectoryResult};

use crate::client::{update_action, DirectoryClient, Resource};
use crate::envelope::ApiEnvelope;

/// Default request timeout for directory calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

// =============================================================================
// HttpDirectoryClient
// =============================================================================

/// HTTP client for the spreadsheet-backed directory endpoint.
///
/// Reads go to `GET <endpoint>?resource=<name>`; writes are a JSON `POST`
/// to the endpoint itself, with the action name in the `resource` field and
/// the payload fields merged alongside it.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpDirectoryClient {
    /// Creates a client for `endpoint` with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> DirectoryResult<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Creates a client for `endpoint` with a custom timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> DirectoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::http_with("failed to build HTTP client", e))?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get(&self, resource: Resource) -> DirectoryResult<ApiEnvelope<Vec<Value>>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("resource", resource.name())])
            .send()
            .await
            .map_err(|e| DirectoryError::http_with(format!("GET {} failed", resource), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::http(format!(
                "GET {} returned {}",
                resource, status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| DirectoryError::http_with(format!("GET {} body unreadable", resource), e))
            .and_then(|v: Value| {
                serde_json::from_value(v)
                    .map_err(|e| DirectoryError::invalid_response(e.to_string()))
            })
    }

    async fn post(&self, action: &str, payload: Value) -> DirectoryResult<()> {
        let body = merge_action(action, payload)?;
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| DirectoryError::http_with(format!("POST {} failed", action), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::http(format!(
                "POST {} returned {}",
                action, status
            )));
        }

        let envelope: ApiEnvelope<Value> = response
            .json()
            .await
            .map_err(|e| DirectoryError::http_with(format!("POST {} body unreadable", action), e))?;
        envelope.into_ack()
    }
}

/// Builds the POST body: `{"resource": <action>, ...payload}`.
fn merge_action(action: &str, payload: Value) -> DirectoryResult<Value> {
    let mut body = match payload {
        Value::Object(map) => map,
        Value::Null => Default::default(),
        other => {
            return Err(DirectoryError::invalid_response(format!(
                "write payload must be an object, got {}",
                value_kind(&other)
            )))
        }
    };
    body.insert("resource".to_string(), json!(action));
    Ok(Value::Object(body))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn fetch_all(&self, resource: Resource) -> DirectoryResult<Vec<Value>> {
        self.get(resource).await?.into_result()
    }

    async fn create(&self, resource: Resource, payload: Value) -> DirectoryResult<()> {
        self.post(resource.create_action(), payload).await
    }

    async fn update(&self, resource: Resource, payload: Value) -> DirectoryResult<()> {
        self.post(update_action(resource)?, payload).await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_action() {
        let body = merge_action("createFeedback", json!({"email": "a@b", "type": "elogio"}))
            .unwrap();
        assert_eq!(body["resource"], "createFeedback");
        assert_eq!(body["email"], "a@b");
    }

    #[test]
    fn test_merge_action_rejects_non_object() {
        assert!(merge_action("createFeedback", json!([1, 2])).is_err());
        assert!(merge_action("createFeedback", Value::Null).is_ok());
    }

    #[test]
    fn test_update_on_unsupported_resource() {
        assert!(update_action(Resource::Feedback).is_err());
        assert_eq!(update_action(Resource::Members).unwrap(), "updateMember");
    }
}
