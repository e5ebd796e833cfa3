// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The directory response envelope.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use portal_core::error::{DirectoryError, DirectoryResult};

// =============================================================================
// ApiEnvelope
// =============================================================================

/// The envelope every directory response is wrapped in.
///
/// The endpoint has emitted both `ok` and `success` for the flag, and the
/// flag itself has appeared as a boolean, a number and a string. Anything
/// that is not recognizably truthy means failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T = Value> {
    /// Success flag. Non-truthy means the request failed.
    #[serde(alias = "success", deserialize_with = "deserialize_truthy", default)]
    pub ok: bool,
    /// The payload, present on success.
    #[serde(default = "none_of")]
    pub data: Option<T>,
    /// The error message, present on failure.
    #[serde(default)]
    pub error: Option<String>,
}

fn none_of<T>() -> Option<T> {
    None
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    /// Unwraps the envelope into the payload.
    ///
    /// A non-truthy `ok` becomes [`DirectoryError::Rejected`]; a truthy `ok`
    /// with no payload becomes [`DirectoryError::InvalidResponse`].
    pub fn into_result(self) -> DirectoryResult<T> {
        if !self.ok {
            return Err(DirectoryError::rejected(
                self.error.unwrap_or_else(|| "no error message".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| DirectoryError::invalid_response("envelope has ok=true but no data"))
    }

    /// Unwraps the envelope, ignoring the payload.
    ///
    /// Write actions acknowledge with `ok` alone; `data` is optional.
    pub fn into_ack(self) -> DirectoryResult<()> {
        if !self.ok {
            return Err(DirectoryError::rejected(
                self.error.unwrap_or_else(|| "no error message".to_string()),
            ));
        }
        Ok(())
    }
}

/// Accepts `true`, `"true"`, `"ok"`, `1`, `"1"` as truthy. Everything else,
/// including absence and `null`, is falsy.
fn deserialize_truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("ok") || s == "1"
        }
        _ => false,
    }
}

// =============================================================================
// Tests
// =============================================================================
