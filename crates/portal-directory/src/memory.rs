// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory directory for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use portal_core::error::{DirectoryError, DirectoryResult};

use crate::client::{update_action, DirectoryClient, Resource};
use crate::record::MemberRecord;

// =============================================================================
// InMemoryDirectory
// =============================================================================

/// An in-memory [`DirectoryClient`] with failure injection.
///
/// Rows are stored as raw JSON values, exactly as the HTTP client would
/// deliver them, so tests exercise the same parsing paths.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    sheets: RwLock<HashMap<Resource, Vec<Value>>>,
    unavailable: RwLock<bool>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with member records.
    pub fn with_members(members: impl IntoIterator<Item = MemberRecord>) -> Self {
        let dir = Self::new();
        let rows = members
            .into_iter()
            .filter_map(|m| serde_json::to_value(m).ok())
            .collect();
        dir.sheets.write().insert(Resource::Members, rows);
        dir
    }

    /// Inserts a raw row into a sheet.
    pub fn insert_raw(&self, resource: Resource, row: Value) {
        self.sheets.write().entry(resource).or_default().push(row);
    }

    /// Makes every call fail with [`DirectoryError::Http`] until cleared.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write() = unavailable;
    }

    /// Returns the current rows of a sheet.
    pub fn rows(&self, resource: Resource) -> Vec<Value> {
        self.sheets
            .read()
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    fn check_available(&self) -> DirectoryResult<()> {
        if *self.unavailable.read() {
            Err(DirectoryError::http("directory unavailable (injected)"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn fetch_all(&self, resource: Resource) -> DirectoryResult<Vec<Value>> {
        self.check_available()?;
        Ok(self.rows(resource))
    }

    async fn create(&self, resource: Resource, payload: Value) -> DirectoryResult<()> {
        self.check_available()?;
        self.insert_raw(resource, payload);
        Ok(())
    }

    async fn update(&self, resource: Resource, payload: Value) -> DirectoryResult<()> {
        self.check_available()?;
        update_action(resource)?;

        let key = payload
            .get("id")
            .and_then(Value::as_str)
            .map(|id| ("id", id.to_string()))
            .or_else(|| {
                payload
                    .get("email")
                    .and_then(Value::as_str)
                    .map(|email| ("email", email.to_string()))
            })
            .ok_or_else(|| {
                DirectoryError::invalid_response("update payload needs an id or email")
            })?;

        let mut sheets = self.sheets.write();
        let rows = sheets.entry(resource).or_default();
        let Some(row) = rows.iter_mut().find(|row| {
            row.get(key.0)
                .and_then(Value::as_str)
                .is_some_and(|v| v.eq_ignore_ascii_case(&key.1))
        }) else {
            return Err(DirectoryError::rejected(format!(
                "no row with {} = {}",
                key.0, key.1
            )));
        };

        if let (Value::Object(target), Value::Object(fields)) = (row, &payload) {
            for (k, v) in fields {
                target.insert(k.clone(), v.clone());
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
