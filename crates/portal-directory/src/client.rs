// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The directory client trait and the resource catalog.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use portal_core::error::{DirectoryError, DirectoryResult};

use crate::record::MemberRecord;

// =============================================================================
// Resource
// =============================================================================

/// The sheets the directory endpoint exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Member records.
    Members,
    /// Meeting attendance.
    Attendance,
    /// Vacation requests.
    Vacations,
    /// Feedback entries.
    Feedback,
    /// Internal forms.
    Forms,
}

impl Resource {
    /// All known resources.
    pub const ALL: [Resource; 5] = [
        Resource::Members,
        Resource::Attendance,
        Resource::Vacations,
        Resource::Feedback,
        Resource::Forms,
    ];

    /// The query-string name used for reads (`GET ?resource=<name>`).
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Members => "members",
            Resource::Attendance => "attendance",
            Resource::Vacations => "vacations",
            Resource::Feedback => "feedback",
            Resource::Forms => "forms",
        }
    }

    /// The action name used for create writes (`POST {resource: <action>}`).
    pub fn create_action(&self) -> &'static str {
        match self {
            Resource::Members => "createMember",
            Resource::Attendance => "createAttendance",
            Resource::Vacations => "createVacation",
            Resource::Feedback => "createFeedback",
            Resource::Forms => "createForm",
        }
    }

    /// The action name for update writes, for resources that support it.
    pub fn update_action(&self) -> Option<&'static str> {
        match self {
            Resource::Members => Some("updateMember"),
            Resource::Forms => Some("updateForm"),
            _ => None,
        }
    }

    /// Parses a resource from its query-string name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.name() == name)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// DirectoryClient
// =============================================================================

/// Async client for the member directory.
///
/// Implementations must surface transport and envelope failures as
/// [`DirectoryError`]s. Degrading a failure to an empty result is a caller
/// decision (see [`fetch_all_or_empty`](DirectoryClient::fetch_all_or_empty));
/// the identity verifier in particular must see the error, never an empty
/// list.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetches every row of `resource`.
    async fn fetch_all(&self, resource: Resource) -> DirectoryResult<Vec<Value>>;

    /// Creates a row in `resource`.
    async fn create(&self, resource: Resource, payload: Value) -> DirectoryResult<()>;

    /// Updates a row in `resource`, for resources that support updates.
    async fn update(&self, resource: Resource, payload: Value) -> DirectoryResult<()>;

    /// Fetches all member records, parsed.
    ///
    /// Rows that fail to parse are skipped with a warning rather than
    /// failing the whole fetch; one malformed row must not lock everyone
    /// out.
    async fn fetch_members(&self) -> DirectoryResult<Vec<MemberRecord>> {
        let rows = self.fetch_all(Resource::Members).await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<MemberRecord>(row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed member row");
                }
            }
        }
        Ok(records)
    }

    /// Fetches every row of `resource`, degrading failure to an empty list.
    ///
    /// This is the page-level convenience: a dashboard panel that cannot
    /// load simply renders empty. Access decisions must use
    /// [`fetch_all`](DirectoryClient::fetch_all) instead.
    async fn fetch_all_or_empty(&self, resource: Resource) -> Vec<Value> {
        match self.fetch_all(resource).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(resource = %resource, error = %e, "directory fetch failed, returning empty");
                Vec::new()
            }
        }
    }
}

/// Resolves the update action for a resource, erroring for resources that
/// do not support updates.
pub(crate) fn update_action(resource: Resource) -> DirectoryResult<&'static str> {
    resource
        .update_action()
        .ok_or_else(|| DirectoryError::unknown_resource(format!("update on {}", resource)))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_names() {
        assert_eq!(Resource::Members.name(), "members");
        assert_eq!(Resource::parse("vacations"), Some(Resource::Vacations));
        assert_eq!(Resource::parse("meetings"), None);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Resource::Attendance.create_action(), "createAttendance");
        assert_eq!(Resource::Members.update_action(), Some("updateMember"));
        assert_eq!(Resource::Forms.update_action(), Some("updateForm"));
        assert_eq!(Resource::Feedback.update_action(), None);
    }
}
