// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builder patterns for constructing test objects with sensible defaults.

use portal_core::{Principal, Role};
use portal_directory::MemberRecord;

// =============================================================================
// Principal Builder
// =============================================================================

/// Builder for constructing [`Principal`] instances with sensible defaults.
#[derive(Debug, Clone)]
pub struct PrincipalBuilder {
    id: String,
    name: String,
    email: String,
    department: String,
    role: Role,
    status: String,
    photo_url: Option<String>,
    dob: Option<String>,
}

impl Default for PrincipalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PrincipalBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            id: "m-100".to_string(),
            name: "Test Member".to_string(),
            email: "test@infobiojr.com.br".to_string(),
            department: "Projetos".to_string(),
            role: Role::Member,
            status: "Ativo".to_string(),
            photo_url: None,
            dob: None,
        }
    }

    /// Set the e-mail.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the department.
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Set the role.
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the status.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Build the principal.
    pub fn build(self) -> Principal {
        Principal {
            id: self.id,
            name: self.name,
            email: self.email,
            department: self.department,
            role: self.role,
            status: self.status,
            photo_url: self.photo_url,
            dob: self.dob,
        }
    }
}

// =============================================================================
// MemberRecord Builder
// =============================================================================

/// Builder for constructing [`MemberRecord`] instances with sensible defaults.
#[derive(Debug, Clone)]
pub struct MemberRecordBuilder {
    record: MemberRecord,
}

impl Default for MemberRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberRecordBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            record: MemberRecord {
                id: "m-100".to_string(),
                name: "Test Member".to_string(),
                email: "test@infobiojr.com.br".to_string(),
                department: "Projetos".to_string(),
                role: "Membro".to_string(),
                status: "Ativo".to_string(),
                ..Default::default()
            },
        }
    }

    /// Set the e-mail.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.record.email = email.into();
        self
    }

    /// Set the role as it would appear on the sheet.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.record.role = role.into();
        self
    }

    /// Set the department.
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.record.department = department.into();
        self
    }

    /// Set the status.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.record.status = status.into();
        self
    }

    /// Set the sheet photo URL.
    pub fn photo_url(mut self, url: impl Into<String>) -> Self {
        self.record.photo_url = Some(url.into());
        self
    }

    /// Build the record.
    pub fn build(self) -> MemberRecord {
        self.record
    }
}
