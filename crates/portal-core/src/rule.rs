// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Declarative access rules and the RBAC evaluator.
//!
//! Every visibility or access decision in the portal goes through
//! [`AccessRule::evaluate`]. Pages and route guards declare a rule; nothing
//! re-implements the hierarchy comparison locally.

use serde::{Deserialize, Serialize};

use crate::principal::{Principal, Role};

/// Sentinel role name that grants access to every authenticated member.
pub const ALL_ROLES: &str = "all";

// =============================================================================
// AccessRule
// =============================================================================

/// A declarative access requirement attached to a route or UI element.
///
/// Role names are kept as strings, matching how rules arrive from
/// configuration and markup. Entries that fail to parse as a role simply
/// never grant: a malformed rule denies, it does not fail. The same holds
/// for a missing or misspelled `required_roles` key, which deserializes to
/// the empty (deny-all) list; granting everyone takes the explicit
/// [`AccessRule::any_member`] rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessRule {
    /// Required roles, satisfied by ANY entry (privilege `>=` per entry).
    /// The sentinel `"all"` grants regardless of role. Empty denies.
    #[serde(default)]
    pub required_roles: Vec<String>,
    /// Required department, if any. `vp` and `president` bypass it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_department: Option<String>,
}

impl AccessRule {
    /// Creates a rule satisfied by any authenticated member.
    pub fn any_member() -> Self {
        Self {
            required_roles: vec![ALL_ROLES.to_string()],
            required_department: None,
        }
    }

    /// Creates a rule from the given required roles.
    pub fn roles(roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            required_roles: roles.into_iter().map(Into::into).collect(),
            required_department: None,
        }
    }

    /// Restricts the rule to a department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.required_department = Some(department.into());
        self
    }

    /// The people-management rule: director of "Gente & Gestão", or any
    /// vp/president (who bypass the department restriction).
    ///
    /// Guards the feedback panel, forms administration and member records.
    pub fn people_management() -> Self {
        Self::roles(["director"]).with_department("Gente & Gestão")
    }

    /// The leadership rule: vp or president only.
    pub fn leadership() -> Self {
        Self::roles(["vp"])
    }

    /// Decides whether `principal` satisfies this rule.
    ///
    /// Pure and total: no side effects, no panics, any input yields a
    /// boolean. An empty `required_roles` list denies (fail closed).
    pub fn evaluate(&self, principal: &Principal) -> bool {
        self.role_check(principal.role) && self.department_check(principal)
    }

    fn role_check(&self, role: Role) -> bool {
        self.required_roles.iter().any(|required| {
            if required.eq_ignore_ascii_case(ALL_ROLES) {
                return true;
            }
            // Unparseable entries never grant.
            match Role::parse(required) {
                Some(required) => role.level() >= required.level(),
                None => false,
            }
        })
    }

    fn department_check(&self, principal: &Principal) -> bool {
        match &self.required_department {
            None => true,
            Some(_) if principal.role.bypasses_department() => true,
            Some(department) => principal.department == *department,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
