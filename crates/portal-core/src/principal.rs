// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Principal, role hierarchy and the active-status predicate.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Role
// =============================================================================

/// Member roles, ordered by privilege.
///
/// The declaration order is the privilege order: `Member < Director < Vp <
/// President`. Comparisons between roles use this ordering directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// Regular member.
    Member,
    /// Department director.
    Director,
    /// Vice-president. Bypasses department restrictions.
    Vp,
    /// President. Bypasses department restrictions.
    President,
}

impl Role {
    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Director => "director",
            Role::Vp => "vp",
            Role::President => "president",
        }
    }

    /// Parses a role from a string.
    ///
    /// Accepts the canonical names plus the spellings found in the member
    /// sheet ("Diretor(a)", "Presidente", ...). Returns `None` for anything
    /// else.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "member" | "membro" => Some(Role::Member),
            "director" | "diretor" | "diretora" => Some(Role::Director),
            "vp" | "vicepresident" | "vicepresidente" => Some(Role::Vp),
            "president" | "presidente" => Some(Role::President),
            _ => {
                // "Diretor(a)" collapses to "diretora" above; anything with a
                // leading "diretor" is still a director.
                if normalized.starts_with("diretor") || normalized.starts_with("director") {
                    Some(Role::Director)
                } else {
                    None
                }
            }
        }
    }

    /// Parses a role, degrading unknown values to [`Role::Member`].
    ///
    /// An unrecognized role string is never an error that blocks a response;
    /// it simply carries the least privilege.
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or(Role::Member)
    }

    /// Returns the privilege level of this role (0 = least privileged).
    pub fn level(&self) -> u8 {
        *self as u8
    }

    /// Returns `true` if this role bypasses department restrictions.
    pub fn bypasses_department(&self) -> bool {
        matches!(self, Role::Vp | Role::President)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Role::parse_lossy(&s))
    }
}

// =============================================================================
// Active Status
// =============================================================================

/// The set of status spellings accepted as "active".
///
/// The member sheet has seen several spellings over time ("Ativo",
/// "Active", "OK"); only members whose status matches one of these,
/// case-insensitively, may authenticate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveStatusSet(Vec<String>);

impl ActiveStatusSet {
    /// Creates a status set from the given spellings.
    pub fn new(statuses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(statuses.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if `status` matches one of the accepted spellings.
    pub fn matches(&self, status: &str) -> bool {
        let status = status.trim();
        self.0.iter().any(|s| s.eq_ignore_ascii_case(status))
    }

    /// Returns the accepted spellings.
    pub fn spellings(&self) -> &[String] {
        &self.0
    }
}

impl Default for ActiveStatusSet {
    fn default() -> Self {
        Self::new(["Ativo", "Active", "OK"])
    }
}

// =============================================================================
// Principal
// =============================================================================

/// The authenticated member: identity plus authorization attributes.
///
/// A `Principal` is constructed by the identity verifier from a directory
/// record and is immutable for the lifetime of a session, except through
/// the explicit profile-update path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login e-mail. Compared case-insensitively.
    pub email: String,
    /// Department (open set, e.g. "Projects", "Gente & Gestão").
    pub department: String,
    /// Role in the hierarchy. Unknown sheet values degrade to `member`.
    pub role: Role,
    /// Membership status as recorded in the directory.
    pub status: String,
    /// Avatar URL, if the directory record carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Date of birth, editable through the profile page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
}

impl Principal {
    /// Returns the e-mail lower-cased for comparison.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Returns the initials used for the generated avatar placeholder.
    ///
    /// First letter of the first and last name parts, upper-cased; falls
    /// back to the e-mail when the name is empty.
    pub fn initials(&self) -> String {
        let source = if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        };
        let parts: Vec<&str> = source.split_whitespace().collect();
        let mut initials = String::new();
        if let Some(first) = parts.first().and_then(|p| p.chars().next()) {
            initials.extend(first.to_uppercase());
        }
        if parts.len() > 1 {
            if let Some(last) = parts.last().and_then(|p| p.chars().next()) {
                initials.extend(last.to_uppercase());
            }
        }
        initials
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Member < Role::Director);
        assert!(Role::Director < Role::Vp);
        assert!(Role::Vp < Role::President);
        assert_eq!(Role::Member.level(), 0);
        assert_eq!(Role::President.level(), 3);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("member"), Some(Role::Member));
        assert_eq!(Role::parse("Membro"), Some(Role::Member));
        assert_eq!(Role::parse("Diretor(a)"), Some(Role::Director));
        assert_eq!(Role::parse("Diretora"), Some(Role::Director));
        assert_eq!(Role::parse("VP"), Some(Role::Vp));
        assert_eq!(Role::parse("Presidente"), Some(Role::President));
        assert_eq!(Role::parse("stagiaire"), None);
    }

    #[test]
    fn test_role_parse_lossy_degrades_to_member() {
        assert_eq!(Role::parse_lossy("intern"), Role::Member);
        assert_eq!(Role::parse_lossy(""), Role::Member);
        assert_eq!(Role::parse_lossy("president"), Role::President);
    }

    #[test]
    fn test_role_deserialize_unknown() {
        let role: Role = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(role, Role::Member);
    }

    #[test]
    fn test_bypasses_department() {
        assert!(Role::Vp.bypasses_department());
        assert!(Role::President.bypasses_department());
        assert!(!Role::Director.bypasses_department());
        assert!(!Role::Member.bypasses_department());
    }

    #[test]
    fn test_active_status_set() {
        let statuses = ActiveStatusSet::default();
        assert!(statuses.matches("Ativo"));
        assert!(statuses.matches("ativo"));
        assert!(statuses.matches(" ACTIVE "));
        assert!(statuses.matches("ok"));
        assert!(!statuses.matches("Licença"));
        assert!(!statuses.matches("Inativo"));
    }

    #[test]
    fn test_initials() {
        let mut p = principal();
        assert_eq!(p.initials(), "HS");

        p.name = "Ana".to_string();
        assert_eq!(p.initials(), "A");

        p.name = String::new();
        assert_eq!(p.initials(), "H");
    }

    fn principal() -> Principal {
        Principal {
            id: "m-001".to_string(),
            name: "Heloisa Ferian Soares".to_string(),
            email: "helo@infobiojr.com.br".to_string(),
            department: "Gente & Gestão".to_string(),
            role: Role::Director,
            status: "Ativo".to_string(),
            photo_url: None,
            dob: None,
        }
    }
}
