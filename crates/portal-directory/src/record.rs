// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Directory member rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use portal_core::{ActiveStatusSet, Principal, Role};

// =============================================================================
// MemberRecord
// =============================================================================

/// A row from the directory's `members` sheet.
///
/// The sheet's columns have been renamed over time, so most fields carry
/// aliases, and unknown columns are preserved in `extra` so that an
/// `updateMember` round-trip does not drop them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Stable row identifier.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default, alias = "nome")]
    pub name: String,
    /// Organization e-mail.
    #[serde(default)]
    pub email: String,
    /// Department name.
    #[serde(default, alias = "departamento", alias = "area")]
    pub department: String,
    /// Role as spelled in the sheet ("Diretor(a)", "Presidente", ...).
    #[serde(default, alias = "cargo")]
    pub role: String,
    /// Membership status ("Ativo", "Active", "OK", ...).
    #[serde(default)]
    pub status: String,
    /// Photo URL column, if filled in.
    #[serde(
        default,
        alias = "photoUrl",
        alias = "photo",
        alias = "foto",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<String>,
    /// Date of birth, editable from the profile page.
    #[serde(
        default,
        alias = "nascimento",
        alias = "birthday",
        skip_serializing_if = "Option::is_none"
    )]
    pub dob: Option<String>,
    /// Attendance map keyed by meeting type. The sheet stores this either
    /// as an embedded object or as a stringified JSON blob.
    #[serde(
        default,
        deserialize_with = "deserialize_maybe_stringified",
        skip_serializing_if = "Value::is_null"
    )]
    pub attendance: Value,
    /// The member's task list, stringified by the sheet the same way
    /// attendance is.
    #[serde(
        default,
        deserialize_with = "deserialize_maybe_stringified",
        skip_serializing_if = "Value::is_null"
    )]
    pub tasks: Value,
    /// Columns this version of the portal does not know about.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MemberRecord {
    /// Returns `true` if this record's e-mail matches `email`,
    /// case-insensitively and ignoring surrounding whitespace.
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    /// Returns `true` if this record's status counts as active.
    pub fn is_active(&self, statuses: &ActiveStatusSet) -> bool {
        statuses.matches(&self.status)
    }

    /// Converts this record into a [`Principal`].
    ///
    /// Directory fields are authoritative; `fallback_photo` (typically the
    /// identity provider's picture) is used only when the sheet's photo
    /// column is empty.
    pub fn into_principal(self, fallback_photo: Option<String>) -> Principal {
        let photo_url = self
            .photo_url
            .filter(|url| !url.trim().is_empty())
            .or(fallback_photo);
        Principal {
            id: self.id,
            name: self.name,
            email: self.email.trim().to_lowercase(),
            department: self.department,
            role: Role::parse_lossy(&self.role),
            status: self.status,
            photo_url,
            dob: self.dob.filter(|d| !d.trim().is_empty()),
        }
    }
}

/// Accepts either a JSON value or a string containing JSON.
///
/// The sheet sometimes stringifies nested structures; `"{}"` and `""` both
/// normalize to an empty object.
fn deserialize_maybe_stringified<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Value, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Value::Object(Default::default())
            } else {
                serde_json::from_str(s).unwrap_or(Value::Object(Default::default()))
            }
        }
        Value::Null => Value::Object(Default::default()),
        other => other,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliased_columns() {
        let record: MemberRecord = serde_json::from_str(
            r#"{"id": "m-01", "nome": "Ana Silva", "email": "ana@infobiojr.com.br",
                "departamento": "Projects", "cargo": "Diretor(a)", "status": "Ativo"}"#,
        )
        .unwrap();
        assert_eq!(record.name, "Ana Silva");
        assert_eq!(record.department, "Projects");
        assert_eq!(record.role, "Diretor(a)");
    }

    #[test]
    fn test_matches_email_is_case_insensitive() {
        let record = MemberRecord {
            email: " Ana@InfoBioJr.com.br ".to_string(),
            ..Default::default()
        };
        assert!(record.matches_email("ana@infobiojr.com.br"));
        assert!(!record.matches_email("outra@infobiojr.com.br"));
    }

    #[test]
    fn test_stringified_attendance() {
        let record: MemberRecord = serde_json::from_str(
            r#"{"email": "a@b", "attendance": "{\"geral\": [true, false]}"}"#,
        )
        .unwrap();
        assert_eq!(record.attendance["geral"][0], Value::Bool(true));

        let record: MemberRecord =
            serde_json::from_str(r#"{"email": "a@b", "attendance": {"geral": [true]}}"#).unwrap();
        assert_eq!(record.attendance["geral"][0], Value::Bool(true));

        let record: MemberRecord =
            serde_json::from_str(r#"{"email": "a@b", "attendance": ""}"#).unwrap();
        assert!(record.attendance.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_stringified_tasks() {
        let record: MemberRecord = serde_json::from_str(
            r#"{"email": "a@b", "tasks": "[{\"title\": \"Relatório\", \"done\": false}]"}"#,
        )
        .unwrap();
        assert_eq!(record.tasks[0]["title"], "Relatório");

        let record: MemberRecord =
            serde_json::from_str(r#"{"email": "a@b", "tasks": [{"title": "Relatório"}]}"#)
                .unwrap();
        assert_eq!(record.tasks[0]["title"], "Relatório");

        let record: MemberRecord = serde_json::from_str(r#"{"email": "a@b", "tasks": ""}"#).unwrap();
        assert!(record.tasks.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_columns_survive_round_trip() {
        let record: MemberRecord =
            serde_json::from_str(r#"{"email": "a@b", "entrada": "2023-02"}"#).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["entrada"], "2023-02");
    }

    #[test]
    fn test_into_principal_prefers_sheet_photo() {
        let record = MemberRecord {
            id: "m-01".to_string(),
            name: "Ana Silva".to_string(),
            email: "ANA@infobiojr.com.br".to_string(),
            department: "Projects".to_string(),
            role: "Diretor(a)".to_string(),
            status: "Ativo".to_string(),
            photo_url: Some("https://sheet/ana.jpg".to_string()),
            ..Default::default()
        };
        let principal = record.into_principal(Some("https://idp/pic.jpg".to_string()));
        assert_eq!(principal.photo_url.as_deref(), Some("https://sheet/ana.jpg"));
        assert_eq!(principal.email, "ana@infobiojr.com.br");
        assert_eq!(principal.role, Role::Director);
    }

    #[test]
    fn test_into_principal_falls_back_to_idp_photo() {
        let record = MemberRecord {
            email: "ana@infobiojr.com.br".to_string(),
            photo_url: Some("  ".to_string()),
            ..Default::default()
        };
        let principal = record.into_principal(Some("https://idp/pic.jpg".to_string()));
        assert_eq!(principal.photo_url.as_deref(), Some("https://idp/pic.jpg"));
    }

    #[test]
    fn test_unknown_role_degrades_to_member() {
        let record = MemberRecord {
            role: "Trainee".to_string(),
            ..Default::default()
        };
        assert_eq!(record.into_principal(None).role, Role::Member);
    }
}
