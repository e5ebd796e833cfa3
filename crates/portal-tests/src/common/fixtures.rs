// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built test data for consistent and reproducible testing.
//!
//! The member roster mirrors a realistic directory sheet: one plain member,
//! one department director, the vice-president, the president and one
//! former member whose status is no longer active.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use portal_directory::{InMemoryDirectory, MemberRecord};

/// The e-mail domain all fixture members belong to.
pub const ORG_DOMAIN: &str = "infobiojr.com.br";

/// The issuer fixture tokens are signed under.
pub const TRUSTED_ISSUER: &str = "https://accounts.google.com";

// =============================================================================
// Member Fixtures
// =============================================================================

/// Fixture providing standard directory members.
pub struct MemberFixtures;

impl MemberFixtures {
    /// A regular member of the Projects department.
    pub fn member() -> MemberRecord {
        MemberRecord {
            id: "m-001".to_string(),
            name: "Ana Silva".to_string(),
            email: "ana@infobiojr.com.br".to_string(),
            department: "Projetos".to_string(),
            role: "Membro".to_string(),
            status: "Ativo".to_string(),
            ..Default::default()
        }
    }

    /// The director of the people-management department.
    pub fn people_director() -> MemberRecord {
        MemberRecord {
            id: "m-002".to_string(),
            name: "Bruno Costa".to_string(),
            email: "bruno@infobiojr.com.br".to_string(),
            department: "Gente & Gestão".to_string(),
            role: "Diretor(a)".to_string(),
            status: "Ativo".to_string(),
            ..Default::default()
        }
    }

    /// A director outside the people-management department.
    pub fn projects_director() -> MemberRecord {
        MemberRecord {
            id: "m-003".to_string(),
            name: "Clara Dias".to_string(),
            email: "clara@infobiojr.com.br".to_string(),
            department: "Projetos".to_string(),
            role: "Diretor(a)".to_string(),
            status: "Ativo".to_string(),
            ..Default::default()
        }
    }

    /// The vice-president.
    pub fn vice_president() -> MemberRecord {
        MemberRecord {
            id: "m-004".to_string(),
            name: "Davi Rocha".to_string(),
            email: "davi@infobiojr.com.br".to_string(),
            department: "Diretoria".to_string(),
            role: "Vice-Presidente".to_string(),
            status: "Ativo".to_string(),
            ..Default::default()
        }
    }

    /// The president.
    pub fn president() -> MemberRecord {
        MemberRecord {
            id: "m-005".to_string(),
            name: "Elisa Faria".to_string(),
            email: "elisa@infobiojr.com.br".to_string(),
            department: "Diretoria".to_string(),
            role: "Presidente".to_string(),
            status: "Ativo".to_string(),
            ..Default::default()
        }
    }

    /// A former member; on the sheet but no longer active.
    pub fn alumna() -> MemberRecord {
        MemberRecord {
            id: "m-006".to_string(),
            name: "Fernanda Gomes".to_string(),
            email: "fernanda@infobiojr.com.br".to_string(),
            department: "Projetos".to_string(),
            role: "Membro".to_string(),
            status: "Desligado".to_string(),
            ..Default::default()
        }
    }

    /// The full fixture roster.
    pub fn roster() -> Vec<MemberRecord> {
        vec![
            Self::member(),
            Self::people_director(),
            Self::projects_director(),
            Self::vice_president(),
            Self::president(),
            Self::alumna(),
        ]
    }
}

/// An in-memory directory seeded with the fixture roster.
pub fn seeded_directory() -> InMemoryDirectory {
    InMemoryDirectory::with_members(MemberFixtures::roster())
}

// =============================================================================
// Identity Token Fixtures
// =============================================================================

/// Signs a set of claims the way the sign-in widget would.
pub fn signed_token(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"fixture-signing-key"),
    )
    .expect("Failed to sign fixture token")
}

/// A verified identity token for `email` from the trusted issuer.
pub fn identity_token(email: &str) -> String {
    signed_token(json!({
        "iss": TRUSTED_ISSUER,
        "sub": "fixture-subject",
        "email": email,
        "email_verified": true,
        "name": "Fixture User",
        "exp": future_exp(),
    }))
}

/// An identity token whose e-mail the provider did not verify.
pub fn unverified_token(email: &str) -> String {
    signed_token(json!({
        "iss": TRUSTED_ISSUER,
        "email": email,
        "email_verified": false,
        "exp": future_exp(),
    }))
}

/// An expiry one hour in the future.
pub fn future_exp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("System clock before epoch")
        .as_secs()
        + 3600
}
