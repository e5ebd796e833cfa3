// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity verification against the member directory.

use std::sync::Arc;

use portal_core::error::{AuthError, PortalError};
use portal_core::{ActiveStatusSet, Principal};
use portal_directory::DirectoryClient;

use crate::auth::assertion::IdentityAssertion;
use crate::config::AuthConfig;

// =============================================================================
// IdentityVerifier
// =============================================================================

/// Verifies a decoded identity assertion and produces a [`Principal`].
///
/// Checks run in a fixed order so the member always sees the most specific
/// denial:
///
/// 1. the provider must have verified the e-mail;
/// 2. the e-mail must belong to the organization's domain;
/// 3. the e-mail must match an active record in the member directory.
///
/// A directory failure is reported as such, never as a denial: when the
/// directory cannot answer, nothing about the identity has been decided.
pub struct IdentityVerifier {
    allowed_domain: String,
    statuses: ActiveStatusSet,
    directory: Arc<dyn DirectoryClient>,
}

impl IdentityVerifier {
    /// Creates a verifier from the auth configuration.
    pub fn new(config: &AuthConfig, directory: Arc<dyn DirectoryClient>) -> Self {
        Self {
            allowed_domain: config.allowed_domain.to_lowercase(),
            statuses: config.status_set(),
            directory,
        }
    }

    /// Verifies `assertion` and returns the matched member as a principal.
    ///
    /// Directory fields are authoritative for everything but the photo,
    /// where the assertion's picture fills an empty sheet column.
    pub async fn verify(&self, assertion: &IdentityAssertion) -> Result<Principal, PortalError> {
        let email = assertion.normalized_email();

        // An empty e-mail is nothing the provider could have verified, so
        // it gets the same answer whether or not the decoder caught it.
        if !assertion.email_verified || email.is_empty() {
            tracing::info!(email = %email, "sign-in rejected: e-mail not verified");
            return Err(AuthError::unverified_email(email).into());
        }

        let domain_ok = assertion
            .email_domain()
            .is_some_and(|d| d.eq_ignore_ascii_case(&self.allowed_domain));
        if !domain_ok {
            tracing::info!(email = %email, "sign-in rejected: wrong domain");
            return Err(AuthError::domain_not_allowed(email, self.allowed_domain.clone()).into());
        }

        let members = self.directory.fetch_members().await?;

        let record = members
            .into_iter()
            .find(|r| r.matches_email(&email) && r.is_active(&self.statuses));

        match record {
            Some(record) => {
                tracing::info!(email = %email, "sign-in verified");
                Ok(record.into_principal(assertion.picture.clone()))
            }
            None => {
                tracing::info!(email = %email, "sign-in rejected: no active member record");
                Err(AuthError::not_a_member(email).into())
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::Role;
    use portal_directory::{InMemoryDirectory, MemberRecord};

    fn assertion(email: &str, verified: bool) -> IdentityAssertion {
        serde_json::from_value(serde_json::json!({
            "iss": "https://accounts.google.com",
            "email": email,
            "email_verified": verified,
            "picture": "https://idp/pic.jpg",
            "exp": 4_000_000_000u64,
        }))
        .unwrap()
    }

    fn record(email: &str, status: &str) -> MemberRecord {
        MemberRecord {
            id: "m-01".to_string(),
            name: "Ana Silva".to_string(),
            email: email.to_string(),
            department: "Projects".to_string(),
            role: "Diretor(a)".to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    fn verifier(directory: InMemoryDirectory) -> IdentityVerifier {
        IdentityVerifier::new(&AuthConfig::default(), Arc::new(directory))
    }

    #[tokio::test]
    async fn test_verified_member_signs_in() {
        let v = verifier(InMemoryDirectory::with_members([record(
            "ana@infobiojr.com.br",
            "Ativo",
        )]));

        let principal = v
            .verify(&assertion("Ana@InfoBioJr.com.br", true))
            .await
            .unwrap();
        assert_eq!(principal.email, "ana@infobiojr.com.br");
        assert_eq!(principal.role, Role::Director);
        assert_eq!(principal.photo_url.as_deref(), Some("https://idp/pic.jpg"));
    }

    #[tokio::test]
    async fn test_unverified_email_is_rejected_first() {
        // Even a registered member is turned away if the provider did not
        // verify the address.
        let v = verifier(InMemoryDirectory::with_members([record(
            "ana@infobiojr.com.br",
            "Ativo",
        )]));

        let err = v
            .verify(&assertion("ana@infobiojr.com.br", false))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PortalError::Auth(AuthError::UnverifiedEmail { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_email_is_unverified_not_wrong_domain() {
        let v = verifier(InMemoryDirectory::new());
        let err = v.verify(&assertion("", true)).await.unwrap_err();
        assert!(matches!(
            err,
            PortalError::Auth(AuthError::UnverifiedEmail { .. })
        ));
    }

    #[tokio::test]
    async fn test_foreign_domain_is_rejected() {
        let v = verifier(InMemoryDirectory::new());
        let err = v.verify(&assertion("ana@gmail.com", true)).await.unwrap_err();
        assert!(matches!(
            err,
            PortalError::Auth(AuthError::DomainNotAllowed { .. })
        ));
    }

    #[tokio::test]
    async fn test_inactive_member_is_not_a_member() {
        let v = verifier(InMemoryDirectory::with_members([record(
            "ana@infobiojr.com.br",
            "Desligada",
        )]));

        let err = v
            .verify(&assertion("ana@infobiojr.com.br", true))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Auth(AuthError::NotAMember { .. })));
    }

    #[tokio::test]
    async fn test_directory_failure_is_not_a_denial() {
        let directory = InMemoryDirectory::with_members([record("ana@infobiojr.com.br", "Ativo")]);
        directory.set_unavailable(true);
        let v = verifier(directory);

        let err = v
            .verify(&assertion("ana@infobiojr.com.br", true))
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Directory(_)));
        assert!(err.is_retryable());
    }
}
