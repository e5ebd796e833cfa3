// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Auth Integration Tests
//!
//! Integration tests for the sign-in pipeline:
//!
//! - Identity assertion decoding
//! - The verification order (verified e-mail, domain, membership)
//! - Session lifecycle, including corrupt and expired sessions
//!
//! ## Test Categories
//!
//! - `test_verify_*`: Verification pipeline tests
//! - `test_session_*`: Session store tests

use std::sync::Arc;
use std::time::Duration;

use portal_api::auth::{AssertionDecoder, IdentityVerifier, SessionStore};
use portal_api::config::AuthConfig;
use portal_core::error::{AuthError, PortalError};
use portal_core::Role;
use portal_directory::InMemoryDirectory;

use portal_tests::common::{
    identity_token, init_test_logging, seeded_directory, signed_token, unverified_token,
    MemberRecordBuilder, PrincipalBuilder, TRUSTED_ISSUER,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn verifier(directory: InMemoryDirectory) -> IdentityVerifier {
    IdentityVerifier::new(&AuthConfig::default(), Arc::new(directory))
}

fn decoder() -> AssertionDecoder {
    AssertionDecoder::new(AuthConfig::default().trusted_issuers)
}

fn decode(token: &str) -> portal_api::auth::IdentityAssertion {
    decoder().decode(token).expect("fixture token decodes")
}

// =============================================================================
// Verification Pipeline Tests
// =============================================================================

#[tokio::test]
async fn test_verify_active_member_signs_in() {
    init_test_logging();
    let verifier = verifier(seeded_directory());

    let assertion = decode(&identity_token("ana@infobiojr.com.br"));
    let principal = verifier.verify(&assertion).await.unwrap();

    // Directory fields win over assertion claims.
    assert_eq!(principal.name, "Ana Silva");
    assert_eq!(principal.email, "ana@infobiojr.com.br");
    assert_eq!(principal.department, "Projetos");
    assert_eq!(principal.role, Role::Member);
}

#[tokio::test]
async fn test_verify_email_case_is_ignored() {
    let verifier = verifier(seeded_directory());
    let assertion = decode(&identity_token("Ana@InfoBioJr.com.br"));
    assert!(verifier.verify(&assertion).await.is_ok());
}

#[tokio::test]
async fn test_verify_unverified_email_rejected_first() {
    let verifier = verifier(seeded_directory());

    // Registered and active, but the provider did not verify the e-mail.
    let assertion = decode(&unverified_token("ana@infobiojr.com.br"));
    assert!(matches!(
        verifier.verify(&assertion).await,
        Err(PortalError::Auth(AuthError::UnverifiedEmail { .. }))
    ));
}

#[tokio::test]
async fn test_verify_foreign_domain_rejected() {
    let verifier = verifier(seeded_directory());
    let assertion = decode(&identity_token("ana@gmail.com"));
    assert!(matches!(
        verifier.verify(&assertion).await,
        Err(PortalError::Auth(AuthError::DomainNotAllowed { .. }))
    ));
}

#[tokio::test]
async fn test_verify_unknown_address_is_not_a_member() {
    let verifier = verifier(seeded_directory());
    let assertion = decode(&identity_token("intruder@infobiojr.com.br"));
    assert!(matches!(
        verifier.verify(&assertion).await,
        Err(PortalError::Auth(AuthError::NotAMember { .. }))
    ));
}

#[tokio::test]
async fn test_verify_inactive_member_is_not_a_member() {
    let verifier = verifier(seeded_directory());
    let assertion = decode(&identity_token("fernanda@infobiojr.com.br"));
    assert!(matches!(
        verifier.verify(&assertion).await,
        Err(PortalError::Auth(AuthError::NotAMember { .. }))
    ));
}

#[tokio::test]
async fn test_verify_directory_outage_is_retryable_not_denial() {
    let directory = seeded_directory();
    directory.set_unavailable(true);
    let verifier = verifier(directory);

    let assertion = decode(&identity_token("ana@infobiojr.com.br"));
    let err = verifier.verify(&assertion).await.unwrap_err();

    assert!(matches!(err, PortalError::Directory(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_verify_assertion_picture_fills_missing_sheet_photo() {
    let directory = InMemoryDirectory::with_members([MemberRecordBuilder::new()
        .email("ana@infobiojr.com.br")
        .build()]);
    let verifier = verifier(directory);

    let token = signed_token(serde_json::json!({
        "iss": TRUSTED_ISSUER,
        "email": "ana@infobiojr.com.br",
        "email_verified": true,
        "picture": "https://lh3.example/photo.jpg",
        "exp": portal_tests::common::future_exp(),
    }));
    let principal = verifier.verify(&decode(&token)).await.unwrap();
    assert_eq!(
        principal.photo_url.as_deref(),
        Some("https://lh3.example/photo.jpg")
    );
}

#[tokio::test]
async fn test_verify_sheet_photo_wins_over_assertion_picture() {
    let directory = InMemoryDirectory::with_members([MemberRecordBuilder::new()
        .email("ana@infobiojr.com.br")
        .photo_url("https://sheet.example/ana.png")
        .build()]);
    let verifier = verifier(directory);

    let token = signed_token(serde_json::json!({
        "iss": TRUSTED_ISSUER,
        "email": "ana@infobiojr.com.br",
        "email_verified": true,
        "picture": "https://lh3.example/photo.jpg",
        "exp": portal_tests::common::future_exp(),
    }));
    let principal = verifier.verify(&decode(&token)).await.unwrap();
    assert_eq!(
        principal.photo_url.as_deref(),
        Some("https://sheet.example/ana.png")
    );
}

// =============================================================================
// Session Store Tests
// =============================================================================

#[test]
fn test_session_roundtrip() {
    let store = SessionStore::new(Duration::from_secs(3600));
    let principal = PrincipalBuilder::new().build();

    let id = store.create(&principal);
    assert_eq!(store.resolve(&id), Some(principal));
}

#[test]
fn test_session_unknown_id_resolves_to_none() {
    let store = SessionStore::new(Duration::from_secs(3600));
    assert_eq!(store.resolve("no-such-session"), None);
}

#[test]
fn test_session_corrupt_payload_resolves_to_none() {
    let store = SessionStore::new(Duration::from_secs(3600));
    let id = store.store_raw("{ not json");

    assert_eq!(store.resolve(&id), None);
    // The corrupt entry is discarded, not retried.
    assert!(store.is_empty());
}

#[test]
fn test_session_expired_resolves_to_none() {
    let store = SessionStore::new(Duration::ZERO);
    let id = store.create(&PrincipalBuilder::new().build());
    assert_eq!(store.resolve(&id), None);
}

#[test]
fn test_session_remove_is_idempotent() {
    let store = SessionStore::new(Duration::from_secs(3600));
    let id = store.create(&PrincipalBuilder::new().build());

    store.remove(&id);
    store.remove(&id);
    assert!(store.is_empty());
}
