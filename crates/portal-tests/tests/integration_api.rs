// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # API Integration Tests
//!
//! End-to-end tests over the portal router:
//!
//! - The full sign-in, session and sign-out flow
//! - Session-gated and role-gated endpoints
//! - Directory outage behavior at sign-in and page level
//!
//! ## Test Categories
//!
//! - `test_api_auth_*`: Sign-in flow tests
//! - `test_api_session_*`: Session gate tests
//! - `test_api_rbac_*`: Route guard tests
//! - `test_api_resource_*`: Resource endpoint tests

use axum::http::StatusCode;
use serde_json::json;

use portal_directory::Resource;
use portal_tests::common::{identity_token, init_test_logging, TestApp};

// =============================================================================
// Sign-in Flow Tests
// =============================================================================

#[tokio::test]
async fn test_api_auth_login_and_me() {
    init_test_logging();
    let app = TestApp::new();

    let session = app.login("ana@infobiojr.com.br").await;
    let response = app.get("/api/v1/auth/me", Some(&session)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["email"], "ana@infobiojr.com.br");
    assert_eq!(response.data()["department"], "Projetos");
    assert_eq!(response.data()["role"], "member");
}

#[tokio::test]
async fn test_api_auth_login_unknown_member_denied() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "credential": identity_token("intruder@infobiojr.com.br") }),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("NOT_A_MEMBER"));
}

#[tokio::test]
async fn test_api_auth_login_foreign_domain_denied() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "credential": identity_token("ana@gmail.com") }),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("DOMAIN_NOT_ALLOWED"));
}

#[tokio::test]
async fn test_api_auth_login_garbage_credential_rejected() {
    let app = TestApp::new();
    let response = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "credential": "not.a.token" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("INVALID_ASSERTION"));
}

#[tokio::test]
async fn test_api_auth_login_directory_outage_is_503() {
    let app = TestApp::new();
    app.directory.set_unavailable(true);

    let response = app
        .post(
            "/api/v1/auth/login",
            None,
            json!({ "credential": identity_token("ana@infobiojr.com.br") }),
        )
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_api_auth_logout_is_idempotent() {
    let app = TestApp::new();
    let session = app.login("ana@infobiojr.com.br").await;

    let first = app.post("/api/v1/auth/logout", Some(&session), json!({})).await;
    assert_eq!(first.status, StatusCode::OK);

    // The session is gone.
    let me = app.get("/api/v1/auth/me", Some(&session)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    // Signing out again, or with no session at all, still succeeds.
    let again = app.post("/api/v1/auth/logout", Some(&session), json!({})).await;
    assert_eq!(again.status, StatusCode::OK);
    let bare = app.post("/api/v1/auth/logout", None, json!({})).await;
    assert_eq!(bare.status, StatusCode::OK);
}

// =============================================================================
// Session Gate Tests
// =============================================================================

#[tokio::test]
async fn test_api_session_health_is_public() {
    let app = TestApp::new();
    let response = app.get("/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_api_session_missing_token_is_401() {
    let app = TestApp::new();
    let response = app.get("/api/v1/members", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("NO_SESSION"));
}

#[tokio::test]
async fn test_api_session_unknown_token_is_401() {
    let app = TestApp::new();
    let response = app.get("/api/v1/members", Some("not-a-session")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_api_session_corrupt_payload_is_silent_signout() {
    let app = TestApp::new();
    let session = app.sessions.store_raw("{ not json");

    let response = app.get("/api/v1/auth/me", Some(&session)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Route Guard Tests
// =============================================================================

#[tokio::test]
async fn test_api_rbac_member_cannot_manage_roster() {
    let app = TestApp::new();
    let session = app.login("ana@infobiojr.com.br").await;

    let response = app
        .post(
            "/api/v1/members",
            Some(&session),
            json!({ "name": "New Member", "email": "new@infobiojr.com.br" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("ACCESS_DENIED"));
}

#[tokio::test]
async fn test_api_rbac_people_director_manages_roster() {
    let app = TestApp::new();
    let session = app.login("bruno@infobiojr.com.br").await;

    let response = app
        .post(
            "/api/v1/members",
            Some(&session),
            json!({ "name": "New Member", "email": "new@infobiojr.com.br" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.directory.rows(Resource::Members).len(), 7);
}

#[tokio::test]
async fn test_api_rbac_other_department_director_denied() {
    let app = TestApp::new();
    let session = app.login("clara@infobiojr.com.br").await;

    let response = app
        .post("/api/v1/members", Some(&session), json!({ "name": "X" }))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_api_rbac_leadership_bypasses_department() {
    let app = TestApp::new();
    let session = app.login("davi@infobiojr.com.br").await;

    let response = app
        .post("/api/v1/members", Some(&session), json!({ "name": "X" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_api_rbac_feedback_writes_open_reads_guarded() {
    let app = TestApp::new();
    let member = app.login("ana@infobiojr.com.br").await;

    let write = app
        .post(
            "/api/v1/feedback",
            Some(&member),
            json!({ "type": "elogio", "message": "Ótimo evento!" }),
        )
        .await;
    assert_eq!(write.status, StatusCode::OK);

    let read = app.get("/api/v1/feedback", Some(&member)).await;
    assert_eq!(read.status, StatusCode::FORBIDDEN);

    let people = app.login("bruno@infobiojr.com.br").await;
    let read = app.get("/api/v1/feedback", Some(&people)).await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.data().as_array().map(Vec::len), Some(1));
}

// =============================================================================
// Resource Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_api_resource_roster_degrades_to_empty_on_outage() {
    let app = TestApp::new();
    let session = app.login("ana@infobiojr.com.br").await;

    app.directory.set_unavailable(true);
    let response = app.get("/api/v1/members", Some(&session)).await;

    // The page renders empty rather than erroring.
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data().as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_api_resource_vacation_is_filed_for_the_signed_in_member() {
    let app = TestApp::new();
    let session = app.login("ana@infobiojr.com.br").await;

    let response = app
        .post(
            "/api/v1/vacations",
            Some(&session),
            json!({ "email": "someone-else@infobiojr.com.br", "start": "2026-01-05" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let rows = app.directory.rows(Resource::Vacations);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["email"], "ana@infobiojr.com.br");
}

#[tokio::test]
async fn test_api_resource_attendance_record_updates_member_row() {
    let app = TestApp::new();
    let session = app.login("bruno@infobiojr.com.br").await;

    let response = app
        .post(
            "/api/v1/attendance/record",
            Some(&session),
            json!({
                "email": "ana@infobiojr.com.br",
                "attendance": { "Reunião Geral": true }
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let rows = app.directory.rows(Resource::Members);
    let ana = rows
        .iter()
        .find(|row| row["email"] == "ana@infobiojr.com.br")
        .unwrap();
    assert_eq!(ana["attendance"]["Reunião Geral"], true);
}

#[tokio::test]
async fn test_api_resource_attendance_department_switch_is_leadership_only() {
    let app = TestApp::new();
    app.directory.insert_raw(
        Resource::Attendance,
        json!({ "department": "Projetos", "meeting": "Reunião Geral" }),
    );
    app.directory.insert_raw(
        Resource::Attendance,
        json!({ "department": "Gente & Gestão", "meeting": "1:1" }),
    );

    // A member sees their own department without asking.
    let member = app.login("ana@infobiojr.com.br").await;
    let own = app.get("/api/v1/attendance", Some(&member)).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data().as_array().map(Vec::len), Some(1));

    // Switching departments is denied below vp, directors included.
    let denied = app
        .get(
            "/api/v1/attendance?department=Gente%20%26%20Gest%C3%A3o",
            Some(&member),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let director = app.login("clara@infobiojr.com.br").await;
    let denied = app
        .get(
            "/api/v1/attendance?department=Gente%20%26%20Gest%C3%A3o",
            Some(&director),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    // The vp switches freely.
    let vp = app.login("davi@infobiojr.com.br").await;
    let switched = app
        .get(
            "/api/v1/attendance?department=Gente%20%26%20Gest%C3%A3o",
            Some(&vp),
        )
        .await;
    assert_eq!(switched.status, StatusCode::OK);
    assert_eq!(switched.data().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_api_resource_profile_dob_update() {
    let app = TestApp::new();
    let session = app.login("ana@infobiojr.com.br").await;

    let response = app
        .patch(
            "/api/v1/me/profile",
            Some(&session),
            json!({ "dob": "1999-03-14" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["dob"], "1999-03-14");

    // The session was refreshed in place.
    let me = app.get("/api/v1/auth/me", Some(&session)).await;
    assert_eq!(me.data()["dob"], "1999-03-14");

    // And the sheet was updated.
    let rows = app.directory.rows(Resource::Members);
    let ana = rows
        .iter()
        .find(|row| row["email"] == "ana@infobiojr.com.br")
        .unwrap();
    assert_eq!(ana["dob"], "1999-03-14");
}

#[tokio::test]
async fn test_api_resource_profile_rejects_malformed_dob() {
    let app = TestApp::new();
    let session = app.login("ana@infobiojr.com.br").await;

    let response = app
        .patch(
            "/api/v1/me/profile",
            Some(&session),
            json!({ "dob": "14/03/1999" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}
