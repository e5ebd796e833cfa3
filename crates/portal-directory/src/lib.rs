// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # portal-directory
//!
//! Client for the spreadsheet-backed member directory API.
//!
//! The directory is a web endpoint in front of the organization's
//! spreadsheet. Reads are `GET ?resource=<name>`; writes are a JSON `POST`
//! whose `resource` field names the action (`createFeedback`,
//! `updateMember`, ...). Every response is wrapped in an envelope:
//!
//! ```json
//! { "ok": true, "data": [...], "error": null }
//! ```
//!
//! This crate provides:
//!
//! - [`ApiEnvelope`]: the response envelope, tolerant of the spellings the
//!   endpoint has used over time
//! - [`Resource`]: the known resource sheets and their action names
//! - [`MemberRecord`]: a directory row, tolerant of sheet column renames
//! - [`DirectoryClient`]: the async client trait
//! - [`HttpDirectoryClient`]: the reqwest-backed implementation
//! - [`InMemoryDirectory`]: an in-memory implementation for tests

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod envelope;
pub mod http;
pub mod memory;
pub mod record;

pub use client::{DirectoryClient, Resource};
pub use envelope::ApiEnvelope;
pub use http::HttpDirectoryClient;
pub use memory::InMemoryDirectory;
pub use record::MemberRecord;
