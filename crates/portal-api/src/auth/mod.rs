// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Sign-in verification and session management.

pub mod assertion;
pub mod session;
pub mod verifier;

pub use assertion::{AssertionDecoder, IdentityAssertion};
pub use session::{SessionId, SessionStore};
pub use verifier::IdentityVerifier;
