//! Authentication types for the domain layer.
//!
//! These types have no provider dependencies. Any backend (the local
//! account registry or the Postgres user table) populates them via the
//! `AuthProvider` port.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::UserId;

/// Authenticated user as seen by the trip core.
///
/// The core treats `id` as an opaque owner key for scoping trip queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// User's email address.
    pub email: String,

    /// Display name if available.
    pub display_name: Option<String>,

    /// Avatar URL if available.
    pub photo_url: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        photo_url: Option<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            photo_url,
        }
    }

    /// Returns the user's display name, or the email local part as fallback.
    pub fn display_name_or_email(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) => name,
            None => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// Email/password credentials presented at sign-in.
///
/// The password is wrapped in `SecretString` so it is never logged or
/// serialized by accident.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    /// Creates credentials from an email and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Authentication errors surfaced to the caller.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The email is known but the password does not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The email is malformed or empty.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// No user is signed in for an operation that requires one.
    #[error("Not signed in")]
    NotSignedIn,

    /// The auth backend is unreachable or failed internally.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}

/// Builds the default avatar URL used when a provider has no photo.
pub fn default_avatar_url(display_name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=0D8ABC&color=fff",
        display_name.replace(' ', "+")
    )
}
