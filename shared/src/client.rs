//! Client-related types
//!
//! Request/response DTOs for the backend REST surface, plus the
//! `{status, data}` envelope most booking endpoints wrap their payloads in.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// =============================================================================
// Response envelope
// =============================================================================

/// Envelope used by the reservation and review endpoints.
///
/// `status == "ok"` means `data` holds the payload; any other status means
/// `data` holds an error string. Station and profile endpoints return bare
/// JSON and never go through this type.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    pub status: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ApiEnvelope {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Error text carried in `data` when `status != "ok"`.
    pub fn error_message(&self) -> String {
        match &self.data {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "unknown error".to_string(),
            other => other.to_string(),
        }
    }

    /// Deserializes the `data` payload.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data)
    }
}

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Form-encoded login body (`POST /users/login`).
///
/// The backend speaks the OAuth2 password grant form; only `username` (the
/// email) and `password` carry information, the rest are sent empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub grant_type: String,
    pub username: String,
    pub password: String,
    pub scope: String,
    pub client_id: String,
    pub client_secret: String,
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            grant_type: String::new(),
            username: email.to_string(),
            password: password.to_string(),
            scope: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

/// Registration request (`POST /users/register`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
    pub role_id: i64,
}

impl RegisterRequest {
    /// New accounts start active, unverified and unprivileged.
    pub fn new(email: &str, username: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            username: username.to_string(),
            is_active: true,
            is_superuser: false,
            is_verified: false,
            role_id: 0,
        }
    }
}

/// `POST /users/request-verify-token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestVerifyToken {
    pub email: String,
}

/// `POST /users/verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

/// Full-record profile patch (`PATCH /users/me`).
///
/// The backend expects the whole record back; unchanged fields are echoed
/// from the last fetched profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: String,
    pub password: String,
    pub username: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
    pub role_id: i64,
    pub games_played: i64,
    pub games_organized: i64,
}

impl ProfileUpdate {
    /// Builds a patch from the current profile with a new username and
    /// password.
    pub fn from_profile(
        profile: &crate::models::UserProfile,
        username: &str,
        password: &str,
    ) -> Self {
        Self {
            email: profile.email.clone(),
            password: password.to_string(),
            username: username.to_string(),
            is_active: profile.is_active,
            is_superuser: profile.is_superuser,
            is_verified: profile.is_verified,
            role_id: profile.role_id,
            games_played: profile.games_played,
            games_organized: profile.games_organized,
        }
    }
}
