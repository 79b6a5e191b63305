//! User profile model

use serde::{Deserialize, Serialize};

/// User record from `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
    #[serde(default)]
    pub role_id: i64,
    #[serde(default)]
    pub games_played: i64,
    #[serde(default)]
    pub games_organized: i64,
}
