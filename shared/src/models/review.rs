//! Review model and create payload

use serde::{Deserialize, Serialize};

/// Review entity as returned by `GET /reviews/by_station/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: i64,
    pub station_id: i64,
    pub rating: f32,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /reviews/`. Rating is 0-5 in half steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub station_id: i64,
    pub rating: f32,
    pub comment: String,
}
