//! API seam for the UI layer
//!
//! `BookingApi` is the surface the views are driven through; tests drive
//! them with a recording mock instead of a live backend.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::client::{ProfileUpdate, RegisterRequest};
use shared::models::{
    Reservation, ReservationCreate, ReservationCreated, Review, ReviewCreate, Station, UserProfile,
};

use crate::error::ClientResult;

/// Typed surface of the booking backend.
#[async_trait]
pub trait BookingApi: Send + Sync {
    // ---- session ----
    async fn login(&self, email: &str, password: &str) -> ClientResult<()>;
    async fn register(&self, req: &RegisterRequest) -> ClientResult<()>;
    async fn request_verify_token(&self, email: &str) -> ClientResult<()>;
    async fn verify(&self, token: &str) -> ClientResult<()>;
    async fn logout(&self) -> ClientResult<()>;

    // ---- profile ----
    async fn me(&self) -> ClientResult<UserProfile>;
    async fn update_me(&self, update: &ProfileUpdate) -> ClientResult<UserProfile>;

    // ---- stations ----
    async fn stations(&self) -> ClientResult<Vec<Station>>;

    // ---- reservations ----
    async fn reservations(&self) -> ClientResult<Vec<Reservation>>;
    async fn create_reservation(&self, req: &ReservationCreate) -> ClientResult<ReservationCreated>;
    async fn delete_reservation(&self, id: i64) -> ClientResult<()>;
    /// Free `HH:MM` start slots for the given date.
    async fn availability(&self, date: NaiveDate) -> ClientResult<Vec<String>>;

    // ---- reviews ----
    async fn reviews_by_station(&self, station_id: i64) -> ClientResult<Vec<Review>>;
    async fn create_review(&self, req: &ReviewCreate) -> ClientResult<()>;
}
