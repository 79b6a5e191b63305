//! Booking backend client
//!
//! Typed endpoint methods over the HTTP transport. The session credential
//! is an opaque cookie held by the transport's cookie store; `login`
//! establishes it and `logout` ends it server-side.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::client::{LoginForm, ProfileUpdate, RegisterRequest, RequestVerifyToken, VerifyRequest};
use shared::models::{
    Reservation, ReservationCreate, ReservationCreated, Review, ReviewCreate, Station, UserProfile,
};

use crate::api::BookingApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpTransport;

/// Client for the booking backend REST API.
#[derive(Debug, Clone)]
pub struct BookingClient {
    http: HttpTransport,
}

impl BookingClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpTransport::new(config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

#[async_trait]
impl BookingApi for BookingClient {
    async fn login(&self, email: &str, password: &str) -> ClientResult<()> {
        let form = LoginForm::new(email, password);
        self.http.post_form("/users/login", &form).await?;
        tracing::info!(email = %email, "logged in");
        Ok(())
    }

    async fn register(&self, req: &RegisterRequest) -> ClientResult<()> {
        self.http.post_ignored("/users/register", req).await?;
        tracing::info!(email = %req.email, "registered");
        Ok(())
    }

    async fn request_verify_token(&self, email: &str) -> ClientResult<()> {
        let body = RequestVerifyToken {
            email: email.to_string(),
        };
        self.http
            .post_ignored("/users/request-verify-token", &body)
            .await
    }

    async fn verify(&self, token: &str) -> ClientResult<()> {
        let body = VerifyRequest {
            token: token.to_string(),
        };
        self.http.post_ignored("/users/verify", &body).await
    }

    async fn logout(&self) -> ClientResult<()> {
        self.http.post_empty("/users/logout").await?;
        tracing::info!("logged out");
        Ok(())
    }

    async fn me(&self) -> ClientResult<UserProfile> {
        self.http.get("/users/me").await
    }

    async fn update_me(&self, update: &ProfileUpdate) -> ClientResult<UserProfile> {
        self.http.patch("/users/me", update).await
    }

    async fn stations(&self) -> ClientResult<Vec<Station>> {
        // Bare array, no envelope.
        self.http.get("/stations/").await
    }

    async fn reservations(&self) -> ClientResult<Vec<Reservation>> {
        self.http.get_enveloped("/reservations/").await
    }

    async fn create_reservation(&self, req: &ReservationCreate) -> ClientResult<ReservationCreated> {
        self.http.post_enveloped("/reservations/", req).await
    }

    async fn delete_reservation(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete_enveloped(&format!("/reservations/{id}"))
            .await
    }

    async fn availability(&self, date: NaiveDate) -> ClientResult<Vec<String>> {
        let path = format!("/reservations/availability/?date={}", date.format("%Y-%m-%d"));
        self.http.get_enveloped(&path).await
    }

    async fn reviews_by_station(&self, station_id: i64) -> ClientResult<Vec<Review>> {
        // The backend 404s when a station has no reviews yet; the directory
        // treats that as an empty list rather than a failure.
        match self
            .http
            .get_enveloped(&format!("/reviews/by_station/{station_id}"))
            .await
        {
            Ok(reviews) => Ok(reviews),
            Err(ClientError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn create_review(&self, req: &ReviewCreate) -> ClientResult<()> {
        // Response echoes the submitted review; nothing in it is used.
        self.http.post_ignored("/reviews/", req).await
    }
}
