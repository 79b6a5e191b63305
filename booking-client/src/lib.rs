//! Booking Client - HTTP client for the booking backend
//!
//! Cookie-session HTTP calls to the booking REST API: auth, profile,
//! stations, reservations and reviews.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;

pub use api::BookingApi;
pub use client::BookingClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};

// Re-export shared types for convenience
pub use shared::client::{ApiEnvelope, LoginForm, RegisterRequest, VerifyRequest};
pub use shared::models::{Reservation, ReservationCreate, Review, ReviewCreate, Station};
