//! Reservation model and create payload

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Payment status code for a freshly created reservation.
pub const STATUS_PENDING_PAYMENT: i32 = 0;

/// Reservation entity as returned by `GET /reservations/`.
///
/// Timestamps stay as the raw backend strings; the UI runs them through
/// `util::format_date` / `util::format_time` for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub station_id: i64,
    pub status: i32,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub staff_id: Option<i64>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /reservations/`.
///
/// `date` and `start_time` are pre-formatted strings so the wire format is
/// fixed at construction; the server computes `end_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub station_id: i64,
    pub status: i32,
    pub amount: f64,
    pub date: String,
    pub start_time: String,
}

impl ReservationCreate {
    /// Builds a create payload, normalizing `date` to `YYYY-MM-DD` and
    /// `start_time` to a combined `YYYY-MM-DDTHH:MM:SS` local date-time.
    /// `status` is always 0 (pending payment).
    pub fn new(station_id: i64, amount: f64, date: NaiveDate, start: NaiveTime) -> Self {
        Self {
            station_id,
            status: STATUS_PENDING_PAYMENT,
            amount,
            date: date.format("%Y-%m-%d").to_string(),
            start_time: date.and_time(start).format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

/// Payload returned by a successful reservation creation.
///
/// Only the payment redirect matters to the client; it is surfaced once in
/// the confirmation dialog and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationCreated {
    pub payment_url: String,
}
