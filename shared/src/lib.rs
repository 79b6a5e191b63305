//! Shared types for the booking client
//!
//! Wire models mirrored from the backend, request/response DTOs,
//! and the display formatting helpers used by the UI.

pub mod client;
pub mod models;
pub mod util;
