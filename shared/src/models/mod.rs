//! Data models
//!
//! Mirrored from the backend (via API). Only fields the client displays
//! or submits are carried. All IDs are `i64`.

pub mod reservation;
pub mod review;
pub mod station;
pub mod user;

// Re-exports
pub use reservation::*;
pub use review::*;
pub use station::*;
pub use user::*;
