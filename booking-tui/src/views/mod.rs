//! Screen state machines
//!
//! One module per screen. Each view is a typed state struct with a message
//! enum and a pure `update` reducer that returns commands; the runtime
//! executes commands and feeds results back as messages, so every flow is
//! testable without a backend or a terminal.

pub mod auth;
pub mod profile;
pub mod reservations;
pub mod stations;
pub mod verify;

/// The five screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    VerifyToken,
    Reservations,
    Profile,
    Stations,
}
