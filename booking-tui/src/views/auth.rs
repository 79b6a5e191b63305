//! Login / registration screen
//!
//! Two modes behind one form: login sends the form-encoded credential pair,
//! registration creates the account, requests a verification token for the
//! email and moves on to the token screen.

use booking_client::ClientError;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use shared::client::RegisterRequest;
use tui_input::{Input, InputRequest};

use super::Screen;
use crate::notify::NoticeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Username,
    Password,
}

#[derive(Debug)]
pub enum AuthMsg {
    LoggedIn(Result<(), ClientError>),
    Registered(Result<(), ClientError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthCmd {
    Login { email: String, password: String },
    Register(RegisterRequest),
    RequestVerifyToken { email: String },
    Navigate(Screen),
    Notify(NoticeKind),
}

#[derive(Debug)]
pub struct AuthView {
    pub mode: AuthMode,
    pub field: AuthField,
    pub email: Input,
    pub username: Input,
    pub password: Input,
    /// Submit in flight; further submits are ignored until it settles.
    pub busy: bool,
}

impl Default for AuthView {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            field: AuthField::Email,
            email: Input::default(),
            username: Input::default(),
            password: Input::default(),
            busy: false,
        }
    }
}

impl AuthView {
    pub fn update(&mut self, msg: AuthMsg) -> Vec<AuthCmd> {
        self.busy = false;
        match msg {
            AuthMsg::LoggedIn(Ok(())) => vec![
                AuthCmd::Notify(NoticeKind::Success("Logged in".into())),
                AuthCmd::Navigate(Screen::Reservations),
            ],
            AuthMsg::LoggedIn(Err(e)) => {
                tracing::warn!(error = %e, "login failed");
                vec![AuthCmd::Notify(NoticeKind::Error("Login failed".into()))]
            }
            AuthMsg::Registered(Ok(())) => vec![
                AuthCmd::Notify(NoticeKind::Success(
                    "Registered! Check your email for the token".into(),
                )),
                AuthCmd::RequestVerifyToken {
                    email: self.email.value().to_string(),
                },
                AuthCmd::Navigate(Screen::VerifyToken),
            ],
            AuthMsg::Registered(Err(e)) => {
                tracing::warn!(error = %e, "registration failed");
                vec![AuthCmd::Notify(NoticeKind::Error(
                    "Registration failed".into(),
                ))]
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<AuthCmd> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.field = self.next_field();
                Vec::new()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field = self.prev_field();
                Vec::new()
            }
            // switch between login and registration
            KeyCode::F(2) => {
                self.mode = match self.mode {
                    AuthMode::Login => AuthMode::Register,
                    AuthMode::Register => AuthMode::Login,
                };
                if self.mode == AuthMode::Login && self.field == AuthField::Username {
                    self.field = AuthField::Email;
                }
                Vec::new()
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                self.focused_input().handle(InputRequest::InsertChar(c));
                Vec::new()
            }
            KeyCode::Backspace => {
                self.focused_input().handle(InputRequest::DeletePrevChar);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn next_field(&self) -> AuthField {
        match (self.field, self.mode) {
            (AuthField::Email, AuthMode::Register) => AuthField::Username,
            (AuthField::Email, AuthMode::Login) => AuthField::Password,
            (AuthField::Username, _) => AuthField::Password,
            (AuthField::Password, _) => AuthField::Email,
        }
    }

    fn prev_field(&self) -> AuthField {
        match (self.field, self.mode) {
            (AuthField::Email, _) => AuthField::Password,
            (AuthField::Username, _) => AuthField::Email,
            (AuthField::Password, AuthMode::Register) => AuthField::Username,
            (AuthField::Password, AuthMode::Login) => AuthField::Email,
        }
    }

    fn focused_input(&mut self) -> &mut Input {
        match self.field {
            AuthField::Email => &mut self.email,
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
        }
    }

    fn submit(&mut self) -> Vec<AuthCmd> {
        if self.busy {
            return Vec::new();
        }
        let email = self.email.value().trim().to_string();
        let password = self.password.value().to_string();
        if email.is_empty() || password.is_empty() {
            return vec![AuthCmd::Notify(NoticeKind::Error(
                "Email and password are required".into(),
            ))];
        }
        match self.mode {
            AuthMode::Login => {
                self.busy = true;
                vec![AuthCmd::Login { email, password }]
            }
            AuthMode::Register => {
                let username = self.username.value().trim().to_string();
                if username.is_empty() {
                    return vec![AuthCmd::Notify(NoticeKind::Error(
                        "Username is required".into(),
                    ))];
                }
                self.busy = true;
                vec![AuthCmd::Register(RegisterRequest::new(
                    &email, &username, &password,
                ))]
            }
        }
    }
}
