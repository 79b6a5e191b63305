//! Email-token verification screen

use booking_client::ClientError;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tui_input::{Input, InputRequest};

use super::Screen;
use crate::notify::NoticeKind;

#[derive(Debug)]
pub enum VerifyMsg {
    Verified(Result<(), ClientError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum VerifyCmd {
    Verify { token: String },
    Navigate(Screen),
    Notify(NoticeKind),
}

#[derive(Debug, Default)]
pub struct VerifyView {
    pub token: Input,
    pub busy: bool,
}

impl VerifyView {
    pub fn update(&mut self, msg: VerifyMsg) -> Vec<VerifyCmd> {
        self.busy = false;
        match msg {
            VerifyMsg::Verified(Ok(())) => vec![
                VerifyCmd::Notify(NoticeKind::Success("Token verification successful".into())),
                VerifyCmd::Navigate(Screen::Login),
            ],
            VerifyMsg::Verified(Err(e)) => {
                tracing::warn!(error = %e, "token verification failed");
                vec![VerifyCmd::Notify(NoticeKind::Error(
                    "Token verification failed".into(),
                ))]
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<VerifyCmd> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        match key.code {
            KeyCode::Enter => {
                if self.busy {
                    return Vec::new();
                }
                let token = self.token.value().trim().to_string();
                if token.is_empty() {
                    return vec![VerifyCmd::Notify(NoticeKind::Error(
                        "Please input your token".into(),
                    ))];
                }
                self.busy = true;
                vec![VerifyCmd::Verify { token }]
            }
            KeyCode::Esc => vec![VerifyCmd::Navigate(Screen::Login)],
            KeyCode::Char(c) => {
                self.token.handle(InputRequest::InsertChar(c));
                Vec::new()
            }
            KeyCode::Backspace => {
                self.token.handle(InputRequest::DeletePrevChar);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}
