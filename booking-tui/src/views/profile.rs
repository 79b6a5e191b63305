//! Profile screen
//!
//! Shows the session user; the edit modal patches the full record back
//! (unchanged fields echoed) and refetches the profile once on success.

use booking_client::ClientError;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use shared::client::ProfileUpdate;
use shared::models::UserProfile;
use tui_input::{Input, InputRequest};

use crate::notify::NoticeKind;

#[derive(Debug)]
pub enum ProfileState {
    Loading,
    Ready(UserProfile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Username,
    Password,
}

#[derive(Debug)]
pub struct EditModal {
    pub username: Input,
    pub password: Input,
    pub field: EditField,
}

#[derive(Debug)]
pub enum ProfileMsg {
    Loaded(Result<UserProfile, ClientError>),
    Updated(Result<UserProfile, ClientError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileCmd {
    Fetch,
    Update(ProfileUpdate),
    Notify(NoticeKind),
}

#[derive(Debug)]
pub struct ProfileView {
    pub state: ProfileState,
    pub modal: Option<EditModal>,
}

impl ProfileView {
    pub fn mount() -> (Self, Vec<ProfileCmd>) {
        (
            Self {
                state: ProfileState::Loading,
                modal: None,
            },
            vec![ProfileCmd::Fetch],
        )
    }

    pub fn update(&mut self, msg: ProfileMsg) -> Vec<ProfileCmd> {
        match msg {
            ProfileMsg::Loaded(Ok(profile)) => {
                self.state = ProfileState::Ready(profile);
                Vec::new()
            }
            ProfileMsg::Loaded(Err(e)) => {
                tracing::warn!(error = %e, "profile fetch failed");
                vec![ProfileCmd::Notify(NoticeKind::Error(
                    "Failed to fetch user information".into(),
                ))]
            }
            ProfileMsg::Updated(Ok(_)) => {
                self.modal = None;
                vec![
                    ProfileCmd::Notify(NoticeKind::Success("Profile updated successfully".into())),
                    ProfileCmd::Fetch,
                ]
            }
            ProfileMsg::Updated(Err(e)) => {
                tracing::warn!(error = %e, "profile update failed");
                vec![ProfileCmd::Notify(NoticeKind::Error(
                    "Failed to update profile".into(),
                ))]
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<ProfileCmd> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if self.modal.is_some() {
            return self.handle_modal_key(key);
        }
        match key.code {
            KeyCode::Char('e') => {
                if let ProfileState::Ready(profile) = &self.state {
                    self.modal = Some(EditModal {
                        username: Input::new(profile.username.clone()),
                        password: Input::default(),
                        field: EditField::Username,
                    });
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Vec<ProfileCmd> {
        match key.code {
            KeyCode::Esc => {
                self.modal = None;
                Vec::new()
            }
            KeyCode::Tab | KeyCode::Up | KeyCode::Down | KeyCode::BackTab => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.field = match modal.field {
                        EditField::Username => EditField::Password,
                        EditField::Password => EditField::Username,
                    };
                }
                Vec::new()
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                if let Some(modal) = self.modal.as_mut() {
                    let input = match modal.field {
                        EditField::Username => &mut modal.username,
                        EditField::Password => &mut modal.password,
                    };
                    input.handle(InputRequest::InsertChar(c));
                }
                Vec::new()
            }
            KeyCode::Backspace => {
                if let Some(modal) = self.modal.as_mut() {
                    let input = match modal.field {
                        EditField::Username => &mut modal.username,
                        EditField::Password => &mut modal.password,
                    };
                    input.handle(InputRequest::DeletePrevChar);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn submit(&mut self) -> Vec<ProfileCmd> {
        let (ProfileState::Ready(profile), Some(modal)) = (&self.state, self.modal.as_ref()) else {
            return Vec::new();
        };
        let username = modal.username.value().trim();
        let password = modal.password.value();
        if username.is_empty() || password.is_empty() {
            return vec![ProfileCmd::Notify(NoticeKind::Error(
                "Username and new password are required".into(),
            ))];
        }
        vec![ProfileCmd::Update(ProfileUpdate::from_profile(
            profile, username, password,
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            email: "player@club.io".to_string(),
            username: "player".to_string(),
            is_active: true,
            is_superuser: false,
            is_verified: true,
            role_id: 0,
            games_played: 4,
            games_organized: 1,
        }
    }

    #[test]
    fn mount_fetches_profile() {
        let (view, cmds) = ProfileView::mount();
        assert!(matches!(view.state, ProfileState::Loading));
        assert_eq!(cmds, vec![ProfileCmd::Fetch]);
    }

    #[test]
    fn edit_submit_echoes_unchanged_fields() {
        let (mut view, _) = ProfileView::mount();
        view.update(ProfileMsg::Loaded(Ok(profile())));
        view.handle_key(key(KeyCode::Char('e')));
        {
            let modal = view.modal.as_mut().unwrap();
            modal.username = Input::new("renamed".to_string());
            modal.password = Input::new("new-pass".to_string());
        }
        let cmds = view.handle_key(key(KeyCode::Enter));
        match &cmds[..] {
            [ProfileCmd::Update(update)] => {
                assert_eq!(update.username, "renamed");
                assert_eq!(update.password, "new-pass");
                assert_eq!(update.email, "player@club.io");
                assert_eq!(update.games_played, 4);
                assert!(update.is_verified);
            }
            other => panic!("expected Update, got {other:?}"),
        }
    }

    #[test]
    fn update_success_closes_modal_and_refetches_once() {
        let (mut view, _) = ProfileView::mount();
        view.update(ProfileMsg::Loaded(Ok(profile())));
        view.handle_key(key(KeyCode::Char('e')));
        let cmds = view.update(ProfileMsg::Updated(Ok(profile())));
        assert!(view.modal.is_none());
        assert_eq!(
            cmds.iter().filter(|c| **c == ProfileCmd::Fetch).count(),
            1
        );
    }

    #[test]
    fn update_failure_keeps_modal_open() {
        let (mut view, _) = ProfileView::mount();
        view.update(ProfileMsg::Loaded(Ok(profile())));
        view.handle_key(key(KeyCode::Char('e')));
        let cmds = view.update(ProfileMsg::Updated(Err(ClientError::Api("no".into()))));
        assert!(view.modal.is_some());
        assert!(matches!(cmds[..], [ProfileCmd::Notify(NoticeKind::Error(_))]));
    }
}
