//! Application shell
//!
//! Owns the active screen, routes keys and settled responses to the view
//! reducers and turns their commands into dispatcher calls or notices.
//! Navigating away cancels the outgoing view's token, so late responses
//! from the old screen never touch the new one.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio_util::sync::CancellationToken;

use crate::notify::Notices;
use crate::runtime::{AppMsg, Dispatcher};
use crate::views::auth::{AuthCmd, AuthView};
use crate::views::profile::{ProfileCmd, ProfileView};
use crate::views::reservations::{BoardCmd, ReservationBoard};
use crate::views::stations::{StationDirectory, StationsCmd};
use crate::views::verify::{VerifyCmd, VerifyView};
use crate::views::Screen;

pub struct App {
    pub screen: Screen,
    pub auth: AuthView,
    pub verify: VerifyView,
    pub board: Option<ReservationBoard>,
    pub directory: Option<StationDirectory>,
    pub profile: Option<ProfileView>,
    pub notices: Notices,
    pub confirm_cancel: bool,
    pub should_quit: bool,
    dispatcher: Dispatcher,
    view_token: CancellationToken,
}

impl App {
    pub fn new(dispatcher: Dispatcher, confirm_cancel: bool) -> Self {
        Self {
            screen: Screen::Login,
            auth: AuthView::default(),
            verify: VerifyView::default(),
            board: None,
            directory: None,
            profile: None,
            notices: Notices::default(),
            confirm_cancel,
            should_quit: false,
            dispatcher,
            view_token: CancellationToken::new(),
        }
    }

    /// Unmounts the current view and mounts the target.
    pub fn navigate(&mut self, target: Screen) {
        self.view_token.cancel();
        self.view_token = CancellationToken::new();
        self.board = None;
        self.directory = None;
        self.profile = None;
        self.screen = target;
        tracing::debug!(?target, "navigating");
        match target {
            Screen::Login => {
                self.auth = AuthView::default();
            }
            Screen::VerifyToken => {
                self.verify = VerifyView::default();
            }
            Screen::Reservations => {
                let (board, cmds) = ReservationBoard::mount();
                self.board = Some(board);
                self.apply_board(cmds);
            }
            Screen::Profile => {
                let (profile, cmds) = ProfileView::mount();
                self.profile = Some(profile);
                self.apply_profile(cmds);
            }
            Screen::Stations => {
                let (directory, cmds) = StationDirectory::mount();
                self.directory = Some(directory);
                self.apply_stations(cmds);
            }
        }
    }

    /// Drops expired notices; called from the main loop tick.
    pub fn tick(&mut self) {
        self.notices.prune();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.in_shell() && !self.dialog_open() {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('1') => {
                    if self.screen != Screen::Reservations {
                        self.navigate(Screen::Reservations);
                    }
                    return;
                }
                KeyCode::Char('2') => {
                    if self.screen != Screen::Profile {
                        self.navigate(Screen::Profile);
                    }
                    return;
                }
                KeyCode::Char('3') => {
                    if self.screen != Screen::Stations {
                        self.navigate(Screen::Stations);
                    }
                    return;
                }
                KeyCode::Char('l') => {
                    self.dispatcher.logout(self.view_token.clone());
                    return;
                }
                _ => {}
            }
        }
        match self.screen {
            Screen::Login => {
                let cmds = self.auth.handle_key(key);
                self.apply_auth(cmds);
            }
            Screen::VerifyToken => {
                let cmds = self.verify.handle_key(key);
                self.apply_verify(cmds);
            }
            Screen::Reservations => {
                let confirm = self.confirm_cancel;
                if let Some(board) = self.board.as_mut() {
                    let cmds = board.handle_key(key, confirm);
                    self.apply_board(cmds);
                }
            }
            Screen::Profile => {
                if let Some(profile) = self.profile.as_mut() {
                    let cmds = profile.handle_key(key);
                    self.apply_profile(cmds);
                }
            }
            Screen::Stations => {
                if let Some(directory) = self.directory.as_mut() {
                    let cmds = directory.handle_key(key);
                    self.apply_stations(cmds);
                }
            }
        }
    }

    pub fn handle_msg(&mut self, msg: AppMsg) {
        match msg {
            AppMsg::Board(m) => {
                if let Some(board) = self.board.as_mut() {
                    let cmds = board.update(m);
                    self.apply_board(cmds);
                }
            }
            AppMsg::Stations(m) => {
                if let Some(directory) = self.directory.as_mut() {
                    let cmds = directory.update(m);
                    self.apply_stations(cmds);
                }
            }
            AppMsg::Profile(m) => {
                if let Some(profile) = self.profile.as_mut() {
                    let cmds = profile.update(m);
                    self.apply_profile(cmds);
                }
            }
            AppMsg::Auth(m) => {
                let cmds = self.auth.update(m);
                self.apply_auth(cmds);
            }
            AppMsg::Verify(m) => {
                let cmds = self.verify.update(m);
                self.apply_verify(cmds);
            }
            AppMsg::LoggedOut(Ok(())) => {
                self.navigate(Screen::Login);
                self.notices
                    .push(crate::notify::Notice::success("Logged out"));
            }
            AppMsg::LoggedOut(Err(e)) => {
                tracing::warn!(error = %e, "logout failed");
                self.notices
                    .push(crate::notify::Notice::error("Logout failed"));
            }
        }
    }

    /// True on the three screens that share the navigation sidebar.
    fn in_shell(&self) -> bool {
        matches!(
            self.screen,
            Screen::Reservations | Screen::Profile | Screen::Stations
        )
    }

    /// A modal or dialog is consuming keys; shell shortcuts stay inert.
    fn dialog_open(&self) -> bool {
        match self.screen {
            Screen::Reservations => self.board.as_ref().is_some_and(|b| {
                b.modal.is_some() || b.payment.is_some() || b.pending_cancel.is_some()
            }),
            Screen::Stations => self
                .directory
                .as_ref()
                .is_some_and(|d| d.review_list.is_some() || d.add_review.is_some()),
            Screen::Profile => self.profile.as_ref().is_some_and(|p| p.modal.is_some()),
            _ => false,
        }
    }

    fn apply_board(&mut self, cmds: Vec<BoardCmd>) {
        for cmd in cmds {
            match cmd {
                BoardCmd::Notify(kind) => self.notices.push(kind.into_notice()),
                other => self.dispatcher.board(other, self.view_token.clone()),
            }
        }
    }

    fn apply_stations(&mut self, cmds: Vec<StationsCmd>) {
        for cmd in cmds {
            match cmd {
                StationsCmd::Notify(kind) => self.notices.push(kind.into_notice()),
                other => self.dispatcher.stations(other, self.view_token.clone()),
            }
        }
    }

    fn apply_profile(&mut self, cmds: Vec<ProfileCmd>) {
        for cmd in cmds {
            match cmd {
                ProfileCmd::Notify(kind) => self.notices.push(kind.into_notice()),
                other => self.dispatcher.profile(other, self.view_token.clone()),
            }
        }
    }

    fn apply_auth(&mut self, cmds: Vec<AuthCmd>) {
        for cmd in cmds {
            match cmd {
                AuthCmd::Login { email, password } => {
                    self.dispatcher
                        .login(email, password, self.view_token.clone());
                }
                AuthCmd::Register(request) => {
                    self.dispatcher.register(request, self.view_token.clone());
                }
                AuthCmd::RequestVerifyToken { email } => {
                    self.dispatcher.request_verify_token(email);
                }
                AuthCmd::Navigate(screen) => self.navigate(screen),
                AuthCmd::Notify(kind) => self.notices.push(kind.into_notice()),
            }
        }
    }

    fn apply_verify(&mut self, cmds: Vec<VerifyCmd>) {
        for cmd in cmds {
            match cmd {
                VerifyCmd::Verify { token } => {
                    self.dispatcher.verify(token, self.view_token.clone());
                }
                VerifyCmd::Navigate(screen) => self.navigate(screen),
                VerifyCmd::Notify(kind) => self.notices.push(kind.into_notice()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::StubApi;
    use crate::views::auth::AuthMsg;
    use crate::views::reservations::BoardState;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(Dispatcher::new(Arc::new(StubApi), tx), true)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn successful_login_lands_on_the_board() {
        let mut app = app();
        app.handle_msg(AppMsg::Auth(AuthMsg::LoggedIn(Ok(()))));

        assert_eq!(app.screen, Screen::Reservations);
        let board = app.board.as_ref().unwrap();
        assert_eq!(board.state, BoardState::Loading);
        assert!(!app.notices.is_empty());
    }

    #[tokio::test]
    async fn logout_drops_the_session_views() {
        let mut app = app();
        app.navigate(Screen::Stations);
        app.handle_msg(AppMsg::LoggedOut(Ok(())));

        assert_eq!(app.screen, Screen::Login);
        assert!(app.directory.is_none());
    }

    #[tokio::test]
    async fn shell_keys_switch_screens() {
        let mut app = app();
        app.navigate(Screen::Reservations);
        app.handle_key(press(KeyCode::Char('3')));

        assert_eq!(app.screen, Screen::Stations);
        assert!(app.board.is_none());
        assert!(app.directory.is_some());
    }

    #[tokio::test]
    async fn shell_keys_are_inert_while_a_dialog_is_open() {
        let mut app = app();
        app.navigate(Screen::Reservations);
        app.board.as_mut().unwrap().payment = Some("https://pay.example".to_string());

        app.handle_key(press(KeyCode::Char('3')));
        assert_eq!(app.screen, Screen::Reservations);

        app.handle_key(press(KeyCode::Char('q')));
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn ctrl_c_always_quits() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
