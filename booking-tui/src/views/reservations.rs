//! Reservation board
//!
//! `Loading -> Ready`; both the reservation list and the station list are
//! fetched jointly on mount and must settle before the board renders.
//! Mutations never patch local state: every successful create or cancel
//! triggers exactly one list refetch.

use std::collections::HashMap;

use booking_client::ClientError;
use chrono::{NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use shared::models::{Reservation, ReservationCreate, ReservationCreated, Station};
use tui_input::{Input, InputRequest};

use crate::notify::NoticeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    Loading,
    Ready,
}

/// Field focus inside the create modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    Station,
    Date,
    Time,
    Amount,
}

/// Create-reservation form. Stations come from the board's last fetch;
/// free time slots for the chosen date are fetched as a hint.
#[derive(Debug)]
pub struct CreateModal {
    pub station_idx: usize,
    pub date: Input,
    pub time: Input,
    pub amount: Input,
    pub field: CreateField,
    pub slots: Vec<String>,
    slots_for: Option<NaiveDate>,
}

impl CreateModal {
    fn new() -> Self {
        Self {
            station_idx: 0,
            date: Input::default(),
            time: Input::default(),
            amount: Input::default(),
            field: CreateField::Station,
            slots: Vec::new(),
            slots_for: None,
        }
    }
}

#[derive(Debug)]
pub enum BoardMsg {
    /// Both mount fetches settled (each side independently).
    FetchSettled {
        reservations: Result<Vec<Reservation>, ClientError>,
        stations: Result<Vec<Station>, ClientError>,
    },
    Refreshed(Result<Vec<Reservation>, ClientError>),
    Created(Result<ReservationCreated, ClientError>),
    Deleted(Result<(), ClientError>),
    Slots {
        date: NaiveDate,
        result: Result<Vec<String>, ClientError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardCmd {
    /// Joint reservation + station fetch (mount).
    FetchAll,
    /// Reservation list refetch (after a mutation).
    Refetch,
    Create(ReservationCreate),
    Delete(i64),
    FetchSlots(NaiveDate),
    Notify(NoticeKind),
}

#[derive(Debug)]
pub struct ReservationBoard {
    pub state: BoardState,
    pub reservations: Vec<Reservation>,
    pub stations: Vec<Station>,
    pub station_index: HashMap<i64, Station>,
    pub selected: usize,
    pub modal: Option<CreateModal>,
    /// Payment dialog holding the `payment_url` of the last creation.
    pub payment: Option<String>,
    /// Reservation id awaiting cancel confirmation.
    pub pending_cancel: Option<i64>,
}

impl ReservationBoard {
    /// Mounts the board in `Loading` and issues the joint fetch.
    pub fn mount() -> (Self, Vec<BoardCmd>) {
        let board = Self {
            state: BoardState::Loading,
            reservations: Vec::new(),
            stations: Vec::new(),
            station_index: HashMap::new(),
            selected: 0,
            modal: None,
            payment: None,
            pending_cancel: None,
        };
        (board, vec![BoardCmd::FetchAll])
    }

    /// Station enrichment for a card; `None` when the two fetches raced and
    /// the id is not in the index (tolerated silently).
    pub fn station_for(&self, reservation: &Reservation) -> Option<&Station> {
        self.station_index.get(&reservation.station_id)
    }

    fn rebuild_index(&mut self) {
        self.station_index = self
            .stations
            .iter()
            .map(|s| (s.id, s.clone()))
            .collect();
    }

    pub fn update(&mut self, msg: BoardMsg) -> Vec<BoardCmd> {
        match msg {
            BoardMsg::FetchSettled {
                reservations,
                stations,
            } => {
                self.state = BoardState::Ready;
                let mut failed = false;
                match reservations {
                    Ok(rows) => self.reservations = rows,
                    Err(e) => {
                        tracing::warn!(error = %e, "reservation fetch failed");
                        failed = true;
                    }
                }
                match stations {
                    Ok(rows) => self.stations = rows,
                    Err(e) => {
                        tracing::warn!(error = %e, "station fetch failed");
                        failed = true;
                    }
                }
                self.rebuild_index();
                if failed {
                    vec![BoardCmd::Notify(NoticeKind::Error(
                        "Failed to fetch reservations or stations".into(),
                    ))]
                } else {
                    Vec::new()
                }
            }
            BoardMsg::Refreshed(Ok(rows)) => {
                self.reservations = rows;
                if self.selected >= self.reservations.len() {
                    self.selected = self.reservations.len().saturating_sub(1);
                }
                Vec::new()
            }
            BoardMsg::Refreshed(Err(e)) => {
                tracing::warn!(error = %e, "reservation refetch failed");
                vec![BoardCmd::Notify(NoticeKind::Error(
                    "Failed to refresh reservations".into(),
                ))]
            }
            BoardMsg::Created(Ok(created)) => {
                self.payment = Some(created.payment_url);
                vec![
                    BoardCmd::Notify(NoticeKind::Success(
                        "Reservation created successfully".into(),
                    )),
                    BoardCmd::Refetch,
                ]
            }
            BoardMsg::Created(Err(e)) => {
                tracing::warn!(error = %e, "reservation create failed");
                vec![BoardCmd::Notify(NoticeKind::Error(
                    "Failed to create reservation".into(),
                ))]
            }
            BoardMsg::Deleted(Ok(())) => vec![
                BoardCmd::Notify(NoticeKind::Success(
                    "Reservation deleted successfully".into(),
                )),
                BoardCmd::Refetch,
            ],
            BoardMsg::Deleted(Err(e)) => {
                tracing::warn!(error = %e, "reservation delete failed");
                vec![BoardCmd::Notify(NoticeKind::Error(
                    "Failed to delete reservation".into(),
                ))]
            }
            BoardMsg::Slots { date, result } => {
                if let Some(modal) = self.modal.as_mut() {
                    // only apply slots for the date still shown in the form
                    if modal.slots_for == Some(date) {
                        // a failed hint fetch degrades to no hint, no notice
                        modal.slots = result.unwrap_or_default();
                    }
                }
                Vec::new()
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, confirm_cancel: bool) -> Vec<BoardCmd> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if self.payment.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.payment = None;
            }
            return Vec::new();
        }
        if let Some(id) = self.pending_cancel {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.pending_cancel = None;
                    vec![BoardCmd::Delete(id)]
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.pending_cancel = None;
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }
        if self.modal.is_some() {
            return self.handle_modal_key(key);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.reservations.len() {
                    self.selected += 1;
                }
                Vec::new()
            }
            KeyCode::Char('n') => {
                if self.stations.is_empty() {
                    return vec![BoardCmd::Notify(NoticeKind::Error(
                        "No stations available".into(),
                    ))];
                }
                self.modal = Some(CreateModal::new());
                Vec::new()
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let Some(reservation) = self.reservations.get(self.selected) else {
                    return Vec::new();
                };
                if confirm_cancel {
                    self.pending_cancel = Some(reservation.id);
                    Vec::new()
                } else {
                    vec![BoardCmd::Delete(reservation.id)]
                }
            }
            _ => Vec::new(),
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Vec<BoardCmd> {
        match key.code {
            KeyCode::Esc => {
                self.modal = None;
                Vec::new()
            }
            KeyCode::Enter => self.submit_modal(),
            KeyCode::Tab | KeyCode::Down => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.field = match modal.field {
                        CreateField::Station => CreateField::Date,
                        CreateField::Date => CreateField::Time,
                        CreateField::Time => CreateField::Amount,
                        CreateField::Amount => CreateField::Station,
                    };
                }
                Vec::new()
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.field = match modal.field {
                        CreateField::Station => CreateField::Amount,
                        CreateField::Date => CreateField::Station,
                        CreateField::Time => CreateField::Date,
                        CreateField::Amount => CreateField::Time,
                    };
                }
                Vec::new()
            }
            KeyCode::Left | KeyCode::Right => {
                if let Some(modal) = self.modal.as_mut() {
                    if modal.field == CreateField::Station && !self.stations.is_empty() {
                        let len = self.stations.len();
                        modal.station_idx = if key.code == KeyCode::Right {
                            (modal.station_idx + 1) % len
                        } else {
                            (modal.station_idx + len - 1) % len
                        };
                    }
                }
                Vec::new()
            }
            KeyCode::Char(c) => self.edit_modal_input(InputRequest::InsertChar(c)),
            KeyCode::Backspace => self.edit_modal_input(InputRequest::DeletePrevChar),
            _ => Vec::new(),
        }
    }

    /// Routes an edit to the focused text field; a date that newly parses
    /// fires the availability hint fetch.
    fn edit_modal_input(&mut self, request: InputRequest) -> Vec<BoardCmd> {
        let Some(modal) = self.modal.as_mut() else {
            return Vec::new();
        };
        match modal.field {
            CreateField::Station => return Vec::new(),
            CreateField::Date => {
                modal.date.handle(request);
            }
            CreateField::Time => {
                modal.time.handle(request);
            }
            CreateField::Amount => {
                modal.amount.handle(request);
            }
        }
        if modal.field == CreateField::Date {
            if let Ok(date) = NaiveDate::parse_from_str(modal.date.value(), "%Y-%m-%d") {
                if modal.slots_for != Some(date) {
                    modal.slots_for = Some(date);
                    modal.slots.clear();
                    return vec![BoardCmd::FetchSlots(date)];
                }
            }
        }
        Vec::new()
    }

    /// Validates the form; on success the modal closes immediately and the
    /// creation request goes out (failure later only raises a notice).
    fn submit_modal(&mut self) -> Vec<BoardCmd> {
        let Some(modal) = self.modal.as_ref() else {
            return Vec::new();
        };
        let Some(station) = self.stations.get(modal.station_idx) else {
            return vec![BoardCmd::Notify(NoticeKind::Error(
                "Please choose a station".into(),
            ))];
        };
        let Ok(date) = NaiveDate::parse_from_str(modal.date.value(), "%Y-%m-%d") else {
            return vec![BoardCmd::Notify(NoticeKind::Error(
                "Date must be YYYY-MM-DD".into(),
            ))];
        };
        let Ok(start) = NaiveTime::parse_from_str(modal.time.value(), "%H:%M") else {
            return vec![BoardCmd::Notify(NoticeKind::Error(
                "Start time must be HH:MM".into(),
            ))];
        };
        let amount = if modal.amount.value().is_empty() {
            0.0
        } else {
            match modal.amount.value().parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    return vec![BoardCmd::Notify(NoticeKind::Error(
                        "Amount must be a number".into(),
                    ))]
                }
            }
        };

        let request = ReservationCreate::new(station.id, amount, date, start);
        self.modal = None;
        vec![BoardCmd::Create(request)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn station(id: i64, name: &str) -> Station {
        Station {
            id,
            name: name.to_string(),
            kind: "console".to_string(),
            is_working: Some(true),
        }
    }

    fn reservation(id: i64, station_id: i64) -> Reservation {
        Reservation {
            id,
            station_id,
            status: 0,
            user_id: None,
            staff_id: None,
            date: "2024-06-01T00:00:00".to_string(),
            start_time: "2024-06-01T10:00:00".to_string(),
            end_time: "2024-06-01T11:00:00".to_string(),
            created_at: None,
        }
    }

    fn ready_board() -> ReservationBoard {
        let (mut board, _) = ReservationBoard::mount();
        board.update(BoardMsg::FetchSettled {
            reservations: Ok(vec![reservation(42, 1000)]),
            stations: Ok(vec![station(1000, "PS5 #1"), station(1001, "Rig A")]),
        });
        board
    }

    fn refetch_count(cmds: &[BoardCmd]) -> usize {
        cmds.iter().filter(|c| **c == BoardCmd::Refetch).count()
    }

    #[test]
    fn mount_issues_joint_fetch() {
        let (board, cmds) = ReservationBoard::mount();
        assert_eq!(board.state, BoardState::Loading);
        assert_eq!(cmds, vec![BoardCmd::FetchAll]);
    }

    #[test]
    fn settled_fetch_builds_station_index() {
        let board = ready_board();
        assert_eq!(board.state, BoardState::Ready);
        assert_eq!(board.station_index.len(), 2);
        assert_eq!(
            board.station_for(&board.reservations[0]).map(|s| s.name.as_str()),
            Some("PS5 #1")
        );
    }

    #[test]
    fn station_failure_does_not_block_reservations() {
        let (mut board, _) = ReservationBoard::mount();
        let cmds = board.update(BoardMsg::FetchSettled {
            reservations: Ok(vec![reservation(42, 1000)]),
            stations: Err(ClientError::Internal("down".into())),
        });
        assert_eq!(board.state, BoardState::Ready);
        assert_eq!(board.reservations.len(), 1);
        assert!(board.station_index.is_empty());
        assert_eq!(
            cmds,
            vec![BoardCmd::Notify(NoticeKind::Error(
                "Failed to fetch reservations or stations".into()
            ))]
        );
        // card renders without enrichment
        assert!(board.station_for(&board.reservations[0]).is_none());
    }

    #[test]
    fn reservation_failure_keeps_station_directory() {
        let (mut board, _) = ReservationBoard::mount();
        board.update(BoardMsg::FetchSettled {
            reservations: Err(ClientError::Internal("down".into())),
            stations: Ok(vec![station(1000, "PS5 #1")]),
        });
        assert_eq!(board.state, BoardState::Ready);
        assert!(board.reservations.is_empty());
        assert_eq!(board.station_index.len(), 1);
    }

    #[test]
    fn submit_emits_normalized_create_and_closes_modal() {
        let mut board = ready_board();
        board.handle_key(key(KeyCode::Char('n')), true);
        {
            let modal = board.modal.as_mut().unwrap();
            modal.station_idx = 1; // Rig A, id 1001
            modal.date = Input::new("2024-06-01".to_string());
            modal.time = Input::new("10:00".to_string());
            modal.amount = Input::new("250".to_string());
        }
        let cmds = board.handle_key(key(KeyCode::Enter), true);
        assert!(board.modal.is_none());
        match &cmds[..] {
            [BoardCmd::Create(req)] => {
                assert_eq!(req.station_id, 1001);
                assert_eq!(req.status, 0);
                assert_eq!(req.date, "2024-06-01");
                assert_eq!(req.start_time, "2024-06-01T10:00:00");
                assert_eq!(req.amount, 250.0);
            }
            other => panic!("expected a single Create command, got {other:?}"),
        }
    }

    #[test]
    fn invalid_date_keeps_modal_open() {
        let mut board = ready_board();
        board.handle_key(key(KeyCode::Char('n')), true);
        board.modal.as_mut().unwrap().date = Input::new("06/01/2024".to_string());
        let cmds = board.handle_key(key(KeyCode::Enter), true);
        assert!(board.modal.is_some());
        assert!(matches!(cmds[..], [BoardCmd::Notify(_)]));
    }

    #[test]
    fn created_ok_opens_payment_dialog_and_refetches_once() {
        let mut board = ready_board();
        let cmds = board.update(BoardMsg::Created(Ok(ReservationCreated {
            payment_url: "https://pay.example/intent/abc".to_string(),
        })));
        assert_eq!(board.payment.as_deref(), Some("https://pay.example/intent/abc"));
        assert_eq!(refetch_count(&cmds), 1);
    }

    #[test]
    fn created_err_notifies_without_refetch() {
        let mut board = ready_board();
        let cmds = board.update(BoardMsg::Created(Err(ClientError::Api("slot taken".into()))));
        assert!(board.payment.is_none());
        assert_eq!(refetch_count(&cmds), 0);
        assert!(matches!(cmds[..], [BoardCmd::Notify(NoticeKind::Error(_))]));
    }

    #[test]
    fn delete_asks_for_confirmation_when_configured() {
        let mut board = ready_board();
        let cmds = board.handle_key(key(KeyCode::Char('d')), true);
        assert!(cmds.is_empty());
        assert_eq!(board.pending_cancel, Some(42));

        let cmds = board.handle_key(key(KeyCode::Char('y')), true);
        assert_eq!(cmds, vec![BoardCmd::Delete(42)]);
        assert!(board.pending_cancel.is_none());
    }

    #[test]
    fn delete_confirmation_can_be_declined() {
        let mut board = ready_board();
        board.handle_key(key(KeyCode::Char('d')), true);
        let cmds = board.handle_key(key(KeyCode::Esc), true);
        assert!(cmds.is_empty());
        assert!(board.pending_cancel.is_none());
    }

    #[test]
    fn delete_is_immediate_when_confirmation_off() {
        let mut board = ready_board();
        let cmds = board.handle_key(key(KeyCode::Char('d')), false);
        assert_eq!(cmds, vec![BoardCmd::Delete(42)]);
    }

    #[test]
    fn deleted_ok_refetches_exactly_once() {
        let mut board = ready_board();
        let cmds = board.update(BoardMsg::Deleted(Ok(())));
        assert_eq!(refetch_count(&cmds), 1);
    }

    #[test]
    fn deleted_err_keeps_stale_list_without_refetch() {
        let mut board = ready_board();
        let cmds = board.update(BoardMsg::Deleted(Err(ClientError::Internal("oops".into()))));
        assert_eq!(refetch_count(&cmds), 0);
        assert_eq!(board.reservations.len(), 1);
    }

    #[test]
    fn typing_a_full_date_fetches_slot_hints() {
        let mut board = ready_board();
        board.handle_key(key(KeyCode::Char('n')), true);
        board.handle_key(key(KeyCode::Tab), true); // focus date
        let mut cmds = Vec::new();
        for c in "2024-06-01".chars() {
            cmds.extend(board.handle_key(key(KeyCode::Char(c)), true));
        }
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(cmds, vec![BoardCmd::FetchSlots(expected)]);

        let applied = board.update(BoardMsg::Slots {
            date: expected,
            result: Ok(vec!["10:00".to_string(), "11:00".to_string()]),
        });
        assert!(applied.is_empty());
        assert_eq!(board.modal.as_ref().unwrap().slots.len(), 2);
    }

    #[test]
    fn slot_failure_degrades_to_empty_hint() {
        let mut board = ready_board();
        board.handle_key(key(KeyCode::Char('n')), true);
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        board.modal.as_mut().unwrap().slots_for = Some(date);
        let cmds = board.update(BoardMsg::Slots {
            date,
            result: Err(ClientError::Internal("down".into())),
        });
        assert!(cmds.is_empty());
        assert!(board.modal.as_ref().unwrap().slots.is_empty());
    }
}
