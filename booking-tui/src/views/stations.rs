//! Station directory and review flow
//!
//! Lists stations and hosts two modals: a read-only review list and an
//! add-review form. Each modal owns its own station context, captured at
//! the moment its action is invoked, so reopening one modal for a different
//! station can never bleed into the other.

use booking_client::ClientError;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use shared::models::{Review, ReviewCreate, Station};
use tui_input::{Input, InputRequest};

use crate::notify::NoticeKind;

pub const DEFAULT_RATING: f32 = 5.0;
const RATING_STEP: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    Loading,
    Ready,
}

/// Read-only review list, scoped to the station it was opened for.
#[derive(Debug)]
pub struct ReviewListModal {
    pub station_id: i64,
    pub station_name: String,
    pub reviews: Vec<Review>,
    pub scroll: usize,
}

/// Add-review form, scoped to the station it was opened for.
#[derive(Debug)]
pub struct AddReviewModal {
    pub station_id: i64,
    pub station_name: String,
    pub rating: f32,
    pub comment: Input,
}

#[derive(Debug)]
pub enum StationsMsg {
    Loaded(Result<Vec<Station>, ClientError>),
    ReviewsLoaded {
        station_id: i64,
        station_name: String,
        result: Result<Vec<Review>, ClientError>,
    },
    ReviewSubmitted(Result<(), ClientError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StationsCmd {
    Fetch,
    FetchReviews { station_id: i64, station_name: String },
    SubmitReview(ReviewCreate),
    Notify(NoticeKind),
}

#[derive(Debug)]
pub struct StationDirectory {
    pub state: DirectoryState,
    pub stations: Vec<Station>,
    pub selected: usize,
    pub review_list: Option<ReviewListModal>,
    pub add_review: Option<AddReviewModal>,
}

impl StationDirectory {
    pub fn mount() -> (Self, Vec<StationsCmd>) {
        let directory = Self {
            state: DirectoryState::Loading,
            stations: Vec::new(),
            selected: 0,
            review_list: None,
            add_review: None,
        };
        (directory, vec![StationsCmd::Fetch])
    }

    pub fn update(&mut self, msg: StationsMsg) -> Vec<StationsCmd> {
        match msg {
            StationsMsg::Loaded(Ok(rows)) => {
                self.state = DirectoryState::Ready;
                self.stations = rows;
                Vec::new()
            }
            StationsMsg::Loaded(Err(e)) => {
                tracing::warn!(error = %e, "station fetch failed");
                self.state = DirectoryState::Ready;
                vec![StationsCmd::Notify(NoticeKind::Error(
                    "Failed to fetch stations".into(),
                ))]
            }
            StationsMsg::ReviewsLoaded {
                station_id,
                station_name,
                result,
            } => match result {
                Ok(reviews) => {
                    self.review_list = Some(ReviewListModal {
                        station_id,
                        station_name,
                        reviews,
                        scroll: 0,
                    });
                    Vec::new()
                }
                Err(e) => {
                    tracing::warn!(error = %e, station_id, "review fetch failed");
                    vec![StationsCmd::Notify(NoticeKind::Error(
                        "Failed to fetch reviews".into(),
                    ))]
                }
            },
            StationsMsg::ReviewSubmitted(Ok(())) => {
                // closes only the add-review modal; a review list open for
                // another station stays up
                self.add_review = None;
                vec![StationsCmd::Notify(NoticeKind::Success(
                    "Review added successfully".into(),
                ))]
            }
            StationsMsg::ReviewSubmitted(Err(e)) => {
                tracing::warn!(error = %e, "review submit failed");
                // modal stays open with entered values intact
                vec![StationsCmd::Notify(NoticeKind::Error(
                    "Failed to add review".into(),
                ))]
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<StationsCmd> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        // the add-review form takes input priority over the review list
        if self.add_review.is_some() {
            return self.handle_add_review_key(key);
        }
        if let Some(list) = self.review_list.as_mut() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.review_list = None,
                KeyCode::Up => list.scroll = list.scroll.saturating_sub(1),
                KeyCode::Down => {
                    if list.scroll + 1 < list.reviews.len() {
                        list.scroll += 1;
                    }
                }
                _ => {}
            }
            return Vec::new();
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.stations.len() {
                    self.selected += 1;
                }
                Vec::new()
            }
            KeyCode::Char('r') => {
                let Some(station) = self.stations.get(self.selected) else {
                    return Vec::new();
                };
                vec![StationsCmd::FetchReviews {
                    station_id: station.id,
                    station_name: station.name.clone(),
                }]
            }
            KeyCode::Char('a') => {
                let Some(station) = self.stations.get(self.selected) else {
                    return Vec::new();
                };
                self.add_review = Some(AddReviewModal {
                    station_id: station.id,
                    station_name: station.name.clone(),
                    rating: DEFAULT_RATING,
                    comment: Input::default(),
                });
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_add_review_key(&mut self, key: KeyEvent) -> Vec<StationsCmd> {
        let Some(modal) = self.add_review.as_mut() else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Esc => {
                self.add_review = None;
                Vec::new()
            }
            KeyCode::Enter => {
                if modal.comment.value().trim().is_empty() {
                    return vec![StationsCmd::Notify(NoticeKind::Error(
                        "Please input your comment".into(),
                    ))];
                }
                // selection context is the modal's own, fixed at open time
                vec![StationsCmd::SubmitReview(ReviewCreate {
                    station_id: modal.station_id,
                    rating: modal.rating,
                    comment: modal.comment.value().trim().to_string(),
                })]
            }
            KeyCode::Up | KeyCode::Right => {
                modal.rating = (modal.rating + RATING_STEP).min(5.0);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Left => {
                modal.rating = (modal.rating - RATING_STEP).max(0.0);
                Vec::new()
            }
            KeyCode::Char(c) => {
                modal.comment.handle(InputRequest::InsertChar(c));
                Vec::new()
            }
            KeyCode::Backspace => {
                modal.comment.handle(InputRequest::DeletePrevChar);
                Vec::new()
            }
            _ => Vec::new(),
        }
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
            kind: "pc".to_string(),
            is_working: Some(true),
        }
    }

    fn ready_directory() -> StationDirectory {
        let (mut directory, _) = StationDirectory::mount();
        directory.update(StationsMsg::Loaded(Ok(vec![
            station(1000, "PS5 #1"),
            station(1001, "Rig A"),
        ])));
        directory
    }

    #[test]
    fn mount_fetches_stations() {
        let (directory, cmds) = StationDirectory::mount();
        assert_eq!(directory.state, DirectoryState::Loading);
        assert_eq!(cmds, vec![StationsCmd::Fetch]);
    }

    #[test]
    fn view_reviews_captures_selection_at_invocation() {
        let mut directory = ready_directory();
        directory.handle_key(key(KeyCode::Down));
        let cmds = directory.handle_key(key(KeyCode::Char('r')));
        assert_eq!(
            cmds,
            vec![StationsCmd::FetchReviews {
                station_id: 1001,
                station_name: "Rig A".to_string()
            }]
        );
    }

    #[test]
    fn loaded_reviews_open_scoped_modal() {
        let mut directory = ready_directory();
        directory.update(StationsMsg::ReviewsLoaded {
            station_id: 1000,
            station_name: "PS5 #1".to_string(),
            result: Ok(vec![Review {
                id: Some(1),
                user_id: 5,
                station_id: 1000,
                rating: 4.5,
                comment: Some("solid".to_string()),
                created_at: Some("2024-05-30T18:22:00".to_string()),
            }]),
        });
        let list = directory.review_list.as_ref().unwrap();
        assert_eq!(list.station_id, 1000);
        assert_eq!(list.reviews.len(), 1);
    }

    #[test]
    fn review_fetch_failure_leaves_modal_closed() {
        let mut directory = ready_directory();
        let cmds = directory.update(StationsMsg::ReviewsLoaded {
            station_id: 1000,
            station_name: "PS5 #1".to_string(),
            result: Err(ClientError::Internal("down".into())),
        });
        assert!(directory.review_list.is_none());
        assert!(matches!(cmds[..], [StationsCmd::Notify(NoticeKind::Error(_))]));
    }

    #[test]
    fn add_review_submits_against_its_own_station() {
        let mut directory = ready_directory();

        // review list open for station A
        directory.update(StationsMsg::ReviewsLoaded {
            station_id: 1000,
            station_name: "PS5 #1".to_string(),
            result: Ok(Vec::new()),
        });
        // add-review opened for station B while A's list stays up
        directory.add_review = Some(AddReviewModal {
            station_id: 1001,
            station_name: "Rig A".to_string(),
            rating: 3.5,
            comment: Input::new("Great setup".to_string()),
        });

        let cmds = directory.handle_key(key(KeyCode::Enter));
        assert_eq!(
            cmds,
            vec![StationsCmd::SubmitReview(ReviewCreate {
                station_id: 1001,
                rating: 3.5,
                comment: "Great setup".to_string(),
            })]
        );
        assert!(directory.review_list.is_some());
    }

    #[test]
    fn rating_moves_in_half_steps_and_clamps() {
        let mut directory = ready_directory();
        directory.handle_key(key(KeyCode::Char('a')));
        assert_eq!(directory.add_review.as_ref().unwrap().rating, 5.0);

        directory.handle_key(key(KeyCode::Up));
        assert_eq!(directory.add_review.as_ref().unwrap().rating, 5.0);

        directory.handle_key(key(KeyCode::Down));
        assert_eq!(directory.add_review.as_ref().unwrap().rating, 4.5);

        for _ in 0..20 {
            directory.handle_key(key(KeyCode::Down));
        }
        assert_eq!(directory.add_review.as_ref().unwrap().rating, 0.0);
    }

    #[test]
    fn empty_comment_is_rejected() {
        let mut directory = ready_directory();
        directory.handle_key(key(KeyCode::Char('a')));
        let cmds = directory.handle_key(key(KeyCode::Enter));
        assert!(matches!(cmds[..], [StationsCmd::Notify(NoticeKind::Error(_))]));
        assert!(directory.add_review.is_some());
    }

    #[test]
    fn failed_submit_keeps_form_state() {
        let mut directory = ready_directory();
        directory.handle_key(key(KeyCode::Char('a')));
        directory.add_review.as_mut().unwrap().comment = Input::new("keep me".to_string());

        let cmds = directory.update(StationsMsg::ReviewSubmitted(Err(ClientError::Api(
            "nope".into(),
        ))));
        assert!(matches!(cmds[..], [StationsCmd::Notify(NoticeKind::Error(_))]));
        let modal = directory.add_review.as_ref().unwrap();
        assert_eq!(modal.comment.value(), "keep me");
    }

    #[test]
    fn successful_submit_closes_only_add_review() {
        let mut directory = ready_directory();
        directory.update(StationsMsg::ReviewsLoaded {
            station_id: 1000,
            station_name: "PS5 #1".to_string(),
            result: Ok(Vec::new()),
        });
        directory.handle_key(key(KeyCode::Char('a')));
        assert!(directory.add_review.is_none()); // list consumed the key

        directory.review_list = None;
        directory.handle_key(key(KeyCode::Char('a')));
        directory.update(StationsMsg::ReviewsLoaded {
            station_id: 1000,
            station_name: "PS5 #1".to_string(),
            result: Ok(Vec::new()),
        });

        directory.update(StationsMsg::ReviewSubmitted(Ok(())));
        assert!(directory.add_review.is_none());
        assert!(directory.review_list.is_some());
    }
}
