//! Command runtime
//!
//! Executes view commands against the `BookingApi` seam on spawned tasks
//! and feeds results back as messages. Every task carries the issuing
//! view's cancellation token: a response that settles after the user
//! navigated away is dropped, never applied.

use std::sync::Arc;

use booking_client::BookingApi;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::views::auth::AuthMsg;
use crate::views::profile::{ProfileCmd, ProfileMsg};
use crate::views::reservations::{BoardCmd, BoardMsg};
use crate::views::stations::{StationsCmd, StationsMsg};
use crate::views::verify::VerifyMsg;

#[derive(Debug)]
pub enum AppMsg {
    Board(BoardMsg),
    Stations(StationsMsg),
    Profile(ProfileMsg),
    Auth(AuthMsg),
    Verify(VerifyMsg),
    LoggedOut(Result<(), booking_client::ClientError>),
}

#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn BookingApi>,
    tx: UnboundedSender<AppMsg>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn BookingApi>, tx: UnboundedSender<AppMsg>) -> Self {
        Self { api, tx }
    }

    fn deliver(tx: &UnboundedSender<AppMsg>, token: &CancellationToken, msg: AppMsg) {
        if token.is_cancelled() {
            tracing::debug!("dropping settled response for unmounted view");
            return;
        }
        let _ = tx.send(msg);
    }

    pub fn board(&self, cmd: BoardCmd, token: CancellationToken) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        match cmd {
            BoardCmd::FetchAll => {
                tokio::spawn(async move {
                    let (reservations, stations) =
                        tokio::join!(api.reservations(), api.stations());
                    Self::deliver(
                        &tx,
                        &token,
                        AppMsg::Board(BoardMsg::FetchSettled {
                            reservations,
                            stations,
                        }),
                    );
                });
            }
            BoardCmd::Refetch => {
                tokio::spawn(async move {
                    let result = api.reservations().await;
                    Self::deliver(&tx, &token, AppMsg::Board(BoardMsg::Refreshed(result)));
                });
            }
            BoardCmd::Create(request) => {
                tokio::spawn(async move {
                    let result = api.create_reservation(&request).await;
                    Self::deliver(&tx, &token, AppMsg::Board(BoardMsg::Created(result)));
                });
            }
            BoardCmd::Delete(id) => {
                tokio::spawn(async move {
                    let result = api.delete_reservation(id).await;
                    Self::deliver(&tx, &token, AppMsg::Board(BoardMsg::Deleted(result)));
                });
            }
            BoardCmd::FetchSlots(date) => {
                tokio::spawn(async move {
                    let result = api.availability(date).await;
                    Self::deliver(
                        &tx,
                        &token,
                        AppMsg::Board(BoardMsg::Slots { date, result }),
                    );
                });
            }
            // notices are handled synchronously by the app shell
            BoardCmd::Notify(_) => {}
        }
    }

    pub fn stations(&self, cmd: StationsCmd, token: CancellationToken) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        match cmd {
            StationsCmd::Fetch => {
                tokio::spawn(async move {
                    let result = api.stations().await;
                    Self::deliver(&tx, &token, AppMsg::Stations(StationsMsg::Loaded(result)));
                });
            }
            StationsCmd::FetchReviews {
                station_id,
                station_name,
            } => {
                tokio::spawn(async move {
                    let result = api.reviews_by_station(station_id).await;
                    Self::deliver(
                        &tx,
                        &token,
                        AppMsg::Stations(StationsMsg::ReviewsLoaded {
                            station_id,
                            station_name,
                            result,
                        }),
                    );
                });
            }
            StationsCmd::SubmitReview(request) => {
                tokio::spawn(async move {
                    let result = api.create_review(&request).await;
                    Self::deliver(
                        &tx,
                        &token,
                        AppMsg::Stations(StationsMsg::ReviewSubmitted(result)),
                    );
                });
            }
            StationsCmd::Notify(_) => {}
        }
    }

    pub fn profile(&self, cmd: ProfileCmd, token: CancellationToken) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        match cmd {
            ProfileCmd::Fetch => {
                tokio::spawn(async move {
                    let result = api.me().await;
                    Self::deliver(&tx, &token, AppMsg::Profile(ProfileMsg::Loaded(result)));
                });
            }
            ProfileCmd::Update(update) => {
                tokio::spawn(async move {
                    let result = api.update_me(&update).await;
                    Self::deliver(&tx, &token, AppMsg::Profile(ProfileMsg::Updated(result)));
                });
            }
            ProfileCmd::Notify(_) => {}
        }
    }

    pub fn login(&self, email: String, password: String, token: CancellationToken) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.login(&email, &password).await;
            Self::deliver(&tx, &token, AppMsg::Auth(AuthMsg::LoggedIn(result)));
        });
    }

    pub fn register(&self, request: shared::client::RegisterRequest, token: CancellationToken) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.register(&request).await;
            Self::deliver(&tx, &token, AppMsg::Auth(AuthMsg::Registered(result)));
        });
    }

    /// Fire-and-forget; a failed resend only leaves a log line, the token
    /// screen is already up and the user can retry from there.
    pub fn request_verify_token(&self, email: String) {
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.request_verify_token(&email).await {
                tracing::warn!(error = %e, "verification token request failed");
            }
        });
    }

    pub fn verify(&self, verification_token: String, token: CancellationToken) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.verify(&verification_token).await;
            Self::deliver(&tx, &token, AppMsg::Verify(VerifyMsg::Verified(result)));
        });
    }

    pub fn logout(&self, token: CancellationToken) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.logout().await;
            Self::deliver(&tx, &token, AppMsg::LoggedOut(result));
        });
    }
}
