//! Terminal rendering
//!
//! Pure view layer over `App`; no state changes happen here.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use shared::models::{Reservation, STATUS_PENDING_PAYMENT};
use shared::util::{format_date, format_time};
use tui_input::Input;

use crate::app::App;
use crate::notify::NoticeLevel;
use crate::views::auth::{AuthField, AuthMode};
use crate::views::profile::{EditField, ProfileState, ProfileView};
use crate::views::reservations::{BoardState, CreateField, ReservationBoard};
use crate::views::stations::{DirectoryState, StationDirectory};
use crate::views::Screen;

pub fn draw(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => draw_auth(f, app),
        Screen::VerifyToken => draw_verify(f, app),
        Screen::Reservations | Screen::Profile | Screen::Stations => draw_shell(f, app),
    }
}

// =============================================================================
// Auth screens
// =============================================================================

fn draw_auth(f: &mut Frame, app: &App) {
    let view = &app.auth;
    let registering = view.mode == AuthMode::Register;
    let height = if registering { 14 } else { 11 };
    let area = popup_area(f.area(), 52, height);

    let title = if registering {
        " Booking Club | Register "
    } else {
        " Booking Club | Login "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner = area.inner(ratatui::layout::Margin {
        horizontal: 2,
        vertical: 1,
    });
    let mut constraints = vec![Constraint::Length(3)];
    if registering {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut row = 0;
    render_input(
        f,
        rows[row],
        " Email ",
        &view.email,
        view.field == AuthField::Email,
        false,
    );
    row += 1;
    if registering {
        render_input(
            f,
            rows[row],
            " Username ",
            &view.username,
            view.field == AuthField::Username,
            false,
        );
        row += 1;
    }
    render_input(
        f,
        rows[row],
        " Password ",
        &view.password,
        view.field == AuthField::Password,
        true,
    );
    row += 1;

    let hint = if registering {
        "Enter submit | F2 login | Tab next field"
    } else {
        "Enter submit | F2 register | Tab next field"
    };
    let hint = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hint, rows[row]);

    draw_notice_line(f, app, f.area());
}

fn draw_verify(f: &mut Frame, app: &App) {
    let area = popup_area(f.area(), 52, 8);
    let block = Block::default()
        .title(" Verify your email ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner = area.inner(ratatui::layout::Margin {
        horizontal: 2,
        vertical: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(inner);

    render_input(f, rows[0], " Token ", &app.verify.token, true, false);
    let hint = Paragraph::new("Enter submit | Esc back to login")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hint, rows[1]);

    draw_notice_line(f, app, f.area());
}

// =============================================================================
// Shell (sidebar + content + status line)
// =============================================================================

fn draw_shell(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(1)])
        .split(outer[0]);

    draw_sidebar(f, app, main[0]);
    match app.screen {
        Screen::Reservations => {
            if let Some(board) = app.board.as_ref() {
                draw_board(f, board, main[1]);
            }
        }
        Screen::Profile => {
            if let Some(profile) = app.profile.as_ref() {
                draw_profile(f, profile, main[1]);
            }
        }
        Screen::Stations => {
            if let Some(directory) = app.directory.as_ref() {
                draw_directory(f, directory, main[1]);
            }
        }
        _ => {}
    }
    draw_status_line(f, app, outer[1]);
}

fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let entry = |label: &str, screen: Screen| {
        let style = if app.screen == screen {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        ListItem::new(Line::from(Span::styled(label.to_string(), style)))
    };
    let items = vec![
        entry(" 1 Reservations", Screen::Reservations),
        entry(" 2 Profile", Screen::Profile),
        entry(" 3 Stations", Screen::Stations),
        ListItem::new(""),
        ListItem::new(Span::styled(" l Logout", Style::default().fg(Color::Gray))),
        ListItem::new(Span::styled(" q Quit", Style::default().fg(Color::Gray))),
    ];
    let list = List::new(items).block(
        Block::default()
            .title(" Booking Club ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, area);
}

fn draw_status_line(f: &mut Frame, app: &App, area: Rect) {
    if app.notices.is_empty() {
        return;
    }
    if let Some(notice) = app.notices.latest() {
        let style = match notice.level {
            NoticeLevel::Success => Style::default().fg(Color::Green),
            NoticeLevel::Error => Style::default().fg(Color::Red),
        };
        f.render_widget(Paragraph::new(notice.text.clone()).style(style), area);
    }
}

fn draw_notice_line(f: &mut Frame, app: &App, screen: Rect) {
    if let Some(notice) = app.notices.latest() {
        let style = match notice.level {
            NoticeLevel::Success => Style::default().fg(Color::Green),
            NoticeLevel::Error => Style::default().fg(Color::Red),
        };
        let line = Rect {
            x: screen.x,
            y: screen.bottom().saturating_sub(1),
            width: screen.width,
            height: 1,
        };
        f.render_widget(
            Paragraph::new(notice.text.clone())
                .style(style)
                .alignment(Alignment::Center),
            line,
        );
    }
}

// =============================================================================
// Reservation board
// =============================================================================

/// Only the pending-payment code is known to the client; other codes are
/// backend-defined and the card carries no label for them.
fn status_label(reservation: &Reservation) -> Option<Span<'static>> {
    (reservation.status == STATUS_PENDING_PAYMENT)
        .then(|| Span::styled("pending payment", Style::default().fg(Color::Yellow)))
}

fn draw_board(f: &mut Frame, board: &ReservationBoard, area: Rect) {
    let block = Block::default()
        .title(" My Reservations (n new, d cancel) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if board.state == BoardState::Loading {
        f.render_widget(
            Paragraph::new("Loading...")
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }
    if board.reservations.is_empty() {
        f.render_widget(
            Paragraph::new("No reservations yet. Press 'n' to book a station.")
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
    } else {
        let items: Vec<ListItem> = board
            .reservations
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let station = board
                    .station_for(r)
                    .map(|s| format!("{} ({})", s.name, s.kind))
                    .unwrap_or_else(|| format!("station #{}", r.station_id));
                let mut spans = vec![
                    Span::styled(
                        format!(" {:>4} ", r.id),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!(
                        "{}  {} {}-{}  ",
                        station,
                        format_date(&r.date),
                        format_time(&r.start_time),
                        format_time(&r.end_time),
                    )),
                ];
                if let Some(status) = status_label(r) {
                    spans.push(status);
                }
                let line = Line::from(spans);
                let style = if i == board.selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            })
            .collect();
        f.render_widget(List::new(items).block(block), area);
    }

    if let Some(modal) = board.modal.as_ref() {
        draw_create_modal(f, board, modal, area);
    }
    if let Some(id) = board.pending_cancel {
        draw_confirm_cancel(f, id, area);
    }
    if let Some(url) = board.payment.as_deref() {
        draw_payment(f, url, area);
    }
}

fn draw_create_modal(
    f: &mut Frame,
    board: &ReservationBoard,
    modal: &crate::views::reservations::CreateModal,
    area: Rect,
) {
    let popup = popup_area(area, 46, 16);
    let block = Block::default()
        .title(" New reservation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Clear, popup);
    f.render_widget(block, popup);

    let inner = popup.inner(ratatui::layout::Margin {
        horizontal: 2,
        vertical: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // station selector
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1), // slot hint
            Constraint::Length(1),
        ])
        .split(inner);

    let station_name = board
        .stations
        .get(modal.station_idx)
        .map(|s| s.name.as_str())
        .unwrap_or("-");
    let station_style = if modal.field == CreateField::Station {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Station: "),
            Span::styled(format!("< {station_name} >"), station_style),
        ])),
        rows[0],
    );

    render_input(
        f,
        rows[1],
        " Date (YYYY-MM-DD) ",
        &modal.date,
        modal.field == CreateField::Date,
        false,
    );
    render_input(
        f,
        rows[2],
        " Start (HH:MM) ",
        &modal.time,
        modal.field == CreateField::Time,
        false,
    );
    render_input(
        f,
        rows[3],
        " Amount ",
        &modal.amount,
        modal.field == CreateField::Amount,
        false,
    );

    let slots = if modal.slots.is_empty() {
        "Free slots: -".to_string()
    } else {
        format!("Free slots: {}", modal.slots.join(" "))
    };
    f.render_widget(
        Paragraph::new(slots).style(Style::default().fg(Color::DarkGray)),
        rows[4],
    );
    f.render_widget(
        Paragraph::new("Enter submit | Esc close | Tab next field")
            .style(Style::default().fg(Color::DarkGray)),
        rows[5],
    );
}

fn draw_confirm_cancel(f: &mut Frame, id: i64, area: Rect) {
    let popup = popup_area(area, 44, 5);
    let block = Block::default()
        .title(" Cancel reservation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(format!("Cancel reservation #{id}? (y/n)"))
            .block(block)
            .alignment(Alignment::Center),
        popup,
    );
}

fn draw_payment(f: &mut Frame, url: &str, area: Rect) {
    let popup = popup_area(area, 60, 7);
    let block = Block::default()
        .title(" Complete your payment ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(vec![
            Line::from("Open this link to pay for the reservation:"),
            Line::from(Span::styled(
                url.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Enter/Esc close",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(block)
        .wrap(Wrap { trim: true }),
        popup,
    );
}

// =============================================================================
// Station directory
// =============================================================================

fn draw_directory(f: &mut Frame, directory: &StationDirectory, area: Rect) {
    let block = Block::default()
        .title(" Stations (r reviews, a add review) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if directory.state == DirectoryState::Loading {
        f.render_widget(
            Paragraph::new("Loading...")
                .block(block)
                .style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = directory
        .stations
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let working = match s.is_working {
                Some(false) => Span::styled("out of order", Style::default().fg(Color::Red)),
                _ => Span::styled("working", Style::default().fg(Color::Green)),
            };
            let line = Line::from(vec![
                Span::raw(format!(" {}  ", s.name)),
                Span::styled(format!("[{}]  ", s.kind), Style::default().fg(Color::DarkGray)),
                working,
            ]);
            let style = if i == directory.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);

    if let Some(modal) = directory.review_list.as_ref() {
        let popup = popup_area(area, 56, 14);
        let block = Block::default()
            .title(format!(" Reviews | {} ", modal.station_name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        f.render_widget(Clear, popup);
        if modal.reviews.is_empty() {
            f.render_widget(
                Paragraph::new("No reviews yet.")
                    .block(block)
                    .style(Style::default().fg(Color::DarkGray)),
                popup,
            );
        } else {
            let items: Vec<ListItem> = modal
                .reviews
                .iter()
                .skip(modal.scroll)
                .map(|r| {
                    let when = r
                        .created_at
                        .as_deref()
                        .map(format_date)
                        .unwrap_or_default();
                    let mut spans = vec![
                        Span::styled(
                            format!(" {:.1}★ ", r.rating),
                            Style::default().fg(Color::Yellow),
                        ),
                        Span::raw(r.comment.clone().unwrap_or_default()),
                    ];
                    if !when.is_empty() {
                        spans.push(Span::styled(
                            format!("  {when}"),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect();
            f.render_widget(List::new(items).block(block), popup);
        }
    }

    if let Some(modal) = directory.add_review.as_ref() {
        let popup = popup_area(area, 50, 10);
        let block = Block::default()
            .title(format!(" Review | {} ", modal.station_name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        f.render_widget(Clear, popup);
        f.render_widget(block, popup);

        let inner = popup.inner(ratatui::layout::Margin {
            horizontal: 2,
            vertical: 1,
        });
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(inner);

        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw("Rating: "),
                Span::styled(
                    format!("< {:.1} >", modal.rating),
                    Style::default().fg(Color::Yellow),
                ),
            ])),
            rows[0],
        );
        render_input(f, rows[1], " Comment ", &modal.comment, true, false);
        f.render_widget(
            Paragraph::new("Left/Right rating | Enter submit | Esc close")
                .style(Style::default().fg(Color::DarkGray)),
            rows[2],
        );
    }
}

// =============================================================================
// Profile
// =============================================================================

fn draw_profile(f: &mut Frame, profile: &ProfileView, area: Rect) {
    let block = Block::default()
        .title(" Profile (e edit) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    match &profile.state {
        ProfileState::Loading => {
            f.render_widget(
                Paragraph::new("Loading...")
                    .block(block)
                    .style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        }
        ProfileState::Ready(user) => {
            let verified = if user.is_verified {
                Span::styled("verified", Style::default().fg(Color::Green))
            } else {
                Span::styled("not verified", Style::default().fg(Color::Red))
            };
            let lines = vec![
                Line::from(vec![
                    Span::styled(" Username: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(user.username.clone()),
                ]),
                Line::from(vec![
                    Span::styled(" Email:    ", Style::default().fg(Color::DarkGray)),
                    Span::raw(user.email.clone()),
                    Span::raw("  "),
                    verified,
                ]),
                Line::from(vec![
                    Span::styled(" Games played:    ", Style::default().fg(Color::DarkGray)),
                    Span::raw(user.games_played.to_string()),
                ]),
                Line::from(vec![
                    Span::styled(" Games organized: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(user.games_organized.to_string()),
                ]),
            ];
            f.render_widget(Paragraph::new(lines).block(block), area);
        }
    }

    if let Some(modal) = profile.modal.as_ref() {
        let popup = popup_area(area, 48, 11);
        let block = Block::default()
            .title(" Edit profile ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        f.render_widget(Clear, popup);
        f.render_widget(block, popup);

        let inner = popup.inner(ratatui::layout::Margin {
            horizontal: 2,
            vertical: 1,
        });
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(inner);

        render_input(
            f,
            rows[0],
            " Username ",
            &modal.username,
            modal.field == EditField::Username,
            false,
        );
        render_input(
            f,
            rows[1],
            " New password ",
            &modal.password,
            modal.field == EditField::Password,
            true,
        );
        f.render_widget(
            Paragraph::new("Enter save | Esc close | Tab next field")
                .style(Style::default().fg(Color::DarkGray)),
            rows[2],
        );
    }
}

// =============================================================================
// Widgets
// =============================================================================

/// Bordered single-line input; places the terminal cursor when focused.
fn render_input(f: &mut Frame, area: Rect, title: &str, input: &Input, focused: bool, mask: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(style);

    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let shown = if mask {
        "*".repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };
    let paragraph = Paragraph::new(shown)
        .style(style)
        .scroll((0, scroll as u16))
        .block(block);
    f.render_widget(paragraph, area);

    if focused {
        f.set_cursor_position((
            area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
    }
}

/// Fixed-size popup centered in `r`, clamped to the available area.
fn popup_area(r: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(status: i32) -> Reservation {
        Reservation {
            id: 42,
            station_id: 1000,
            status,
            user_id: None,
            staff_id: None,
            date: "2024-06-01T00:00:00".to_string(),
            start_time: "2024-06-01T10:00:00".to_string(),
            end_time: "2024-06-01T11:00:00".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn only_pending_payment_gets_a_status_label() {
        let label = status_label(&reservation(STATUS_PENDING_PAYMENT)).unwrap();
        assert_eq!(label.content, "pending payment");
        // other codes are backend-defined, the card stays unlabelled
        assert!(status_label(&reservation(1)).is_none());
        assert!(status_label(&reservation(7)).is_none());
    }

    #[test]
    fn popup_is_clamped_to_the_available_area() {
        let tiny = Rect::new(0, 0, 10, 4);
        let popup = popup_area(tiny, 46, 16);
        assert_eq!((popup.width, popup.height), (10, 4));
    }
}
