use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use time::OffsetDateTime;

use crate::nav::Screen;

use super::super::modal;
use super::super::view::RenderCtx;
use super::time_utils::fmt_clock;
use super::{App, StatusKind};

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(area);

    // Header
    let screen = app.nav.screen();
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::Gray))
        }
    };
    let mut spans = vec![
        Span::styled(
            "Opportunities Desk",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
        tab(" 1 Dashboard ", screen == Screen::Dashboard),
        Span::raw(" "),
        tab(" 2 Opportunities ", screen == Screen::Table),
    ];
    match screen {
        Screen::Form => {
            spans.push(Span::raw(" > "));
            spans.push(Span::styled(
                app.mounted.view().title().to_string(),
                Style::default().fg(Color::Yellow),
            ));
        }
        Screen::Detail => {
            spans.push(Span::raw(" > "));
            spans.push(Span::styled("Detail", Style::default().fg(Color::Yellow)));
        }
        Screen::Dashboard | Screen::Table => {}
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        app.client.base_url().to_string(),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    // Main view
    let ctx = RenderCtx {
        now: OffsetDateTime::now_utc(),
        sync: app.sync.session(),
        cursor: app.cursor(),
    };
    app.mounted.view().render(frame, chunks[1], &ctx);

    // Last result
    let status_line = match &app.status {
        Some(s) => {
            let style = match s.kind {
                StatusKind::Info => Style::default().fg(Color::White),
                StatusKind::Error => Style::default().fg(Color::Red),
            };
            Line::from(vec![
                Span::styled(format!("{} ", fmt_clock(s.at)), Style::default().fg(Color::Gray)),
                Span::styled(s.text.as_str(), style),
            ])
        }
        None => Line::from(""),
    };
    frame.render_widget(
        Paragraph::new(status_line)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP)),
        chunks[2],
    );

    // Key hints
    frame.render_widget(
        Paragraph::new(Line::styled(
            app.mounted.view().hints(),
            Style::default().fg(Color::DarkGray),
        )),
        chunks[3],
    );

    if let Some(m) = &app.modal {
        modal::draw_modal(frame, m);
    }
}
