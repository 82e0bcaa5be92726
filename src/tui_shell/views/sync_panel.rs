use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::format;
use crate::sync::{SyncPhase, SyncSession};

use super::super::style;

pub(in crate::tui_shell) fn render(frame: &mut ratatui::Frame, area: Rect, session: &SyncSession) {
    let mut lines = Vec::new();

    let (status, color) = if session.configured() {
        ("configured", Color::Green)
    } else {
        ("not configured", Color::Gray)
    };
    lines.push(Line::from(vec![
        Span::styled("warehouse: ", style::label()),
        Span::styled(status, Style::default().fg(color)),
    ]));
    if let Some(err) = session.config_error() {
        lines.push(Line::styled(err.to_string(), style::error()));
    }

    let phase = match session.phase() {
        SyncPhase::Idle => Span::raw("idle"),
        SyncPhase::InFlight => Span::styled(
            "syncing...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        SyncPhase::Succeeded => Span::styled("succeeded", Style::default().fg(Color::Green)),
        SyncPhase::Failed => Span::styled("failed", style::error()),
    };
    lines.push(Line::from(vec![Span::styled("state: ", style::label()), phase]));

    if let Some(at) = session.last_success() {
        lines.push(Line::from(vec![
            Span::styled("last sync: ", style::label()),
            Span::raw(format::time_of_day(at)),
        ]));
    }
    if let Some(msg) = session.last_message() {
        lines.push(Line::from(msg.to_string()));
    }
    if let Some(err) = session.last_error() {
        lines.push(Line::styled(err.to_string(), style::error()));
    }

    let hint = if session.can_trigger() {
        "s: sync now"
    } else if session.phase() == SyncPhase::InFlight {
        "sync in progress"
    } else {
        "sync unavailable"
    };
    lines.push(Line::styled(hint, style::label()));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Warehouse sync")),
        area,
    );
}
