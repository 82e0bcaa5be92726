use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::screens::{DetailRow, DetailView};

use super::super::view::render_view_chrome_with_header;
use super::super::{RenderCtx, View, style};

#[derive(Debug)]
pub(in crate::tui_shell) struct DetailScreen {
    pub(in crate::tui_shell) data: DetailView,
}

impl DetailScreen {
    pub(in crate::tui_shell) fn new(data: DetailView) -> Self {
        Self { data }
    }
}

fn row_line(row: &DetailRow) -> Line<'static> {
    let value_style = match row.tone {
        Some(tone) => style::badge(tone),
        None => Style::default(),
    };
    Line::from(vec![
        Span::styled(format!("{: <22}", row.label), style::label()),
        Span::styled(row.value.clone(), value_style),
    ])
}

impl View for DetailScreen {
    fn title(&self) -> &str {
        &self.data.record().name
    }

    fn hints(&self) -> &'static str {
        "e: edit  Esc: close  r: reload  q: quit"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, _ctx: &RenderCtx) {
        let header = Line::from(vec![
            Span::styled("Opportunity  ", style::label()),
            Span::styled(
                self.title().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let inner = render_view_chrome_with_header(frame, header, area);

        let metrics = self.data.key_metrics();
        let fields = self.data.fields();
        let times = self.data.timestamps();

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if self.data.error().is_some() { 1 } else { 0 }),
                Constraint::Length(metrics.len() as u16 + 2),
                Constraint::Min(0),
            ])
            .split(inner);

        if let Some(err) = self.data.error() {
            frame.render_widget(Paragraph::new(Line::styled(err.to_string(), style::error())), parts[0]);
        }

        frame.render_widget(
            Paragraph::new(metrics.iter().map(row_line).collect::<Vec<_>>())
                .block(Block::default().borders(Borders::ALL).title("Key metrics")),
            parts[1],
        );

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(parts[2]);

        frame.render_widget(
            Paragraph::new(fields.iter().map(row_line).collect::<Vec<_>>())
                .block(Block::default().borders(Borders::ALL).title("Details")),
            cols[0],
        );

        let mut right = vec![Line::from(self.data.description()), Line::from("")];
        right.extend(times.iter().map(row_line));
        frame.render_widget(
            Paragraph::new(right)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Description")),
            cols[1],
        );
    }
}
