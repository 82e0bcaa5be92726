use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use time::OffsetDateTime;

use crate::format;
use crate::model::Opportunity;
use crate::screens::DashboardView;

use super::super::{RenderCtx, View, render_view_chrome, style};
use super::{empty_line, error_line, sync_panel};

#[derive(Debug)]
pub(in crate::tui_shell) struct DashboardScreen {
    pub(in crate::tui_shell) data: DashboardView,
    pub(in crate::tui_shell) selected: usize,
}

impl DashboardScreen {
    pub(in crate::tui_shell) fn new(data: DashboardView) -> Self {
        Self { data, selected: 0 }
    }

    /// The highlighted deal in the attention list.
    pub(in crate::tui_shell) fn selected_deal(&self) -> Option<&Opportunity> {
        self.data
            .attention
            .as_ref()
            .ok()
            .and_then(|deals| deals.get(self.selected))
            .map(|d| &d.opportunity)
    }

    fn render_summary(&self, frame: &mut ratatui::Frame, area: Rect) {
        let line = match &self.data.stats {
            Ok(s) => {
                let card = |label: &str, value: String| {
                    vec![
                        Span::styled(format!("{}: ", label), style::label()),
                        Span::styled(value, Style::default().fg(Color::White)),
                        Span::raw("   "),
                    ]
                };
                let mut spans = Vec::new();
                spans.extend(card("Opportunities", s.total_opportunities.to_string()));
                spans.extend(card("Pipeline", format::currency(Some(s.total_amount))));
                spans.extend(card(
                    "Services",
                    format::currency(Some(s.total_services_amount)),
                ));
                spans.extend(card(
                    "Logo attach",
                    format::percent(s.services_logo_attach_rate),
                ));
                spans.extend(card(
                    "Dollar attach",
                    format::percent(s.services_dollar_attach_rate),
                ));
                spans.extend(card("Synced 30d", s.recent_opportunities.to_string()));
                Line::from(spans)
            }
            Err(msg) => error_line(msg),
        };
        frame.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM)),
            area,
        );
    }

    fn render_stages(&self, frame: &mut ratatui::Frame, area: Rect) {
        let mut lines = Vec::new();
        match &self.data.stats {
            Err(msg) => lines.push(error_line(msg)),
            Ok(_) => {
                let rows = self.data.stage_rows();
                if rows.is_empty() {
                    lines.push(empty_line());
                }
                for row in rows {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{: <10}", row.label),
                            style::badge(format::stage_tone(row.stage_number)),
                        ),
                        Span::raw(format!("{: >4}  ", row.count)),
                        Span::raw(format::currency_short(Some(row.total_amount))),
                    ]));
                }
            }
        }
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("By stage")),
            area,
        );
    }

    fn render_top_list(
        frame: &mut ratatui::Frame,
        area: Rect,
        title: &str,
        rows: &Result<Vec<Opportunity>, String>,
        value: impl Fn(&Opportunity) -> String,
    ) {
        let items = match rows {
            Err(msg) => vec![ListItem::new(error_line(msg))],
            Ok(rows) if rows.is_empty() => vec![ListItem::new(empty_line())],
            Ok(rows) => rows
                .iter()
                .map(|o| {
                    ListItem::new(Line::from(vec![
                        Span::raw(o.name.clone()),
                        Span::raw("  "),
                        Span::styled(value(o), style::label()),
                    ]))
                })
                .collect(),
        };
        frame.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL).title(title.to_string())),
            area,
        );
    }

    fn render_attention(&self, frame: &mut ratatui::Frame, area: Rect) {
        let mut state = ListState::default();
        let items = match &self.data.attention {
            Err(msg) => vec![ListItem::new(error_line(msg))],
            Ok(deals) if deals.is_empty() => vec![ListItem::new(empty_line())],
            Ok(deals) => {
                state.select(Some(self.selected.min(deals.len() - 1)));
                deals
                    .iter()
                    .map(|d| {
                        let o = &d.opportunity;
                        let mut spans = vec![
                            Span::raw(o.name.clone()),
                            Span::raw("  "),
                            Span::styled(
                                format::currency(o.delta_average_arr),
                                style::label(),
                            ),
                        ];
                        for tag in &d.tags {
                            spans.push(Span::raw(" "));
                            spans.push(Span::styled(
                                format!("[{}]", tag),
                                Style::default().fg(Color::LightRed),
                            ));
                        }
                        ListItem::new(Line::from(spans))
                    })
                    .collect()
            }
        };
        let title = match &self.data.attention {
            Ok(deals) => format!("Needs attention ({})", deals.len()),
            Err(_) => "Needs attention".to_string(),
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(style::selected());
        frame.render_stateful_widget(list, area, &mut state);
    }
}

impl View for DashboardScreen {
    fn title(&self) -> &str {
        "Dashboard"
    }

    fn loaded_at(&self) -> Option<OffsetDateTime> {
        Some(self.data.loaded_at)
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let len = self.data.attention.as_ref().map(Vec::len).unwrap_or(0);
        self.selected = (self.selected + 1).min(len.saturating_sub(1));
    }

    fn hints(&self) -> &'static str {
        "Enter: view deal  s: sync  r: refresh  n: new  2: table  q: quit"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), self.loaded_at(), ctx, area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(11),
                Constraint::Min(0),
            ])
            .split(inner);

        self.render_summary(frame, rows[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);
        self.render_stages(frame, middle[0]);
        sync_panel::render(frame, middle[1], ctx.sync);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Percentage(40),
            ])
            .split(rows[2]);
        Self::render_top_list(frame, bottom[0], "Recently synced", &self.data.recent, |o| {
            format::date(o.sync_timestamp.as_deref())
        });
        Self::render_top_list(frame, bottom[1], "Largest delta ARR", &self.data.largest, |o| {
            format::currency(o.delta_average_arr)
        });
        self.render_attention(frame, bottom[2]);
    }
}
