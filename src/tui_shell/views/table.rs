use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::format;
use crate::screens::{FilterField, TableView};

use super::super::{RenderCtx, View, render_view_chrome, style};

#[derive(Debug)]
pub(in crate::tui_shell) struct TableScreen {
    pub(in crate::tui_shell) data: TableView,
    /// Index into `FilterField::ALL` while the filter bar has focus.
    pub(in crate::tui_shell) filter_focus: Option<usize>,
}

impl TableScreen {
    pub(in crate::tui_shell) fn new(data: TableView) -> Self {
        Self {
            data,
            filter_focus: None,
        }
    }

    pub(in crate::tui_shell) fn focused_filter(&self) -> Option<FilterField> {
        self.filter_focus.map(|i| FilterField::ALL[i % FilterField::ALL.len()])
    }

    fn render_filters(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let focused = self.focused_filter();
        let mut spans = Vec::new();
        let mut cursor_x = None;
        for field in FilterField::ALL {
            let label = format!("{}: ", field.label());
            let value = self.data.filters.get(field);
            let is_focused = focused == Some(field);
            let width = spans
                .iter()
                .map(|s: &Span| s.content.chars().count())
                .sum::<usize>();
            if is_focused {
                cursor_x = Some(width + label.chars().count() + ctx.cursor.unwrap_or(0));
            }
            let value_style = if is_focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(label, style::label()));
            spans.push(Span::styled(
                if value.is_empty() && !is_focused {
                    "-".to_string()
                } else {
                    value.to_string()
                },
                value_style,
            ));
            spans.push(Span::raw("  "));
        }

        let title = if focused.is_some() {
            "Filters (Tab: next  Enter: apply  Esc: done)"
        } else {
            "Filters (f: edit  c: clear)"
        };
        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .block(Block::default().borders(Borders::BOTTOM).title(title)),
            area,
        );
        if let Some(x) = cursor_x {
            frame.set_cursor_position((area.x + x as u16, area.y + 1));
        }
    }
}

impl View for TableScreen {
    fn title(&self) -> &str {
        "Opportunities"
    }

    fn move_up(&mut self) {
        self.data.move_up();
    }

    fn move_down(&mut self) {
        self.data.move_down();
    }

    fn hints(&self) -> &'static str {
        if self.filter_focus.is_some() {
            "Tab: next filter  Enter: apply  Esc: done"
        } else {
            "Enter: view  e: edit  d: delete  n: new  f: filter  r: refresh  1: dashboard  q: quit"
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let inner = render_view_chrome(frame, self.title(), None, ctx, area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        self.render_filters(frame, parts[0], ctx);

        let status = if let Some(err) = self.data.error() {
            Line::styled(err.to_string(), style::error())
        } else if let Some(notice) = self.data.notice() {
            Line::styled(notice.to_string(), Style::default().fg(Color::Green))
        } else {
            let count = match self.data.rows().len() {
                1 => "1 opportunity".to_string(),
                n => format!("{} opportunities", n),
            };
            Line::styled(count, style::label())
        };
        frame.render_widget(Paragraph::new(status), parts[1]);

        let header = Row::new(
            [
                "Name", "Account", "Delta ARR", "Services", "Stage", "Close", "Owner",
            ]
            .map(|h| Cell::from(h).style(style::label())),
        );
        let rows = self.data.rows().iter().map(|o| {
            let stage = match o.stage_number {
                Some(n) => format!("Stage {}", n),
                None => "N/A".to_string(),
            };
            Row::new(vec![
                Cell::from(o.name.clone()),
                Cell::from(format::text(o.account_name.as_deref())),
                Cell::from(format::currency(o.delta_average_arr)),
                Cell::from(format::currency(o.services_attached_amount)),
                Cell::from(stage).style(style::badge(format::stage_tone(o.stage_number))),
                Cell::from(format::date(o.close_date.as_deref())),
                Cell::from(format::text(o.owner_name.as_deref())),
            ])
        });
        let widths = [
            Constraint::Percentage(24),
            Constraint::Percentage(18),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
            Constraint::Percentage(8),
            Constraint::Percentage(12),
            Constraint::Percentage(14),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(style::selected());

        let mut state = TableState::default();
        if self.data.rows().is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled("(no opportunities)", style::label())),
                parts[2],
            );
        } else {
            state.select(Some(self.data.selected_index()));
            frame.render_stateful_widget(table, parts[2], &mut state);
        }
    }
}
