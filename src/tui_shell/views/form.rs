use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::form::{Field, FieldKind, OpportunityForm};

use super::super::view::render_view_chrome_with_header;
use super::super::{RenderCtx, View, style};

const LABEL_WIDTH: usize = 26;

#[derive(Debug)]
pub(in crate::tui_shell) struct FormScreen {
    pub(in crate::tui_shell) form: OpportunityForm,
}

impl FormScreen {
    pub(in crate::tui_shell) fn new(form: OpportunityForm) -> Self {
        Self { form }
    }

    fn field_hint(&self, field: Field) -> &'static str {
        if self.form.is_read_only(field) {
            return "read-only";
        }
        match field.spec().kind {
            FieldKind::Choice(_) => "Left/Right: choose",
            FieldKind::Flag => "Space: toggle",
            FieldKind::Date => "YYYY-MM-DD",
            _ => "",
        }
    }
}

impl View for FormScreen {
    fn title(&self) -> &str {
        self.form.title()
    }

    fn move_up(&mut self) {
        self.form.focus_prev();
    }

    fn move_down(&mut self) {
        self.form.focus_next();
    }

    fn hints(&self) -> &'static str {
        "Ctrl+S: save  Tab/Up/Down: field  Esc: cancel"
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx) {
        let mut header = vec![Span::styled(
            self.title().to_string(),
            Style::default().fg(Color::Yellow),
        )];
        let error_count = self.form.errors().len();
        if error_count > 0 {
            header.push(Span::raw("  "));
            header.push(Span::styled(
                format!("{} field(s) need attention", error_count),
                style::error(),
            ));
        }
        let inner = render_view_chrome_with_header(frame, Line::from(header), area);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let submit_line = match self.form.submit_error() {
            Some(err) => Line::styled(err.to_string(), style::error()),
            None => Line::styled("Required fields are marked *", style::label()),
        };
        frame.render_widget(Paragraph::new(submit_line), parts[0]);

        let focused = self.form.focused();
        let items = Field::ALL
            .iter()
            .map(|&field| {
                let spec = field.spec();
                let marker = if spec.required { "*" } else { " " };
                let label = format!("{}{: <w$}", marker, spec.label, w = LABEL_WIDTH - 1);
                let raw = self.form.value(field);
                let value = match spec.kind {
                    FieldKind::Flag => {
                        if self.form.values().flag(field) {
                            "[x]".to_string()
                        } else {
                            "[ ]".to_string()
                        }
                    }
                    _ => raw.to_string(),
                };
                let value_style = if self.form.is_read_only(field) {
                    style::label()
                } else if field == focused {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default()
                };

                let mut spans = vec![
                    Span::styled(label, style::label()),
                    Span::styled(value, value_style),
                ];
                if field == focused {
                    let hint = self.field_hint(field);
                    if !hint.is_empty() {
                        spans.push(Span::styled(format!("  ({})", hint), style::label()));
                    }
                }
                if let Some(err) = self.form.error(field) {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(err.to_string(), style::error()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect::<Vec<_>>();

        let focus_idx = Field::ALL.iter().position(|f| *f == focused).unwrap_or(0);
        let mut state = ListState::default();
        state.select(Some(focus_idx));
        frame.render_stateful_widget(List::new(items), parts[1], &mut state);

        // Place the terminal cursor inside the focused text value.
        let editable_text = !self.form.is_read_only(focused)
            && !matches!(focused.spec().kind, FieldKind::Flag);
        if let Some(cursor) = ctx.cursor
            && editable_text
        {
            let row = focus_idx.saturating_sub(state.offset());
            if row < parts[1].height as usize {
                frame.set_cursor_position((
                    parts[1].x + (LABEL_WIDTH + cursor) as u16,
                    parts[1].y + row as u16,
                ));
            }
        }
    }
}
