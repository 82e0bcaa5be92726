use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum ModalKind {
    ConfirmDelete,
}

#[derive(Clone, Debug)]
pub(super) struct Modal {
    pub(super) title: String,
    pub(super) lines: Vec<String>,
    pub(super) kind: ModalKind,
}

pub(super) enum ModalAction {
    None,
    Close,
    Confirm,
}

impl Modal {
    pub(super) fn confirm_delete(name: &str) -> Self {
        Self {
            title: "Delete opportunity".to_string(),
            lines: vec![
                format!("Delete \"{}\"?", name),
                String::new(),
                "This cannot be undone.".to_string(),
            ],
            kind: ModalKind::ConfirmDelete,
        }
    }
}

pub(super) fn map_modal_key(modal: &Modal, key: KeyEvent) -> ModalAction {
    match modal.kind {
        ModalKind::ConfirmDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => ModalAction::Confirm,
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') => {
                ModalAction::Close
            }
            _ => ModalAction::None,
        },
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &Modal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 60);
    let h = (modal.lines.len() as u16 + 4).min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = ratatui::layout::Rect {
        x,
        y,
        width: w,
        height: h,
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(modal.title.as_str());
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let mut lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    lines.push(Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(": delete   "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(": keep"),
    ]));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    #[test]
    fn only_explicit_keys_confirm() {
        let modal = Modal::confirm_delete("Acme");
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert!(matches!(
            map_modal_key(&modal, press(KeyCode::Char('y'))),
            ModalAction::Confirm
        ));
        assert!(matches!(
            map_modal_key(&modal, press(KeyCode::Esc)),
            ModalAction::Close
        ));
        assert!(matches!(
            map_modal_key(&modal, press(KeyCode::Char('d'))),
            ModalAction::None
        ));
    }
}
