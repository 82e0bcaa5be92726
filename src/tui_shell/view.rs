use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use time::OffsetDateTime;

use crate::sync::SyncSession;

#[derive(Clone, Copy, Debug)]
pub(super) struct RenderCtx<'a> {
    pub(super) now: OffsetDateTime,
    pub(super) sync: &'a SyncSession,
    /// Char offset of the edit cursor when the view has a field being typed into.
    pub(super) cursor: Option<usize>,
}

pub(super) trait View {
    fn title(&self) -> &str;
    fn loaded_at(&self) -> Option<OffsetDateTime> {
        None
    }

    fn move_up(&mut self) {}
    fn move_down(&mut self) {}

    /// Key hints for the footer.
    fn hints(&self) -> &'static str;

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx);
}

pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    loaded_at: Option<OffsetDateTime>,
    ctx: &RenderCtx,
    area: Rect,
) -> Rect {
    let mut spans = vec![Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow),
    )];
    if let Some(at) = loaded_at {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("loaded {}", super::app::fmt_since(at, ctx.now)),
            Style::default().fg(Color::Gray),
        ));
    }

    render_view_chrome_with_header(frame, Line::from(spans), area)
}

pub(super) fn render_view_chrome_with_header<'a>(
    frame: &mut ratatui::Frame,
    header: Line<'a>,
    area: Rect,
) -> Rect {
    let outer = Block::default().borders(Borders::ALL).title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
