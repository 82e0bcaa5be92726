use ratatui::style::{Color, Modifier, Style};

use crate::format::Tone;

pub(super) fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Gray => Color::Gray,
        Tone::Blue => Color::Blue,
        Tone::Indigo => Color::LightBlue,
        Tone::Purple => Color::Magenta,
        Tone::Yellow => Color::Yellow,
        Tone::Orange => Color::LightRed,
        Tone::Green => Color::Green,
        Tone::Red => Color::Red,
    }
}

pub(super) fn badge(tone: Tone) -> Style {
    Style::default()
        .fg(tone_color(tone))
        .add_modifier(Modifier::BOLD)
}

pub(super) fn label() -> Style {
    Style::default().fg(Color::Gray)
}

pub(super) fn error() -> Style {
    Style::default().fg(Color::Red)
}

pub(super) fn selected() -> Style {
    Style::default().bg(Color::DarkGray)
}
