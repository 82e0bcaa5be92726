use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::form::FieldKind;
use crate::nav::{Tab, Trigger};
use crate::screens::FilterField;

use super::super::modal::{self, ModalAction};
use super::{App, Mounted};

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.poll_background();

        terminal
            .draw(|f| super::render::draw(f, app))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }

    if let Some(m) = &app.modal {
        match modal::map_modal_key(m, key) {
            ModalAction::None => {}
            ModalAction::Close => app.cancel_delete(),
            ModalAction::Confirm => app.confirm_delete(),
        }
        return;
    }

    let filters_open = matches!(&app.mounted, Mounted::Table(s) if s.filter_focus.is_some());
    if matches!(app.mounted, Mounted::Form(_)) {
        handle_form_key(app, key);
    } else if filters_open {
        handle_filter_key(app, key);
    } else {
        handle_command_key(app, key);
    }
}

/// Cursor movement and character edits shared by every text field.
fn apply_input_edit_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.input.insert_char(c);
        }
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.home(),
        KeyCode::End => app.input.end(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => app.input.clear(),
        _ => return false,
    }
    app.store_input();
    true
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    let Mounted::Form(screen) = &mut app.mounted else {
        return;
    };
    let field = screen.form.focused();
    let kind = field.spec().kind;
    let read_only = screen.form.is_read_only(field);

    match key.code {
        KeyCode::Esc => {
            app.go(Trigger::Cancel);
            app.push_info("edit cancelled");
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => app.submit_form(),
        KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
            screen.form.focus_next();
            app.load_input();
        }
        KeyCode::BackTab | KeyCode::Up => {
            screen.form.focus_prev();
            app.load_input();
        }
        _ if read_only => {}
        KeyCode::Left | KeyCode::Right if matches!(kind, FieldKind::Choice(_)) => {
            screen.form.cycle_choice(field, key.code == KeyCode::Right);
            app.load_input();
        }
        KeyCode::Char(' ') if kind == FieldKind::Flag => screen.form.toggle_flag(field),
        _ if kind == FieldKind::Flag => {}
        _ => {
            apply_input_edit_key(app, key);
        }
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    let Mounted::Table(screen) = &mut app.mounted else {
        return;
    };
    let n = FilterField::ALL.len();
    match key.code {
        KeyCode::Esc => {
            screen.filter_focus = None;
            app.input.clear();
        }
        KeyCode::Tab => {
            screen.filter_focus = screen.filter_focus.map(|i| (i + 1) % n);
            app.load_input();
        }
        KeyCode::BackTab => {
            screen.filter_focus = screen.filter_focus.map(|i| (i + n - 1) % n);
            app.load_input();
        }
        KeyCode::Enter => {
            if screen.data.apply_filters(&app.client) {
                screen.filter_focus = None;
                app.input.clear();
                let count = screen.data.rows().len();
                app.push_info(format!("{} shown", crate::format::plural(count, "row")));
            } else if let Some(err) = screen.data.error() {
                let err = err.to_string();
                app.push_error(err);
            }
        }
        _ => {
            apply_input_edit_key(app, key);
        }
    }
}

fn handle_command_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Char('1') => app.go(Trigger::Navigate(Tab::Dashboard)),
        KeyCode::Char('2') => app.go(Trigger::Navigate(Tab::Table)),
        KeyCode::Char('n') => app.go(Trigger::Create),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Up | KeyCode::Char('k') => app.mounted.view_mut().move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.mounted.view_mut().move_down(),

        KeyCode::Esc => {
            if matches!(app.mounted, Mounted::Detail(_)) {
                app.go(Trigger::Close);
            }
        }

        KeyCode::Enter => {
            let record = match &app.mounted {
                Mounted::Dashboard(screen) => screen.selected_deal().cloned(),
                Mounted::Table(screen) => screen.data.selected_row().cloned(),
                Mounted::Form(_) | Mounted::Detail(_) => None,
            };
            if let Some(record) = record {
                app.go(Trigger::View(record));
            }
        }

        KeyCode::Char('e') => {
            let record = match &app.mounted {
                Mounted::Table(screen) => screen.data.selected_row().cloned(),
                Mounted::Detail(screen) => Some(screen.data.record().clone()),
                Mounted::Dashboard(_) | Mounted::Form(_) => None,
            };
            if let Some(record) = record {
                app.go(Trigger::Edit(record));
            }
        }

        KeyCode::Char('d') => app.request_delete(),

        KeyCode::Char('f') => {
            if let Mounted::Table(screen) = &mut app.mounted {
                screen.filter_focus = Some(0);
                app.load_input();
            }
        }

        KeyCode::Char('c') => {
            if let Mounted::Table(screen) = &mut app.mounted {
                screen.data.clear_filters(&app.client);
                app.push_info("filters cleared");
            }
        }

        KeyCode::Char('s') => {
            if matches!(app.mounted, Mounted::Dashboard(_)) {
                app.trigger_sync();
            }
        }

        _ => {}
    }
}
