use time::OffsetDateTime;

use crate::api::ApiClient;
use crate::form::{FieldKind, OpportunityForm};
use crate::nav::{Navigator, Screen, SubmitOutcome, Trigger};
use crate::screens::{DashboardView, DetailView, TableView};
use crate::sync::{SyncPanel, SyncPhase};

use super::input::Input;
use super::modal::Modal;
use super::view::View;
use super::views::{DashboardScreen, DetailScreen, FormScreen, TableScreen};

mod event_loop;
mod render;
mod runtime;
mod time_utils;

pub(super) use self::runtime::run;
pub(in crate::tui_shell) use self::time_utils::fmt_since;

/// The view model behind whatever screen the navigator points at.
#[derive(Debug)]
pub(in crate::tui_shell) enum Mounted {
    Dashboard(DashboardScreen),
    Table(TableScreen),
    Form(FormScreen),
    Detail(DetailScreen),
}

impl Mounted {
    pub(in crate::tui_shell) fn view(&self) -> &dyn View {
        match self {
            Mounted::Dashboard(v) => v,
            Mounted::Table(v) => v,
            Mounted::Form(v) => v,
            Mounted::Detail(v) => v,
        }
    }

    pub(in crate::tui_shell) fn view_mut(&mut self) -> &mut dyn View {
        match self {
            Mounted::Dashboard(v) => v,
            Mounted::Table(v) => v,
            Mounted::Form(v) => v,
            Mounted::Detail(v) => v,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum StatusKind {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub(super) struct Status {
    pub(super) kind: StatusKind,
    pub(super) text: String,
    pub(super) at: OffsetDateTime,
}

pub(in crate::tui_shell) struct App {
    pub(super) client: ApiClient,
    pub(super) nav: Navigator,
    pub(super) mounted: Mounted,
    pub(super) sync: SyncPanel,
    pub(super) input: Input,
    pub(super) modal: Option<Modal>,
    pub(super) status: Option<Status>,
    pub(super) quit: bool,
}

impl App {
    pub(super) fn load(client: ApiClient) -> Self {
        let sync = SyncPanel::mount(&client);
        let dashboard = DashboardScreen::new(DashboardView::load(&client));
        Self {
            client,
            nav: Navigator::new(),
            mounted: Mounted::Dashboard(dashboard),
            sync,
            input: Input::default(),
            modal: None,
            status: None,
            quit: false,
        }
    }

    pub(super) fn push_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
            at: OffsetDateTime::now_utc(),
        });
    }

    pub(super) fn push_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Error,
            text: text.into(),
            at: OffsetDateTime::now_utc(),
        });
    }

    /// Builds a fresh view model for the current route.
    fn mount(&mut self) {
        self.input.clear();
        self.modal = None;
        self.mounted = match self.nav.screen() {
            Screen::Dashboard => {
                self.sync.remount(&self.client);
                Mounted::Dashboard(DashboardScreen::new(DashboardView::load(&self.client)))
            }
            Screen::Table => Mounted::Table(TableScreen::new(TableView::load(&self.client))),
            Screen::Form => Mounted::Form(FormScreen::new(OpportunityForm::for_record(
                self.nav.selected_record(),
            ))),
            Screen::Detail => match self.nav.selected_record() {
                Some(record) => Mounted::Detail(DetailScreen::new(DetailView::new(record.clone()))),
                None => Mounted::Table(TableScreen::new(TableView::load(&self.client))),
            },
        };
        self.load_input();
    }

    pub(super) fn go(&mut self, trigger: Trigger) {
        if self.nav.dispatch(trigger) {
            self.mount();
        }
    }

    pub(super) fn refresh(&mut self) {
        match &mut self.mounted {
            Mounted::Dashboard(_) => {
                self.mount();
                self.push_info("dashboard reloaded");
            }
            Mounted::Table(screen) => {
                screen.data.refresh(&self.client);
                if let Some(err) = screen.data.error() {
                    let err = err.to_string();
                    self.push_error(err);
                } else {
                    self.push_info("opportunities reloaded");
                }
            }
            Mounted::Detail(screen) => screen.data.refresh(&self.client),
            Mounted::Form(_) => {}
        }
    }

    pub(super) fn trigger_sync(&mut self) {
        let session = self.sync.session();
        if !session.configured() {
            self.push_error("Warehouse sync is not configured");
            return;
        }
        if session.phase() == SyncPhase::InFlight {
            self.push_info("sync already in progress");
            return;
        }
        if self.sync.trigger(self.client.clone()) {
            self.push_info("sync started");
        }
    }

    /// Applies results of background work. Called once per loop tick.
    pub(super) fn poll_background(&mut self) {
        if !self.sync.poll() {
            return;
        }
        let session = self.sync.session();
        match session.phase() {
            SyncPhase::Succeeded => {
                let msg = session
                    .last_message()
                    .unwrap_or("sync finished")
                    .to_string();
                self.push_info(msg);
            }
            SyncPhase::Failed => {
                let msg = session.last_error().unwrap_or("Sync failed").to_string();
                self.push_error(msg);
            }
            SyncPhase::Idle | SyncPhase::InFlight => {}
        }
    }

    pub(super) fn submit_form(&mut self) {
        let Mounted::Form(screen) = &mut self.mounted else {
            return;
        };
        let Some(input) = screen.form.prepare_submit() else {
            self.load_input();
            self.push_error("fix the highlighted fields");
            return;
        };
        match self.nav.submit(&self.client, &input) {
            SubmitOutcome::Saved(saved) => {
                self.mount();
                self.push_info(format!("saved {}", saved.name));
            }
            SubmitOutcome::Failed(err) => {
                let msg = err.user_message("Failed to save opportunity");
                if let Mounted::Form(screen) = &mut self.mounted {
                    screen.form.submit_failed(msg.clone());
                }
                self.push_error(msg);
            }
            SubmitOutcome::Ignored => {}
        }
    }

    pub(super) fn request_delete(&mut self) {
        let Mounted::Table(screen) = &mut self.mounted else {
            return;
        };
        if let Some(target) = screen.data.request_delete() {
            self.modal = Some(Modal::confirm_delete(&target.name));
        }
    }

    pub(super) fn cancel_delete(&mut self) {
        self.modal = None;
        if let Mounted::Table(screen) = &mut self.mounted {
            screen.data.cancel_delete();
        }
    }

    pub(super) fn confirm_delete(&mut self) {
        self.modal = None;
        let Mounted::Table(screen) = &mut self.mounted else {
            return;
        };
        if screen.data.confirm_delete(&self.client) {
            let msg = screen.data.notice().unwrap_or("deleted").to_string();
            self.push_info(msg);
        } else if let Some(err) = screen.data.error() {
            let err = err.to_string();
            self.push_error(err);
        }
    }

    /// True when printable keys go into a text field instead of acting as commands.
    pub(super) fn editing_text(&self) -> bool {
        match &self.mounted {
            Mounted::Form(_) => true,
            Mounted::Table(screen) => screen.filter_focus.is_some(),
            Mounted::Dashboard(_) | Mounted::Detail(_) => false,
        }
    }

    /// Copies the focused field's value into the edit buffer.
    pub(super) fn load_input(&mut self) {
        let value = match &self.mounted {
            Mounted::Form(screen) => {
                let field = screen.form.focused();
                match field.spec().kind {
                    FieldKind::Flag => String::new(),
                    _ => screen.form.value(field).to_string(),
                }
            }
            Mounted::Table(screen) => match screen.focused_filter() {
                Some(field) => screen.data.filters.get(field).to_string(),
                None => String::new(),
            },
            Mounted::Dashboard(_) | Mounted::Detail(_) => String::new(),
        };
        self.input.set(value);
    }

    /// Writes the edit buffer back into the focused field.
    pub(super) fn store_input(&mut self) {
        let value = self.input.buf.clone();
        match &mut self.mounted {
            Mounted::Form(screen) => {
                let field = screen.form.focused();
                if field.spec().kind != FieldKind::Flag {
                    screen.form.set(field, value);
                }
            }
            Mounted::Table(screen) => {
                if let Some(field) = screen.focused_filter() {
                    screen.data.filters.set(field, value);
                }
            }
            Mounted::Dashboard(_) | Mounted::Detail(_) => {}
        }
    }

    pub(super) fn cursor(&self) -> Option<usize> {
        self.editing_text().then_some(self.input.cursor)
    }
}
