//! Root navigation: which screen is showing and which record it is about.

use crate::api::{ApiError, OpportunityApi};
use crate::model::{Opportunity, OpportunityInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Table,
    Form,
    Detail,
}

/// Top-level tabs reachable from anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Table,
}

/// The record a Form or Detail screen is bound to.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub record: Option<Opportunity>,
    pub editing: bool,
}

// Selection only exists inside the variants that need it, so it cannot leak
// into Dashboard or Table.
#[derive(Clone, Debug, PartialEq)]
enum Route {
    Dashboard,
    Table,
    Form(Selection),
    Detail(Selection),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Trigger {
    View(Opportunity),
    Edit(Opportunity),
    Create,
    Cancel,
    Close,
    Navigate(Tab),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Saved; the route is now Table.
    Saved(Opportunity),
    /// Rejected or unreachable; the route and selection are unchanged.
    Failed(ApiError),
    /// Not on the form screen. No request was made.
    Ignored,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Navigator {
    route: Route,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            route: Route::Dashboard,
        }
    }

    pub fn screen(&self) -> Screen {
        self.route.screen()
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.route {
            Route::Form(sel) | Route::Detail(sel) => Some(sel),
            Route::Dashboard | Route::Table => None,
        }
    }

    pub fn selected_record(&self) -> Option<&Opportunity> {
        self.selection().and_then(|s| s.record.as_ref())
    }

    /// Applies a trigger. Returns true when the route changed and the new
    /// screen should be mounted. Triggers that make no sense for the current
    /// screen leave it untouched.
    pub fn dispatch(&mut self, trigger: Trigger) -> bool {
        let next = match (&self.route, trigger) {
            (_, Trigger::View(record)) => Route::Detail(Selection {
                record: Some(record),
                editing: false,
            }),
            (_, Trigger::Edit(record)) => Route::Form(Selection {
                record: Some(record),
                editing: true,
            }),
            (_, Trigger::Create) => Route::Form(Selection {
                record: None,
                editing: false,
            }),
            (Route::Form(_), Trigger::Cancel) => Route::Table,
            (Route::Detail(_), Trigger::Close) => Route::Table,
            (_, Trigger::Navigate(Tab::Dashboard)) => Route::Dashboard,
            (_, Trigger::Navigate(Tab::Table)) => Route::Table,
            (_, Trigger::Cancel | Trigger::Close) => return false,
        };
        if next == self.route {
            return false;
        }
        tracing::debug!(from = ?self.screen(), to = ?next.screen(), "navigate");
        self.route = next;
        true
    }

    pub fn view(&mut self, record: Opportunity) -> bool {
        self.dispatch(Trigger::View(record))
    }

    pub fn edit(&mut self, record: Opportunity) -> bool {
        self.dispatch(Trigger::Edit(record))
    }

    pub fn create(&mut self) -> bool {
        self.dispatch(Trigger::Create)
    }

    pub fn cancel(&mut self) -> bool {
        self.dispatch(Trigger::Cancel)
    }

    pub fn close(&mut self) -> bool {
        self.dispatch(Trigger::Close)
    }

    pub fn navigate(&mut self, tab: Tab) -> bool {
        self.dispatch(Trigger::Navigate(tab))
    }

    /// Sends the form payload: an update to the selected record when editing,
    /// a create otherwise. Exactly one request per call while on the form.
    pub fn submit(&mut self, api: &dyn OpportunityApi, input: &OpportunityInput) -> SubmitOutcome {
        let Route::Form(sel) = &self.route else {
            tracing::debug!(screen = ?self.screen(), "submit ignored outside the form");
            return SubmitOutcome::Ignored;
        };

        let result = match (&sel.record, sel.editing) {
            (Some(record), true) => api.update_opportunity(&record.id, input),
            _ => api.create_opportunity(input),
        };

        match result {
            Ok(saved) => {
                tracing::info!(id = %saved.id, "opportunity saved");
                self.route = Route::Table;
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                tracing::warn!(error = %err, "save failed");
                SubmitOutcome::Failed(err)
            }
        }
    }
}

impl Route {
    fn screen(&self) -> Screen {
        match self {
            Route::Dashboard => Screen::Dashboard,
            Route::Table => Screen::Table,
            Route::Form(_) => Screen::Form,
            Route::Detail(_) => Screen::Detail,
        }
    }
}

#[cfg(test)]
#[path = "tests/nav_tests.rs"]
mod tests;
