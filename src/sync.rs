//! Manual warehouse sync: configuration check plus a single-flight trigger.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use time::OffsetDateTime;

use crate::api::{ApiError, ApiResult, SyncApi};
use crate::model::SyncAccepted;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Sync state for one mount of the panel.
#[derive(Clone, Debug)]
pub struct SyncSession {
    configured: bool,
    config_error: Option<String>,
    phase: SyncPhase,
    last_success: Option<OffsetDateTime>,
    last_message: Option<String>,
    last_error: Option<String>,
}

impl Default for SyncSession {
    fn default() -> Self {
        Self {
            configured: false,
            config_error: None,
            phase: SyncPhase::Idle,
            last_success: None,
            last_message: None,
            last_error: None,
        }
    }
}

impl SyncSession {
    /// Fresh session with its configuration already checked.
    pub fn mount(api: &dyn SyncApi) -> Self {
        let mut session = Self::default();
        session.check_configuration(api);
        session
    }

    pub fn check_configuration(&mut self, api: &dyn SyncApi) {
        match api.sync_status() {
            Ok(status) => {
                self.configured = status.configured;
                self.config_error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "sync status check failed");
                self.configured = false;
                self.config_error = Some(err.user_message("Failed to check sync configuration"));
            }
        }
    }

    pub fn configured(&self) -> bool {
        self.configured
    }

    pub fn config_error(&self) -> Option<&str> {
        self.config_error.as_deref()
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn last_success(&self) -> Option<OffsetDateTime> {
        self.last_success
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn can_trigger(&self) -> bool {
        self.configured && self.phase != SyncPhase::InFlight
    }

    /// Moves to InFlight when allowed. The caller must send exactly one POST
    /// after a `true` and report it through [`SyncSession::finish`].
    pub fn begin(&mut self) -> bool {
        if !self.can_trigger() {
            return false;
        }
        self.phase = SyncPhase::InFlight;
        self.last_error = None;
        self.last_message = None;
        tracing::info!("sync started");
        true
    }

    /// Records the outcome of the in-flight request. Ignored when nothing is in flight.
    pub fn finish(&mut self, result: ApiResult<SyncAccepted>) {
        if self.phase != SyncPhase::InFlight {
            return;
        }
        match result {
            Ok(accepted) => {
                self.phase = SyncPhase::Succeeded;
                self.last_success = Some(OffsetDateTime::now_utc());
                self.last_message = (!accepted.message.is_empty()).then_some(accepted.message);
                tracing::info!("sync succeeded");
            }
            Err(err) => {
                let message = failure_message(&err);
                tracing::warn!(error = %err, "sync failed");
                self.phase = SyncPhase::Failed;
                self.last_error = Some(message);
            }
        }
    }

    /// Blocking trigger. Returns whether a request was sent.
    pub fn trigger(&mut self, api: &dyn SyncApi) -> bool {
        if !self.begin() {
            return false;
        }
        let result = api.trigger_sync();
        self.finish(result);
        true
    }
}

/// Server message when there is one; the transport error text when the
/// server was unreachable; a generic notice otherwise.
pub fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Transport(text) => text.clone(),
        other => other.user_message("Sync failed"),
    }
}

/// Sync session whose POST runs on a worker thread. The owner calls
/// [`SyncPanel::poll`] from its loop to pick up the result.
#[derive(Debug, Default)]
pub struct SyncPanel {
    session: SyncSession,
    pending: Option<Receiver<ApiResult<SyncAccepted>>>,
}

impl SyncPanel {
    pub fn mount(api: &dyn SyncApi) -> Self {
        Self {
            session: SyncSession::mount(api),
            pending: None,
        }
    }

    /// Starts over with a fresh configuration check, unless a request is in
    /// flight; that session is kept until its result arrives.
    pub fn remount(&mut self, api: &dyn SyncApi) {
        if self.session.phase() == SyncPhase::InFlight {
            return;
        }
        self.session = SyncSession::mount(api);
        self.pending = None;
    }

    pub fn session(&self) -> &SyncSession {
        &self.session
    }

    pub fn trigger<A>(&mut self, api: A) -> bool
    where
        A: SyncApi + Send + 'static,
    {
        if !self.session.begin() {
            return false;
        }
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("oppdesk-sync".to_string())
            .spawn(move || {
                // The panel may be gone by the time this completes.
                let _ = tx.send(api.trigger_sync());
            });
        match spawned {
            Ok(_) => self.pending = Some(rx),
            Err(err) => self
                .session
                .finish(Err(ApiError::Transport(format!("spawn sync worker: {err}")))),
        }
        true
    }

    /// Applies a finished result, if any. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                Err(ApiError::Transport("sync worker exited".to_string()))
            }
        };
        self.pending = None;
        self.session.finish(result);
        true
    }
}
