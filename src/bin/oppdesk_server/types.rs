use super::*;

pub(super) struct AppState {
    pub(super) store: RwLock<Store>,

    /// JSON file a sync run reads from. Sync is unconfigured without it.
    pub(super) sync_source: Option<PathBuf>,
}

impl AppState {
    pub(super) fn new(store: Store, sync_source: Option<PathBuf>) -> Arc<Self> {
        Arc::new(Self {
            store: RwLock::new(store),
            sync_source,
        })
    }
}
