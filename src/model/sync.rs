use serde::{Deserialize, Serialize};

/// `GET /sync/snowflake/status`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub configured: bool,
}

/// 2xx body of `POST /sync/snowflake`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAccepted {
    #[serde(default)]
    pub message: String,
}
