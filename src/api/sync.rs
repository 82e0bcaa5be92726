use super::*;

impl SyncApi for ApiClient {
    fn sync_status(&self) -> ApiResult<SyncStatus> {
        let req = self.client.get(self.url("/sync/snowflake/status"));
        self.send_json(req, "sync status")
    }

    fn trigger_sync(&self) -> ApiResult<SyncAccepted> {
        tracing::info!(base_url = %self.base_url, "POST /sync/snowflake");
        let req = self.client.post(self.url("/sync/snowflake"));
        self.send_json(req, "trigger sync")
    }
}
