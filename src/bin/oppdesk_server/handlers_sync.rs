use time::OffsetDateTime;

use super::*;

pub(super) async fn sync_status(State(state): State<Arc<AppState>>) -> Json<SyncStatus> {
    Json(SyncStatus {
        configured: state.sync_source.is_some(),
    })
}

pub(super) async fn trigger_sync(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SyncAccepted>, Response> {
    let Some(source) = state.sync_source.as_ref() else {
        return Err(bad_request(
            "Sync source not configured. Start the server with --sync-source.",
        ));
    };

    let rows = read_sync_source(source).map_err(internal_error)?;
    let (rows, rejected) = partition_sync_rows(rows);
    for (row, reason) in &rejected {
        tracing::warn!(row, %reason, source = %source.display(), "skipping sync row");
    }

    let mut store = state.store.write().await;
    let count = store
        .upsert_synced(rows, OffsetDateTime::now_utc(), generate_id)
        .map_err(internal_error)?;
    tracing::info!(count, skipped = rejected.len(), source = %source.display(), "sync completed");

    let message = if rejected.is_empty() {
        format!("Successfully synced {} records", count)
    } else {
        format!(
            "Successfully synced {} records ({} skipped)",
            count,
            rejected.len()
        )
    };
    Ok(Json(SyncAccepted { message }))
}

fn read_sync_source(path: &std::path::Path) -> Result<Vec<OpportunityInput>> {
    let bytes = std::fs::read(path).with_context(|| format!("read sync source {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse sync source {}", path.display()))
}
