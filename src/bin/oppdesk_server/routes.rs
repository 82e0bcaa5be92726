use axum::routing::get;

use super::*;

pub(super) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route(
            "/opportunities",
            get(list_opportunities).post(create_opportunity),
        )
        .route(
            "/opportunities/:id",
            get(get_opportunity)
                .put(update_opportunity)
                .delete(delete_opportunity),
        )
        .route("/stats", get(get_stats))
        .route("/deals-needing-attention", get(get_deals_needing_attention))
        .route("/sync/snowflake/status", get(sync_status))
        .route("/sync/snowflake", axum::routing::post(trigger_sync))
        .with_state(state)
}
