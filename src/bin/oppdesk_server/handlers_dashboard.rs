use super::*;

pub(super) async fn get_stats(State(state): State<Arc<AppState>>) -> Json<OpportunityStats> {
    let store = state.store.read().await;
    Json(store.stats(time::OffsetDateTime::now_utc()))
}

pub(super) async fn get_deals_needing_attention(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<DealNeedingAttention>> {
    let store = state.store.read().await;
    Json(store.needing_attention())
}
