use time::OffsetDateTime;

use super::*;

fn store_error(err: StoreError) -> Response {
    match err {
        StoreError::NotFound => not_found(),
        StoreError::DuplicateSalesforceId(sfid) => conflict(&format!(
            "Opportunity with salesforce_id {} already exists",
            sfid
        )),
    }
}

pub(super) async fn list_opportunities(
    State(state): State<Arc<AppState>>,
    Query(filters): Query<OpportunityFilters>,
) -> Result<Json<Vec<Opportunity>>, Response> {
    validate_limit(&filters).map_err(|msg| unprocessable(&msg))?;
    let store = state.store.read().await;
    let rows = store.list(&filters);
    tracing::info!(rows = rows.len(), "list opportunities");
    Ok(Json(rows))
}

pub(super) async fn get_opportunity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Opportunity>, Response> {
    let store = state.store.read().await;
    store.get(&id).cloned().map(Json).ok_or_else(not_found)
}

pub(super) async fn create_opportunity(
    State(state): State<Arc<AppState>>,
    Json(input): Json<OpportunityInput>,
) -> Result<Json<Opportunity>, Response> {
    validate_input(&input).map_err(|msg| unprocessable(&msg))?;
    let id = generate_id().map_err(internal_error)?;

    let mut store = state.store.write().await;
    let created = store
        .create(id, input, OffsetDateTime::now_utc())
        .map_err(store_error)?;
    tracing::info!(id = %created.id, salesforce_id = %created.salesforce_id, "created opportunity");
    Ok(Json(created))
}

pub(super) async fn update_opportunity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<OpportunityInput>,
) -> Result<Json<Opportunity>, Response> {
    validate_input(&input).map_err(|msg| unprocessable(&msg))?;

    let mut store = state.store.write().await;
    let updated = store
        .update(&id, input, OffsetDateTime::now_utc())
        .map_err(store_error)?;
    tracing::info!(id = %updated.id, "updated opportunity");
    Ok(Json(updated))
}

pub(super) async fn delete_opportunity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, Response> {
    let mut store = state.store.write().await;
    if !store.delete(&id) {
        return Err(not_found());
    }
    tracing::info!(id = %id, "deleted opportunity");
    Ok(Json(
        serde_json::json!({ "message": "Opportunity deleted successfully" }),
    ))
}
