use super::*;

pub(super) async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Opportunity Management API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(super) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
