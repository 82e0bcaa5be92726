use super::*;

fn detail(status: StatusCode, msg: &str) -> Response {
    (status, Json(serde_json::json!({ "detail": msg }))).into_response()
}

pub(super) fn not_found() -> Response {
    detail(StatusCode::NOT_FOUND, "Opportunity not found")
}

pub(super) fn conflict(msg: &str) -> Response {
    detail(StatusCode::CONFLICT, msg)
}

pub(super) fn unprocessable(msg: &str) -> Response {
    detail(StatusCode::UNPROCESSABLE_ENTITY, msg)
}

pub(super) fn bad_request(msg: &str) -> Response {
    detail(StatusCode::BAD_REQUEST, msg)
}

pub(super) fn internal_error(err: anyhow::Error) -> Response {
    tracing::error!(error = %format!("{:#}", err), "request failed");
    detail(StatusCode::INTERNAL_SERVER_ERROR, &format!("{:#}", err))
}
