use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::dispatch::DispatchError;

pub fn dispatch_error_to_response(err: DispatchError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DispatchError::RouteNotFound { .. } => json_error(StatusCode::NOT_FOUND, "route_not_found", message),
        DispatchError::Unauthorized => json_error(StatusCode::UNAUTHORIZED, "unauthorized", message),
        DispatchError::InvalidRequest(_) => json_error(StatusCode::BAD_REQUEST, "invalid_request", message),
        DispatchError::OperationNotImplemented { .. } => {
            json_error(StatusCode::NOT_IMPLEMENTED, "not_implemented", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
