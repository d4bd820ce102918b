//! HTTP binding (Axum router) for the dispatcher.
//!
//! Layout:
//! - `routes/`: resource groups + handlers (one file per resource)
//! - `errors.rs`: dispatch errors to JSON error responses
//! - `credentials.rs`: bearer token extraction

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};

use cart_auth::Hs256JwtValidator;

use crate::authz::AuthGate;
use crate::dispatch::{DispatchRequest, Dispatcher};
use crate::routing::{HttpVerb, RouteLookupError};

pub mod credentials;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(jwt_secret: impl AsRef<[u8]>) -> Result<Router, RouteLookupError> {
    let gate = AuthGate::new(Arc::new(Hs256JwtValidator::new(jwt_secret)));
    let dispatcher = routes::dispatcher(gate)?;
    Ok(router(Arc::new(dispatcher)))
}

/// Router serving `/health` directly and everything else through `dispatcher`.
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .fallback(forward)
        .with_state(dispatcher)
}

async fn forward(
    State(dispatcher): State<Arc<Dispatcher>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Ok(verb) = HttpVerb::try_from(&method) else {
        return errors::json_error(
            StatusCode::NOT_FOUND,
            "route_not_found",
            format!("no route matches {method} {}", uri.path()),
        );
    };

    let mut request = DispatchRequest::new(verb, uri.path());
    if let Some(query) = uri.query() {
        request = request.with_query(query);
    }
    if let Some(token) = credentials::extract_bearer(&headers) {
        request = request.with_credential(token);
    }
    if !body.is_empty() {
        request = request.with_body(body);
    }

    match dispatcher.dispatch(request).await {
        Ok(output) => (output.status, Json(output.body)).into_response(),
        Err(e) => errors::dispatch_error_to_response(e),
    }
}
