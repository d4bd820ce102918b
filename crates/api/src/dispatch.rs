//! Request dispatch: route matching, authorization gate, handler invocation.
//!
//! The dispatcher is transport-agnostic apart from the body/status types it
//! borrows from `axum::http`. One `dispatch` call is one request; dropping the
//! returned future cancels the gate check or handler that is in flight.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::Instrument;

use cart_core::DomainError;

use crate::authz::AuthGate;
use crate::context::PrincipalContext;
use crate::routing::{
    HttpVerb, PathParams, RouteEntry, RouteLookupError, RouteTable, Segment, compile_template,
    match_segments,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no route matches {verb} {path}")]
    RouteNotFound { verb: HttpVerb, path: String },

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("operation '{resource}.{operation}' is not implemented")]
    OperationNotImplemented {
        resource: &'static str,
        operation: &'static str,
    },
}

impl DispatchError {
    pub fn not_implemented(entry: &RouteEntry) -> Self {
        Self::OperationNotImplemented {
            resource: entry.owner_name,
            operation: entry.method_name,
        }
    }
}

impl From<DomainError> for DispatchError {
    fn from(e: DomainError) -> Self {
        Self::InvalidRequest(e.to_string())
    }
}

/// Inbound request as seen by the dispatcher.
///
/// `path` is the raw request path; percent-escapes are decoded per segment
/// during matching. No trailing-slash or case folding happens here.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub verb: HttpVerb,
    pub path: String,
    pub query: Option<String>,
    pub credential: Option<String>,
    pub body: Option<Bytes>,
}

impl DispatchRequest {
    pub fn new(verb: HttpVerb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            query: None,
            credential: None,
            body: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_credential(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(token.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A matched, authorised request handed to a route handler.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub entry: RouteEntry,
    pub params: PathParams,
    pub query: Option<String>,
    pub body: Option<Bytes>,
    pub principal: Option<PrincipalContext>,
}

impl RouteRequest {
    /// Percent-decoded value of a bound path parameter.
    pub fn param(&self, name: &str) -> Result<&str, DispatchError> {
        self.params
            .get(name)
            .ok_or_else(|| DispatchError::InvalidRequest(format!("missing path parameter '{name}'")))
    }

    /// Decode the query string; an absent query decodes like an empty one.
    pub fn query<T: DeserializeOwned>(&self) -> Result<T, DispatchError> {
        serde_urlencoded::from_str(self.query.as_deref().unwrap_or(""))
            .map_err(|e| DispatchError::InvalidRequest(format!("query: {e}")))
    }

    pub fn body(&self) -> Result<&[u8], DispatchError> {
        self.body
            .as_deref()
            .ok_or_else(|| DispatchError::InvalidRequest("request body is required".to_string()))
    }
}

/// Successful handler result.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOutput {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl HandlerOutput {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }
}

#[async_trait]
pub trait RouteHandler: Send + Sync {
    async fn handle(&self, request: RouteRequest) -> Result<HandlerOutput, DispatchError>;
}

/// What a route runs once the gate has passed.
#[derive(Clone)]
pub enum Handler {
    /// Placeholder: always fails with `OperationNotImplemented`.
    NotImplemented,
    Bound(Arc<dyn RouteHandler>),
}

impl Handler {
    pub fn bound(handler: impl RouteHandler + 'static) -> Self {
        Self::Bound(Arc::new(handler))
    }

    async fn invoke(&self, request: RouteRequest) -> Result<HandlerOutput, DispatchError> {
        match self {
            Self::NotImplemented => Err(DispatchError::not_implemented(&request.entry)),
            Self::Bound(handler) => handler.handle(request).await,
        }
    }
}

impl core::fmt::Debug for Handler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotImplemented => f.write_str("NotImplemented"),
            Self::Bound(_) => f.write_str("Bound(..)"),
        }
    }
}

#[derive(Debug)]
struct CompiledRoute {
    entry: RouteEntry,
    segments: Vec<Segment>,
    handler: Handler,
}

/// Resolves requests against a [`RouteTable`] and runs the bound handlers.
#[derive(Debug)]
pub struct Dispatcher {
    routes: Vec<CompiledRoute>,
    gate: AuthGate,
}

impl Dispatcher {
    /// Every declared route starts with the [`Handler::NotImplemented`] placeholder.
    pub fn new(table: &RouteTable, gate: AuthGate) -> Self {
        let routes = table
            .entries()
            .map(|entry| CompiledRoute {
                segments: compile_template(&entry.effective_path()),
                entry,
                handler: Handler::NotImplemented,
            })
            .collect();

        Self { routes, gate }
    }

    /// Substitute the handler of a declared operation.
    pub fn bind(
        &mut self,
        resource: &str,
        operation: &str,
        handler: Handler,
    ) -> Result<(), RouteLookupError> {
        let route = self
            .routes
            .iter_mut()
            .find(|r| r.entry.owner_name == resource && r.entry.method_name == operation)
            .ok_or_else(|| RouteLookupError::NotFound {
                resource: resource.to_string(),
                operation: operation.to_string(),
            })?;
        route.handler = handler;
        Ok(())
    }

    /// Find the first route (declaration order) whose verb and path match.
    pub fn resolve(&self, verb: HttpVerb, path: &str) -> Option<(RouteEntry, PathParams)> {
        self.find(verb, path).map(|(route, params)| (route.entry, params))
    }

    fn find(&self, verb: HttpVerb, path: &str) -> Option<(&CompiledRoute, PathParams)> {
        self.routes
            .iter()
            .filter(|r| r.entry.verb == verb)
            .find_map(|r| match_segments(&r.segments, path).map(|params| (r, params)))
    }

    pub async fn dispatch(&self, request: DispatchRequest) -> Result<HandlerOutput, DispatchError> {
        let span = tracing::debug_span!("dispatch", verb = %request.verb, path = %request.path);
        self.dispatch_inner(request).instrument(span).await
    }

    async fn dispatch_inner(&self, request: DispatchRequest) -> Result<HandlerOutput, DispatchError> {
        let DispatchRequest {
            verb,
            path,
            query,
            credential,
            body,
        } = request;

        let Some((route, params)) = self.find(verb, &path) else {
            tracing::debug!("no matching route");
            return Err(DispatchError::RouteNotFound { verb, path });
        };

        tracing::debug!(
            resource = route.entry.owner_name,
            operation = route.entry.method_name,
            "route matched"
        );

        let principal = self.gate.check(route.entry.access(), credential.as_deref()).await?;
        if let Some(principal) = &principal {
            tracing::debug!(principal = %principal.principal_id(), "credential accepted");
        }

        let handler = route.handler.clone();
        handler
            .invoke(RouteRequest {
                entry: route.entry,
                params,
                query,
                body,
                principal,
            })
            .await
    }
}
