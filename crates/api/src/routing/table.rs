//! Route table: per-resource path prefixes and per-operation verb bindings.
//!
//! Resource groups are declared as `const` values next to their handlers and
//! assembled into a single `static` [`RouteTable`]. Nothing here is mutated
//! after process start, so the table is shared across requests without locks.

use core::str::FromStr;

use axum::http::Method;
use thiserror::Error;

use crate::authz::Access;

/// HTTP verb a route is bound to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpVerb {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl core::fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported HTTP verb '{0}'")]
pub struct UnsupportedVerb(pub String);

impl FromStr for HttpVerb {
    type Err = UnsupportedVerb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            other => Err(UnsupportedVerb(other.to_string())),
        }
    }
}

impl TryFrom<&Method> for HttpVerb {
    type Error = UnsupportedVerb;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

impl From<HttpVerb> for Method {
    fn from(verb: HttpVerb) -> Self {
        match verb {
            HttpVerb::Get => Method::GET,
            HttpVerb::Post => Method::POST,
            HttpVerb::Put => Method::PUT,
            HttpVerb::Patch => Method::PATCH,
            HttpVerb::Delete => Method::DELETE,
            HttpVerb::Head => Method::HEAD,
            HttpVerb::Options => Method::OPTIONS,
        }
    }
}

/// One operation inside a resource group: its verb, optional sub-path and
/// anonymous-access opt-in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub verb: HttpVerb,
    pub template: Option<&'static str>,
    pub allow_anonymous: bool,
}

impl Operation {
    pub const fn new(name: &'static str, verb: HttpVerb) -> Self {
        Self {
            name,
            verb,
            template: None,
            allow_anonymous: false,
        }
    }

    pub const fn get(name: &'static str) -> Self {
        Self::new(name, HttpVerb::Get)
    }

    pub const fn post(name: &'static str) -> Self {
        Self::new(name, HttpVerb::Post)
    }

    /// Sub-path appended to the group template (e.g. `{orderId}`).
    pub const fn at(mut self, template: &'static str) -> Self {
        self.template = Some(template);
        self
    }

    /// Opt this operation out of the credential requirement.
    pub const fn anonymous(mut self) -> Self {
        self.allow_anonymous = true;
        self
    }
}

/// A named resource owning a path prefix and its operations.
#[derive(Debug, Copy, Clone)]
pub struct ResourceGroup {
    pub name: &'static str,
    pub template: &'static str,
    pub operations: &'static [Operation],
}

/// Fully resolved route metadata for one operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub owner_name: &'static str,
    pub group_template: &'static str,
    pub method_name: &'static str,
    pub verb: HttpVerb,
    pub method_template: Option<&'static str>,
    pub allow_anonymous: bool,
}

impl RouteEntry {
    fn from_parts(group: &ResourceGroup, op: &Operation) -> Self {
        Self {
            owner_name: group.name,
            group_template: group.template,
            method_name: op.name,
            verb: op.verb,
            method_template: op.template,
            allow_anonymous: op.allow_anonymous,
        }
    }

    /// Group template joined with the method template; an absent or empty
    /// method template yields the group template alone.
    pub fn effective_path(&self) -> String {
        match self.method_template {
            Some(t) if !t.is_empty() => format!("{}/{}", self.group_template, t),
            _ => self.group_template.to_string(),
        }
    }

    pub fn access(&self) -> Access {
        Access::from_allow_anonymous(self.allow_anonymous)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteLookupError {
    #[error("route not found: {resource}.{operation}")]
    NotFound { resource: String, operation: String },

    #[error("resource group not found: {0}")]
    UnknownResource(String),
}

/// The full set of declared routes.
#[derive(Debug)]
pub struct RouteTable {
    groups: &'static [ResourceGroup],
}

impl RouteTable {
    pub const fn new(groups: &'static [ResourceGroup]) -> Self {
        Self { groups }
    }

    fn group(&self, resource: &str) -> Option<&'static ResourceGroup> {
        self.groups.iter().find(|g| g.name == resource)
    }

    pub fn group_template(&self, resource: &str) -> Result<&'static str, RouteLookupError> {
        self.group(resource)
            .map(|g| g.template)
            .ok_or_else(|| RouteLookupError::UnknownResource(resource.to_string()))
    }

    /// Look up a route by resource and operation name.
    pub fn entry(&self, resource: &str, operation: &str) -> Result<RouteEntry, RouteLookupError> {
        self.group(resource)
            .and_then(|g| {
                g.operations
                    .iter()
                    .find(|op| op.name == operation)
                    .map(|op| RouteEntry::from_parts(g, op))
            })
            .ok_or_else(|| RouteLookupError::NotFound {
                resource: resource.to_string(),
                operation: operation.to_string(),
            })
    }

    /// Every entry, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = RouteEntry> + '_ {
        self.groups
            .iter()
            .flat_map(|g| g.operations.iter().map(move |op| RouteEntry::from_parts(g, op)))
    }
}
