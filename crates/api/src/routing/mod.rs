//! Declarative route metadata and path matching.

pub mod matcher;
pub mod table;

pub use matcher::{PathParams, Segment, compile_template, match_segments};
pub use table::{
    HttpVerb, Operation, ResourceGroup, RouteEntry, RouteLookupError, RouteTable, UnsupportedVerb,
};
