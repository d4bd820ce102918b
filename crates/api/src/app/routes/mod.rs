//! Resource groups and their handlers (one file per resource).

use crate::authz::AuthGate;
use crate::dispatch::Dispatcher;
use crate::routing::{RouteLookupError, RouteTable};

pub mod order;
pub mod store;
pub mod system;

/// Every route the cart API serves.
pub static ROUTES: RouteTable = RouteTable::new(&[order::ROUTES, store::ROUTES]);

/// Dispatcher over [`ROUTES`] with the built-in order handlers bound; store
/// routes keep the placeholder handler.
pub fn dispatcher(gate: AuthGate) -> Result<Dispatcher, RouteLookupError> {
    let mut dispatcher = Dispatcher::new(&ROUTES, gate);
    for (operation, handler) in order::handlers() {
        dispatcher.bind(order::RESOURCE, operation, handler)?;
    }
    Ok(dispatcher)
}
