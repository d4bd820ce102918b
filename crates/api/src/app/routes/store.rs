//! `/api/store` — store information and opening hours.
//!
//! Neither operation takes input, so both keep the placeholder handler.

use crate::routing::{Operation, ResourceGroup};

pub const RESOURCE: &str = "store";

pub const ROUTES: ResourceGroup = ResourceGroup {
    name: RESOURCE,
    template: "/api/store",
    operations: &[
        Operation::get("get_store_info"),
        // Opening hours are public: the only route reachable without a token.
        Operation::get("get_open_hours").at("open-hours").anonymous(),
    ],
};
