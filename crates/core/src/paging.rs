//! Paging window for list endpoints.

use serde::{Deserialize, Serialize};

/// Default number of items returned by a list endpoint.
pub const DEFAULT_PAGE_SIZE: i32 = 15;

/// Offset/size window decoded from the `offset` and `pageSize` query keys.
///
/// Both keys are optional. No bounds are enforced here; a list handler decides
/// how to treat negative or oversized windows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageRequest {
    pub offset: i32,
    pub page_size: i32,
}

impl PageRequest {
    pub fn new(offset: i32, page_size: i32) -> Self {
        Self { offset, page_size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
