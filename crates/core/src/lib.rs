//! `cart-core` — domain foundation for the cart API.
//!
//! This crate contains **pure domain** primitives (no HTTP or storage concerns).

pub mod error;
pub mod order;
pub mod paging;

pub use error::{DomainError, DomainResult};
pub use order::{OrderId, OrderModel};
pub use paging::PageRequest;
