//! `cart-auth` — bearer credential boundary.
//!
//! This crate is intentionally decoupled from HTTP routing: it turns an opaque
//! bearer token into verified claims and nothing more.

pub mod claims;
pub mod principal;
pub mod validator;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use principal::{PrincipalId, Role};
pub use validator::{CredentialValidator, Hs256JwtValidator};
