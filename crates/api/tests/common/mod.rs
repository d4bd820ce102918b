#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

use cart_api::authz::AuthGate;
use cart_api::dispatch::Dispatcher;
use cart_auth::{Hs256JwtValidator, JwtClaims, PrincipalId, Role};

pub const JWT_SECRET: &str = "test-secret";

pub fn mint_jwt(secret: &str, ttl: ChronoDuration) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: PrincipalId::new(),
        roles: vec![Role::new("customer")],
        issued_at: now - ChronoDuration::seconds(1),
        expires_at: now + ttl,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

pub fn valid_token() -> String {
    mint_jwt(JWT_SECRET, ChronoDuration::minutes(10))
}

pub fn gate() -> AuthGate {
    AuthGate::new(Arc::new(Hs256JwtValidator::new(JWT_SECRET)))
}

pub fn dispatcher() -> Dispatcher {
    cart_api::app::routes::dispatcher(gate()).expect("built-in handlers match the route table")
}
