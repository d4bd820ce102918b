//! Process configuration read from the environment.

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

pub const BIND_VAR: &str = "CART_API_BIND";
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': {source}", var = BIND_VAR)]
    InvalidBind {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|source| ConfigError::InvalidBind { value: bind.clone(), source })?;

        let jwt_secret = lookup(JWT_SECRET_VAR).unwrap_or_else(|| {
            tracing::warn!("{JWT_SECRET_VAR} not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        Ok(Self { bind_addr, jwt_secret })
    }
}
