//! Per-route authorization gate.
//!
//! Every route requires a valid bearer credential unless its declaration opts
//! into anonymous access. The state is fixed when the route is declared.

use std::sync::Arc;

use chrono::Utc;

use cart_auth::CredentialValidator;

use crate::context::PrincipalContext;
use crate::dispatch::DispatchError;

/// Gate state of a route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    RequiresAuth,
    Anonymous,
}

impl Access {
    pub fn from_allow_anonymous(allow_anonymous: bool) -> Self {
        if allow_anonymous {
            Self::Anonymous
        } else {
            Self::RequiresAuth
        }
    }
}

/// Enforces [`Access`] before a handler runs.
#[derive(Clone)]
pub struct AuthGate {
    validator: Arc<dyn CredentialValidator>,
}

impl AuthGate {
    pub fn new(validator: Arc<dyn CredentialValidator>) -> Self {
        Self { validator }
    }

    /// Check a route's access state against the caller's credential.
    ///
    /// Anonymous routes pass without looking at the credential and yield no
    /// principal.
    pub async fn check(
        &self,
        access: Access,
        credential: Option<&str>,
    ) -> Result<Option<PrincipalContext>, DispatchError> {
        if access == Access::Anonymous {
            return Ok(None);
        }

        let Some(token) = credential else {
            tracing::debug!("credential missing");
            return Err(DispatchError::Unauthorized);
        };

        match self.validator.validate(token, Utc::now()).await {
            Ok(claims) => Ok(Some(PrincipalContext::from(claims))),
            Err(e) => {
                tracing::debug!(error = %e, "credential rejected");
                Err(DispatchError::Unauthorized)
            }
        }
    }
}

impl core::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}
