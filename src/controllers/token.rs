use std::sync::Arc;
use std::time::Duration;

use crate::core::error::Error;
use crate::token::admission::TokenAdmission;
use crate::token::issuer::TokenIssuer;
use crate::types::token::{Claims, Payload, TokenStats};

/// Issues one-time tokens and admits them, both keyed by the same secret.
#[derive(Clone)]
pub(crate) struct TokenController {
    issuer: TokenIssuer,
    admission: Arc<TokenAdmission>,
}

impl std::fmt::Debug for TokenController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenController")
            .field("ttl", &self.issuer.ttl())
            .finish()
    }
}

impl TokenController {
    pub(crate) fn new(secret: &str, ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            issuer: TokenIssuer::new(secret, ttl),
            admission: Arc::new(TokenAdmission::new(secret, ttl, sweep_interval)),
        }
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.issuer.ttl()
    }

    pub(crate) fn issue(&self, payload: Payload) -> Result<String, Error> {
        self.issuer.issue(payload)
    }

    pub(crate) async fn admit(&self, token: &str) -> Result<Claims, Error> {
        self.admission.admit(token).await
    }

    pub(crate) async fn stats(&self) -> TokenStats {
        self.admission.stats().await
    }
}
