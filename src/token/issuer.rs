use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header};
use std::time::Duration;

use crate::core::error::Error;
use crate::types::token::{Claims, Payload, RESERVED_CLAIMS};

/// Mints signed, time-bound, uniquely identified tokens.
#[derive(Clone)]
pub(crate) struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub(crate) fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) fn issue(&self, mut payload: Payload) -> Result<String, Error> {
        for claim in RESERVED_CLAIMS {
            if payload.remove(claim).is_some() {
                tracing::debug!(claim, "dropping reserved claim from caller payload");
            }
        }

        let iat = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let exp = iat.saturating_add(ttl);

        let claims = Claims {
            id: generate_id(),
            iat,
            exp,
            payload,
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)?;

        tracing::info!(jti = %claims.id, exp, "issued token");

        Ok(token)
    }
}

fn generate_id() -> String {
    URL_SAFE_NO_PAD.encode(rand::random::<[u8; 16]>())
}
