use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::time::Duration;

use crate::core::error::Error;
use crate::token::store::ConsumedTokens;
use crate::types::token::{Claims, TokenStats, UnverifiedClaims};

/// Accepts each validly signed, unexpired token exactly once.
///
/// Checks run in a fixed order: signature, then expiry, then required claims
/// and lifetime, then uniqueness. Only a token that passes the first three
/// ever reaches the consumed-token store.
///
/// A consumed record is swept once it is older than the ttl, so a token must
/// never stay valid longer than the ttl after admission.
pub(crate) struct TokenAdmission {
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
    consumed: ConsumedTokens,
}

impl TokenAdmission {
    pub(crate) fn new(secret: &str, ttl: Duration, sweep_interval: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below with no leeway, after the signature.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
            consumed: ConsumedTokens::new(ttl, sweep_interval),
        }
    }

    pub(crate) async fn admit(&self, token: &str) -> Result<Claims, Error> {
        let claims = self.verify(token)?;

        if !self.consumed.consume(&claims.id).await {
            tracing::warn!(jti = %claims.id, "token already used");
            return Err(Error::TokenAlreadyUsed);
        }

        tracing::info!(jti = %claims.id, "token admitted and marked as used");

        Ok(claims)
    }

    pub(crate) async fn stats(&self) -> TokenStats {
        self.consumed.stats().await
    }

    fn verify(&self, token: &str) -> Result<Claims, Error> {
        let token_data =
            jsonwebtoken::decode::<UnverifiedClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| {
                    tracing::warn!("invalid token: {}", e);
                    Error::InvalidToken
                })?;

        let claims = token_data.claims;
        let now = Utc::now().timestamp();

        if now >= claims.exp {
            tracing::warn!(exp = claims.exp, "token expired");
            return Err(Error::TokenExpired);
        }

        let (Some(id), Some(iat)) = (claims.jti, claims.iat) else {
            tracing::warn!("token missing unique identifier or issue time");
            return Err(Error::InvalidToken);
        };

        if claims.exp.saturating_sub(now) > self.ttl_secs
            || claims.exp.saturating_sub(iat) > self.ttl_secs
        {
            tracing::warn!(jti = %id, exp = claims.exp, iat, "token lifetime exceeds ttl");
            return Err(Error::InvalidToken);
        }

        Ok(Claims {
            id,
            iat,
            exp: claims.exp,
            payload: claims.payload,
        })
    }
}
