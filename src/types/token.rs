use serde::{Deserialize, Serialize};

/// Caller-supplied claims carried opaquely through signing.
pub(crate) type Payload = serde_json::Map<String, serde_json::Value>;

/// Claim names the issuer always controls.
pub(crate) const RESERVED_CLAIMS: [&str; 3] = ["jti", "iat", "exp"];

/// The claim set of a one-time token.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub(crate) struct Claims {
    #[serde(rename = "jti")]
    pub(crate) id: String,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
    #[serde(flatten)]
    pub(crate) payload: Payload,
}

/// Claims as they come off the wire, before the admission checks have run.
#[derive(Debug, Deserialize)]
pub(crate) struct UnverifiedClaims {
    pub(crate) jti: Option<String>,
    pub(crate) iat: Option<i64>,
    pub(crate) exp: i64,
    #[serde(flatten)]
    pub(crate) payload: Payload,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub(crate) struct TokenStats {
    pub(crate) used_count: usize,
    pub(crate) last_eviction_timestamp: i64,
    pub(crate) ttl_seconds: u64,
}
