use axum::extract::State;
use axum::http::HeaderMap;
use axum::{body::Body, extract::Request, http::Response, middleware::Next};
use subtle::ConstantTimeEq;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::token::Claims;

pub(crate) const API_KEY_HEADER: &str = "X-Parse-REST-API-Key";
pub(crate) const JWT_HEADER: &str = "X-JWT-KWY";

fn check_api_key(headers: &HeaderMap, expected: &str) -> Result<(), Error> {
    let api_key = headers
        .get(API_KEY_HEADER)
        .ok_or(Error::InvalidApiKey)?
        .to_str()
        .map_err(|_| Error::InvalidApiKey)?;

    if !bool::from(api_key.as_bytes().ct_eq(expected.as_bytes())) {
        return Err(Error::InvalidApiKey);
    }

    Ok(())
}

/// Requires the static API key only.
pub(crate) async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    check_api_key(request.headers(), &state.api_key)?;

    Ok(next.run(request).await)
}

/// Admits the one-time token carried in the request headers.
///
/// Callers run this only once the rest of the request has been accepted, so a
/// rejected request never spends its token.
pub(crate) async fn admit_token(state: &AppState, headers: &HeaderMap) -> Result<Claims, Error> {
    let token = headers
        .get(JWT_HEADER)
        .ok_or(Error::MissingToken)?
        .to_str()
        .map_err(|_| Error::InvalidToken)?;

    state.token_controller.admit(token).await
}
