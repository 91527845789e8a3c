use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request;
use crate::types::response;
use crate::utils;

#[instrument(skip_all)]
pub(crate) async fn post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(message): Json<request::Message>,
) -> Result<Json<response::Message>, Error> {
    message.validate()?;

    let claims = utils::auth::admit_token(&state, &headers).await?;

    tracing::info!(
        jti = %claims.id,
        to = %message.to,
        from = %message.from,
        ttl = message.time_to_life_sec,
        "processing message"
    );

    Ok(Json(response::Message::new(&message.to)))
}
