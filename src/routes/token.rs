use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request;
use crate::types::response;

#[instrument(skip_all)]
pub(crate) async fn issue(
    State(state): State<AppState>,
    Json(params): Json<request::IssueToken>,
) -> Result<impl IntoResponse, Error> {
    let token = state.token_controller.issue(params.payload)?;

    Ok(Json(response::IssuedToken::new(
        token,
        state.token_controller.ttl().as_secs(),
    )))
}

#[instrument(skip_all)]
pub(crate) async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.token_controller.stats().await)
}
