use axum::Json;

use crate::types::response;

pub(crate) async fn get() -> Json<response::Health> {
    Json(response::Health { status: "healthy" })
}
