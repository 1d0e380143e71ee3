use axum::Json;
use axum::extract::State;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::response::IntoResponse;

use crate::error::Result;
use crate::state::AppState;

/// The public link window as JSON, readable from any origin.
pub async fn links_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let links = state
        .feed
        .public_links()
        .await
        .map_err(|err| state.escalate(err))?;

    Ok(([(ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(links)))
}
