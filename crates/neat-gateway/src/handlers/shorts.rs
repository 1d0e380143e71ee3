use axum::extract::State;
use axum::response::Html;

use crate::error::Result;
use crate::state::AppState;

pub async fn shorts_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let shorts = state
        .feed
        .visible_shorts()
        .await
        .map_err(|err| state.escalate(err))?;

    let page = state.renderer.render(&shorts)?;
    Ok(Html(page))
}
