use axum::Form;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use neat_core::ContentStorage;

use super::parse_form;
use crate::error::Result;
use crate::model::PasswordForm;
use crate::state::AppState;

/// Exports the whole store for the admin.
pub async fn all_handler(
    State(state): State<AppState>,
    form: std::result::Result<Form<PasswordForm>, FormRejection>,
) -> Result<Json<ContentStorage>> {
    let form = parse_form(form)?;
    state.authorize(&form.password)?;

    let storage = state
        .feed
        .export()
        .await
        .map_err(|err| state.escalate(err))?;

    tracing::info!(
        links = storage.links.len(),
        shorts = storage.shorts.len(),
        "admin exported all content"
    );
    Ok(Json(storage))
}
