use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::{Html, IntoResponse, Response};
use neat_core::{NewLink, NewShort};

use super::parse_form;
use crate::error::{AppError, Result};
use crate::model::AddForm;
use crate::state::AppState;

/// Adds a link or a short.
///
/// The password is checked before the form's `type` or contents, so an
/// unauthorized caller learns nothing about what it sent.
pub async fn add_handler(
    State(state): State<AppState>,
    form: std::result::Result<Form<AddForm>, FormRejection>,
) -> Result<Response> {
    let form = parse_form(form)?;
    state.authorize(&form.password)?;

    match form.kind.as_str() {
        "link" => {
            let link = NewLink::new(form.description, form.url)?;
            let link = state
                .feed
                .add_link(link)
                .await
                .map_err(|err| state.escalate(err))?;
            tracing::info!(url = %link.url, "added a link");
        }
        "short" => {
            let short = NewShort::new(form.title, form.content, &form.release_hours)?;
            let short = state
                .feed
                .add_short(short)
                .await
                .map_err(|err| state.escalate(err))?;
            tracing::info!(id = %short.id, release_date = %short.release_date, "added a short");
        }
        _ => return Err(AppError::BadRequest("Invalid Type".to_string())),
    }

    Ok(success_page(&state, &form.kind).await)
}

async fn success_page(state: &AppState, kind: &str) -> Response {
    let path = state.static_file("addSuccess.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "success page unavailable");
            format!("Added a {kind}").into_response()
        }
    }
}
