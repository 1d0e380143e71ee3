mod add;
mod all;
mod fallback;
mod health;
mod links;
mod shorts;

pub use add::add_handler;
pub use all::all_handler;
pub use fallback::{invalid_method_handler, not_found_handler};
pub use health::health_handler;
pub use links::links_handler;
pub use shorts::shorts_handler;

use axum::Form;
use axum::extract::rejection::FormRejection;

use crate::error::AppError;

fn parse_form<T>(form: Result<Form<T>, FormRejection>) -> Result<T, AppError> {
    form.map(|Form(form)| form).map_err(|rejection| {
        tracing::debug!(error = %rejection, "unreadable form body");
        AppError::BadRequest("Some sort of form parsing error".to_string())
    })
}
