mod form;

pub use form::{AddForm, HealthResponse, PasswordForm};
