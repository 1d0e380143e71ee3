use serde::{Deserialize, Serialize};

/// Body of `POST /add`. Every field is optional on the wire; what a given
/// `type` requires is checked after the password.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddForm {
    pub password: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub url: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "releaseHours")]
    pub release_hours: String,
}

/// Body of `POST /all`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PasswordForm {
    pub password: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
