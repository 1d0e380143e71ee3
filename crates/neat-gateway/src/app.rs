use axum::Router;
use axum::routing::{get, get_service, post};
use tower_http::services::ServeFile;

use crate::handlers::{
    add_handler, all_handler, health_handler, invalid_method_handler, links_handler,
    not_found_handler, shorts_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        let info_page = ServeFile::new(state.static_file("info.html"));
        let add_page = ServeFile::new(state.static_file("add.html"));

        Router::new()
            .route("/", get_service(info_page))
            .route("/json", get(links_handler))
            .route("/shorts", get(shorts_handler))
            .route(
                "/add",
                get_service(add_page)
                    .post(add_handler)
                    .fallback(invalid_method_handler),
            )
            .route("/all", post(all_handler).fallback(invalid_method_handler))
            .route("/health", get(health_handler))
            .fallback(not_found_handler)
            .with_state(state)
    }
}
