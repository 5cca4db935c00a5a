pub mod health;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::filters::handlers as filter_handlers;
use crate::jobs::handlers as job_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::handle_index))
        .route("/health", get(health::health_handler))
        .route("/events", get(page::handle_events))
        .route("/data.json", get(job_handlers::handle_data_file))
        // Click controls rendered from `view::Action`
        .route("/actions/toggle", post(filter_handlers::handle_toggle))
        .route("/actions/clear", post(filter_handlers::handle_clear))
        .route("/actions/reload", post(job_handlers::handle_reload))
        // JSON API
        .route("/api/filters", get(filter_handlers::handle_get_filters))
        .route("/api/jobs", get(job_handlers::handle_get_jobs))
        .with_state(state)
}
