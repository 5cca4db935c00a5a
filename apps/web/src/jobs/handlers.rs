use std::io::ErrorKind;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::JobPosting;
use crate::state::AppState;
use crate::view::Action;

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub loading: bool,
    pub filters: Vec<String>,
    pub jobs: Vec<JobPosting>,
}

/// POST /actions/reload
pub async fn handle_reload(State(state): State<AppState>) -> Redirect {
    state.dispatch(Action::Reload);
    Redirect::to("/")
}

/// GET /api/jobs
///
/// Postings matching the active filters, in display order.
pub async fn handle_get_jobs(State(state): State<AppState>) -> Json<JobsResponse> {
    Json(JobsResponse {
        loading: state.jobs.is_loading(),
        filters: state.filters.get(),
        jobs: state.jobs.get_filtered_jobs(),
    })
}

/// GET /data.json
///
/// The bundled listings document, the default jobs fetch target.
pub async fn handle_data_file(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let path = &state.config.data_path;
    let body = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            AppError::NotFound(format!("Listings file {} not found", path.display()))
        }
        _ => AppError::Internal(anyhow::Error::new(e).context("reading listings file")),
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
