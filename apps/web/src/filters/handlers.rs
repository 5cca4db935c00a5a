use axum::{extract::State, response::Redirect, Form, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::view::Action;

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    pub filters: Vec<String>,
}

/// POST /actions/toggle
pub async fn handle_toggle(
    State(state): State<AppState>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    if form.keyword.trim().is_empty() {
        return Err(AppError::Validation("keyword cannot be empty".to_string()));
    }
    state.dispatch(Action::Toggle(form.keyword));
    Ok(Redirect::to("/"))
}

/// POST /actions/clear
pub async fn handle_clear(State(state): State<AppState>) -> Redirect {
    state.dispatch(Action::Clear);
    Redirect::to("/")
}

/// GET /api/filters
pub async fn handle_get_filters(State(state): State<AppState>) -> Json<FiltersResponse> {
    Json(FiltersResponse {
        filters: state.filters.get(),
    })
}
