//! Catalog home endpoint

use axum::extract::State;

use crate::{error::AppResult, views::Outcome, AppState};

/// Catalog home page
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Home page with record counts", body = String, content_type = "text/html")
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Outcome> {
    state.services.catalog.home().await
}
