//! HTTP handlers and routing

pub mod authors;
pub mod catalog;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    response::Redirect,
    routing::get,
    Form, Router,
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;

use crate::{error::AppError, AppState};

/// Form body extractor whose rejections render as the HTML error page
pub struct HtmlForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for HtmlForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Rejected form body: {}", rejection.body_text());
            AppError::BadRequest(rejection.body_text())
        })?;
        Ok(HtmlForm(value))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::author_list))
        .route(
            "/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/author/:id", get(authors::author_detail))
        .route(
            "/author/:id/delete",
            get(authors::author_delete_get).post(authors::author_delete_post),
        )
        .route(
            "/author/:id/update",
            get(authors::author_update_get).post(authors::author_update_post),
        );

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
