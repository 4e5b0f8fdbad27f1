//! Author page endpoints

use axum::extract::{Path, State};

use super::HtmlForm;
use crate::{
    error::AppResult,
    models::{AuthorForm, DeleteAuthorForm},
    views::Outcome,
    AppState,
};

/// List all authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list page", body = String, content_type = "text/html")
    )
)]
pub async fn author_list(State(state): State<AppState>) -> AppResult<Outcome> {
    state.services.authors.list().await
}

/// Author detail page with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author detail page", body = String, content_type = "text/html"),
        (status = 404, description = "Author not found", body = String, content_type = "text/html")
    )
)]
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    state.services.authors.detail(&id).await
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "Create author form", body = String, content_type = "text/html")
    )
)]
pub async fn author_create_get(State(state): State<AppState>) -> Outcome {
    state.services.authors.create_form()
}

/// Create an author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form shown again with errors", body = String, content_type = "text/html"),
        (status = 303, description = "Created; redirect to the author page")
    )
)]
pub async fn author_create_post(
    State(state): State<AppState>,
    HtmlForm(form): HtmlForm<AuthorForm>,
) -> AppResult<Outcome> {
    state.services.authors.create(&form).await
}

/// Delete confirmation page
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Delete confirmation page", body = String, content_type = "text/html"),
        (status = 303, description = "Author not found; redirect to the list")
    )
)]
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    state.services.authors.delete_form(&id).await
}

/// Delete an author that has no books
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    request_body(content = DeleteAuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Deletion refused; the author still has books", body = String, content_type = "text/html"),
        (status = 303, description = "Deleted; redirect to the list"),
        (status = 400, description = "Form author id does not match the path")
    )
)]
pub async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    HtmlForm(form): HtmlForm<DeleteAuthorForm>,
) -> AppResult<Outcome> {
    state.services.authors.delete(&id, &form).await
}

/// Update form pre-filled with the author's values
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Update author form", body = String, content_type = "text/html"),
        (status = 303, description = "Author not found; redirect to the list")
    )
)]
pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    state.services.authors.update_form(&id).await
}

/// Update an author
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form shown again with errors", body = String, content_type = "text/html"),
        (status = 303, description = "Updated; redirect to the author page"),
        (status = 404, description = "Author not found", body = String, content_type = "text/html")
    )
)]
pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    HtmlForm(form): HtmlForm<AuthorForm>,
) -> AppResult<Outcome> {
    state.services.authors.update(&id, &form).await
}
