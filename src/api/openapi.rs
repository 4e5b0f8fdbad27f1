//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, catalog, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library",
        version = "0.1.0",
        description = "Server-rendered library catalog",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::index,
        // Authors
        authors::author_list,
        authors::author_detail,
        authors::author_create_get,
        authors::author_create_post,
        authors::author_delete_get,
        authors::author_delete_post,
        authors::author_update_get,
        authors::author_update_post,
    ),
    components(
        schemas(
            crate::models::author::AuthorForm,
            crate::models::author::DeleteAuthorForm,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog home"),
        (name = "authors", description = "Author pages")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
