//! Router-level tests over the in-memory store

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use local_library::{
    api,
    repository::{CatalogStore, MemoryRepository},
    AppState,
};

fn app(store: &MemoryRepository) -> Router {
    api::router(AppState::new(Arc::new(store.clone())))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("Failed to send request")
}

async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .expect("Failed to send request")
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("No Location header")
        .to_string()
}

async fn create_author(store: &MemoryRepository, body: &str) -> Uuid {
    let response = post_form(app(store), "/catalog/author/create", body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let to = location(&response);
    let id = to.strip_prefix("/catalog/author/").expect("Redirect to author page");
    Uuid::parse_str(id).expect("Author id in redirect")
}

#[tokio::test]
async fn test_health_check() {
    let store = MemoryRepository::new();

    let response = get(app(&store), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");

    let response = get(app(&store), "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let response = get(app(&MemoryRepository::new()), "/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog");
}

#[tokio::test]
async fn test_catalog_home_shows_counts() {
    let store = MemoryRepository::new();
    create_author(&store, "first_name=Jane&family_name=Austen").await;

    let response = get(app(&store), "/catalog").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<strong>Authors:</strong> 1"));
    assert!(body.contains("<strong>Books:</strong> 0"));
}

#[tokio::test]
async fn test_create_then_view_author() {
    let store = MemoryRepository::new();
    let id = create_author(
        &store,
        "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=",
    )
    .await;

    let response = get(app(&store), &format!("/catalog/author/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Author: Austen, Jane"));
    assert!(body.contains("Dec 16, 1775 - "));
    assert!(body.contains("This author has no books."));
}

#[tokio::test]
async fn test_list_is_sorted_by_family_name() {
    let store = MemoryRepository::new();
    create_author(&store, "first_name=Mary&family_name=Shelley").await;
    create_author(&store, "first_name=Jane&family_name=Austen").await;

    let body = body_text(get(app(&store), "/catalog/authors").await).await;
    let austen = body.find("Austen, Jane").expect("Austen listed");
    let shelley = body.find("Shelley, Mary").expect("Shelley listed");
    assert!(austen < shelley);
}

#[tokio::test]
async fn test_create_form_errors_are_rendered() {
    let store = MemoryRepository::new();

    let response = post_form(
        app(&store),
        "/catalog/author/create",
        "first_name=&family_name=Austen&date_of_birth=someday",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<title>Create Author</title>"));
    assert!(body.contains("First name must be specified."));
    assert!(body.contains("Invalid date of birth"));
    assert!(body.contains("value=\"Austen\""));
    assert_eq!(store.count_authors().await.unwrap(), 0);
}

#[tokio::test]
async fn test_digits_accepted_punctuation_rejected() {
    let store = MemoryRepository::new();
    create_author(&store, "first_name=Jane&family_name=Austen123").await;

    let response = post_form(
        app(&store),
        "/catalog/author/create",
        "first_name=Flann&family_name=O%27Brien",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Family name has non-alphanumeric characters."));
    assert_eq!(store.count_authors().await.unwrap(), 1);
}

#[tokio::test]
async fn test_rejected_name_is_echoed_escaped_once() {
    let store = MemoryRepository::new();

    let response = post_form(
        app(&store),
        "/catalog/author/create",
        "first_name=Flann&family_name=O%27Brien",
    )
    .await;
    let body = body_text(response).await;
    assert!(body.contains("value=\"O&#x27;Brien\""));
    assert!(!body.contains("&amp;#x27;"));

    // Resubmitting the shown value renders the same markup again
    let response = post_form(
        app(&store),
        "/catalog/author/create",
        "first_name=Flann&family_name=O%27Brien",
    )
    .await;
    assert_eq!(body_text(response).await, body);
}

#[tokio::test]
async fn test_unreadable_form_body_gets_html_error_page() {
    let store = MemoryRepository::new();

    let response = app(&store)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/catalog/author/create")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("first_name=Jane"))
                .unwrap(),
        )
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("<title>Error</title>"));
    assert!(body.contains("<h2>400</h2>"));
    assert_eq!(store.count_authors().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_post_with_malformed_id_is_404() {
    let store = MemoryRepository::new();

    let response = post_form(
        app(&store),
        "/catalog/author/not-a-uuid/update",
        "first_name=&family_name=",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("Author not found"));
    assert!(!body.contains("must be specified"));
}

#[tokio::test]
async fn test_missing_author_detail_is_404() {
    let store = MemoryRepository::new();

    let response = get(app(&store), &format!("/catalog/author/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Author not found"));

    let response = get(app(&store), "/catalog/author/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_guarded_by_books() {
    let store = MemoryRepository::new();
    let id = create_author(&store, "first_name=Jane&family_name=Austen").await;
    store.insert_book("Emma", "Matchmaking", "9780141439587", id).await;

    let response = get(app(&store), &format!("/catalog/author/{}/delete", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Delete the following books"));

    let response = post_form(
        app(&store),
        &format!("/catalog/author/{}/delete", id),
        &format!("authorid={}", id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<title>Delete Author</title>"));
    assert!(store.get_author(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_author_without_books() {
    let store = MemoryRepository::new();
    let id = create_author(&store, "first_name=Jane&family_name=Austen").await;

    let response = post_form(
        app(&store),
        &format!("/catalog/author/{}/delete", id),
        &format!("authorid={}", id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/authors");
    assert!(store.get_author(id).await.unwrap().is_none());

    // second delete is a no-op
    let response = post_form(
        app(&store),
        &format!("/catalog/author/{}/delete", id),
        &format!("authorid={}", id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_delete_and_update_pages_redirect_for_missing_author() {
    let store = MemoryRepository::new();
    let id = Uuid::new_v4();

    for uri in [
        format!("/catalog/author/{}/delete", id),
        format!("/catalog/author/{}/update", id),
    ] {
        let response = get(app(&store), &uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/catalog/authors");
    }
}

#[tokio::test]
async fn test_update_author() {
    let store = MemoryRepository::new();
    let id = create_author(&store, "first_name=Jane&family_name=Austen").await;

    let response = get(app(&store), &format!("/catalog/author/{}/update", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("<title>Update Author</title>"));
    assert!(body.contains("value=\"Jane\""));

    let response = post_form(
        app(&store),
        &format!("/catalog/author/{}/update", id),
        "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=1817-07-18",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/catalog/author/{}", id));

    let author = store.get_author(id).await.unwrap().unwrap();
    assert_eq!(author.lifespan(), "Dec 16, 1775 - Jul 18, 1817");
}

#[tokio::test]
async fn test_update_with_errors_keeps_stored_author() {
    let store = MemoryRepository::new();
    let id = create_author(&store, "first_name=Jane&family_name=Austen").await;

    let response = post_form(
        app(&store),
        &format!("/catalog/author/{}/update", id),
        "first_name=Jane&family_name=",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Family name must be specified."));
    assert_eq!(store.get_author(id).await.unwrap().unwrap().family_name, "Austen");
}

#[tokio::test]
async fn test_openapi_document_lists_author_routes() {
    let response = get(app(&MemoryRepository::new()), "/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(doc["paths"]["/catalog/authors"].is_object());
    assert!(doc["paths"]["/catalog/author/{id}/delete"]["post"].is_object());
}
