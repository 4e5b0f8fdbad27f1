//! Author workflows
//!
//! Each method takes already-extracted request input and returns an
//! [`Outcome`]. Validation failures re-render the form; store failures and
//! missing authors on the detail page propagate as [`AppError`].

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{author::AuthorFormValues, AuthorForm, AuthorSort, DeleteAuthorForm},
    repository::SharedStore,
    views::{Outcome, View, AUTHOR_LIST_PATH},
};

const CREATE_TITLE: &str = "Create Author";
const UPDATE_TITLE: &str = "Update Author";

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

#[derive(Clone)]
pub struct AuthorsService {
    store: SharedStore,
}

impl AuthorsService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All authors by family name
    pub async fn list(&self) -> AppResult<Outcome> {
        let authors = self.store.list_authors(AuthorSort::by_family_name()).await?;
        Ok(Outcome::Render(View::AuthorList { authors }))
    }

    /// Author page with their books
    pub async fn detail(&self, id: &str) -> AppResult<Outcome> {
        let not_found = || AppError::NotFound("Author not found".to_string());
        let id = parse_id(id).ok_or_else(not_found)?;

        let (author, books) =
            tokio::try_join!(self.store.get_author(id), self.store.books_by_author(id))?;
        let author = author.ok_or_else(not_found)?;

        Ok(Outcome::Render(View::AuthorDetail { author, books }))
    }

    pub fn create_form(&self) -> Outcome {
        Outcome::Render(View::AuthorForm {
            title: CREATE_TITLE,
            author: None,
            errors: Vec::new(),
        })
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<Outcome> {
        let submission = form.check(None);
        let draft = match submission.draft {
            Ok(draft) => draft,
            Err(errors) => {
                tracing::debug!("Author create rejected with {} error(s)", errors.len());
                return Ok(Outcome::Render(View::AuthorForm {
                    title: CREATE_TITLE,
                    author: Some(submission.values),
                    errors,
                }));
            }
        };

        let author = self.store.create_author(&draft).await?;
        tracing::info!("Created author id={}", author.id);
        Ok(Outcome::redirect(author.url()))
    }

    /// Delete confirmation page; missing authors send the browser to the list
    pub async fn delete_form(&self, id: &str) -> AppResult<Outcome> {
        let Some(id) = parse_id(id) else {
            return Ok(Outcome::redirect(AUTHOR_LIST_PATH));
        };

        let (author, books) =
            tokio::try_join!(self.store.get_author(id), self.store.books_by_author(id))?;
        match author {
            Some(author) => Ok(Outcome::Render(View::AuthorDelete { author, books })),
            None => Ok(Outcome::redirect(AUTHOR_LIST_PATH)),
        }
    }

    /// Delete an author unless books still reference them
    pub async fn delete(&self, id: &str, form: &DeleteAuthorForm) -> AppResult<Outcome> {
        let Some(author_id) = parse_id(id) else {
            return Ok(Outcome::redirect(AUTHOR_LIST_PATH));
        };
        if let Some(body_id) = form.authorid.as_deref().filter(|s| !s.trim().is_empty()) {
            if parse_id(body_id) != Some(author_id) {
                return Err(AppError::BadRequest(
                    "Author id in form does not match the page".to_string(),
                ));
            }
        }

        let (author, books) = tokio::try_join!(
            self.store.get_author(author_id),
            self.store.books_by_author(author_id)
        )?;

        if !books.is_empty() {
            tracing::warn!(
                "Refusing to delete author id={}: {} book(s) still reference it",
                author_id,
                books.len()
            );
            return match author {
                Some(author) => Ok(Outcome::Render(View::AuthorDelete { author, books })),
                None => Ok(Outcome::redirect(AUTHOR_LIST_PATH)),
            };
        }

        self.store.delete_author(author_id).await?;
        tracing::info!("Deleted author id={}", author_id);
        Ok(Outcome::redirect(AUTHOR_LIST_PATH))
    }

    /// Update form pre-filled with current values
    pub async fn update_form(&self, id: &str) -> AppResult<Outcome> {
        let author = match parse_id(id) {
            Some(id) => self.store.get_author(id).await?,
            None => None,
        };
        let Some(author) = author else {
            return Ok(Outcome::redirect(AUTHOR_LIST_PATH));
        };

        Ok(Outcome::Render(View::AuthorForm {
            title: UPDATE_TITLE,
            author: Some(AuthorFormValues::from(&author)),
            errors: Vec::new(),
        }))
    }

    pub async fn update(&self, id: &str, form: &AuthorForm) -> AppResult<Outcome> {
        let not_found = || AppError::NotFound("Author not found".to_string());
        let id = parse_id(id).ok_or_else(not_found)?;

        let submission = form.check(Some(id));
        let draft = match submission.draft {
            Ok(draft) => draft,
            Err(errors) => {
                tracing::debug!("Author update id={} rejected with {} error(s)", id, errors.len());
                return Ok(Outcome::Render(View::AuthorForm {
                    title: UPDATE_TITLE,
                    author: Some(submission.values),
                    errors,
                }));
            }
        };

        let author = self
            .store
            .update_author(id, &draft)
            .await?
            .ok_or_else(not_found)?;
        tracing::info!("Updated author id={}", author.id);
        Ok(Outcome::redirect(author.url()))
    }
}
