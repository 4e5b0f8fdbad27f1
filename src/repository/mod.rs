//! Repository layer for catalog storage

pub mod authors;
pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, AuthorDraft, AuthorSort, BookSummary},
};

pub use memory::MemoryRepository;

/// Storage operations the catalog workflows rely on.
///
/// Absence is never an error: lookups return `None`, updates of a missing
/// author return `None` and deletes of a missing author succeed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_authors(&self, sort: AuthorSort) -> AppResult<Vec<Author>>;

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>>;

    /// Books written by an author, title and summary only
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>>;

    /// Persist a new author; the store assigns the id
    async fn create_author(&self, draft: &AuthorDraft) -> AppResult<Author>;

    async fn update_author(&self, id: Uuid, draft: &AuthorDraft) -> AppResult<Option<Author>>;

    async fn delete_author(&self, id: Uuid) -> AppResult<()>;

    async fn count_authors(&self) -> AppResult<i64>;

    async fn count_books(&self) -> AppResult<i64>;

    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

pub type SharedStore = Arc<dyn CatalogStore>;

/// PostgreSQL-backed repository holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn list_authors(&self, sort: AuthorSort) -> AppResult<Vec<Author>> {
        self.authors.list(sort).await
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors.get_by_id(id).await
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        self.books.summaries_by_author(author_id).await
    }

    async fn create_author(&self, draft: &AuthorDraft) -> AppResult<Author> {
        self.authors.create(draft).await
    }

    async fn update_author(&self, id: Uuid, draft: &AuthorDraft) -> AppResult<Option<Author>> {
        self.authors.update(id, draft).await
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<()> {
        self.authors.delete(id).await
    }

    async fn count_authors(&self) -> AppResult<i64> {
        self.authors.count().await
    }

    async fn count_books(&self) -> AppResult<i64> {
        self.books.count().await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
