//! Catalog home page

use crate::{
    error::AppResult,
    repository::SharedStore,
    views::{Outcome, View},
};

#[derive(Clone)]
pub struct CatalogService {
    store: SharedStore,
}

impl CatalogService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Home page with record counts
    pub async fn home(&self) -> AppResult<Outcome> {
        let (author_count, book_count) =
            tokio::try_join!(self.store.count_authors(), self.store.count_books())?;
        Ok(Outcome::Render(View::Home {
            author_count,
            book_count,
        }))
    }

    /// Check the backing store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
