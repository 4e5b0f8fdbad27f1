//! In-process catalog store, used for local runs and tests

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{
        author::{AuthorSortKey, SortDirection},
        Author, AuthorDraft, AuthorSort, Book, BookSummary,
    },
};

#[derive(Default)]
struct Catalog {
    authors: HashMap<Uuid, Author>,
    books: Vec<Book>,
}

#[derive(Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<RwLock<Catalog>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a book; books have no create workflow, so this is how they get in
    pub async fn insert_book(&self, title: &str, summary: &str, isbn: &str, author: Uuid) -> Book {
        let book = Book {
            id: Uuid::new_v4(),
            title: title.to_string(),
            summary: summary.to_string(),
            isbn: isbn.to_string(),
            author,
        };
        self.inner.write().await.books.push(book.clone());
        book
    }
}

fn compare(sort: AuthorSort, a: &Author, b: &Author) -> Ordering {
    let ordering = match sort.key {
        AuthorSortKey::FamilyName => a
            .family_name
            .cmp(&b.family_name)
            .then_with(|| a.first_name.cmp(&b.first_name)),
        AuthorSortKey::FirstName => a
            .first_name
            .cmp(&b.first_name)
            .then_with(|| a.family_name.cmp(&b.family_name)),
        AuthorSortKey::DateOfBirth => match (a.date_of_birth, b.date_of_birth) {
            (Some(x), Some(y)) => x.cmp(&y),
            // unknown dates last in both directions
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };
    match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

#[async_trait]
impl CatalogStore for MemoryRepository {
    async fn list_authors(&self, sort: AuthorSort) -> AppResult<Vec<Author>> {
        let catalog = self.inner.read().await;
        let mut authors: Vec<Author> = catalog.authors.values().cloned().collect();
        authors.sort_by(|a, b| compare(sort, a, b).then_with(|| a.id.cmp(&b.id)));
        Ok(authors)
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.inner.read().await.authors.get(&id).cloned())
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let catalog = self.inner.read().await;
        let mut books: Vec<BookSummary> = catalog
            .books
            .iter()
            .filter(|b| b.author == author_id)
            .map(BookSummary::from)
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn create_author(&self, draft: &AuthorDraft) -> AppResult<Author> {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: draft.first_name.clone(),
            family_name: draft.family_name.clone(),
            date_of_birth: draft.date_of_birth,
            date_of_death: draft.date_of_death,
        };
        self.inner
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    async fn update_author(&self, id: Uuid, draft: &AuthorDraft) -> AppResult<Option<Author>> {
        let mut catalog = self.inner.write().await;
        Ok(catalog.authors.get_mut(&id).map(|author| {
            author.apply(draft);
            author.clone()
        }))
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<()> {
        self.inner.write().await.authors.remove(&id);
        Ok(())
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.authors.len() as i64)
    }

    async fn count_books(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.books.len() as i64)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn draft(first: &str, family: &str, born: Option<(i32, u32, u32)>) -> AuthorDraft {
        AuthorDraft {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: born.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            date_of_death: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_get_returns_it() {
        let store = MemoryRepository::new();
        let created = store.create_author(&draft("Jane", "Austen", None)).await.unwrap();

        let fetched = store.get_author(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(store.get_author(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_sorts_by_family_name_then_first_name() {
        let store = MemoryRepository::new();
        store.create_author(&draft("Charlotte", "Bronte", None)).await.unwrap();
        store.create_author(&draft("Jane", "Austen", None)).await.unwrap();
        store.create_author(&draft("Anne", "Bronte", None)).await.unwrap();

        let names: Vec<String> = store
            .list_authors(AuthorSort::by_family_name())
            .await
            .unwrap()
            .iter()
            .map(Author::full_name)
            .collect();
        assert_eq!(names, vec!["Austen, Jane", "Bronte, Anne", "Bronte, Charlotte"]);
    }

    #[tokio::test]
    async fn test_list_by_birth_date_puts_unknown_last() {
        let store = MemoryRepository::new();
        store.create_author(&draft("Unknown", "Poet", None)).await.unwrap();
        store.create_author(&draft("Jane", "Austen", Some((1775, 12, 16)))).await.unwrap();
        store.create_author(&draft("Mary", "Shelley", Some((1797, 8, 30)))).await.unwrap();

        let sort = AuthorSort {
            key: AuthorSortKey::DateOfBirth,
            direction: SortDirection::Descending,
        };
        let names: Vec<String> = store
            .list_authors(sort)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.family_name)
            .collect();
        assert_eq!(names, vec!["Shelley", "Austen", "Poet"]);
    }

    #[tokio::test]
    async fn test_empty_list_is_ok() {
        let store = MemoryRepository::new();
        assert!(store.list_authors(AuthorSort::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_author_returns_none() {
        let store = MemoryRepository::new();
        let updated = store
            .update_author(Uuid::new_v4(), &draft("Jane", "Austen", None))
            .await
            .unwrap();
        assert_eq!(updated, None);
        assert_eq!(store.count_authors().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let store = MemoryRepository::new();
        let created = store.create_author(&draft("Jane", "Austen", None)).await.unwrap();

        let updated = store
            .update_author(created.id, &draft("Jane", "Austen", Some((1775, 12, 16))))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date_of_birth, NaiveDate::from_ymd_opt(1775, 12, 16));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryRepository::new();
        let created = store.create_author(&draft("Jane", "Austen", None)).await.unwrap();

        store.delete_author(created.id).await.unwrap();
        store.delete_author(created.id).await.unwrap();
        assert_eq!(store.get_author(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_books_by_author_filters_and_projects() {
        let store = MemoryRepository::new();
        let austen = store.create_author(&draft("Jane", "Austen", None)).await.unwrap();
        let shelley = store.create_author(&draft("Mary", "Shelley", None)).await.unwrap();
        store.insert_book("Persuasion", "Anne Elliot...", "9780141439686", austen.id).await;
        store.insert_book("Emma", "Emma Woodhouse...", "9780141439587", austen.id).await;
        store.insert_book("Frankenstein", "Victor...", "9780141439471", shelley.id).await;

        let titles: Vec<String> = store
            .books_by_author(austen.id)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["Emma", "Persuasion"]);
        assert_eq!(store.count_books().await.unwrap(), 3);
    }
}
