//! Authors repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, AuthorDraft, AuthorSort},
};

const AUTHOR_COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors in the requested order
    pub async fn list(&self, sort: AuthorSort) -> AppResult<Vec<Author>> {
        let query = format!(
            "SELECT {} FROM authors ORDER BY {}",
            AUTHOR_COLUMNS,
            sort.order_by_sql()
        );
        let rows = sqlx::query_as::<_, Author>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let query = format!("SELECT {} FROM authors WHERE id = $1", AUTHOR_COLUMNS);
        let author = sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }

    /// Create an author, letting the database assign its id
    pub async fn create(&self, draft: &AuthorDraft) -> AppResult<Author> {
        let query = format!(
            r#"
            INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        );
        let row = sqlx::query_as::<_, Author>(&query)
            .bind(&draft.first_name)
            .bind(&draft.family_name)
            .bind(draft.date_of_birth)
            .bind(draft.date_of_death)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Replace the mutable fields of an author
    pub async fn update(&self, id: Uuid, draft: &AuthorDraft) -> AppResult<Option<Author>> {
        let query = format!(
            r#"
            UPDATE authors
            SET first_name = $1, family_name = $2, date_of_birth = $3, date_of_death = $4
            WHERE id = $5
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        );
        let row = sqlx::query_as::<_, Author>(&query)
            .bind(&draft.first_name)
            .bind(&draft.family_name)
            .bind(draft.date_of_birth)
            .bind(draft.date_of_death)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Delete an author; deleting a missing author is not an error
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            tracing::debug!("Author {} already absent", id);
        }
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
