//! Data models for the catalog

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorDraft, AuthorForm, AuthorSort, DeleteAuthorForm};
pub use book::{Book, BookSummary};
