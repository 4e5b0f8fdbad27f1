//! Typed view models and the response each workflow produces

pub mod html;

use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::{
    models::{author::AuthorFormValues, Author, BookSummary},
    validation::FieldError,
};

pub const AUTHOR_LIST_PATH: &str = "/catalog/authors";

/// One variant per page the catalog can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home {
        author_count: i64,
        book_count: i64,
    },
    AuthorList {
        authors: Vec<Author>,
    },
    AuthorDetail {
        author: Author,
        books: Vec<BookSummary>,
    },
    AuthorForm {
        title: &'static str,
        author: Option<AuthorFormValues>,
        errors: Vec<FieldError>,
    },
    AuthorDelete {
        author: Author,
        books: Vec<BookSummary>,
    },
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Home { .. } => "Local Library Home",
            View::AuthorList { .. } => "Author List",
            View::AuthorDetail { .. } => "Author Detail",
            View::AuthorForm { title, .. } => *title,
            View::AuthorDelete { .. } => "Delete Author",
        }
    }
}

/// What a workflow decided: show a page, or send the browser elsewhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(View),
    Redirect(String),
}

impl Outcome {
    pub fn redirect(to: impl Into<String>) -> Self {
        Outcome::Redirect(to.into())
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Render(view) => Html(html::render(&view)).into_response(),
            Outcome::Redirect(to) => Redirect::to(&to).into_response(),
        }
    }
}
