//! HTML renderer for [`View`]s
//!
//! Every value interpolated into markup goes through [`escape_html`].

use std::fmt::Write;

use axum::http::StatusCode;

use super::{View, AUTHOR_LIST_PATH};
use crate::{
    models::{author::AuthorFormValues, Author, BookSummary},
    validation::{rules::escape_html as e, FieldError},
};

pub fn render(view: &View) -> String {
    let body = match view {
        View::Home { author_count, book_count } => home(*author_count, *book_count),
        View::AuthorList { authors } => author_list(authors),
        View::AuthorDetail { author, books } => author_detail(author, books),
        View::AuthorForm { title, author, errors } => author_form(title, author.as_ref(), errors),
        View::AuthorDelete { author, books } => author_delete(author, books),
    };
    layout(view.title(), &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<h2>{}</h2>\n",
        e(message),
        status.as_u16()
    );
    layout("Error", &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<nav>
<ul>
<li><a href="/catalog">Home</a></li>
<li><a href="{list}">All authors</a></li>
<li><a href="/catalog/author/create">Create new author</a></li>
</ul>
</nav>
<main>
{body}</main>
</body>
</html>
"#,
        title = e(title),
        list = AUTHOR_LIST_PATH,
        body = body,
    )
}

fn home(author_count: i64, book_count: i64) -> String {
    format!(
        "<h1>Local Library Home</h1>\n\
         <p>Welcome to <em>LocalLibrary</em>.</p>\n\
         <h2>Dynamic content</h2>\n\
         <ul>\n<li><strong>Books:</strong> {book_count}</li>\n\
         <li><strong>Authors:</strong> {author_count}</li>\n</ul>\n"
    )
}

fn author_link(author: &Author) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        e(&author.url()),
        e(&author.full_name())
    )
}

fn author_list(authors: &[Author]) -> String {
    let mut out = String::from("<h1>Author List</h1>\n");
    if authors.is_empty() {
        out.push_str("<p>There are no authors.</p>\n");
        return out;
    }
    out.push_str("<ul>\n");
    for author in authors {
        let _ = writeln!(
            out,
            "<li>{} ({})</li>",
            author_link(author),
            e(&author.lifespan())
        );
    }
    out.push_str("</ul>\n");
    out
}

fn author_heading(author: &Author) -> String {
    format!(
        "<h1>Author: {}</h1>\n<p>{}</p>\n",
        e(&author.full_name()),
        e(&author.lifespan())
    )
}

fn book_list(books: &[BookSummary]) -> String {
    let mut out = String::from("<dl>\n");
    for book in books {
        let _ = writeln!(
            out,
            r#"<dt><a href="{}">{}</a></dt>"#,
            e(&book.url()),
            e(&book.title)
        );
        let _ = writeln!(out, "<dd>{}</dd>", e(&book.summary));
    }
    out.push_str("</dl>\n");
    out
}

fn author_detail(author: &Author, books: &[BookSummary]) -> String {
    let mut out = author_heading(author);
    out.push_str("<h2>Books</h2>\n");
    if books.is_empty() {
        out.push_str("<p>This author has no books.</p>\n");
    } else {
        out.push_str(&book_list(books));
    }
    let _ = writeln!(
        out,
        r#"<hr><p><a href="{url}/delete">Delete author</a></p><p><a href="{url}/update">Update author</a></p>"#,
        url = e(&author.url())
    );
    out
}

fn text_input(name: &str, label: &str, kind: &str, value: &str, required: bool) -> String {
    format!(
        r#"<div><label for="{name}">{label}:</label><input id="{name}" type="{kind}" name="{name}" value="{value}"{required}></div>"#,
        name = name,
        label = e(label),
        kind = kind,
        value = e(value),
        required = if required { " required" } else { "" },
    )
}

fn author_form(title: &str, author: Option<&AuthorFormValues>, errors: &[FieldError]) -> String {
    let empty = AuthorFormValues::default();
    let values = author.unwrap_or(&empty);

    let mut out = format!("<h1>{}</h1>\n<form method=\"POST\">\n", e(title));
    for field in [
        text_input("first_name", "First Name", "text", &values.first_name, true),
        text_input("family_name", "Family Name", "text", &values.family_name, true),
        text_input("date_of_birth", "Date of birth", "date", &values.date_of_birth, false),
        text_input("date_of_death", "Date of death", "date", &values.date_of_death, false),
    ] {
        out.push_str(&field);
        out.push('\n');
    }
    out.push_str("<button type=\"submit\">Submit</button>\n</form>\n");

    if !errors.is_empty() {
        out.push_str("<ul class=\"errors\">\n");
        for error in errors {
            let _ = writeln!(
                out,
                r#"<li data-field="{}">{}</li>"#,
                e(&error.field),
                e(&error.message)
            );
        }
        out.push_str("</ul>\n");
    }
    out
}

fn author_delete(author: &Author, books: &[BookSummary]) -> String {
    let mut out = format!("<h1>Delete Author: {}</h1>\n", e(&author.full_name()));
    out.push_str(&author_heading(author));
    if books.is_empty() {
        let _ = writeln!(
            out,
            "<p>Do you really want to delete this Author?</p>\n\
             <form method=\"POST\">\n\
             <input type=\"hidden\" name=\"authorid\" value=\"{}\">\n\
             <button type=\"submit\">Delete</button>\n\
             </form>",
            author.id
        );
    } else {
        out.push_str(
            "<p><strong>Delete the following books before attempting to delete this author.</strong></p>\n",
        );
        out.push_str(&book_list(books));
    }
    out
}
