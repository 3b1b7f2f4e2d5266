//! Book pages: list, detail and the staff edit forms

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use chrono::Utc;
use serde::Deserialize;

use super::{
    templates::{error_block, escape, layout},
    CurrentUser, LoginRequired, Page, PageQuery, PageResult,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookIn},
        book_instance::LoanStatus,
        genre::Genre,
        language::Language,
        user::UserClaims,
    },
    AppState,
};

/// Book form as posted by the browser; `genre` repeats once per selected option
#[derive(Debug, Deserialize, Default)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub genre: Vec<i32>,
}

impl BookForm {
    fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            author: book.author_id.map(|id| id.to_string()).unwrap_or_default(),
            language: book.language_id.map(|id| id.to_string()).unwrap_or_default(),
            genre: book.genre_ids.clone(),
        }
    }

    fn to_payload(&self) -> Result<BookIn, AppError> {
        Ok(BookIn {
            title: self.title.trim().to_string(),
            summary: self.summary.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            author_id: parse_optional_id("author", &self.author)?,
            language_id: parse_optional_id("language", &self.language)?,
            genre_ids: self.genre.clone(),
        })
    }
}

/// Empty select value means no reference
fn parse_optional_id(field: &str, value: &str) -> Result<Option<i32>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| AppError::Validation(format!("{}: select a valid choice", field)))
}

pub async fn book_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> PageResult<Html<String>> {
    let page = Page::new(&query, state.config.catalog.page_size);
    let (books, total) = state.services.books.list_page(page.size, page.offset()).await?;

    let mut content = String::from("<h1>Book List</h1>\n");
    if books.is_empty() {
        content.push_str("<p>There are no books in the library.</p>\n");
    } else {
        content.push_str("<ul>\n");
        for book in &books {
            content.push_str(&format!(
                "  <li><a href=\"/book/{}\">{}</a></li>\n",
                book.id,
                escape(&book.title)
            ));
        }
        content.push_str("</ul>\n");
    }
    content.push_str(&page.links("/books/", total));

    Ok(layout("Books", user.as_ref(), &content))
}

pub async fn book_detail(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> PageResult<Html<String>> {
    let detail = state.services.books.get_detail(id).await?;
    let book = &detail.book;
    let today = Utc::now().date_naive();

    let author = match &detail.author {
        Some(a) => format!("<a href=\"/author/{}\">{}</a>", a.id, escape(&a.display_name())),
        None => "Unknown".to_string(),
    };
    let genres = detail
        .genres
        .iter()
        .map(|g| escape(&g.name))
        .collect::<Vec<_>>()
        .join(", ");
    let language = detail
        .language
        .as_ref()
        .map(|l| escape(&l.name))
        .unwrap_or_default();

    let mut content = format!(
        r#"<h1>Title: {title}</h1>
<p><strong>Author:</strong> {author}</p>
<p><strong>Summary:</strong> {summary}</p>
<p><strong>ISBN:</strong> {isbn}</p>
<p><strong>Language:</strong> {language}</p>
<p><strong>Genre:</strong> {genres}</p>
"#,
        title = escape(&book.title),
        author = author,
        summary = escape(&book.summary),
        isbn = escape(&book.isbn),
        language = language,
        genres = genres,
    );

    let can_renew = user.as_ref().map(|u| u.can_mark_returned).unwrap_or(false);
    if user.as_ref().map(|u| u.is_staff).unwrap_or(false) {
        content.push_str(&format!(
            "<p><a href=\"/book/{id}/update/\">Update book</a> | <a href=\"/book/{id}/delete/\">Delete book</a></p>\n",
            id = book.id
        ));
    }

    content.push_str("<h2>Copies</h2>\n");
    if detail.copies.is_empty() {
        content.push_str("<p>There are no copies of this book in the library.</p>\n");
    }
    for copy in &detail.copies {
        let class = match copy.status {
            LoanStatus::Available => "text-success",
            LoanStatus::Maintenance => "text-danger",
            _ => "text-warning",
        };
        content.push_str(&format!(
            "<hr>\n<p class=\"{}\">{}</p>\n",
            class,
            copy.status.label()
        ));
        if copy.status != LoanStatus::Available {
            if let Some(due) = copy.due_back {
                let overdue = if copy.is_overdue(today) { " (overdue)" } else { "" };
                content.push_str(&format!("<p><strong>Due to be returned:</strong> {}{}</p>\n", due, overdue));
            }
        }
        content.push_str(&format!(
            "<p><strong>Imprint:</strong> {}</p>\n<p class=\"text-muted\"><strong>Id:</strong> {}</p>\n",
            escape(&copy.imprint),
            copy.id
        ));
        if can_renew && copy.status == LoanStatus::OnLoan {
            content.push_str(&format!("<p><a href=\"/book/{}/renew/\">Renew</a></p>\n", copy.id));
        }
    }

    Ok(layout(&book.title, user.as_ref(), &content))
}

/// Choices for the author, language and genre inputs
struct BookChoices {
    authors: Vec<Author>,
    languages: Vec<Language>,
    genres: Vec<Genre>,
}

async fn load_choices(state: &AppState) -> AppResult<BookChoices> {
    Ok(BookChoices {
        authors: state.services.authors.list().await?,
        languages: state.services.languages.list().await?,
        genres: state.services.genres.list().await?,
    })
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "<option value=\"{}\"{}>{}</option>",
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    )
}

fn book_form_page(
    title: &str,
    action: &str,
    form: &BookForm,
    choices: &BookChoices,
    error: Option<&str>,
    user: &UserClaims,
) -> Html<String> {
    let mut authors = option("", "---------", form.author.is_empty());
    for a in &choices.authors {
        let id = a.id.to_string();
        authors.push_str(&option(&id, &a.display_name(), form.author == id));
    }
    let mut languages = option("", "---------", form.language.is_empty());
    for l in &choices.languages {
        let id = l.id.to_string();
        languages.push_str(&option(&id, &l.name, form.language == id));
    }
    let genres: String = choices
        .genres
        .iter()
        .map(|g| option(&g.id.to_string(), &g.name, form.genre.contains(&g.id)))
        .collect();

    let content = format!(
        r#"<h1>{title}</h1>
{error}
<form method="post" action="{action}">
  <p><label for="id_title">Title:</label>
     <input type="text" name="title" id="id_title" maxlength="200" required value="{book_title}"></p>
  <p><label for="id_author">Author:</label>
     <select name="author" id="id_author">{authors}</select></p>
  <p><label for="id_summary">Summary:</label>
     <textarea name="summary" id="id_summary" maxlength="1000" required>{summary}</textarea></p>
  <p><label for="id_isbn">ISBN:</label>
     <input type="text" name="isbn" id="id_isbn" maxlength="17" required value="{isbn}"></p>
  <p><label for="id_language">Language:</label>
     <select name="language" id="id_language">{languages}</select></p>
  <p><label for="id_genre">Genre:</label>
     <select name="genre" id="id_genre" multiple>{genres}</select></p>
  <input type="submit" value="Submit">
</form>"#,
        title = escape(title),
        error = error_block(error),
        action = action,
        book_title = escape(&form.title),
        authors = authors,
        summary = escape(&form.summary),
        isbn = escape(&form.isbn),
        languages = languages,
        genres = genres,
    );
    layout(title, Some(user), &content)
}

pub async fn book_create_form(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
) -> PageResult<Html<String>> {
    user.require_staff()?;
    let choices = load_choices(&state).await?;
    Ok(book_form_page("Create book", "/book/create/", &BookForm::default(), &choices, None, &user))
}

pub async fn book_create(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Form(form): Form<BookForm>,
) -> PageResult<Response> {
    user.require_staff()?;

    let result = match form.to_payload() {
        Ok(payload) => state.services.books.create(payload).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(book) => Ok(Redirect::to(&format!("/book/{}", book.id)).into_response()),
        Err(e @ (AppError::Validation(_) | AppError::Database(_))) if e.status().is_client_error() => {
            let choices = load_choices(&state).await?;
            Ok(book_form_page(
                "Create book",
                "/book/create/",
                &form,
                &choices,
                Some(&e.public_message()),
                &user,
            )
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn book_update_form(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Path(id): Path<i32>,
) -> PageResult<Html<String>> {
    user.require_staff()?;
    let book = state.services.books.get_by_id(id).await?;
    let choices = load_choices(&state).await?;
    Ok(book_form_page(
        &format!("Update book: {}", book.title),
        &format!("/book/{}/update/", id),
        &BookForm::from_book(&book),
        &choices,
        None,
        &user,
    ))
}

pub async fn book_update(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Path(id): Path<i32>,
    Form(form): Form<BookForm>,
) -> PageResult<Response> {
    user.require_staff()?;

    let result = match form.to_payload() {
        Ok(payload) => state.services.books.update(id, payload).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(book) => Ok(Redirect::to(&format!("/book/{}", book.id)).into_response()),
        Err(e @ (AppError::Validation(_) | AppError::Database(_))) if e.status().is_client_error() => {
            let choices = load_choices(&state).await?;
            Ok(book_form_page(
                "Update book",
                &format!("/book/{}/update/", id),
                &form,
                &choices,
                Some(&e.public_message()),
                &user,
            )
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn book_delete_form(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Path(id): Path<i32>,
) -> PageResult<Html<String>> {
    user.require_staff()?;
    let detail = state.services.books.get_detail(id).await?;

    let content = if detail.copies.is_empty() {
        format!(
            r#"<h1>Delete Book: {}</h1>
<p>Are you sure you want to delete the book?</p>
<form method="post" action="/book/{}/delete/">
  <input type="submit" value="Yes, delete.">
</form>"#,
            escape(&detail.book.title),
            id
        )
    } else {
        format!(
            r#"<h1>Delete Book: {}</h1>
<p>You can't delete this book until all its {} copies have been deleted.</p>"#,
            escape(&detail.book.title),
            detail.copies.len()
        )
    };

    Ok(layout("Delete book", Some(&user), &content))
}

pub async fn book_delete(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Path(id): Path<i32>,
) -> PageResult<Redirect> {
    user.require_staff()?;
    state.services.books.delete(id).await?;
    Ok(Redirect::to("/books/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id("author", "").unwrap(), None);
        assert_eq!(parse_optional_id("author", "12").unwrap(), Some(12));
        assert!(parse_optional_id("author", "twelve").is_err());
    }

    #[test]
    fn test_form_roundtrip_through_book() {
        let book = Book {
            id: 3,
            title: "The Left Hand of Darkness".to_string(),
            summary: "Gethen.".to_string(),
            isbn: "9780441478125".to_string(),
            author_id: Some(1),
            language_id: None,
            genre_ids: vec![2, 5],
        };
        let payload = BookForm::from_book(&book).to_payload().unwrap();
        assert_eq!(payload.author_id, Some(1));
        assert_eq!(payload.language_id, None);
        assert_eq!(payload.genre_ids, vec![2, 5]);
    }

    #[test]
    fn test_option_marks_selection() {
        assert_eq!(option("1", "A & B", true), "<option value=\"1\" selected>A &amp; B</option>");
        assert_eq!(option("", "---", false), "<option value=\"\">---</option>");
    }
}
