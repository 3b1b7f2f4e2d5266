//! Author pages: list, detail and the staff edit forms

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use chrono::NaiveDate;
use serde::Deserialize;

use super::{
    templates::{error_block, escape, layout},
    CurrentUser, LoginRequired, Page, PageQuery, PageResult,
};
use crate::{
    error::AppError,
    models::{
        author::{Author, AuthorIn},
        user::UserClaims,
    },
};

/// Author form as posted by the browser (dates may be empty)
#[derive(Debug, Deserialize, Default)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

impl AuthorForm {
    fn from_author(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            date_of_birth: author.date_of_birth.map(|d| d.to_string()).unwrap_or_default(),
            date_of_death: author.date_of_death.map(|d| d.to_string()).unwrap_or_default(),
        }
    }

    fn to_payload(&self) -> Result<AuthorIn, AppError> {
        Ok(AuthorIn {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            date_of_birth: parse_optional_date("date_of_birth", &self.date_of_birth)?,
            date_of_death: parse_optional_date("date_of_death", &self.date_of_death)?,
        })
    }
}

/// Empty input means no date
pub(crate) fn parse_optional_date(field: &str, value: &str) -> Result<Option<NaiveDate>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::Validation(format!("{}: enter a valid date (YYYY-MM-DD)", field)))
}

pub async fn author_list(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> PageResult<Html<String>> {
    let page = Page::new(&query, state.config.catalog.page_size);
    let (authors, total) = state
        .services
        .authors
        .list_page(page.size, page.offset())
        .await?;

    let mut content = String::from("<h1>Author List</h1>\n");
    if authors.is_empty() {
        content.push_str("<p>There are no authors in the library.</p>\n");
    } else {
        content.push_str("<ul>\n");
        for author in &authors {
            content.push_str(&format!(
                "  <li><a href=\"/author/{}\">{}</a> {}</li>\n",
                author.id,
                escape(&author.display_name()),
                escape(&author.lifespan())
            ));
        }
        content.push_str("</ul>\n");
    }
    content.push_str(&page.links("/authors/", total));

    Ok(layout("Authors", user.as_ref(), &content))
}

pub async fn author_detail(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i32>,
) -> PageResult<Html<String>> {
    let detail = state.services.authors.get_detail(id).await?;
    let author = &detail.author;

    let mut content = format!(
        "<h1>Author: {}</h1>\n<p>{}</p>\n",
        escape(&author.display_name()),
        escape(&author.lifespan())
    );

    if user.as_ref().map(|u| u.is_staff).unwrap_or(false) {
        content.push_str(&format!(
            "<p><a href=\"/author/{id}/update/\">Update author</a> | <a href=\"/author/{id}/delete/\">Delete author</a></p>\n",
            id = author.id
        ));
    }

    content.push_str("<h2>Books</h2>\n");
    if detail.books.is_empty() {
        content.push_str("<p>This author has no books.</p>\n");
    } else {
        for book in &detail.books {
            content.push_str(&format!(
                "<h4><a href=\"/book/{}\">{}</a></h4>\n<p>{}</p>\n",
                book.id,
                escape(&book.title),
                escape(&book.summary)
            ));
        }
    }

    Ok(layout(&author.display_name(), user.as_ref(), &content))
}

fn author_form_page(
    title: &str,
    action: &str,
    form: &AuthorForm,
    error: Option<&str>,
    user: &UserClaims,
) -> Html<String> {
    let content = format!(
        r#"<h1>{title}</h1>
{error}
<form method="post" action="{action}">
  <p><label for="id_first_name">First name:</label>
     <input type="text" name="first_name" id="id_first_name" maxlength="100" required value="{first_name}"></p>
  <p><label for="id_last_name">Last name:</label>
     <input type="text" name="last_name" id="id_last_name" maxlength="100" required value="{last_name}"></p>
  <p><label for="id_date_of_birth">Date of birth:</label>
     <input type="date" name="date_of_birth" id="id_date_of_birth" value="{date_of_birth}"></p>
  <p><label for="id_date_of_death">Died:</label>
     <input type="date" name="date_of_death" id="id_date_of_death" value="{date_of_death}"></p>
  <input type="submit" value="Submit">
</form>"#,
        title = escape(title),
        error = error_block(error),
        action = action,
        first_name = escape(&form.first_name),
        last_name = escape(&form.last_name),
        date_of_birth = escape(&form.date_of_birth),
        date_of_death = escape(&form.date_of_death),
    );
    layout(title, Some(user), &content)
}

pub async fn author_create_form(LoginRequired(user): LoginRequired) -> PageResult<Html<String>> {
    user.require_staff()?;
    Ok(author_form_page("Create author", "/author/create/", &AuthorForm::default(), None, &user))
}

pub async fn author_create(
    State(state): State<crate::AppState>,
    LoginRequired(user): LoginRequired,
    Form(form): Form<AuthorForm>,
) -> PageResult<Response> {
    user.require_staff()?;

    let result = match form.to_payload() {
        Ok(payload) => state.services.authors.create(&payload).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(author) => Ok(Redirect::to(&format!("/author/{}", author.id)).into_response()),
        Err(AppError::Validation(msg)) => Ok(author_form_page(
            "Create author",
            "/author/create/",
            &form,
            Some(&msg),
            &user,
        )
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

pub async fn author_update_form(
    State(state): State<crate::AppState>,
    LoginRequired(user): LoginRequired,
    Path(id): Path<i32>,
) -> PageResult<Html<String>> {
    user.require_staff()?;
    let author = state.services.authors.get_by_id(id).await?;
    Ok(author_form_page(
        &format!("Update author: {}", author.display_name()),
        &format!("/author/{}/update/", id),
        &AuthorForm::from_author(&author),
        None,
        &user,
    ))
}

pub async fn author_update(
    State(state): State<crate::AppState>,
    LoginRequired(user): LoginRequired,
    Path(id): Path<i32>,
    Form(form): Form<AuthorForm>,
) -> PageResult<Response> {
    user.require_staff()?;

    let result = match form.to_payload() {
        Ok(payload) => state.services.authors.update(id, &payload).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(author) => Ok(Redirect::to(&format!("/author/{}", author.id)).into_response()),
        Err(AppError::Validation(msg)) => Ok(author_form_page(
            "Update author",
            &format!("/author/{}/update/", id),
            &form,
            Some(&msg),
            &user,
        )
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

pub async fn author_delete_form(
    State(state): State<crate::AppState>,
    LoginRequired(user): LoginRequired,
    Path(id): Path<i32>,
) -> PageResult<Html<String>> {
    user.require_staff()?;
    let detail = state.services.authors.get_detail(id).await?;

    let mut content = format!(
        "<h1>Delete Author: {}</h1>\n",
        escape(&detail.author.display_name())
    );
    if !detail.books.is_empty() {
        content.push_str(&format!(
            "<p>The author's {} book(s) will be kept without an author.</p>\n",
            detail.books.len()
        ));
    }
    content.push_str(&format!(
        r#"<p>Are you sure you want to delete the author?</p>
<form method="post" action="/author/{}/delete/">
  <input type="submit" value="Yes, delete.">
</form>"#,
        id
    ));

    Ok(layout("Delete author", Some(&user), &content))
}

pub async fn author_delete(
    State(state): State<crate::AppState>,
    LoginRequired(user): LoginRequired,
    Path(id): Path<i32>,
) -> PageResult<Redirect> {
    user.require_staff()?;
    state.services.authors.delete(id).await?;
    Ok(Redirect::to("/authors/"))
}
