//! Borrowed-book lists and the librarian renewal form

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{
    templates::{error_block, escape, layout},
    LoginRequired, PageResult,
};
use crate::{
    error::AppError,
    models::{book_instance::LoanedCopy, user::UserClaims},
    AppState,
};

fn loan_rows(copies: &[LoanedCopy], today: NaiveDate, show_borrower: bool, can_renew: bool) -> String {
    let mut html = String::from("<ul>\n");
    for copy in copies {
        let class = if copy.is_overdue(today) { "text-danger" } else { "" };
        let due = copy.due_back.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        html.push_str(&format!(
            "  <li class=\"{}\"><a href=\"/book/{}\">{}</a> ({})",
            class,
            copy.book_id,
            escape(&copy.book_title),
            due
        ));
        if show_borrower {
            let borrower = copy.borrower_username.as_deref().unwrap_or("unknown");
            html.push_str(&format!(" - {}", escape(borrower)));
        }
        if can_renew {
            html.push_str(&format!(" - <a href=\"/book/{}/renew/\">Renew</a>", copy.id));
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");
    html
}

/// Copies on loan to the current user
pub async fn my_borrowed(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
) -> PageResult<Html<String>> {
    let copies = state.services.loans.borrowed_by(user.user_id).await?;
    let today = Utc::now().date_naive();

    let mut content = String::from("<h1>Borrowed books</h1>\n");
    if copies.is_empty() {
        content.push_str("<p>There are no books borrowed.</p>\n");
    } else {
        content.push_str(&loan_rows(&copies, today, false, false));
    }

    Ok(layout("My borrowed books", Some(&user), &content))
}

/// Every copy on loan (librarians)
pub async fn all_borrowed(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
) -> PageResult<Html<String>> {
    user.require_mark_returned()?;
    let copies = state.services.loans.all_borrowed().await?;
    let today = Utc::now().date_naive();

    let mut content = String::from("<h1>All borrowed books</h1>\n");
    if copies.is_empty() {
        content.push_str("<p>There are no books borrowed.</p>\n");
    } else {
        content.push_str(&loan_rows(&copies, today, true, true));
    }

    Ok(layout("All borrowed books", Some(&user), &content))
}

#[derive(Debug, Deserialize)]
pub struct RenewForm {
    #[serde(default)]
    pub renewal_date: String,
}

fn renew_page(
    id: Uuid,
    book_title: &str,
    date: &str,
    error: Option<&str>,
    user: &UserClaims,
) -> Html<String> {
    let content = format!(
        r#"<h1>Renew: {title}</h1>
<p>Copy: {id}</p>
{error}
<form method="post" action="/book/{id}/renew/">
  <p><label for="id_renewal_date">Renewal date:</label>
     <input type="date" name="renewal_date" id="id_renewal_date" required value="{date}"></p>
  <p class="help">Enter a date between now and 4 weeks (default 3).</p>
  <input type="submit" value="Submit">
</form>"#,
        title = escape(book_title),
        id = id,
        error = error_block(error),
        date = escape(date),
    );
    layout("Renew book", Some(user), &content)
}

pub async fn renew_form(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Path(id): Path<Uuid>,
) -> PageResult<Html<String>> {
    user.require_mark_returned()?;
    let copy = state.services.instances.get_by_id(id).await?;
    let book = state.services.books.get_by_id(copy.book_id).await?;

    let proposed = state
        .services
        .loans
        .proposed_renewal_date(Utc::now().date_naive());

    Ok(renew_page(id, &book.title, &proposed.to_string(), None, &user))
}

pub async fn renew(
    State(state): State<AppState>,
    LoginRequired(user): LoginRequired,
    Path(id): Path<Uuid>,
    Form(form): Form<RenewForm>,
) -> PageResult<Response> {
    user.require_mark_returned()?;
    let copy = state.services.instances.get_by_id(id).await?;

    let today = Utc::now().date_naive();
    let result = match NaiveDate::parse_from_str(form.renewal_date.trim(), "%Y-%m-%d") {
        Ok(date) => state.services.loans.renew(id, date, today).await,
        Err(_) => Err(AppError::Validation("Enter a valid date.".to_string())),
    };

    match result {
        Ok(_) => Ok(Redirect::to("/borrowed/").into_response()),
        Err(AppError::Validation(msg)) => {
            let book = state.services.books.get_by_id(copy.book_id).await?;
            Ok(renew_page(id, &book.title, &form.renewal_date, Some(&msg), &user).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
