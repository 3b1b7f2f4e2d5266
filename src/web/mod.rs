//! Server-rendered HTML pages
//!
//! Browsing is open to everyone; borrowed-book lists, renewal and the
//! catalog edit forms need a session (see [`LoginRequired`]).

pub mod accounts;
pub mod authors;
pub mod books;
pub mod index;
pub mod loans;
pub mod templates;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::{api::session_token, error::AppError, models::user::UserClaims, AppState};

/// Session user if any; never rejects
pub struct CurrentUser(pub Option<UserClaims>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(claims_from_parts(parts, state)))
    }
}

/// Session user; anonymous visitors are sent to the login page
pub struct LoginRequired(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for LoginRequired {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        claims_from_parts(parts, state)
            .map(LoginRequired)
            .ok_or_else(|| login_redirect(&parts.uri))
    }
}

fn claims_from_parts(parts: &Parts, state: &AppState) -> Option<UserClaims> {
    let token = session_token(&parts.headers, &state.config.auth.cookie_name)?;
    UserClaims::from_token(&token, &state.config.auth.jwt_secret).ok()
}

/// Redirect to the login page, coming back to `uri` afterwards
pub fn login_redirect(uri: &Uri) -> Redirect {
    let next = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    Redirect::to(&format!("/accounts/login/?next={}", urlencoding::encode(next)))
}

/// Only local absolute paths are followed after login
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path,
        _ => "/",
    }
}

/// Error rendered as an HTML page
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        PageError(error)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        if status == StatusCode::UNAUTHORIZED {
            // No request URI here; anonymous visitors are redirected by `LoginRequired`
            let body = r#"<h1>Login required</h1>
<p><a href="/accounts/login/">Log in</a> to see this page.</p>"#;
            return (status, templates::layout("Login required", None, body)).into_response();
        }

        let heading = match status {
            StatusCode::NOT_FOUND => "Not found",
            StatusCode::FORBIDDEN => "Forbidden",
            StatusCode::CONFLICT => "Conflict",
            StatusCode::BAD_REQUEST => "Bad request",
            _ => "Server error",
        };
        let body = format!(
            "<h1>{}</h1>\n<p>{}</p>",
            heading,
            templates::escape(&self.0.public_message())
        );
        (status, templates::layout(heading, None, &body)).into_response()
    }
}

pub type PageResult<T> = Result<T, PageError>;

/// `?page=N` on paginated lists
#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<i64>,
}

/// Highest page number accepted from `?page=`; later pages are simply empty
const MAX_PAGE: i64 = 1_000_000;
const MAX_PAGE_SIZE: i64 = 1_000;

/// Position within a paginated list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: i64,
    pub size: i64,
}

impl Page {
    pub fn new(query: &PageQuery, size: i64) -> Self {
        Self {
            number: query.page.unwrap_or(1).clamp(1, MAX_PAGE),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.number - 1).saturating_mul(self.size)
    }

    pub fn num_pages(&self, total: i64) -> i64 {
        ((total + self.size - 1) / self.size).max(1)
    }

    /// Previous/next links, empty when everything fits on one page
    pub fn links(&self, base: &str, total: i64) -> String {
        let pages = self.num_pages(total);
        if pages <= 1 {
            return String::new();
        }

        let mut html = String::from(r#"<div class="pagination">"#);
        if self.number > 1 {
            html.push_str(&format!(r#"<a href="{}?page={}">previous</a> "#, base, self.number - 1));
        }
        html.push_str(&format!(
            r#"<span class="page-current">Page {} of {}.</span>"#,
            self.number, pages
        ));
        if self.number < pages {
            html.push_str(&format!(r#" <a href="{}?page={}">next</a>"#, base, self.number + 1));
        }
        html.push_str("</div>");
        html
    }
}

/// HTML page routes, mounted at the site root
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        // Books
        .route("/books/", get(books::book_list))
        .route("/book/:id", get(books::book_detail))
        .route("/book/:id/", get(books::book_detail))
        .route("/book/create/", get(books::book_create_form).post(books::book_create))
        .route("/book/:id/update/", get(books::book_update_form).post(books::book_update))
        .route("/book/:id/delete/", get(books::book_delete_form).post(books::book_delete))
        // Authors
        .route("/authors/", get(authors::author_list))
        .route("/author/:id", get(authors::author_detail))
        .route("/author/:id/", get(authors::author_detail))
        .route("/author/create/", get(authors::author_create_form).post(authors::author_create))
        .route("/author/:id/update/", get(authors::author_update_form).post(authors::author_update))
        .route("/author/:id/delete/", get(authors::author_delete_form).post(authors::author_delete))
        // Loans
        .route("/mybooks/", get(loans::my_borrowed))
        .route("/borrowed/", get(loans::all_borrowed))
        .route("/book/:id/renew/", get(loans::renew_form).post(loans::renew))
        // Accounts
        .route("/accounts/login/", get(accounts::login_form).post(accounts::login))
        .route("/accounts/logout/", get(accounts::logout).post(accounts::logout))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offsets() {
        let page = Page::new(&PageQuery { page: Some(3) }, 10);
        assert_eq!(page.offset(), 20);
        assert_eq!(page.num_pages(21), 3);
        assert_eq!(page.num_pages(0), 1);

        let clamped = Page::new(&PageQuery { page: Some(-4) }, 10);
        assert_eq!(clamped.number, 1);
        assert_eq!(clamped.offset(), 0);
    }

    #[test]
    fn test_huge_page_number_clamped() {
        let page = Page::new(&PageQuery { page: Some(i64::MAX) }, 10);
        assert_eq!(page.number, MAX_PAGE);
        assert!(page.offset() >= 0);
        assert_eq!(page.offset(), (MAX_PAGE - 1) * 10);

        let page = Page::new(&PageQuery { page: Some(i64::MAX) }, i64::MAX);
        assert!(page.offset() >= 0);
    }

    #[test]
    fn test_login_redirect_keeps_query() {
        let uri: Uri = "/books/?page=2".parse().unwrap();
        let response = login_redirect(&uri).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            "/accounts/login/?next=%2Fbooks%2F%3Fpage%3D2"
        );
    }

    #[test]
    fn test_unauthenticated_page_error() {
        let response = PageError(AppError::Authentication("expired".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_page_links() {
        assert_eq!(Page::new(&PageQuery::default(), 10).links("/books/", 5), "");

        let links = Page::new(&PageQuery { page: Some(2) }, 10).links("/books/", 25);
        assert!(links.contains(r#"href="/books/?page=1""#));
        assert!(links.contains("Page 2 of 3."));
        assert!(links.contains(r#"href="/books/?page=3""#));
    }

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next(Some("/mybooks/")), "/mybooks/");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(None), "/");
    }
}
