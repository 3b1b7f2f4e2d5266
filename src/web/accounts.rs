//! Login and logout pages

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use serde::Deserialize;

use super::{
    safe_next,
    templates::{error_block, escape, layout},
    CurrentUser, PageResult,
};
use crate::{
    api::auth::{removal_cookie, session_cookie},
    error::AppError,
    AppState,
};

#[derive(Debug, Deserialize, Default)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

fn login_page(username: &str, next: &str, error: Option<&str>) -> Html<String> {
    let content = format!(
        r#"<h1>Login</h1>
{error}
<form method="post" action="/accounts/login/">
  <p><label for="id_username">Username:</label>
     <input type="text" name="username" id="id_username" required value="{username}"></p>
  <p><label for="id_password">Password:</label>
     <input type="password" name="password" id="id_password" required></p>
  <input type="hidden" name="next" value="{next}">
  <input type="submit" value="Login">
</form>"#,
        error = error_block(error),
        username = escape(username),
        next = escape(next),
    );
    layout("Login", None, &content)
}

pub async fn login_form(
    CurrentUser(user): CurrentUser,
    Query(query): Query<NextQuery>,
) -> Response {
    let next = safe_next(query.next.as_deref());
    if user.is_some() {
        return Redirect::to(next).into_response();
    }
    login_page("", next, None).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> PageResult<Response> {
    let next = safe_next(form.next.as_deref()).to_string();

    match state.services.users.authenticate(&form.username, &form.password).await {
        Ok((token, _user)) => {
            let jar = jar.add(session_cookie(&state.config.auth, token));
            Ok((jar, Redirect::to(&next)).into_response())
        }
        Err(AppError::Authentication(_)) => Ok(login_page(
            &form.username,
            &next,
            Some("Your username and password didn't match. Please try again."),
        )
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let jar = jar.remove(removal_cookie(&state.config.auth));
    let content = r#"<h1>Logged out</h1>
<p><a href="/accounts/login/">Click here to login again.</a></p>"#;
    (jar, layout("Logged out", None, content))
}
