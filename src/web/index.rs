//! Home page

use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::{templates::layout, CurrentUser, PageResult};

const VISITS_COOKIE: &str = "num_visits";

/// Visit count before this request, from the visits cookie
fn previous_visits(jar: &CookieJar) -> u64 {
    jar.get(VISITS_COOKIE)
        .and_then(|c| c.value().parse().ok())
        .unwrap_or(0)
}

/// Catalog counts and the visitor's visit count
pub async fn index(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> PageResult<(CookieJar, Html<String>)> {
    let summary = state.services.stats.summary().await?;
    let visits = previous_visits(&jar);

    let content = format!(
        r#"<h1>Local Library Home</h1>
<p>Welcome to LocalLibrary, a website developed to browse the library catalog.</p>
<h2>Dynamic content</h2>
<p>The library has the following record counts:</p>
<ul>
  <li><strong>Books:</strong> {books}</li>
  <li><strong>Copies:</strong> {copies}</li>
  <li><strong>Copies available:</strong> {available}</li>
  <li><strong>Authors:</strong> {authors}</li>
  <li><strong>Genres:</strong> {genres}</li>
</ul>
<p>You have visited this page {visits} time{plural}.</p>"#,
        books = summary.num_books,
        copies = summary.num_instances,
        available = summary.num_instances_available,
        authors = summary.num_authors,
        genres = summary.num_genres,
        visits = visits,
        plural = if visits == 1 { "" } else { "s" },
    );

    let jar = jar.add(
        Cookie::build((VISITS_COOKIE, (visits + 1).to_string()))
            .path("/")
            .http_only(true)
            .build(),
    );
    Ok((jar, layout("Home", user.as_ref(), &content)))
}
