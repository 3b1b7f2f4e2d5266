//! HTML rendering helpers shared by the page views

use axum::response::Html;

use crate::models::user::UserClaims;

/// Escape text for inclusion in HTML content or a quoted attribute
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page with the sidebar navigation
pub fn layout(title: &str, user: Option<&UserClaims>, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | Local Library</title>
</head>
<body>
  <nav class="sidebar">
    <ul>
      <li><a href="/">Home</a></li>
      <li><a href="/books/">All books</a></li>
      <li><a href="/authors/">All authors</a></li>
    </ul>
    {account}
  </nav>
  <main>
{content}
  </main>
</body>
</html>"#,
        title = escape(title),
        account = account_links(user),
        content = content,
    ))
}

fn account_links(user: Option<&UserClaims>) -> String {
    let Some(user) = user else {
        return r#"<ul><li><a href="/accounts/login/">Login</a></li></ul>"#.to_string();
    };

    let mut links = format!(
        r#"<ul>
      <li>User: {}</li>
      <li><a href="/mybooks/">My Borrowed</a></li>
      <li><form method="post" action="/accounts/logout/"><button type="submit">Logout</button></form></li>
    </ul>"#,
        escape(&user.sub)
    );

    if user.is_staff || user.can_mark_returned {
        links.push_str("\n    <hr>\n    <ul>\n      <li>Staff</li>");
        if user.can_mark_returned {
            links.push_str("\n      <li><a href=\"/borrowed/\">All borrowed</a></li>");
        }
        if user.is_staff {
            links.push_str("\n      <li><a href=\"/author/create/\">Create author</a></li>");
            links.push_str("\n      <li><a href=\"/book/create/\">Create book</a></li>");
        }
        links.push_str("\n    </ul>");
    }
    links
}

/// Error message block, empty when there is no error
pub fn error_block(error: Option<&str>) -> String {
    match error {
        Some(msg) => format!(r#"<p class="error">{}</p>"#, escape(msg)),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(is_staff: bool, can_mark_returned: bool) -> UserClaims {
        UserClaims {
            sub: "libr<arian>".to_string(),
            user_id: 1,
            is_staff,
            can_mark_returned,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_layout_anonymous() {
        let Html(page) = layout("Home", None, "<p>hi</p>");
        assert!(page.contains("<title>Home | Local Library</title>"));
        assert!(page.contains("/accounts/login/"));
        assert!(!page.contains("/mybooks/"));
    }

    #[test]
    fn test_layout_staff_links() {
        let reader = claims(false, false);
        let Html(page) = layout("Home", Some(&reader), "");
        assert!(page.contains("User: libr&lt;arian&gt;"));
        assert!(page.contains("/mybooks/"));
        assert!(!page.contains("/borrowed/"));

        let librarian = claims(true, true);
        let Html(page) = layout("Home", Some(&librarian), "");
        assert!(page.contains("/borrowed/"));
        assert!(page.contains("/book/create/"));
    }
}
