//! Router tests that never reach the database
//!
//! The pool is created lazily, so every request here must be answered by the
//! extractors, validation or static routes.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use catalog_server::{config::AppConfig, create_router, models::UserClaims, AppState};
use chrono::Utc;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::util::ServiceExt; // for `oneshot`

fn test_app() -> (Router, AppConfig) {
    let config = AppConfig::default();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("Failed to create lazy pool");
    (create_router(AppState::new(config.clone(), pool)), config)
}

fn token(config: &AppConfig, is_staff: bool, can_mark_returned: bool) -> String {
    let now = Utc::now().timestamp();
    UserClaims {
        sub: "tester".to_string(),
        user_id: 1,
        is_staff,
        can_mark_returned,
        exp: now + 3600,
        iat: now,
    }
    .create_token(&config.auth.jwt_secret)
    .expect("Failed to create token")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app();
    let req = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_mutations_require_authentication() {
    let (app, _) = test_app();
    let uuid = "4c1d3a6e-8f3b-4d4e-9a55-0b7a4a1f0c11";

    let requests = vec![
        json_request("POST", "/api/authors/", json!({"first_name": "J", "last_name": "Doe"})),
        json_request("PUT", "/api/authors/1/", json!({"first_name": "J", "last_name": "Doe"})),
        json_request("DELETE", "/api/authors/1/", json!(null)),
        json_request("POST", "/api/genres/", json!({"name": "Poetry"})),
        json_request("PUT", "/api/languages/3/", json!({"name": "French"})),
        json_request("POST", "/api/books/", json!({"title": "x"})),
        json_request("DELETE", "/api/books/1/", json!(null)),
        json_request("POST", "/api/instances/", json!({"book": 1, "imprint": "x"})),
        json_request("PUT", &format!("/api/instances/{}/", uuid), json!({})),
        json_request("DELETE", &format!("/api/instances/{}/", uuid), json!(null)),
    ];

    for req in requests {
        let label = format!("{} {}", req.method(), req.uri());
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", label);
    }
}

#[tokio::test]
async fn test_unauthenticated_with_malformed_payload() {
    let (app, _) = test_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/authors/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let (app, _) = test_app();
    let mut req = json_request("POST", "/api/genres/", json!({"name": "Poetry"}));
    req.headers_mut()
        .insert(header::AUTHORIZATION, "Bearer not-a-token".parse().unwrap());

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let (app, config) = test_app();
    let mut other = config.clone();
    other.auth.jwt_secret = "another-secret".to_string();

    let mut req = json_request("POST", "/api/genres/", json!({"name": "Poetry"}));
    req.headers_mut().insert(
        header::COOKIE,
        format!("sessionid={}", token(&other, true, true)).parse().unwrap(),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_author_payload_validated_before_write() {
    let (app, config) = test_app();
    let mut req = json_request("POST", "/api/authors/", json!({"first_name": "", "last_name": "Doe"}));
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token(&config, false, false)).parse().unwrap(),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_book_isbn_validated_before_write() {
    let (app, config) = test_app();
    let mut req = json_request(
        "PUT",
        "/api/books/1/",
        json!({"title": "Dune", "summary": "Spice.", "isbn": "123"}),
    );
    req.headers_mut().insert(
        header::COOKIE,
        format!("sessionid={}", token(&config, false, false)).parse().unwrap(),
    );

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("isbn"));
}

#[tokio::test]
async fn test_missing_required_field_rejected() {
    let (app, config) = test_app();
    let mut req = json_request("POST", "/api/authors/", json!({"first_name": "J"}));
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token(&config, true, true)).parse().unwrap(),
    );

    let response = app.oneshot(req).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_my_borrowed_redirects_anonymous_to_login() {
    let (app, _) = test_app();
    let req = Request::builder().uri("/mybooks/").body(Body::empty()).unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/accounts/login/?next=%2Fmybooks%2F"
    );
}

#[tokio::test]
async fn test_login_redirect_keeps_query_string() {
    let (app, _) = test_app();
    let req = Request::builder()
        .uri("/mybooks/?page=2")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/accounts/login/?next=%2Fmybooks%2F%3Fpage%3D2"
    );
}

#[tokio::test]
async fn test_login_page_decodes_next() {
    let (app, _) = test_app();
    let req = Request::builder()
        .uri("/accounts/login/?next=%2Fbooks%2F%3Fpage%3D2")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(r#"name="next" value="/books/?page=2""#));
}

#[tokio::test]
async fn test_renew_redirects_anonymous_to_login() {
    let (app, _) = test_app();
    let uri = "/book/4c1d3a6e-8f3b-4d4e-9a55-0b7a4a1f0c11/renew/";
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(
        location,
        "/accounts/login/?next=%2Fbook%2F4c1d3a6e-8f3b-4d4e-9a55-0b7a4a1f0c11%2Frenew%2F"
    );
}

#[tokio::test]
async fn test_borrowed_list_requires_permission() {
    let (app, config) = test_app();
    let req = Request::builder()
        .uri("/borrowed/")
        .header(header::COOKIE, format!("sessionid={}", token(&config, true, false)))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let page = body_text(response).await;
    assert!(page.contains("<h1>Forbidden</h1>"));
}

#[tokio::test]
async fn test_edit_forms_require_staff() {
    let (app, config) = test_app();
    let cookie = format!("sessionid={}", token(&config, false, true));

    for uri in ["/author/create/", "/book/create/", "/author/1/update/", "/book/1/delete/"] {
        let req = Request::builder()
            .uri(uri)
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", uri);
    }
}

#[tokio::test]
async fn test_author_create_form_for_staff() {
    let (app, config) = test_app();
    let req = Request::builder()
        .uri("/author/create/")
        .header(header::COOKIE, format!("sessionid={}", token(&config, true, false)))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(r#"name="first_name""#));
    assert!(page.contains(r#"action="/author/create/""#));
}

#[tokio::test]
async fn test_login_page() {
    let (app, _) = test_app();
    let req = Request::builder()
        .uri("/accounts/login/?next=/borrowed/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(r#"name="next" value="/borrowed/""#));
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let (app, config) = test_app();
    let req = Request::builder()
        .method("POST")
        .uri("/accounts/logout/")
        .header(header::COOKIE, format!("sessionid={}", token(&config, false, false)))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie removal")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("sessionid="));
}

#[tokio::test]
async fn test_api_logout() {
    let (app, _) = test_app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _) = test_app();
    let req = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/authors/{id}/"].is_object());
}
