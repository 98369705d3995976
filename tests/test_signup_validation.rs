//! Signup endpoint tests: validation, normalization, and uniqueness.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::TestContext;
use serde_json::Value;

async fn post_signup<S, B>(
    app: &S,
    username: &str,
    email: &str,
    password: &str,
) -> actix_web::dev::ServiceResponse<B>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_form([
            ("username", username),
            ("email", email),
            ("password", password),
        ])
        .to_request();
    test::call_service(app, req).await
}

#[actix_web::test]
async fn test_short_username_rejected_with_field_errors() {
    let ctx = TestContext::new();
    let app = build_app!(ctx);

    let res = post_signup(&app, "al", "a@x.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "username");

    // A rejected signup must not create the credential file
    assert!(!ctx.users_file().exists());
}

#[actix_web::test]
async fn test_all_violations_reported_together() {
    let ctx = TestContext::new();
    let app = build_app!(ctx);

    let res = post_signup(&app, "a", "not-an-email", "x").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["username", "email", "password"]);
}

#[actix_web::test]
async fn test_valid_signup_redirects_and_stores_hash() {
    let ctx = TestContext::new();
    let app = build_app!(ctx);

    let res = post_signup(&app, "alice", "Alice@Example.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers().get("Location").unwrap(), "/login");

    let users = ctx.store.load().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "alice");
    // Email is normalized to lowercase before storage
    assert_eq!(users[0].email, "alice@example.com");
    // Only a bcrypt hash is persisted, never the plaintext
    assert_ne!(users[0].password_hash, "secret1");
    assert!(users[0].password_hash.starts_with("$2"));
    assert!(
        skycast_auth::verify_password("secret1", &users[0].password_hash)
            .await
            .unwrap()
    );
}

#[actix_web::test]
async fn test_overlong_password_rejected() {
    let ctx = TestContext::new();
    let app = build_app!(ctx);

    let password = "p".repeat(73);
    let res = post_signup(&app, "alice", "a@x.com", &password).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "password");

    assert!(!ctx.users_file().exists());
}

#[actix_web::test]
async fn test_duplicate_username_conflict() {
    let ctx = TestContext::new();
    let app = build_app!(ctx);

    let res = post_signup(&app, "alice", "a@x.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let res = post_signup(&app, "alice", "other@x.com", "secret2").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = test::read_body(res).await;
    assert_eq!(body, "Username already taken.");

    assert_eq!(ctx.store.load().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_duplicate_email_conflict() {
    let ctx = TestContext::new();
    let app = build_app!(ctx);

    let res = post_signup(&app, "alice", "a@x.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let res = post_signup(&app, "bob", "a@x.com", "secret2").await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = test::read_body(res).await;
    assert_eq!(body, "Email already registered.");
}

#[actix_web::test]
async fn test_username_is_html_escaped_before_storage() {
    let ctx = TestContext::new();
    let app = build_app!(ctx);

    let res = post_signup(&app, "<script>bob", "b@x.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let users = ctx.store.load().await.unwrap();
    assert_eq!(users[0].username, "&lt;script&gt;bob");
}

#[actix_web::test]
async fn test_signup_rate_limited() {
    let ctx = TestContext::with_rate_limit(2);
    let app = build_app!(ctx);

    // Invalid submissions still consume rate budget
    for _ in 0..2 {
        let res = post_signup(&app, "al", "a@x.com", "secret1").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    let res = post_signup(&app, "alice", "a@x.com", "secret1").await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
}
