use serde_json::json;

use crate::common::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, routes};

#[tokio::test]
async fn login_returns_token_and_session_cookie() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .post(app.url(routes::LOGIN))
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .expect("login request");

    assert_eq!(res.status(), 200);
    let set_cookie = res
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(
        set_cookie.starts_with("session="),
        "expected session cookie, got {set_cookie:?}"
    );

    let body: serde_json::Value = res.json().await.expect("json body");
    assert_eq!(body["email"], ADMIN_EMAIL);
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(
            routes::LOGIN,
            &json!({ "email": ADMIN_EMAIL, "password": "wrong-password" }),
        )
        .await;

    assert_eq!(res.status, 401);
    assert_eq!(res.code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn login_with_unknown_email_fails() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(
            routes::LOGIN,
            &json!({ "email": "nobody@example.com", "password": ADMIN_PASSWORD }),
        )
        .await;

    assert_eq!(res.status, 401);
    assert_eq!(res.code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn login_with_blank_fields_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(routes::LOGIN, &json!({ "email": "", "password": "" }))
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn me_returns_admin_profile() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let res = app.get_with_token(routes::ME, &token).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["email"], ADMIN_EMAIL);
    assert!(res.body["id"].is_number());
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::ME).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.code(), "TOKEN_MISSING");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.get_with_token(routes::ME, "not-a-real-token").await;

    assert_eq!(res.status, 401);
    assert_eq!(res.code(), "TOKEN_INVALID");
}

#[tokio::test]
async fn session_cookie_authenticates_mutations() {
    let app = TestApp::spawn().await;

    // Browser-style client: cookies only, no Authorization header.
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("cookie client");

    let res = client
        .post(app.url(routes::LOGIN))
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .expect("login");
    assert_eq!(res.status(), 200);

    let res = client
        .post(app.url(routes::BLOG))
        .json(&json!({
            "title": "Posted via cookie",
            "content": "session cookie auth works",
            "published": true,
        }))
        .send()
        .await
        .expect("create post");

    assert_eq!(res.status(), 201);
}
