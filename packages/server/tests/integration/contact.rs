use serde_json::json;

use crate::common::{TestApp, routes};

fn valid_submission() -> serde_json::Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "090-1234-5678",
        "message": "I would like to book a counseling session.",
    })
}

#[tokio::test]
async fn submission_is_stored_and_returns_id() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(routes::CONTACT, &valid_submission())
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert!(res.body["id"].is_number());
}

#[tokio::test]
async fn invalid_submissions_are_rejected() {
    let app = TestApp::spawn().await;

    let cases = [
        json!({ "name": "", "email": "jane@example.com", "message": "hi" }),
        json!({ "name": "Jane", "email": "not-an-email", "message": "hi" }),
        json!({ "name": "Jane", "email": "jane@example.com", "message": "" }),
        json!({ "name": "Jane", "email": "jane@example.com", "message": "m".repeat(1001) }),
        json!({ "name": "Jane", "email": "jane@example.com", "phone": "1".repeat(21), "message": "hi" }),
    ];

    for payload in cases {
        let res = app.post_without_token(routes::CONTACT, &payload).await;
        assert_eq!(res.status, 400, "payload {payload} got {}", res.text);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn listing_requires_auth() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::CONTACT).await;

    assert_eq!(res.status, 401);
}

#[tokio::test]
async fn listing_returns_submissions_newest_first() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    app.post_without_token(routes::CONTACT, &valid_submission())
        .await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let mut second = valid_submission();
    second["name"] = json!("John Roe");
    app.post_without_token(routes::CONTACT, &second).await;

    let res = app.get_with_token(routes::CONTACT, &token).await;

    assert_eq!(res.status, 200);
    let names: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["John Roe", "Jane Doe"]);
}

#[tokio::test]
async fn read_filter_and_mark_read_work() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let created = app
        .post_without_token(routes::CONTACT, &valid_submission())
        .await;
    let id = created.id();

    // Fresh submissions are unread.
    let unread = app
        .get_with_token(&format!("{}?read=false", routes::CONTACT), &token)
        .await;
    assert_eq!(unread.body.as_array().unwrap().len(), 1);

    let res = app
        .patch_with_token(&routes::contact_read(id), &json!({}), &token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["read"], true);

    let unread = app
        .get_with_token(&format!("{}?read=false", routes::CONTACT), &token)
        .await;
    assert!(unread.body.as_array().unwrap().is_empty());

    let read = app
        .get_with_token(&format!("{}?read=true", routes::CONTACT), &token)
        .await;
    assert_eq!(read.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn marking_missing_submission_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let res = app
        .patch_with_token(&routes::contact_read(999), &json!({}), &token)
        .await;

    assert_eq!(res.status, 404);
}
