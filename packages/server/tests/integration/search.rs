use serde_json::json;

use crate::common::{TestApp, routes};

async fn seed_post(app: &TestApp, token: &str, title: &str, content: &str, published: bool) {
    let res = app
        .post_with_token(
            routes::BLOG,
            &json!({
                "title": title,
                "content": content,
                "excerpt": format!("{title} in short"),
                "published": published,
            }),
            token,
        )
        .await;
    assert_eq!(res.status, 201, "seed_post failed: {}", res.text);
}

fn result_titles(res: &crate::common::TestResponse) -> Vec<String> {
    res.body["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn matches_title_case_insensitively() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    seed_post(&app, &token, "Entrance Exam Guide", "study hard", true).await;

    let res = app.get_without_token(&routes::search_q("entrance")).await;

    assert_eq!(res.status, 200);
    assert_eq!(result_titles(&res), vec!["Entrance Exam Guide"]);
}

#[tokio::test]
async fn matches_content_and_excerpt() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    seed_post(&app, &token, "Plain Title", "tutoring schedules inside", true).await;

    let by_content = app.get_without_token(&routes::search_q("schedules")).await;
    assert_eq!(result_titles(&by_content), vec!["Plain Title"]);

    // The seeded excerpt is "<title> in short".
    let by_excerpt = app.get_without_token(&routes::search_q("in%20short")).await;
    assert_eq!(result_titles(&by_excerpt), vec!["Plain Title"]);
}

#[tokio::test]
async fn unpublished_posts_never_match() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    seed_post(&app, &token, "Hidden Gem", "hidden gem content", false).await;

    let res = app.get_without_token(&routes::search_q("gem")).await;

    assert_eq!(res.status, 200);
    assert!(result_titles(&res).is_empty());
}

#[tokio::test]
async fn no_match_returns_empty_list_not_an_error() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    seed_post(&app, &token, "Ordinary Post", "ordinary words", true).await;

    let res = app
        .get_without_token(&routes::search_q("nonexistent-term-xyz"))
        .await;

    assert_eq!(res.status, 200);
    assert!(result_titles(&res).is_empty());
}

#[tokio::test]
async fn blank_query_is_rejected_before_the_store() {
    let app = TestApp::spawn().await;

    for path in [
        routes::SEARCH.to_string(),
        routes::search_q(""),
        routes::search_q("%20%20"),
    ] {
        let res = app.get_without_token(&path).await;
        assert_eq!(res.status, 400, "path {path} got {}", res.text);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn results_are_ordered_newest_first() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    seed_post(&app, &token, "Older Match", "shared keyword", true).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    seed_post(&app, &token, "Newer Match", "shared keyword", true).await;

    let res = app.get_without_token(&routes::search_q("keyword")).await;

    assert_eq!(result_titles(&res), vec!["Newer Match", "Older Match"]);
}

#[tokio::test]
async fn like_wildcards_are_literal() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    seed_post(&app, &token, "Discount 50% Off", "save half", true).await;
    seed_post(&app, &token, "Unrelated", "nothing to see", true).await;

    // "%" must only match posts that literally contain a percent sign.
    let res = app.get_without_token(&routes::search_q("50%25")).await;
    assert_eq!(result_titles(&res), vec!["Discount 50% Off"]);

    // An underscore is literal too, not a single-char wildcard.
    let res = app.get_without_token(&routes::search_q("x_y")).await;
    assert!(result_titles(&res).is_empty());
}
