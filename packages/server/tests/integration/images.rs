use serde_json::json;

use crate::common::{PUBLIC_IMAGE_BASE, TestApp, routes};

/// Minimal PNG header; enough for an upload body.
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];

async fn upload_png(app: &TestApp, token: &str, file_name: &str) -> (String, String) {
    let res = app
        .upload_with_token(routes::IMAGES, file_name, "image/png", PNG_BYTES.to_vec(), token)
        .await;
    assert_eq!(res.status, 201, "upload failed: {}", res.text);

    let url = res.body["url"].as_str().unwrap().to_string();
    let filename = res.body["filename"].as_str().unwrap().to_string();
    (url, filename)
}

#[tokio::test]
async fn upload_stores_object_and_returns_public_url() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let (url, filename) = upload_png(&app, &token, "photo.png").await;

    assert!(
        url.starts_with(PUBLIC_IMAGE_BASE),
        "url {url:?} should be under the configured base"
    );
    assert!(filename.ends_with("-photo.png"), "got {filename:?}");
    assert!(app.images_dir.join(&filename).exists());
}

#[tokio::test]
async fn uploaded_image_is_served_on_its_asset_path() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let (_, filename) = upload_png(&app, &token, "photo.png").await;

    let res = app
        .client
        .get(app.url(&routes::asset(&filename)))
        .send()
        .await
        .expect("asset request");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("content-type").unwrap().to_str().unwrap(),
        "image/png"
    );
    let bytes = res.bytes().await.unwrap();
    assert_eq!(&bytes[..], PNG_BYTES);
}

#[tokio::test]
async fn missing_asset_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(&routes::asset("nope.png")).await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn upload_requires_auth() {
    let app = TestApp::spawn().await;

    let part = reqwest::multipart::Part::bytes(PNG_BYTES.to_vec())
        .file_name("photo.png")
        .mime_str("image/png")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("file", part);

    let res = app
        .client
        .post(app.url(routes::IMAGES))
        .multipart(form)
        .send()
        .await
        .expect("upload request");

    assert_eq!(res.status(), 401);
}

#[tokio::test]
async fn upload_rejects_unsupported_extensions() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let res = app
        .upload_with_token(
            routes::IMAGES,
            "script.svg",
            "image/svg+xml",
            b"<svg/>".to_vec(),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn replacing_a_featured_image_deletes_the_old_object() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let (old_url, old_filename) = upload_png(&app, &token, "before.png").await;
    let (new_url, new_filename) = upload_png(&app, &token, "after.png").await;

    let res = app
        .post_with_token(
            routes::BLOG,
            &json!({
                "title": "Illustrated Post",
                "content": "with image",
                "featured_image": old_url,
                "published": true,
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.id();

    let res = app
        .put_with_token(
            &routes::blog_post(id),
            &json!({
                "title": "Illustrated Post",
                "content": "with new image",
                "featured_image": new_url,
                "published": true,
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);

    assert!(
        !app.images_dir.join(&old_filename).exists(),
        "old image should have been deleted"
    );
    assert!(app.images_dir.join(&new_filename).exists());
}

#[tokio::test]
async fn keeping_the_same_featured_image_deletes_nothing() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let (url, filename) = upload_png(&app, &token, "stable.png").await;

    let res = app
        .post_with_token(
            routes::BLOG,
            &json!({
                "title": "Stable Image",
                "content": "body",
                "featured_image": url.as_str(),
                "published": true,
            }),
            &token,
        )
        .await;
    let id = res.id();

    let res = app
        .put_with_token(
            &routes::blog_post(id),
            &json!({
                "title": "Stable Image",
                "content": "edited body",
                "featured_image": url.as_str(),
                "published": true,
            }),
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);

    assert!(app.images_dir.join(&filename).exists());
}

#[tokio::test]
async fn deleting_a_post_deletes_its_featured_image() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let (url, filename) = upload_png(&app, &token, "doomed.png").await;

    let res = app
        .post_with_token(
            routes::BLOG,
            &json!({
                "title": "Doomed Post",
                "content": "body",
                "featured_image": url,
                "published": true,
            }),
            &token,
        )
        .await;
    let id = res.id();

    let res = app.delete_with_token(&routes::blog_post(id), &token).await;
    assert_eq!(res.status, 204);

    assert!(
        !app.images_dir.join(&filename).exists(),
        "image should be deleted with its post"
    );
}

#[tokio::test]
async fn foreign_image_urls_are_left_alone() {
    let app = TestApp::spawn().await;
    let token = app.login().await;

    let res = app
        .post_with_token(
            routes::BLOG,
            &json!({
                "title": "External Image",
                "content": "body",
                "featured_image": "https://cdn.example.com/pic.png",
                "published": true,
            }),
            &token,
        )
        .await;
    let id = res.id();

    // Deleting must not fail even though the URL is not ours to manage.
    let res = app.delete_with_token(&routes::blog_post(id), &token).await;
    assert_eq!(res.status, 204);
}
