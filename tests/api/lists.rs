use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{api_error, api_path, TestApp, LIST_ID};

#[tokio::test]
async fn find_by_id_returns_the_list_payload_unchanged() {
    let app = TestApp::spawn().await;
    let list = json!({
        "id": LIST_ID,
        "name": "Weekly digest",
        "stats": { "member_count": 650, "unsubscribe_count": 12 },
        "merge_field_count": 3,
    });
    Mock::given(method("GET"))
        .and(path(api_path("lists/abc123")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&list))
        .expect(1)
        .mount(&app.api_server)
        .await;

    let payload = app.repository.find_by_id(LIST_ID).await.unwrap();

    assert_eq!(payload, list);
}

#[tokio::test]
async fn find_by_id_fails_with_the_reported_error() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .respond_with(api_error(404, "The requested resource could not be found."))
        .mount(&app.api_server)
        .await;

    let e = app.repository.find_by_id("missing").await.unwrap_err();

    assert_eq!(e.to_string(), "The requested resource could not be found.");
}
