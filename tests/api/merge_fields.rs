use mailing_lists::domain::{MergeFieldType, MergeFieldUpdate, NewMergeField};
use serde_json::json;
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{api_error, api_path, json_body, TestApp, LIST_ID};

#[tokio::test]
async fn merge_fields_returns_the_merge_field_list() {
    let app = TestApp::spawn().await;
    let fields = json!([
        { "merge_id": 1, "tag": "FNAME", "name": "First Name", "type": "text" },
        { "merge_id": 2, "tag": "LNAME", "name": "Last Name", "type": "text" },
    ]);
    Mock::given(method("GET"))
        .and(path(api_path("lists/abc123/merge-fields")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "merge_fields": fields, "total_items": 2 })),
        )
        .expect(1)
        .mount(&app.api_server)
        .await;

    let merge_fields = app.repository.merge_fields(LIST_ID).await.unwrap();

    assert_eq!(json!(merge_fields), fields);
}

#[tokio::test]
async fn add_merge_field_posts_the_definition() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path(api_path("lists/abc123/merge-fields")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "merge_id": 3 })))
        .expect(1)
        .mount(&app.api_server)
        .await;
    let field = NewMergeField::new("Birthday", MergeFieldType::Birthday)
        .with_tag("BDAY")
        .required(false);

    let payload = app
        .repository
        .add_merge_field(LIST_ID, &field)
        .await
        .unwrap();

    assert_eq!(payload["merge_id"], 3);
    assert_eq!(
        json_body(&app.received_requests().await[0]),
        json!({ "name": "Birthday", "type": "birthday", "tag": "BDAY", "required": false })
    );
}

#[tokio::test]
async fn update_merge_field_patches_only_the_given_attributes() {
    let app = TestApp::spawn().await;
    Mock::given(method("PATCH"))
        .and(path(api_path("lists/abc123/merge-fields/3")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "merge_id": 3 })))
        .expect(1)
        .mount(&app.api_server)
        .await;
    let update = MergeFieldUpdate {
        name: Some("Date of birth".into()),
        ..MergeFieldUpdate::default()
    };

    app.repository
        .update_merge_field(LIST_ID, "3", &update)
        .await
        .unwrap();

    assert_eq!(
        json_body(&app.received_requests().await[0]),
        json!({ "name": "Date of birth" })
    );
}

#[tokio::test]
async fn delete_merge_field_targets_the_merge_field_resource() {
    let app = TestApp::spawn().await;
    Mock::given(method("DELETE"))
        .and(path(api_path("lists/abc123/merge-fields/3")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.api_server)
        .await;

    assert!(app
        .repository
        .delete_merge_field(LIST_ID, "3")
        .await
        .is_ok());
}

#[tokio::test]
async fn merge_field_operations_surface_the_reported_error() {
    let app = TestApp::spawn().await;
    Mock::given(any())
        .respond_with(api_error(400, "Merge Max Limit Exceeded"))
        .mount(&app.api_server)
        .await;
    let repository = &app.repository;
    let field = NewMergeField::new("Nickname", MergeFieldType::Text);

    let errors = vec![
        repository.merge_fields(LIST_ID).await.unwrap_err(),
        repository.add_merge_field(LIST_ID, &field).await.unwrap_err(),
        repository
            .update_merge_field(LIST_ID, "3", &MergeFieldUpdate::default())
            .await
            .unwrap_err(),
        repository.delete_merge_field(LIST_ID, "3").await.unwrap_err(),
    ];

    for e in errors {
        assert_eq!(e.message(), "Merge Max Limit Exceeded");
    }
}
