//! HTTP client integration tests against a mock CMS

use cmsync_client::{
    CmsClient, Error, Fields, HttpCmsClient, SYNC_ORIGIN_HEADER, SYNC_ORIGIN_VALUE,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpCmsClient {
    HttpCmsClient::new(server.uri(), "test-token").unwrap()
}

fn fields(slug: &str, title: &str) -> Fields {
    let mut fields = Fields::new();
    fields.insert("slug".to_string(), json!(slug));
    fields.insert("title".to_string(), json!(title));
    fields
}

#[tokio::test]
async fn test_get_all_entries_follows_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .and(query_param("locale", "en"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [{ "id": "doc-1", "slug": "one", "locale": "en" }],
            "totalPages": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [{ "id": "doc-2", "slug": "two", "locale": "en" }],
            "totalPages": 2
        })))
        .mount(&server)
        .await;

    let docs = client(&server).get_all_entries("posts", "en").await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].slug, "one");
    assert_eq!(docs[1].slug, "two");
}

#[tokio::test]
async fn test_find_by_slug_returns_first_doc_or_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pages"))
        .and(query_param("slug", "about"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [{ "id": "doc-about", "slug": "about", "locale": "en", "title": "About" }],
            "totalPages": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pages"))
        .and(query_param("slug", "missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [],
            "totalPages": 0
        })))
        .mount(&server)
        .await;

    let cms = client(&server);
    let found = cms
        .find_by_slug("pages", "about", Some("en"))
        .await
        .unwrap();
    assert_eq!(found.unwrap().id, "doc-about");

    let missing = cms
        .find_by_slug("pages", "missing", Some("en"))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_writes_carry_the_sync_origin_marker() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pages"))
        .and(header(SYNC_ORIGIN_HEADER, SYNC_ORIGIN_VALUE))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "doc-1", "slug": "about", "locale": "en", "title": "About"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let doc = client(&server)
        .create_entry("pages", &fields("about", "About"), Some("en"))
        .await
        .unwrap();
    assert_eq!(doc.id, "doc-1");
}

#[tokio::test]
async fn test_update_entry_patches_document() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/pages/doc-1"))
        .and(query_param("locale", "en"))
        .and(header(SYNC_ORIGIN_HEADER, SYNC_ORIGIN_VALUE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "doc-1", "slug": "about", "locale": "en", "title": "Updated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let doc = client(&server)
        .update_entry("pages", "doc-1", &fields("about", "Updated"), Some("en"))
        .await
        .unwrap();
    assert_eq!(doc.field("title"), Some(&json!("Updated")));
}

#[tokio::test]
async fn test_create_localization_fails_loudly_without_base() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/pages/doc-gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_localization("pages", "doc-gone", "es", &fields("sobre", "Sobre"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::BaseDocumentNotFound { .. }));
}

#[tokio::test]
async fn test_update_localization_delegates_to_create_when_absent() {
    let server = MockServer::start().await;

    // Lookup by slug+locale finds nothing
    Mock::given(method("GET"))
        .and(path("/api/pages"))
        .and(query_param("slug", "sobre"))
        .and(query_param("locale", "es"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [],
            "totalPages": 0
        })))
        .mount(&server)
        .await;
    // So the attach goes to the base document id
    Mock::given(method("PATCH"))
        .and(path("/api/pages/doc-about"))
        .and(query_param("locale", "es"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "doc-about", "slug": "sobre", "locale": "es", "title": "Sobre"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let doc = client(&server)
        .update_localization("pages", "doc-about", "es", &fields("sobre", "Sobre"))
        .await
        .unwrap();
    assert_eq!(doc.locale, "es");
}

#[tokio::test]
async fn test_non_success_status_is_contextual_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/pages/doc-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server).delete_entry("pages", "doc-1").await.unwrap_err();
    match err {
        Error::Status {
            operation,
            status,
            detail,
        } => {
            assert_eq!(operation, "delete_entry");
            assert_eq!(status, 500);
            assert_eq!(detail, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}
