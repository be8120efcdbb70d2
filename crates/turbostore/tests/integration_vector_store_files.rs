//! Integration tests for the vector store files API using wiremock

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use turbostore::{
    ChunkingStrategy, CreateVectorStoreFileRequest, ErrorKind, ListParams, StaticChunking,
    VectorStoreFileStatus,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_attach_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vector_stores/vs_1/files"))
        .and(header("openai-beta", "assistants=v2"))
        .and(body_json(json!({"file_id": "file-abc123"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("vector_store_file")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server.uri());
    let file = client
        .vector_stores()
        .files("vs_1")
        .create(CreateVectorStoreFileRequest::new("file-abc123"))
        .await
        .expect("attach failed");

    assert_eq!(file.id, "file-abc123");
    assert_eq!(file.vector_store_id, "vs_1");
    assert_eq!(file.status, VectorStoreFileStatus::Completed);
    assert!(file.status.is_terminal());
    assert!(file.last_error.is_none());

    mock_server.verify().await;
}

#[tokio::test]
async fn test_attach_file_with_static_chunking() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vector_stores/vs_1/files"))
        .and(body_json(json!({
            "file_id": "file-abc123",
            "chunking_strategy": {
                "type": "static",
                "static": {"max_chunk_size_tokens": 800, "chunk_overlap_tokens": 400}
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("vector_store_file")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CreateVectorStoreFileRequest::builder()
        .file_id("file-abc123")
        .chunking_strategy(ChunkingStrategy::Static {
            config: StaticChunking {
                max_chunk_size_tokens: 800,
                chunk_overlap_tokens: 400,
            },
        })
        .build()
        .expect("valid request");

    let client = common::client_for(&mock_server.uri());
    client
        .vector_stores()
        .files("vs_1")
        .create(request)
        .await
        .expect("attach failed");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_retrieve_failed_file_reports_last_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vector_stores/vs_1/files/file-bad"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::load_response_fixture("vector_store_file_failed")),
        )
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server.uri());
    let file = client
        .vector_stores()
        .files("vs_1")
        .retrieve("file-bad")
        .await
        .unwrap();

    assert_eq!(file.status, VectorStoreFileStatus::Failed);
    let last_error = file.last_error.expect("failed file carries an error");
    assert_eq!(last_error.code, "unsupported_file");
}

#[tokio::test]
async fn test_delete_discards_empty_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/vector_stores/vs_1/files/file-abc123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server.uri());
    client
        .vector_stores()
        .files("vs_1")
        .delete("file-abc123")
        .await
        .expect("204 must not be a decode error");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_delete_discards_acknowledgement_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/vector_stores/vs_1/files/file-abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-abc123",
            "object": "vector_store.file.deleted",
            "deleted": true
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server.uri());
    let files = client.vector_stores().files("vs_1");

    files.delete("file-abc123").await.unwrap();
    let ack = files.delete_with_ack("file-abc123").await.unwrap();
    assert!(ack.deleted);
    assert_eq!(ack.object, "vector_store.file.deleted");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_delete_missing_file_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/vector_stores/vs_1/files/file-missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(common::load_response_fixture("not_found")),
        )
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server.uri());
    let err = client
        .vector_stores()
        .files("vs_1")
        .delete("file-missing")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_files() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vector_stores/vs_1/files"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{
                "id": "file-abc123",
                "object": "vector_store.file",
                "created_at": 1699061776,
                "vector_store_id": "vs_1",
                "status": "in_progress",
                "last_error": null
            }],
            "first_id": "file-abc123",
            "last_id": "file-abc123",
            "has_more": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server.uri());
    let page = client
        .vector_stores()
        .files("vs_1")
        .list(ListParams::new().limit(1))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].status, VectorStoreFileStatus::InProgress);
    assert!(!page.data[0].status.is_terminal());
    assert_eq!(page.next_cursor(), Some("file-abc123"));

    mock_server.verify().await;
}

#[tokio::test]
async fn test_file_ids_are_escaped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vector_stores/vs%2F1/files/file%3Fx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file?x",
            "vector_store_id": "vs/1",
            "status": "cancelled"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server.uri());
    let file = client
        .vector_stores()
        .files("vs/1")
        .retrieve("file?x")
        .await
        .unwrap();

    assert_eq!(file.status, VectorStoreFileStatus::Cancelled);
    mock_server.verify().await;
}

#[tokio::test]
async fn test_dot_file_id_never_reaches_parent_store() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = common::client_for(&mock_server.uri());
    for id in ["..", "."] {
        let err = client
            .vector_stores()
            .files("vs_1")
            .delete(id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Request);
    }

    let err = client.vector_stores().delete("..").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Request);

    mock_server.verify().await;
}
