use feedcard::api::{ApiClient, ApiError, PostService};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn comment_json(id: &str, text: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "user": { "_id": "U1", "username": "ada" },
        "text": text,
        "timestamp": "2024-03-01T12:00:00.000Z"
    })
}

#[tokio::test]
async fn test_like_posts_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/like/P1"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "likes": ["U1"] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/api", server.uri()), "secret");
    client.like_post("P1").await.unwrap();
}

#[tokio::test]
async fn test_comment_sends_text_and_returns_server_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/comment/P1"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({ "text": "hello" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "P1",
            "comments": [comment_json("c0", "older"), comment_json("c1", "hello")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/api", server.uri()), "secret");
    let comments = client.comment_on_post("P1", "hello").await.unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1].id, "c1");
    assert_eq!(comments[1].text, "hello");
    assert_eq!(comments[1].author.username, "ada");
}

#[tokio::test]
async fn test_comment_response_without_list_yields_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/comment/P1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "_id": "P1" })))
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/api", server.uri()), "secret");
    assert!(client.comment_on_post("P1", "hi").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_uses_delete_method() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/P1"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Post deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/api", server.uri()), "secret");
    client.delete_post("P1").await.unwrap();
}

#[tokio::test]
async fn test_error_statuses_map_to_variants() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/P1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Not authorized" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/posts/like/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>Not Found</html>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/posts/comment/P1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/api", server.uri()), "secret");

    match client.delete_post("P1").await {
        Err(ApiError::Forbidden(msg)) => assert_eq!(msg, "Not authorized"),
        other => panic!("expected Forbidden, got {:?}", other),
    }
    match client.like_post("missing").await {
        Err(ApiError::NotFound(msg)) => assert!(msg.contains("404")),
        other => panic!("expected NotFound, got {:?}", other),
    }
    match client.comment_on_post("P1", "hi").await {
        Err(ApiError::Api(msg)) => assert_eq!(msg, "boom"),
        other => panic!("expected Api, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 9 (discard) in test environments
    let client = ApiClient::new("http://127.0.0.1:9/api", "secret");
    assert!(matches!(client.like_post("P1").await, Err(ApiError::Network(_))));
}
