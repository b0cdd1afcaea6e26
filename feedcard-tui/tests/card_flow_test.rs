use chrono::Utc;
use feedcard::api::ApiClient;
use feedcard::card::{CardOptions, DeletePhase, PostCard};
use feedcard::clipboard::MemoryClipboard;
use feedcard::logging::LogConfig;
use feedcard_types::{Post, Viewer};
use serde_json::json;
use std::time::Instant;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn viewer(id: &str) -> Viewer {
    Viewer {
        id: id.to_string(),
        username: id.to_lowercase(),
        profile_image: None,
        education_level: Some("Undergraduate".to_string()),
        academic_year: Some("1".to_string()),
    }
}

fn p1() -> Post {
    serde_json::from_value(json!({
        "_id": "P1",
        "user": { "_id": "A1", "username": "author" },
        "text": "exam tips thread",
        "likes": [],
        "comments": [],
        "createdAt": "2024-03-01T11:00:00.000Z"
    }))
    .unwrap()
}

fn mount(viewer_id: &str) -> PostCard {
    let options = CardOptions {
        page_url: "http://localhost:5173/feed?tab=latest".to_string(),
        log: LogConfig::disabled(),
        ..Default::default()
    };
    PostCard::new(p1(), viewer(viewer_id), options)
}

#[tokio::test]
async fn test_non_author_likes_then_unlikes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/like/P1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;
    let client = ApiClient::new(format!("{}/api", server.uri()), "token");
    let mut card = mount("U1");

    card.toggle_like(&client).await;
    assert_eq!(card.like_count(), 1);
    assert!(card.liked_by_viewer());

    card.toggle_like(&client).await;
    assert_eq!(card.like_count(), 0);
    assert!(!card.liked_by_viewer());
}

#[tokio::test]
async fn test_comment_hello_shows_exactly_server_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/comment/P1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "comments": [{
                "_id": "c1",
                "user": { "_id": "U1", "username": "u1" },
                "text": "hello",
                "timestamp": "2024-03-01T12:00:00.000Z"
            }]
        })))
        .mount(&server)
        .await;
    let client = ApiClient::new(format!("{}/api", server.uri()), "token");
    let mut card = mount("U1");
    card.toggle_comments();
    card.set_draft("hello");

    card.submit_comment(&client).await;

    assert_eq!(card.comment_count(), 1);
    assert_eq!(card.comments()[0].id, "c1");
    assert_eq!(card.comments()[0].text, "hello");
    assert_eq!(card.draft(), "");

    let view = card.view(Instant::now(), Utc::now()).unwrap();
    let panel = view.comments_panel.unwrap();
    assert_eq!(panel.comments.len(), 1);
    assert_eq!(panel.comments[0].text, "hello");
}

#[tokio::test]
async fn test_failed_comment_leaves_draft_for_resubmission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/posts/comment/P1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;
    let client = ApiClient::new(format!("{}/api", server.uri()), "token");
    let mut card = mount("U1");
    card.set_draft("hello");

    card.submit_comment(&client).await;

    assert_eq!(card.draft(), "hello");
    assert_eq!(card.comment_count(), 0);
    assert!(!card.comment_in_flight());
}

#[tokio::test]
async fn test_author_deletes_and_card_disappears() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/P1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;
    let client = ApiClient::new(format!("{}/api", server.uri()), "token");
    let mut card = mount("A1");

    assert!(card.can_delete());
    card.request_delete();
    card.confirm_delete(&client).await;

    assert_eq!(card.delete_phase(), &DeletePhase::Deleted);
    assert!(card.view(Instant::now(), Utc::now()).is_none());

    // Any further interaction is a no-op and sends nothing
    card.toggle_like(&client).await;
    card.set_draft("too late");
    card.submit_comment(&client).await;
    card.request_delete();
    let mut clipboard = MemoryClipboard::default();
    assert!(!card.share_link(&mut clipboard, Instant::now()));
    assert_eq!(card.like_count(), 0);
}

#[tokio::test]
async fn test_rejected_delete_keeps_card_with_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/posts/P1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Token expired" })))
        .mount(&server)
        .await;
    let client = ApiClient::new(format!("{}/api", server.uri()), "token");
    let mut card = mount("A1");

    card.request_delete();
    card.confirm_delete(&client).await;

    assert!(card.is_visible());
    assert!(matches!(
        card.delete_phase(),
        DeletePhase::ConfirmPending { last_error: Some(_) }
    ));
}

#[test]
fn test_share_copies_page_url_verbatim() {
    let mut card = mount("U1");
    let mut clipboard = MemoryClipboard::default();

    assert!(card.share_link(&mut clipboard, Instant::now()));
    assert_eq!(
        clipboard.contents.as_deref(),
        Some("http://localhost:5173/feed?tab=latest")
    );
}
