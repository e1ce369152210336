mod common;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{Extension, Json, Router, routing::post};
use common::{MemoryStorage, record};
use musecli::management::{LIKED_ITEMS_KEY, LikesManager};
use musecli::sink::{HttpLikeSink, LikeAction, LikeSink};
use musecli::types::{ItemType, LikeRequest};
use serde_json::Value;
use tokio::sync::Mutex;

type Received = Arc<Mutex<Vec<(String, Value)>>>;

async fn like(Extension(received): Extension<Received>, Json(body): Json<Value>) {
    received.lock().await.push(("/like".to_string(), body));
}

async fn unlike(Extension(received): Extension<Received>, Json(body): Json<Value>) {
    received.lock().await.push(("/unlike".to_string(), body));
}

async fn start_backend() -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/like", post(like))
        .route("/unlike", post(unlike))
        .layer(Extension(Arc::clone(&received)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

fn request(id: &str, user_id: Option<&str>) -> LikeRequest {
    LikeRequest {
        item: id.to_string(),
        item_type: ItemType::Artist,
        name: format!("name {}", id),
        user_id: user_id.map(str::to_string),
    }
}

#[tokio::test]
async fn test_http_sink_posts_to_like_and_unlike() {
    let (base_url, received) = start_backend().await;
    let sink = HttpLikeSink::new(format!("{}/", base_url));

    sink.dispatch(LikeAction::Like, request("a1", Some("u1")));
    sink.drain(Duration::from_secs(5)).await;
    sink.dispatch(LikeAction::Unlike, request("a1", None));
    sink.drain(Duration::from_secs(5)).await;

    let received = received.lock().await;
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].0, "/like");
    assert_eq!(
        received[0].1,
        serde_json::json!({"item": "a1", "type": "artist", "name": "name a1", "userId": "u1"})
    );
    assert_eq!(received[1].0, "/unlike");
    assert_eq!(received[1].1["item"], "a1");
    assert!(received[1].1.get("userId").is_none());
}

#[tokio::test]
async fn test_http_sink_failure_is_swallowed() {
    // nothing listens on the discard port
    let sink = HttpLikeSink::new("http://127.0.0.1:9");

    let started = Instant::now();
    sink.dispatch(LikeAction::Like, request("a1", None));
    sink.drain(Duration::from_secs(5)).await;
    assert!(started.elapsed() < Duration::from_secs(3));

    // later notifications are unaffected by the failed one
    let (base_url, received) = start_backend().await;
    let sink = HttpLikeSink::new(base_url);
    sink.dispatch(LikeAction::Unlike, request("a2", None));
    sink.drain(Duration::from_secs(5)).await;

    let received = received.lock().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "/unlike");
    assert_eq!(received[0].1["item"], "a2");
}

#[test]
fn test_dispatch_outside_runtime_does_not_panic() {
    let sink = HttpLikeSink::new("http://127.0.0.1:9");
    sink.dispatch(LikeAction::Like, request("a1", None));
}

#[test]
fn test_toggle_like_from_sync_caller_keeps_local_change() {
    let storage = MemoryStorage::new();
    let mut likes = LikesManager::load_cached_likes(
        storage.clone(),
        Arc::new(HttpLikeSink::new("http://127.0.0.1:9")),
    );

    let items = likes
        .toggle_like(&record("a1", "X"), ItemType::Artist, None)
        .unwrap();
    assert_eq!(items.len(), 1);
    assert!(likes.is_liked("a1", ItemType::Artist));
    assert!(storage.raw(LIKED_ITEMS_KEY).unwrap().contains("\"a1\""));
}
