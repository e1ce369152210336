use std::{
    collections::HashMap,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Extension, Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use musecli::spotify::{CatalogError, search};
use musecli::types::{CatalogRecord, ItemType};
use serde_json::json;

async fn search_handler(
    Extension(bad_gateways): Extension<Arc<AtomicUsize>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer tok") {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let empty = json!({"artists": {"items": []}, "albums": {"items": []}});
    match params.get("q").map(String::as_str) {
        Some("locked") => StatusCode::UNAUTHORIZED.into_response(),
        Some("broken") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("flaky") => {
            // first call fails, the retry succeeds
            if bad_gateways.fetch_add(1, Ordering::SeqCst) == 0 {
                StatusCode::BAD_GATEWAY.into_response()
            } else {
                Json(empty).into_response()
            }
        }
        Some("mixed") => Json(json!({
            "artists": {"items": [
                null,
                {
                    "id": "a1",
                    "name": "X",
                    "external_urls": {"spotify": "https://open.spotify.com/artist/a1"},
                    "images": [{"url": "https://i/large"}, {"url": "https://i/small"}]
                }
            ]},
            "albums": {"items": [
                {"id": "b1", "name": "Y", "external_urls": {"spotify": "https://open.spotify.com/album/b1"}, "images": []},
                null
            ]}
        }))
        .into_response(),
        _ => Json(empty).into_response(),
    }
}

async fn artist_handler(Path(id): Path<String>) -> Json<serde_json::Value> {
    Json(json!({"id": id, "name": "Looked up", "external_urls": {"spotify": ""}}))
}

async fn me_handler() -> StatusCode {
    StatusCode::IM_A_TEAPOT
}

// One API server for the whole file; SPOTIFY_API_URL is set once, before any
// request is made.
fn start_api() {
    static API: OnceLock<String> = OnceLock::new();
    API.get_or_init(|| {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/v1/search", get(search_handler))
            .route("/v1/artists/{id}", get(artist_handler))
            .route("/v1/me", get(me_handler))
            .layer(Extension(Arc::new(AtomicUsize::new(0))));

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        let url = format!("http://{}/v1", addr);
        unsafe {
            std::env::set_var("SPOTIFY_API_URL", &url);
        }
        url
    });
}

#[tokio::test]
async fn test_search_rejected_token_is_unauthorized() {
    start_api();
    let result = search::search("tok", "locked").await;
    assert!(matches!(result, Err(CatalogError::Unauthorized)));
}

#[tokio::test]
async fn test_search_other_failures_are_request_errors() {
    start_api();
    let result = search::search("tok", "broken").await;
    assert!(matches!(result, Err(CatalogError::Request(_))));
}

#[tokio::test]
async fn test_search_retries_bad_gateway() {
    start_api();
    let results = search::search("tok", "flaky").await.unwrap();
    assert!(results.artists.is_empty());
    assert!(results.albums.is_empty());
}

#[tokio::test]
async fn test_search_skips_null_items_and_keeps_first_image() {
    start_api();
    let results = search::search("tok", "mixed").await.unwrap();

    assert_eq!(
        results.artists,
        vec![CatalogRecord {
            id: "a1".to_string(),
            name: "X".to_string(),
            external_url: "https://open.spotify.com/artist/a1".to_string(),
            image_url: Some("https://i/large".to_string()),
        }]
    );
    assert_eq!(
        results.albums,
        vec![CatalogRecord {
            id: "b1".to_string(),
            name: "Y".to_string(),
            external_url: "https://open.spotify.com/album/b1".to_string(),
            image_url: None,
        }]
    );
}

#[tokio::test]
async fn test_lookup_keeps_id_in_one_path_segment() {
    start_api();

    let record = search::lookup("tok", "a1", ItemType::Artist).await.unwrap();
    assert_eq!(record.id, "a1");
    assert_eq!(record.image_url, None);

    // must hit /artists/{id}, never /me
    let record = search::lookup("tok", "../me", ItemType::Artist)
        .await
        .unwrap();
    assert_eq!(record.id, "../me");
    assert_eq!(record.name, "Looked up");
}

#[tokio::test]
async fn test_lookup_rejects_dot_ids() {
    start_api();
    for id in ["", ".", ".."] {
        let result = search::lookup("tok", id, ItemType::Album).await;
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))), "id {:?}", id);
    }
}
