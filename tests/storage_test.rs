mod common;

use std::sync::Arc;

use common::{RecordingSink, record};
use musecli::location::Location;
use musecli::management::{
    ACCESS_TOKEN_KEY, FileStorage, LIKED_ITEMS_KEY, LikesManager, Storage, StorageError,
};
use musecli::state::AppState;
use musecli::types::ItemType;

#[test]
fn test_file_storage_roundtrip_and_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("storage"));

    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap(), None);

    storage.set_item(ACCESS_TOKEN_KEY, "token-1").unwrap();
    assert_eq!(
        storage.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("token-1")
    );

    storage.set_item(ACCESS_TOKEN_KEY, "token-2").unwrap();
    assert_eq!(
        storage.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("token-2")
    );

    storage.remove_item(ACCESS_TOKEN_KEY).unwrap();
    assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap(), None);

    // removing twice is fine
    storage.remove_item(ACCESS_TOKEN_KEY).unwrap();
}

#[test]
fn test_file_storage_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    storage.set_item(LIKED_ITEMS_KEY, "[]").unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![LIKED_ITEMS_KEY.to_string()]);
}

#[test]
fn test_file_storage_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    for key in ["", "../escape", "a/b", "with space"] {
        assert!(matches!(
            storage.set_item(key, "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}

#[test]
fn test_likes_survive_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(dir.path()));

    let mut likes = LikesManager::load_cached_likes(Arc::clone(&storage), RecordingSink::new());
    likes
        .toggle_like(&record("a1", "X"), ItemType::Artist, None)
        .unwrap();
    likes
        .toggle_like(&record("b1", "Y"), ItemType::Album, None)
        .unwrap();

    let reloaded = LikesManager::load_cached_likes(
        Arc::new(FileStorage::new(dir.path())),
        RecordingSink::new(),
    );
    assert_eq!(reloaded.liked_items(), likes.liked_items());
}

#[test]
fn test_corrupt_file_cache_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(LIKED_ITEMS_KEY), [0xff, 0xfe, 0x00]).unwrap();

    let likes =
        LikesManager::load_cached_likes(Arc::new(FileStorage::new(dir.path())), RecordingSink::new());
    assert!(likes.liked_items().is_empty());
}

#[test]
fn test_app_state_start() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));
    let location =
        Location::from_redirect(
            url::Url::parse("http://127.0.0.1:5173/").unwrap(),
            "http://127.0.0.1:5173/#access_token=T&token_type=Bearer",
        )
        .unwrap();

    let state = AppState::start(storage.clone(), RecordingSink::new(), location);

    assert_eq!(state.session.access_token(), Some("T"));
    assert_eq!(state.location.fragment(), None);
    assert_eq!(state.likes.count(), 0);
    assert_eq!(
        storage.get_item(ACCESS_TOKEN_KEY).unwrap().as_deref(),
        Some("T")
    );
}
