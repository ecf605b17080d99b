//! Integration tests for the file-backed match count store
//!
//! Run with: cargo test --package veriscan-storage --test file_store

use rstest::rstest;
use tempfile::TempDir;
use veriscan_core::MatchCount;
use veriscan_storage::{ConfigStore, FileConfigStore, StoreConfig};

fn store_in(dir: &TempDir) -> FileConfigStore {
    FileConfigStore::new(StoreConfig::new(dir.path().join("current_match_mode.txt")))
}

#[tokio::test]
async fn test_save_then_load_roundtrip_for_every_count() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    for count in MatchCount::all() {
        store.save(count).await.unwrap();
        assert_eq!(store.load().await.unwrap(), count);
    }
}

#[tokio::test]
async fn test_fresh_store_instance_sees_saved_count() {
    let dir = TempDir::new().unwrap();

    store_in(&dir).save(MatchCount::new(5).unwrap()).await.unwrap();

    let reopened = store_in(&dir);
    assert_eq!(reopened.load().await.unwrap().get(), 5);
}

#[rstest]
#[case("__MATCH04__\n", 4)]
#[case("  __MATCH06__  ", 6)]
#[case("__MATCH08__\r\n", 8)]
#[tokio::test]
async fn test_load_tolerates_surrounding_whitespace(#[case] content: &str, #[case] expected: u8) {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), content).unwrap();

    assert_eq!(store.load().await.unwrap().get(), expected);
}

#[rstest]
#[case("")]
#[case("5")]
#[case("__MATCH09__")]
#[case("__MATCH01__")]
#[case("garbage")]
#[tokio::test]
async fn test_invalid_content_heals_to_default(#[case] content: &str) {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), content).unwrap();

    let count = store.load().await.unwrap();

    assert_eq!(count, MatchCount::default());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "__MATCH02__");
}

#[tokio::test]
async fn test_save_overwrites_previous_token() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(MatchCount::new(3).unwrap()).await.unwrap();
    store.save(MatchCount::new(7).unwrap()).await.unwrap();

    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "__MATCH07__");
}
