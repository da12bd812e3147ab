mod common;

use common::contract;
use std::sync::Arc;
use tempfile::TempDir;
use traffic_splitter::domain::entities::{Campaign, Link};
use traffic_splitter::domain::repositories::CampaignStore;
use traffic_splitter::error::AppError;
use traffic_splitter::infrastructure::persistence::FileCampaignStore;

async fn open_temp() -> (FileCampaignStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCampaignStore::open(dir.path().join("campaigns.json"))
        .await
        .unwrap();
    (store, dir)
}

#[tokio::test]
async fn test_create_get_list() {
    let (store, _dir) = open_temp().await;
    contract::create_get_list(&store).await;
}

#[tokio::test]
async fn test_duplicate_create_conflicts() {
    let (store, _dir) = open_temp().await;
    contract::duplicate_create_conflicts(&store).await;
}

#[tokio::test]
async fn test_links_keep_insertion_order() {
    let (store, _dir) = open_temp().await;
    contract::links_keep_insertion_order(&store).await;
}

#[tokio::test]
async fn test_update_keeps_links() {
    let (store, _dir) = open_temp().await;
    contract::update_keeps_links(&store).await;
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let (store, _dir) = open_temp().await;
    contract::missing_ids_are_not_found(&store).await;
}

#[tokio::test]
async fn test_delete_then_get() {
    let (store, _dir) = open_temp().await;
    contract::delete_then_get(&store).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_add_link() {
    let (store, dir) = open_temp().await;
    let path = store.path().to_path_buf();

    contract::concurrent_add_link(Arc::new(store), 100).await;

    let reopened = FileCampaignStore::open(path).await.unwrap();
    assert_eq!(reopened.get("race").await.unwrap().unwrap().links.len(), 100);
    drop(dir);
}

#[tokio::test]
async fn test_reopen_restores_campaigns() {
    let (store, dir) = open_temp().await;
    store
        .create(Campaign::new("keep01", "Keep", "MA"))
        .await
        .unwrap();
    store
        .add_link("keep01", Link::new("https://www.bing.com?x={sub}", 20.0))
        .await
        .unwrap();
    store.create(Campaign::new("drop01", "Drop", "MA")).await.unwrap();
    store.delete("drop01").await.unwrap();
    let before = store.get("keep01").await.unwrap().unwrap();
    drop(store);

    let reopened = FileCampaignStore::open(dir.path().join("campaigns.json"))
        .await
        .unwrap();

    assert_eq!(reopened.get("keep01").await.unwrap().unwrap(), before);
    assert!(reopened.get("drop01").await.unwrap().is_none());
    assert_eq!(reopened.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_file_is_json_array_of_records() {
    let (store, dir) = open_temp().await;
    store
        .create(Campaign::new("shape1", "Shape", "MA"))
        .await
        .unwrap();
    store
        .add_link("shape1", Link::new("https://a.example.com", 1.5))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(dir.path().join("campaigns.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json[0]["id"], "shape1");
    assert_eq!(json[0]["name"], "Shape");
    assert_eq!(json[0]["country"], "MA");
    assert_eq!(json[0]["links"][0]["url"], "https://a.example.com");
    assert_eq!(json[0]["links"][0]["weight"], 1.5);
}

#[tokio::test]
async fn test_open_accepts_records_without_created_at() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campaigns.json");
    std::fs::write(
        &path,
        r#"[{"id":"abc123","name":"Legacy","country":"MA","links":[{"url":"https://www.google.com","weight":10}]}]"#,
    )
    .unwrap();

    let store = FileCampaignStore::open(&path).await.unwrap();

    let campaign = store.get("abc123").await.unwrap().unwrap();
    assert_eq!(campaign.links.len(), 1);
    assert_eq!(campaign.links[0].weight, 10.0);
}

#[tokio::test]
async fn test_open_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campaigns.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = FileCampaignStore::open(&path).await.err().unwrap();

    assert!(matches!(err, AppError::Internal { .. }));
}

#[tokio::test]
async fn test_failed_write_leaves_campaign_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    std::fs::create_dir(&data_dir).unwrap();

    let store = FileCampaignStore::open(data_dir.join("campaigns.json"))
        .await
        .unwrap();
    store
        .create(Campaign::new("stay01", "Stay", "MA"))
        .await
        .unwrap();

    std::fs::remove_dir_all(&data_dir).unwrap();

    let err = store
        .add_link("stay01", Link::new("https://a.example.com", 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Internal { .. }));

    let campaign = store.get("stay01").await.unwrap().unwrap();
    assert!(campaign.links.is_empty());
    assert!(!store.health_check().await);
}
