mod common;

use common::contract;
use std::sync::Arc;
use traffic_splitter::infrastructure::persistence::InMemoryCampaignStore;

#[tokio::test]
async fn test_create_get_list() {
    contract::create_get_list(&InMemoryCampaignStore::new()).await;
}

#[tokio::test]
async fn test_duplicate_create_conflicts() {
    contract::duplicate_create_conflicts(&InMemoryCampaignStore::new()).await;
}

#[tokio::test]
async fn test_links_keep_insertion_order() {
    contract::links_keep_insertion_order(&InMemoryCampaignStore::new()).await;
}

#[tokio::test]
async fn test_update_keeps_links() {
    contract::update_keeps_links(&InMemoryCampaignStore::new()).await;
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    contract::missing_ids_are_not_found(&InMemoryCampaignStore::new()).await;
}

#[tokio::test]
async fn test_delete_then_get() {
    contract::delete_then_get(&InMemoryCampaignStore::new()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_add_link() {
    contract::concurrent_add_link(Arc::new(InMemoryCampaignStore::new()), 500).await;
}
