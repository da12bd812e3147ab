//! Behaviour every `CampaignStore` backend must share.

use std::sync::Arc;
use traffic_splitter::domain::entities::{Campaign, CampaignPatch, Link};
use traffic_splitter::domain::repositories::CampaignStore;
use traffic_splitter::error::AppError;

pub async fn create_get_list(store: &dyn CampaignStore) {
    let created = store
        .create(Campaign::new("c-one", "One", "MA"))
        .await
        .unwrap();
    assert!(created.links.is_empty());

    store.create(Campaign::new("c-two", "Two", "FR")).await.unwrap();

    let fetched = store.get("c-one").await.unwrap().unwrap();
    assert_eq!(fetched.name, "One");
    assert_eq!(fetched.country, "MA");

    assert!(store.get("missing").await.unwrap().is_none());

    let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"c-one".to_string()));
    assert!(ids.contains(&"c-two".to_string()));
}

pub async fn duplicate_create_conflicts(store: &dyn CampaignStore) {
    store.create(Campaign::new("dup", "First", "MA")).await.unwrap();

    let err = store
        .create(Campaign::new("dup", "Second", "MA"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    assert_eq!(store.get("dup").await.unwrap().unwrap().name, "First");
}

pub async fn links_keep_insertion_order(store: &dyn CampaignStore) {
    store.create(Campaign::new("ord", "Order", "MA")).await.unwrap();

    for (url, weight) in [
        ("https://www.google.com", 10.0),
        ("https://www.bing.com", 20.0),
        ("https://duckduckgo.com", 70.0),
    ] {
        store.add_link("ord", Link::new(url, weight)).await.unwrap();
    }

    let campaign = store.get("ord").await.unwrap().unwrap();
    let urls: Vec<&str> = campaign.links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://www.google.com", "https://www.bing.com", "https://duckduckgo.com"]
    );
    assert_eq!(campaign.total_weight(), 100.0);
}

pub async fn update_keeps_links(store: &dyn CampaignStore) {
    store.create(Campaign::new("upd", "Old", "MA")).await.unwrap();
    store
        .add_link("upd", Link::new("https://a.example.com", 1.0))
        .await
        .unwrap();

    let updated = store
        .update(
            "upd",
            CampaignPatch {
                name: Some("New".to_string()),
                country: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "New");
    assert_eq!(updated.country, "MA");
    assert_eq!(updated.links.len(), 1);
    assert_eq!(store.get("upd").await.unwrap().unwrap(), updated);
}

pub async fn missing_ids_are_not_found(store: &dyn CampaignStore) {
    let err = store
        .add_link("ghost", Link::new("https://a.example.com", 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let err = store
        .update("ghost", CampaignPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let err = store.delete("ghost").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

pub async fn delete_then_get(store: &dyn CampaignStore) {
    store.create(Campaign::new("gone", "Gone", "MA")).await.unwrap();

    store.delete("gone").await.unwrap();

    assert!(store.get("gone").await.unwrap().is_none());
    assert!(store.list().await.unwrap().iter().all(|c| c.id != "gone"));
}

/// `n` concurrent `add_link` calls on one id must leave exactly `n` links.
pub async fn concurrent_add_link(store: Arc<dyn CampaignStore>, n: usize) {
    store.create(Campaign::new("race", "Race", "MA")).await.unwrap();
    store.create(Campaign::new("other", "Other", "MA")).await.unwrap();

    let mut handles = Vec::with_capacity(n + 1);
    for i in 0..n {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .add_link("race", Link::new(format!("https://l{i}.example.com"), 1.0))
                .await
                .unwrap();
        }));
    }
    let other = store.clone();
    handles.push(tokio::spawn(async move {
        other
            .update(
                "other",
                CampaignPatch {
                    name: None,
                    country: Some("ES".to_string()),
                },
            )
            .await
            .unwrap();
    }));

    for handle in handles {
        handle.await.unwrap();
    }

    let campaign = store.get("race").await.unwrap().unwrap();
    assert_eq!(campaign.links.len(), n);

    let mut urls: Vec<&str> = campaign.links.iter().map(|l| l.url.as_str()).collect();
    urls.sort_unstable();
    urls.dedup();
    assert_eq!(urls.len(), n);

    assert_eq!(store.get("other").await.unwrap().unwrap().country, "ES");
}
