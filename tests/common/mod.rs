#![allow(dead_code)]

pub mod contract;

use axum::extract::ConnectInfo;
use axum_test::TestServer;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use traffic_splitter::domain::entities::{Campaign, Link};
use traffic_splitter::domain::repositories::CampaignStore;
use traffic_splitter::infrastructure::persistence::InMemoryCampaignStore;
use traffic_splitter::routes;
use traffic_splitter::state::AppState;

/// State backed by a fresh in-memory store; the store is returned for direct seeding.
pub fn create_test_state() -> (AppState, Arc<InMemoryCampaignStore>) {
    let store = Arc::new(InMemoryCampaignStore::new());
    let state = AppState::new(store.clone());
    (state, store)
}

/// Server over every route, without rate limiting.
pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(routes::router(state)).unwrap()
}

pub async fn seed_campaign(
    store: &InMemoryCampaignStore,
    id: &str,
    links: &[(&str, f64)],
) -> Campaign {
    store
        .create(Campaign::new(id, "Test campaign", "MA"))
        .await
        .unwrap();

    for (url, weight) in links {
        store.add_link(id, Link::new(*url, *weight)).await.unwrap();
    }

    store.get(id).await.unwrap().unwrap()
}

/// Inserts a fixed peer address so `PeerIpKeyExtractor` works without a socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
