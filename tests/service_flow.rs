//! End-to-end cache flow against a scripted upstream source
//!
//! Drives the public service surface the way the CLI and scheduler do:
//! read-through, TTL expiry, degraded upstream responses, manual refresh and
//! the status snapshot, all without touching the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use hostwatch::data::{InventorySource, Product, Region};
use hostwatch::refresh::{RefreshConfig, RefreshHandle};
use hostwatch::service::InventoryService;

/// Scripted source: fixed listings, every call counted
#[derive(Default)]
struct ScriptedSource {
    regions: Vec<Region>,
    products: HashMap<String, Vec<Product>>,
    region_calls: AtomicUsize,
    product_calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    fn new(region_ids: &[&str]) -> Self {
        let regions = region_ids
            .iter()
            .map(|id| Region {
                id: id.to_string(),
                name: format!("Region {}", id),
                description: String::new(),
                public: "1".to_string(),
            })
            .collect::<Vec<_>>();

        let products = regions
            .iter()
            .map(|region| {
                (
                    region.id.clone(),
                    vec![Product {
                        id: format!("p-{}", region.id),
                        region_id: region.id.clone(),
                        name: format!("VPS in {}", region.id),
                        stock: "5".to_string(),
                        ..Product::default()
                    }],
                )
            })
            .collect();

        Self {
            regions,
            products,
            ..Self::default()
        }
    }

    fn region_calls(&self) -> usize {
        self.region_calls.load(Ordering::SeqCst)
    }

    fn product_calls(&self) -> Vec<String> {
        self.product_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InventorySource for ScriptedSource {
    async fn fetch_regions(&self) -> Vec<Region> {
        self.region_calls.fetch_add(1, Ordering::SeqCst);
        self.regions.clone()
    }

    async fn fetch_products(&self, region_id: &str) -> Vec<Product> {
        self.product_calls.lock().unwrap().push(region_id.to_string());
        self.products.get(region_id).cloned().unwrap_or_default()
    }
}

fn service(
    source: ScriptedSource,
    ttl: Duration,
) -> (Arc<ScriptedSource>, Arc<InventoryService<Arc<ScriptedSource>>>) {
    let source = Arc::new(source);
    let service = Arc::new(InventoryService::new(Arc::clone(&source), ttl));
    (source, service)
}

#[tokio::test]
async fn test_cold_cache_warm_cache_expired_cache() {
    let (source, service) = service(ScriptedSource::new(&["r1"]), Duration::from_millis(150));

    // Cold: one fetch
    let regions = service.get_regions().await;
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].id, "r1");
    assert_eq!(source.region_calls(), 1);

    // Warm: served from cache, no new fetch
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(service.get_regions().await, regions);
    assert_eq!(source.region_calls(), 1);

    // Expired: fetched again
    tokio::time::sleep(Duration::from_millis(160)).await;
    service.get_regions().await;
    assert_eq!(source.region_calls(), 2);
}

#[tokio::test]
async fn test_degraded_upstream_serves_empty_and_retries() {
    // Source with no listings at all, standing in for a failing upstream
    let (source, service) = service(ScriptedSource::default(), Duration::from_secs(300));

    assert!(service.get_regions().await.is_empty());
    assert!(service.get_products("r1").await.is_empty());

    // Empty entries are never valid, so both reads retry upstream
    service.get_regions().await;
    service.get_products("r1").await;
    assert_eq!(source.region_calls(), 2);
    assert_eq!(source.product_calls(), vec!["r1", "r1"]);
}

#[tokio::test]
async fn test_manual_refresh_all_then_status() {
    let (source, service) = service(ScriptedSource::new(&["A", "B"]), Duration::from_secs(300));

    service.refresh_all().await;

    let status = service.cache_status().await;
    assert_eq!(status.regions_count, 2);
    assert_eq!(status.products_count, 2);
    assert_eq!(source.region_calls(), 1);
    assert_eq!(source.product_calls(), vec!["A", "B"]);

    // A warm read after the refresh costs nothing
    service.get_regions().await;
    service.get_products("A").await;
    assert_eq!(source.region_calls(), 1);
    assert_eq!(source.product_calls(), vec!["A", "B"]);
}

#[tokio::test]
async fn test_scheduler_keeps_cache_fresh_end_to_end() {
    let (source, service) = service(ScriptedSource::new(&["r1", "r2"]), Duration::from_secs(300));

    let handle = RefreshHandle::spawn(
        Arc::clone(&service),
        RefreshConfig {
            region_interval: Duration::from_millis(80),
            product_interval: Duration::from_millis(60),
            pacing_delay: Duration::from_millis(1),
        },
    );

    tokio::time::sleep(Duration::from_millis(250)).await;
    handle.shutdown();

    // Startup refresh + periodic cycles ran
    assert!(source.region_calls() >= 2);
    assert!(source.product_calls().len() >= 4);

    // The presentation-facing read is served entirely from cache now
    let before = source.region_calls();
    let regions = service.get_regions().await;
    assert_eq!(regions.len(), 2);
    assert_eq!(source.region_calls(), before);
}
