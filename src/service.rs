//! Inventory service facade
//!
//! `InventoryService` is the read/refresh surface the presentation layer and
//! the refresh scheduler consume. It composes an [`InventorySource`] with the
//! [`CacheTable`] and owns all cache mutation:
//!
//! - reads go through the cache and fall back to a synchronous upstream fetch
//!   when the entry is missing or stale (read-through);
//! - refresh operations fetch unconditionally and replace the entry wholesale.
//!
//! The table sits behind a `tokio::sync::RwLock`, so readers of a valid entry
//! never block each other. Every refresh of a given key, including the
//! read-through miss path, first takes that key's async mutex; two tasks can
//! refresh different regions concurrently, but never the same key, and a herd
//! of stale readers collapses into a single upstream fetch.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::cache::{CacheStatus, CacheTable};
use crate::data::{InventorySource, Product, Region};

/// Facade over the cache table and the upstream source
pub struct InventoryService<S> {
    source: S,
    table: RwLock<CacheTable>,
    /// Serializes refreshes of the regions entry
    regions_guard: Mutex<()>,
    /// Serializes refreshes per region id
    product_guards: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: InventorySource> InventoryService<S> {
    /// Creates a service with an empty cache and the given entry TTL
    pub fn new(source: S, cache_ttl: Duration) -> Self {
        Self {
            source,
            table: RwLock::new(CacheTable::new(cache_ttl)),
            regions_guard: Mutex::new(()),
            product_guards: StdMutex::new(HashMap::new()),
        }
    }

    /// Returns the region list, fetching from upstream if the cached entry is
    /// missing, stale or empty
    pub async fn get_regions(&self) -> Vec<Region> {
        if let Some(regions) = self.table.read().await.valid_regions(Utc::now()) {
            return regions.to_vec();
        }

        let _guard = self.regions_guard.lock().await;

        // Another task may have refreshed while we waited on the guard
        if let Some(regions) = self.table.read().await.valid_regions(Utc::now()) {
            return regions.to_vec();
        }

        debug!("region cache invalid, fetching from upstream");
        let payload = self.source.fetch_regions().await;
        self.table
            .write()
            .await
            .put_regions(payload.clone(), Utc::now());
        payload
    }

    /// Returns a region's product list, fetching from upstream if the cached
    /// entry is missing, stale or empty
    pub async fn get_products(&self, region_id: &str) -> Vec<Product> {
        if let Some(products) = self.table.read().await.valid_products(region_id, Utc::now()) {
            return products.to_vec();
        }

        let guard = self.product_guard(region_id);
        let _guard = guard.lock().await;

        if let Some(products) = self.table.read().await.valid_products(region_id, Utc::now()) {
            return products.to_vec();
        }

        debug!("product cache invalid for region {region_id}, fetching from upstream");
        let payload = self.source.fetch_products(region_id).await;
        self.table
            .write()
            .await
            .put_products(region_id, payload.clone(), Utc::now());
        payload
    }

    /// Unconditionally re-fetches the region list and replaces the entry
    ///
    /// Returns the number of regions fetched; zero means the fetch degraded
    /// and the entry was left invalid.
    pub async fn refresh_regions(&self) -> usize {
        let _guard = self.regions_guard.lock().await;

        let payload = self.source.fetch_regions().await;
        let count = payload.len();
        self.table.write().await.put_regions(payload, Utc::now());
        count
    }

    /// Unconditionally re-fetches one region's products and replaces the entry
    ///
    /// Returns the number of products fetched; zero means the fetch degraded
    /// and the entry was left invalid.
    pub async fn refresh_products(&self, region_id: &str) -> usize {
        let guard = self.product_guard(region_id);
        let _guard = guard.lock().await;

        let payload = self.source.fetch_products(region_id).await;
        let count = payload.len();
        self.table
            .write()
            .await
            .put_products(region_id, payload, Utc::now());
        count
    }

    /// Refreshes regions, then the products of every currently cached region,
    /// sequentially and without inter-request pacing
    ///
    /// This is the burstier manual/startup path; the scheduler's product cycle
    /// is the paced one. Only regions already present in the cache after the
    /// region refresh are covered.
    pub async fn refresh_all(&self) {
        self.refresh_regions().await;

        let region_ids = self.cached_region_ids().await;
        for region_id in region_ids {
            self.refresh_products(&region_id).await;
        }
    }

    /// Ids of the regions currently present in the cache, in listing order
    pub async fn cached_region_ids(&self) -> Vec<String> {
        self.table.read().await.region_ids()
    }

    /// Timestamp of the last region refresh (now if never refreshed)
    pub async fn last_update_time(&self) -> DateTime<Utc> {
        self.table.read().await.last_update_time(Utc::now())
    }

    /// Read-only snapshot of cache counts and the last update time
    pub async fn cache_status(&self) -> CacheStatus {
        self.table.read().await.status(Utc::now())
    }

    /// Returns the per-region refresh guard, creating it on first use
    fn product_guard(&self, region_id: &str) -> Arc<Mutex<()>> {
        let mut guards = self
            .product_guards
            .lock()
            .expect("product guard map should not be poisoned");
        guards.entry(region_id.to_string()).or_default().clone()
    }
}
