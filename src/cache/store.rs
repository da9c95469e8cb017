//! Cache table holding the provider's region and product listings
//!
//! Provides a `CacheTable` that keeps one timestamped entry for the region
//! list and one per region for product listings. Staleness is decided at read
//! time against a fixed TTL; entries are replaced wholesale, payload and
//! timestamp together, never patched in place.
//!
//! An entry with an empty payload is never considered valid, regardless of
//! age. A degraded upstream fetch therefore leaves the cache in a state where
//! the next read tries again, instead of serving an empty listing until the
//! TTL runs out.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::data::{Product, Region};

/// A cached payload paired with the time it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached records
    pub payload: Vec<T>,
    /// When the payload was fetched from upstream
    pub fetched_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Creates an entry from a payload and its fetch time
    pub fn new(payload: Vec<T>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            fetched_at,
        }
    }
}

/// Read-only snapshot of the cache contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    /// Number of cached regions
    pub regions_count: usize,
    /// Number of regions with a cached product listing
    pub products_count: usize,
    /// Timestamp of the last region refresh
    pub last_updated: DateTime<Utc>,
}

/// In-memory cache table for regions and per-region product listings
///
/// The table itself is not synchronized; the owning facade wraps it in a lock
/// and guarantees that readers observe either the old or the new entry in
/// full.
#[derive(Debug)]
pub struct CacheTable {
    /// Staleness window applied to every entry
    ttl: Duration,
    /// Singleton entry for the region list, absent until first populated
    regions: Option<CacheEntry<Region>>,
    /// Product entries keyed by region id, created lazily on first access
    products: HashMap<String, CacheEntry<Product>>,
}

impl CacheTable {
    /// Creates an empty cache table with the given TTL
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
            regions: None,
            products: HashMap::new(),
        }
    }

    /// Decides whether an entry may be served at time `now`
    ///
    /// Valid means: non-empty payload and younger than the TTL. An empty
    /// payload is invalid at any age, including age zero.
    pub fn is_valid<T>(&self, entry: &CacheEntry<T>, now: DateTime<Utc>) -> bool {
        !entry.payload.is_empty() && now.signed_duration_since(entry.fetched_at) < self.ttl
    }

    /// Returns the region entry, fresh or stale
    pub fn regions(&self) -> Option<&CacheEntry<Region>> {
        self.regions.as_ref()
    }

    /// Returns the cached region list if it is valid at time `now`
    pub fn valid_regions(&self, now: DateTime<Utc>) -> Option<&[Region]> {
        self.regions
            .as_ref()
            .filter(|entry| self.is_valid(entry, now))
            .map(|entry| entry.payload.as_slice())
    }

    /// Returns the product entry for a region, fresh or stale
    pub fn products(&self, region_id: &str) -> Option<&CacheEntry<Product>> {
        self.products.get(region_id)
    }

    /// Returns a region's cached product list if it is valid at time `now`
    pub fn valid_products(&self, region_id: &str, now: DateTime<Utc>) -> Option<&[Product]> {
        self.products
            .get(region_id)
            .filter(|entry| self.is_valid(entry, now))
            .map(|entry| entry.payload.as_slice())
    }

    /// Replaces the region entry wholesale
    pub fn put_regions(&mut self, payload: Vec<Region>, now: DateTime<Utc>) {
        self.regions = Some(CacheEntry::new(payload, now));
    }

    /// Replaces a region's product entry wholesale
    pub fn put_products(&mut self, region_id: &str, payload: Vec<Product>, now: DateTime<Utc>) {
        self.products
            .insert(region_id.to_string(), CacheEntry::new(payload, now));
    }

    /// Returns the ids of the currently cached regions, in listing order
    pub fn region_ids(&self) -> Vec<String> {
        self.regions
            .as_ref()
            .map(|entry| entry.payload.iter().map(|region| region.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Timestamp of the last region refresh
    ///
    /// Falls back to `now` when regions have never been populated, so a status
    /// reader never observes a missing value. This makes an unrefreshed cache
    /// look freshly updated; callers that care should check `regions_count`.
    pub fn last_update_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.regions
            .as_ref()
            .map(|entry| entry.fetched_at)
            .unwrap_or(now)
    }

    /// Read-only snapshot of region/product counts and the last update time
    pub fn status(&self, now: DateTime<Utc>) -> CacheStatus {
        CacheStatus {
            regions_count: self
                .regions
                .as_ref()
                .map(|entry| entry.payload.len())
                .unwrap_or(0),
            products_count: self.products.len(),
            last_updated: self.last_update_time(now),
        }
    }
}
