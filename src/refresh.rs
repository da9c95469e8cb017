//! Background refresh scheduler
//!
//! Drives the two periodic refresh cycles against a shared
//! [`InventoryService`]:
//!
//! - the **region cycle** re-fetches the region list unconditionally on a
//!   fixed interval;
//! - the **product cycle** walks the current region list and refreshes each
//!   region's products one at a time, pausing a fixed pacing delay between
//!   regions. Sequencing plus pacing keeps the request pattern below the
//!   provider's rate-limiting/anti-bot thresholds and is a hard constraint,
//!   not an optimization.
//!
//! On startup one full refresh is kicked off asynchronously so the cache warms
//! without blocking initialization. An mpsc command channel accepts on-demand
//! full refreshes with the same pacing as the product cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::data::InventorySource;
use crate::service::InventoryService;

/// Process-wide initialization flag for [`init`].
///
/// Lifecycle: false at process start, set true by the first successful `init`
/// call, never reset except by process restart. Repeated `init` calls are
/// no-ops so embedding layers may call it opportunistically.
static SCHEDULER_STARTED: AtomicBool = AtomicBool::new(false);

/// Timing parameters for the refresh cycles
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval of the region refresh cycle
    pub region_interval: Duration,
    /// Interval of the product refresh cycle
    pub product_interval: Duration,
    /// Delay between consecutive per-region product fetches
    pub pacing_delay: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            region_interval: Duration::from_secs(600), // 10 minutes
            product_interval: Duration::from_secs(300), // 5 minutes
            pacing_delay: Duration::from_millis(500),
        }
    }
}

impl RefreshConfig {
    /// Extracts the scheduler timing parameters from the app configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            region_interval: config.region_interval,
            product_interval: config.product_interval,
            pacing_delay: config.pacing_delay,
        }
    }
}

/// Handle controlling the background refresh tasks
pub struct RefreshHandle {
    /// Channel for requesting an on-demand full refresh
    refresh_tx: mpsc::Sender<()>,
    /// Spawned cycle tasks, aborted on shutdown
    tasks: Vec<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Spawns the refresh cycles against the given service
    ///
    /// Unlike [`init`] this performs no once-per-process bookkeeping; tests
    /// use it directly to drive schedulers with millisecond intervals.
    pub fn spawn<S>(service: Arc<InventoryService<S>>, config: RefreshConfig) -> Self
    where
        S: InventorySource + 'static,
    {
        let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);
        let mut tasks = Vec::new();

        // Warm the cache once, asynchronously, without pacing
        {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                info!("startup refresh starting");
                service.refresh_all().await;
                let status = service.cache_status().await;
                info!(
                    "startup refresh complete: {} regions, {} product listings",
                    status.regions_count, status.products_count
                );
            });
        }

        // Region cycle
        {
            let service = Arc::clone(&service);
            let interval = config.region_interval;
            tasks.push(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                // Skip the immediate first tick; the startup refresh covers it
                ticker.tick().await;

                loop {
                    ticker.tick().await;
                    info!("region cycle: refreshing region list");
                    let count = service.refresh_regions().await;
                    if count == 0 {
                        warn!("region cycle: refresh returned no regions");
                    } else {
                        info!("region cycle: refreshed {count} regions");
                    }
                }
            }));
        }

        // Product cycle
        {
            let service = Arc::clone(&service);
            let interval = config.product_interval;
            let pacing = config.pacing_delay;
            tasks.push(tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.tick().await;

                loop {
                    ticker.tick().await;
                    product_cycle(&service, pacing).await;
                }
            }));
        }

        // On-demand full refresh, same pacing as the product cycle
        {
            let service = Arc::clone(&service);
            let pacing = config.pacing_delay;
            tasks.push(tokio::spawn(async move {
                while refresh_rx.recv().await.is_some() {
                    info!("on-demand full refresh requested");
                    let count = service.refresh_regions().await;
                    if count == 0 {
                        warn!("on-demand refresh: region fetch returned nothing");
                    }
                    let region_ids = service.cached_region_ids().await;
                    for region_id in region_ids {
                        let count = service.refresh_products(&region_id).await;
                        if count == 0 {
                            warn!("on-demand refresh: no products for region {region_id}");
                        }
                        tokio::time::sleep(pacing).await;
                    }
                    info!("on-demand full refresh complete");
                }
            }));
        }

        Self { refresh_tx, tasks }
    }

    /// Requests an on-demand full refresh
    ///
    /// Returns false if a request is already queued; the pending pass covers
    /// it.
    pub fn trigger_refresh(&self) -> bool {
        self.refresh_tx.try_send(()).is_ok()
    }

    /// Stops all refresh cycles
    ///
    /// A refresh in flight is cancelled at its next await point; the cache
    /// keeps whatever entries were already replaced.
    pub fn shutdown(self) {
        for task in &self.tasks {
            task.abort();
        }
        info!("refresh scheduler stopped");
    }
}

/// Initializes the process-wide refresh scheduler exactly once
///
/// The first call spawns the cycles and returns the controlling handle; every
/// later call within the same process logs and returns `None` without
/// spawning anything. The guard is only reset by process restart.
pub fn init<S>(service: Arc<InventoryService<S>>, config: RefreshConfig) -> Option<RefreshHandle>
where
    S: InventorySource + 'static,
{
    if SCHEDULER_STARTED.swap(true, Ordering::SeqCst) {
        debug!("refresh scheduler already initialized; ignoring");
        return None;
    }

    info!(
        "initializing refresh scheduler: regions every {:?}, products every {:?}, pacing {:?}",
        config.region_interval, config.product_interval, config.pacing_delay
    );
    Some(RefreshHandle::spawn(service, config))
}

/// One pass of the product cycle: sequential per-region refresh with pacing
///
/// The region list is read through the cache (populating it first when
/// empty). A region whose refresh comes back empty is logged; the remaining
/// regions still get their turn.
async fn product_cycle<S: InventorySource>(service: &InventoryService<S>, pacing: Duration) {
    let regions = service.get_regions().await;
    if regions.is_empty() {
        warn!("product cycle: no regions available, nothing to refresh");
        return;
    }

    info!("product cycle: refreshing products for {} regions", regions.len());
    for region in &regions {
        let count = service.refresh_products(&region.id).await;
        if count == 0 {
            warn!(
                "product cycle: refresh for region {} ({}) returned no products",
                region.id, region.name
            );
        } else {
            debug!(
                "product cycle: refreshed {} products for region {} ({})",
                count, region.id, region.name
            );
        }

        // Keep consecutive upstream requests apart
        tokio::time::sleep(pacing).await;
    }
}
