//! Hostwatch - watch VPS region inventory and product pricing
//!
//! A CLI tool that polls a hosting provider's inventory/pricing API, keeps the
//! listings in an in-memory TTL cache, and refreshes them in the background.
//! One-shot subcommands answer from the cache (fetching on miss); `watch`
//! keeps the refresh scheduler running until interrupted.

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hostwatch::cache::CacheStatus;
use hostwatch::cli::{Cli, Command};
use hostwatch::config::Config;
use hostwatch::data::{Product, Region, UpstreamClient};
use hostwatch::format::format_price_table;
use hostwatch::refresh::{self, RefreshConfig};
use hostwatch::service::InventoryService;

#[tokio::main]
async fn main() {
    // Default to info-level logs for this crate; RUST_LOG overrides
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    config.warn_if_incomplete();

    let client = UpstreamClient::from_config(&config);
    let service = Arc::new(InventoryService::new(client, config.cache_ttl));

    match cli.command {
        Command::Regions { all } => {
            let regions = service.get_regions().await;
            print_regions(&regions, all);
        }
        Command::Products {
            region_id,
            in_stock,
        } => {
            let products = service.get_products(&region_id).await;
            print_products(&products, in_stock);
        }
        Command::Status => {
            print_status(&service.cache_status().await);
        }
        Command::Refresh => {
            service.refresh_all().await;
            print_status(&service.cache_status().await);
        }
        Command::Watch => {
            run_watch(service, &config).await;
        }
    }
}

/// Runs the background refresh scheduler until Ctrl+C or SIGTERM
async fn run_watch(service: Arc<InventoryService<UpstreamClient>>, config: &Config) {
    let handle = match refresh::init(service, RefreshConfig::from_config(config)) {
        Some(handle) => handle,
        None => {
            // Only possible if something already initialized the scheduler
            info!("refresh scheduler already running");
            return;
        }
    };

    shutdown_signal().await;
    handle.shutdown();
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("received SIGTERM, shutting down");
        }
    }
}

/// Prints the region listing as a plain-text table
fn print_regions(regions: &[Region], include_hidden: bool) {
    if regions.is_empty() {
        println!("No regions available (upstream unreachable or cookie expired?)");
        return;
    }

    println!("{:<8} {:<28} {:<8} DESCRIPTION", "ID", "NAME", "PUBLIC");
    for region in regions {
        if !include_hidden && !region.is_public() {
            continue;
        }
        println!(
            "{:<8} {:<28} {:<8} {}",
            region.id,
            region.name,
            if region.is_public() { "yes" } else { "no" },
            region.description
        );
    }
}

/// Prints one region's product listing as a plain-text table
fn print_products(products: &[Product], in_stock_only: bool) {
    if products.is_empty() {
        println!("No products available for this region");
        return;
    }

    println!(
        "{:<8} {:<28} {:<7} {:<5} {:<8} {:<7} PRICING",
        "ID", "NAME", "STOCK", "CPU", "MEM", "DISK"
    );
    for product in products {
        if in_stock_only && !product.in_stock() {
            continue;
        }
        println!(
            "{:<8} {:<28} {:<7} {:<5} {:<8} {:<7} {}",
            product.id,
            product.name,
            product.stock,
            product.config.cpu,
            product.config.mem,
            product.config.hdd,
            format_price_table(&product.price.prices, &product.price.cycles).join(", ")
        );
    }
}

/// Prints the cache status snapshot
fn print_status(status: &CacheStatus) {
    println!("Regions cached:          {}", status.regions_count);
    println!("Product listings cached: {}", status.products_count);
    println!(
        "Last updated:            {}",
        status.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
