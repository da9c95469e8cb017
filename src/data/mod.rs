//! Core data models for Hostwatch
//!
//! This module contains the data types used throughout the application for
//! representing the hosting provider's regions and purchasable VPS products.
//! Every field arrives from the upstream API as a string (including numeric
//! values like stock counts), so the model keeps them string-typed and offers
//! small helpers where an interpretation is needed.

pub mod client;

pub use client::{FetchError, InventorySource, UpstreamClient};

use serde::{Deserialize, Serialize};

/// A datacenter/location grouping used to partition product listings
///
/// Regions are immutable once fetched; a refresh replaces the whole list.
/// Wire field names are preserved via serde renames so records round-trip
/// exactly as the provider sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    /// Unique region identifier, used as the product cache key
    #[serde(rename = "pgid")]
    pub id: String,
    /// Human-readable region name
    #[serde(rename = "pgname")]
    pub name: String,
    /// Free-form description text
    #[serde(rename = "pgdes")]
    pub description: String,
    /// Visibility flag ("1" when publicly listed)
    #[serde(rename = "pgpublic")]
    pub public: String,
}

impl Region {
    /// Returns true if the region is publicly visible
    pub fn is_public(&self) -> bool {
        self.public == "1"
    }
}

/// Pricing block for a product: price list, payment method and billing cycles
///
/// `prices` and `cycles` are comma-delimited lists that line up positionally,
/// e.g. prices "30,81,162" for cycles "1,3,6". See [`crate::format`] for the
/// presentation helpers that split them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPrice {
    /// Comma-delimited price list, one entry per billing cycle
    #[serde(rename = "cprice")]
    pub prices: String,
    /// One-time setup fee
    #[serde(rename = "onetime")]
    pub setup_fee: String,
    /// Payment method code ("pmothod" is the upstream API's own spelling)
    #[serde(rename = "pmothod")]
    pub payment_method: String,
    /// Comma-delimited billing cycle list, in months
    #[serde(rename = "cycle")]
    pub cycles: String,
}

/// Hardware and service configuration of a product
///
/// All values are string-typed as delivered by the upstream API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// CPU core count
    pub cpu: String,
    /// Memory size in MB
    pub mem: String,
    /// Disk size in GB
    pub hdd: String,
    /// Disk IOPS limit
    pub iops: String,
    /// CPU shares weight
    pub cpushares: String,
    /// CPU quota percentage
    pub cpuquota: String,
    /// Inter-process communication flag
    pub ipc: String,
    /// Datacenter area code
    pub area: String,
    /// Disk throughput tuning
    pub iotune: String,
    /// Block IO weight
    pub blkweight: String,
    /// Download bandwidth in Mbps
    pub netdownbandwidth: String,
    /// Upload bandwidth in Mbps
    pub netupbandwidth: String,
    /// Monthly traffic allowance
    pub plantraffic: String,
    /// Included snapshot slots
    pub snapshot: String,
    /// Included full-backup slots
    pub full_backup: String,
    /// Allowed operating system list
    pub allowos: String,
    /// Virtualization service name
    #[serde(rename = "serviceName")]
    pub service_name: String,
}

/// Per-resource upgrade pricing table
///
/// Each resource carries a unit price, a purchase step and a maximum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradePricing {
    pub cpu_price: String,
    pub cpu_step: String,
    pub cpu_max: String,
    pub ram_price: String,
    pub ram_step: String,
    pub ram_max: String,
    pub disk_price: String,
    pub disk_step: String,
    pub disk_max: String,
    pub bw_price: String,
    pub bw_step: String,
    pub bw_max: String,
    pub port_price: String,
    pub port_step: String,
    pub port_max: String,
    pub ip: String,
    pub ip_max: String,
    pub snapshot_price: String,
    pub snapshot_max: String,
    pub full_backup_price: String,
    pub full_backup_max: String,
}

/// Sales/service configuration block of a product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Out-of-stock note shown when inventory is exhausted
    #[serde(rename = "nastock")]
    pub stock_note: String,
    /// Per-account purchase limit
    #[serde(rename = "buylimit")]
    pub buy_limit: String,
    /// Optional pricing note
    #[serde(rename = "pricedes")]
    pub price_note: Option<String>,
    /// Service status code
    #[serde(rename = "servicestatus")]
    pub status: String,
    /// Trial period in hours
    pub trial_hours: String,
    /// Optional usage notice ("comsume_notice" is the upstream spelling)
    #[serde(rename = "comsume_notice")]
    pub usage_notice: Option<String>,
    /// Referral commission rate
    #[serde(rename = "referralrate")]
    pub referral_rate: String,
    /// Billing time cycle code
    pub time_cycle: String,
}

/// A purchasable virtual-server configuration
///
/// Products are grouped by their owning region and replaced wholesale whenever
/// that region's listing is refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Unique product identifier
    #[serde(rename = "pid")]
    pub id: String,
    /// Identifier of the owning region
    #[serde(rename = "pgid")]
    pub region_id: String,
    /// Human-readable product name
    #[serde(rename = "pname")]
    pub name: String,
    /// Stock count as a string-encoded integer
    #[serde(rename = "pstock")]
    pub stock: String,
    /// Free-form description text
    #[serde(rename = "pdes")]
    pub description: String,
    /// Hidden flag ("1" when not publicly listed)
    #[serde(rename = "phidden")]
    pub hidden: String,
    /// Pricing block
    #[serde(rename = "pprice")]
    pub price: ProductPrice,
    /// Hardware/service configuration block
    #[serde(rename = "pconfig")]
    pub config: HardwareConfig,
    /// Upgrade-option pricing tables
    #[serde(rename = "pupgrade")]
    pub upgrade: UpgradePricing,
    /// Sales/service configuration block
    #[serde(rename = "psconfig")]
    pub service: ServiceConfig,
}

impl Product {
    /// Returns true if the stock count parses to a positive integer
    pub fn in_stock(&self) -> bool {
        self.stock.parse::<i64>().map(|n| n > 0).unwrap_or(false)
    }

    /// Returns true if the product is hidden from public listings
    pub fn is_hidden(&self) -> bool {
        self.hidden == "1"
    }
}
