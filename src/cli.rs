//! Command-line interface parsing for Hostwatch
//!
//! This module defines the clap command tree. One-shot subcommands read
//! through the cache and print plain-text tables; `watch` keeps the process
//! alive with the background refresh scheduler running.

use clap::{Parser, Subcommand};

/// Hostwatch - watch VPS region inventory and product pricing
#[derive(Parser, Debug)]
#[command(name = "hostwatch")]
#[command(about = "VPS region inventory and pricing, cached and refreshed in the background")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the provider's regions
    Regions {
        /// Include regions that are not publicly listed
        #[arg(long)]
        all: bool,
    },
    /// List products for one region
    Products {
        /// Region identifier (see `hostwatch regions`)
        region_id: String,
        /// Only show products currently in stock
        #[arg(long)]
        in_stock: bool,
    },
    /// Show the cache status snapshot
    Status,
    /// Force a full refresh, then show the cache status
    Refresh,
    /// Run the background refresh scheduler until interrupted
    Watch,
}
