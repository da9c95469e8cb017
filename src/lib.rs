//! Hostwatch Library
//!
//! Cache-and-refresh core for watching a hosting provider's VPS inventory:
//! an upstream API client, an in-memory TTL cache, the read-through service
//! facade, and the background refresh scheduler. The binary in `main.rs` is a
//! thin CLI over [`service::InventoryService`].

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod format;
pub mod refresh;
pub mod service;
