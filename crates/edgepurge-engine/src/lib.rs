//! edgepurge Engine - purge client and orchestration
//!
//! Provides the batched CDN purge client and the `sync` command that wires
//! fingerprinting, change detection, URL building, purging and manifest
//! persistence together.

pub mod commands;
pub mod purge;
