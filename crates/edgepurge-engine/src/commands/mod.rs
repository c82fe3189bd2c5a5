//! Command orchestration layer.
//!
//! Provides high-level command functions that coordinate between
//! core domain logic, the purge client and the manifest store.

pub mod sync;
