//! Side-effecting operations: configuration, caches, discovery, scaffolding.
//!
//! Everything that touches the filesystem lives here, isolated from the
//! pure resolver core.

pub mod cache_store;
pub mod config;
pub mod init;
pub mod manifest;
pub mod scan;
