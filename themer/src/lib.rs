//! File-based theme engine built around a cached template-hierarchy
//! resolver.
//!
//! A request is classified into exactly one rendering context, the context
//! maps to an ordered candidate list of theme-relative template paths, and
//! the first candidate that exists on disk wins. Resolutions are memoized
//! per process and, outside development, persisted across processes. The
//! architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (classification, hierarchy
//!   construction, validation). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, caches, discovery,
//!   scaffolding). Isolated to enable fixture-based tests.
//!
//! Orchestration modules ([`resolve`], [`render`]) coordinate core logic
//! with I/O to implement CLI commands and the preview server.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod render;
pub mod resolve;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
