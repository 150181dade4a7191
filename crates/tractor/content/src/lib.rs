//! Data-driven tractor configuration.
//!
//! This crate reads [`TractorConfig`](tractor_core::TractorConfig) files for
//! hosts. Three formats are accepted, chosen by file extension:
//! - TOML (`.toml`), the format shipped with the mod
//! - RON (`.ron`)
//! - JSON (`.json`), as written by generic config menus
//!
//! Every field is optional; anything left out keeps its built-in default.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigFormat, ConfigLoader, LoadResult};
