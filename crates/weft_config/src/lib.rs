//! Parsing and validation of `weft.toml` fabric descriptions.
//!
//! A fabric description carries the circuit model catalog (pass gates, gates
//! and multiplexer models with their ports), the list of multiplexer sizes the
//! fabric actually uses, the configuration memory organization, and output
//! settings. This crate produces a strongly-typed [`FabricConfig`] and resolves
//! cross references between its sections.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{resolve_mux_usages, ResolvedMux};
pub use types::*;
