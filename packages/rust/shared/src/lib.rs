//! Shared types, error model, and configuration for vaultsite.
//!
//! This crate is the foundation depended on by all other vaultsite crates.
//! It provides:
//! - [`VaultSiteError`] — the unified error type
//! - Domain types ([`Work`], [`Location`])
//! - Configuration ([`AppConfig`], [`SearchQuery`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, MAX_PER_PAGE, OpenAlexConfig, SearchQuery, SiteConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, VaultSiteError};
pub use types::{DOI_URL_PREFIX, Location, Work};
