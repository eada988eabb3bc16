//! Configuration loading and profile resolution
//!
//! Combines the configuration file, per-provider blocks and command-line
//! flags with proper precedence (CLI > provider block > File > Defaults).

pub mod loader;
pub mod merge;
pub mod resolve;

pub use loader::{load_env_config, parse_config, DEFAULT_CONFIG_PATH, DEFAULT_ENV};
pub use resolve::{merge_flag_groups, merge_providers, resolve_profile};
