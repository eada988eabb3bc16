//! launchpad: resolve deployment profiles
//!
//! A profile is assembled from a configuration file organised by named
//! environments, per-provider blocks inside the selected environment, and the
//! command-line flags of the current invocation. Flags set on the command
//! line win over the file, provider blocks layer onto the registry defaults.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod providers;
pub mod render;
pub mod utils;

pub use config::load_env_config;
pub use domain::{ConfigHolder, EnvHolder};
pub use error::ProfileError;
pub use providers::ProviderRegistry;
