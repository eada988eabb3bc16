//! Profile data model shared by the loader, resolver and CLI

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings that apply to every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalFlags {
    /// Path to the configuration file. Empty means "not requested".
    pub config: String,
    /// Print intermediate profiles while resolving.
    pub debug: bool,
    /// Environment to select from the configuration file. Empty means "not requested".
    pub env: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateFlags {
    pub domain: String,
    pub dns: String,
    pub fs: String,
    pub cdn: String,
    #[serde(rename = "no-ssl")]
    pub no_ssl: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployFlags {
    pub domain: String,
    pub root: String,
    pub files: String,
    pub dest: String,
    pub fs: String,
    #[serde(rename = "dry-run")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollbackFlags {
    pub domain: String,
    pub fs: String,
    pub version: String,
}

/// A complete profile: either built from command-line flags or read as one
/// environment of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvHolder {
    #[serde(rename = "global flags")]
    pub global_flags: GlobalFlags,
    #[serde(rename = "create flags")]
    pub create_flags: CreateFlags,
    #[serde(rename = "deploy flags")]
    pub deploy_flags: DeployFlags,
    #[serde(rename = "rollback flags")]
    pub rollback_flags: RollbackFlags,
    /// Raw per-provider blocks, keyed by provider name.
    #[serde(rename = "provider flags", skip_serializing_if = "BTreeMap::is_empty")]
    pub provider_flags: BTreeMap<String, serde_yaml::Value>,
}

/// Parsed configuration file: environment name to profile.
pub type ConfigHolder = BTreeMap<String, EnvHolder>;
