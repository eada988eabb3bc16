//! Config file loading and environment selection

use std::fs;
use std::path::{Path, PathBuf};

use super::resolve::resolve_profile;
use crate::domain::{ConfigHolder, EnvHolder};
use crate::error::{join_names, ProfileError, Result};
use crate::providers::ProviderRegistry;
use crate::render::print_dump;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Environment selected when `--env` is not given.
pub const DEFAULT_ENV: &str = "default";

/// Load the config file named by `filled` and resolve it against the flags.
///
/// A missing config file or a missing environment is only an error when the
/// user asked for it explicitly; otherwise `filled` is returned unchanged.
/// On success the provider blocks of the selected environment have been
/// merged into `registry`.
pub fn load_env_config(filled: &EnvHolder, registry: &mut ProviderRegistry) -> Result<EnvHolder> {
    let debug = filled.global_flags.debug;
    let mut defaulted = filled.clone();

    let config_provided = !filled.global_flags.config.is_empty();
    if !config_provided {
        defaulted.global_flags.config = DEFAULT_CONFIG_PATH.to_string();
    }
    let config_path = PathBuf::from(&defaulted.global_flags.config);

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(source) => {
            if config_provided {
                return Err(ProfileError::ConfigAccess { path: config_path, source });
            }
            tracing::debug!(
                "No config file at {} ({}), using command line flags only",
                config_path.display(),
                source
            );
            return Ok(filled.clone());
        }
    };

    let mut config = parse_config(&content, &config_path)?;
    tracing::debug!("Loaded {} environment(s) from {}", config.len(), config_path.display());

    if debug {
        print_dump("Original config file used:", &config)?;
    }

    let env_provided = !filled.global_flags.env.is_empty();
    if !env_provided {
        defaulted.global_flags.env = DEFAULT_ENV.to_string();
    }
    let env_name = defaulted.global_flags.env.clone();

    let Some(profile) = config.remove(&env_name) else {
        if env_provided {
            return Err(ProfileError::EnvNotFound {
                name: env_name,
                available: join_names(config.keys()),
            });
        }
        tracing::warn!(
            "Env not provided and no '{}' env in {}, ignoring config file",
            DEFAULT_ENV,
            config_path.display()
        );
        return Ok(filled.clone());
    };

    resolve_profile(profile, &defaulted, registry)
}

/// Parse config file contents into the environment map.
///
/// `.toml` files are parsed as TOML, everything else as YAML. An empty file
/// holds no environments.
pub fn parse_config(content: &str, config_file: &Path) -> Result<ConfigHolder> {
    if content.trim().is_empty() {
        return Ok(ConfigHolder::new());
    }

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    match ext.as_str() {
        "toml" => toml::from_str(content).map_err(|e| ProfileError::Parse {
            path: config_file.to_path_buf(),
            detail: e.to_string(),
        }),
        "yaml" | "yml" | "" => parse_yaml(content, config_file),
        other => {
            tracing::warn!(
                "Unrecognized config extension '.{}' for {}, parsing as YAML",
                other,
                config_file.display()
            );
            parse_yaml(content, config_file)
        }
    }
}

fn parse_yaml(content: &str, config_file: &Path) -> Result<ConfigHolder> {
    serde_yaml::from_str(content).map_err(|e| ProfileError::Parse {
        path: config_file.to_path_buf(),
        detail: e.to_string(),
    })
}
