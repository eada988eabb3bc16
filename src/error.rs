//! Typed failures of profile resolution

use std::path::PathBuf;

use crate::config::merge::MergeError;

/// Everything that can go wrong while loading and resolving a profile.
///
/// The caller keeps ownership of the flag profile it passed in, so on any of
/// these errors it still holds the original, unmerged profile.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Failed reading config file {}: {source}", path.display())]
    ConfigAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {detail}", path.display())]
    Parse { path: PathBuf, detail: String },

    #[error("Environment '{name}' does not exist in the config file (available: {available})")]
    EnvNotFound { name: String, available: String },

    #[error("Unknown provider '{name}' in config file (known providers: {available})")]
    UnknownProvider { name: String, available: String },

    #[error("Invalid settings for provider '{provider}': {source}")]
    ProviderBlock {
        provider: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed serializing {what}: {source}")]
    Serialize {
        what: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed merging {what}: {source}")]
    Merge {
        what: String,
        #[source]
        source: MergeError,
    },

    #[error("Unexpected internal failure: {message}")]
    Panic { message: String },
}

pub type Result<T> = std::result::Result<T, ProfileError>;

/// Join names for error messages, using `(none)` for an empty list.
pub(crate) fn join_names<'a>(names: impl Iterator<Item = &'a String>) -> String {
    let joined = names.map(String::as_str).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_not_found_lists_available_environments() {
        let names = ["default".to_string(), "prod".to_string()];
        let err = ProfileError::EnvNotFound {
            name: "staging".to_string(),
            available: join_names(names.iter()),
        };
        let message = err.to_string();
        assert!(message.contains("'staging'"));
        assert!(message.contains("default, prod"));
    }

    #[test]
    fn test_join_names_handles_empty() {
        assert_eq!(join_names(std::iter::empty()), "(none)");
    }
}
