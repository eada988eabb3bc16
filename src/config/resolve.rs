//! Profile resolution: provider blocks into the registry, CLI flags over the file

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Value;

use super::merge::{layer_value, overwrite, overwrite_value, MergeError};
use crate::domain::EnvHolder;
use crate::error::{join_names, ProfileError, Result};
use crate::providers::{ProviderRegistry, ProviderSettings};
use crate::render::print_dump;

/// Resolve the selected environment `profile` against the command-line
/// profile `filled`.
///
/// Provider blocks of `profile` are merged into `registry`, then every flag
/// group set on the command line overrides the file. Nothing in `registry`
/// changes unless the whole resolution succeeds.
pub fn resolve_profile(
    profile: EnvHolder,
    filled: &EnvHolder,
    registry: &mut ProviderRegistry,
) -> Result<EnvHolder> {
    let debug = filled.global_flags.debug;

    if debug {
        print_dump("Config file env profile used:", &profile)?;
    }

    let staged = stage_providers(&profile, registry)?;

    if debug {
        print_dump("Config file profile before merge:", &profile)?;
        print_dump("Command line flag profile (including defaults) before merge:", filled)?;
    }

    let merged = merge_flag_groups(profile, filled)?;

    for (name, settings) in staged {
        registry.replace(&name, settings);
    }

    if debug {
        print_dump("Final config file used:", &merged)?;
        let providers = registry.to_yaml().map_err(|source| ProfileError::Serialize {
            what: "provider registry".to_string(),
            source,
        })?;
        print_dump("Provider flags used:", &providers)?;
    }

    Ok(merged)
}

/// Merge every provider block of `profile` into `registry`.
///
/// Either all blocks are applied or, on the first failure, none are.
pub fn merge_providers(profile: &EnvHolder, registry: &mut ProviderRegistry) -> Result<()> {
    let staged = stage_providers(profile, registry)?;
    for (name, settings) in staged {
        registry.replace(&name, settings);
    }
    Ok(())
}

fn stage_providers(
    profile: &EnvHolder,
    registry: &ProviderRegistry,
) -> Result<Vec<(String, Box<dyn ProviderSettings>)>> {
    let mut staged = Vec::with_capacity(profile.provider_flags.len());
    for (name, block) in &profile.provider_flags {
        let current = registry.get(name).ok_or_else(|| ProfileError::UnknownProvider {
            name: name.clone(),
            available: join_names(registry.names()),
        })?;
        let updated = overlay_provider(name, current, block)?;
        tracing::debug!("Merged config block into provider '{}'", name);
        staged.push((name.clone(), updated));
    }
    Ok(staged)
}

/// Decode `block` onto a copy of `current`, then overwrite-merge that copy
/// into the canonical settings.
fn overlay_provider(
    name: &str,
    current: &dyn ProviderSettings,
    block: &Value,
) -> Result<Box<dyn ProviderSettings>> {
    let canonical = current.to_yaml().map_err(|source| ProfileError::Serialize {
        what: format!("settings of provider '{name}'"),
        source,
    })?;

    let mut seeded = canonical.clone();
    layer_value(&mut seeded, block.clone());
    let seeded = serde_yaml::to_string(&seeded).map_err(|source| ProfileError::Serialize {
        what: format!("config block of provider '{name}'"),
        source,
    })?;
    let overlay = current
        .decode(&seeded)
        .map_err(|source| ProfileError::ProviderBlock { provider: name.to_string(), source })?;
    let overlay = overlay.to_yaml().map_err(|source| ProfileError::Serialize {
        what: format!("config block of provider '{name}'"),
        source,
    })?;

    let merge_err =
        |source: MergeError| ProfileError::Merge { what: format!("provider '{name}'"), source };
    let mut merged = canonical;
    overwrite_value(&mut merged, overlay).map_err(merge_err)?;
    let merged = serde_yaml::to_string(&merged).map_err(|e| merge_err(MergeError::Encode(e)))?;
    current.decode(&merged).map_err(|e| merge_err(MergeError::Decode(e)))
}

/// Overwrite-merge the four flag groups of `filled` onto `profile`.
///
/// Provider blocks of `profile` are kept as read from the file.
pub fn merge_flag_groups(mut profile: EnvHolder, filled: &EnvHolder) -> Result<EnvHolder> {
    profile.global_flags = merge_group("global flags", &profile.global_flags, &filled.global_flags)?;
    profile.create_flags = merge_group("create flags", &profile.create_flags, &filled.create_flags)?;
    profile.deploy_flags = merge_group("deploy flags", &profile.deploy_flags, &filled.deploy_flags)?;
    profile.rollback_flags =
        merge_group("rollback flags", &profile.rollback_flags, &filled.rollback_flags)?;
    Ok(profile)
}

fn merge_group<T>(what: &str, file: &T, cli: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    overwrite(file, cli).map_err(|source| ProfileError::Merge { what: what.to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{AwsSettings, CloudflareSettings};

    fn file_profile(yaml: &str) -> EnvHolder {
        serde_yaml::from_str(yaml).expect("profile yaml")
    }

    #[test]
    fn test_provider_block_layers_onto_registry_defaults() {
        let mut registry = ProviderRegistry::builtin();
        let profile = file_profile("provider flags:\n  aws:\n    bucket: my-bucket\n");

        merge_providers(&profile, &mut registry).expect("merge");

        let aws = registry.get_as::<AwsSettings>("aws").expect("aws");
        assert_eq!(aws.region, "us-east-1");
        assert_eq!(aws.bucket, "my-bucket");
    }

    #[test]
    fn test_numeric_scalars_fill_string_provider_fields() {
        let mut registry = ProviderRegistry::builtin();
        let profile = file_profile(
            "provider flags:\n  aws:\n    bucket: 2024\n  cloudflare:\n    zone: 12345\n",
        );

        merge_providers(&profile, &mut registry).expect("merge");

        let aws = registry.get_as::<AwsSettings>("aws").expect("aws");
        assert_eq!(aws.bucket, "2024");
        assert_eq!(aws.region, "us-east-1");
        let cloudflare = registry.get_as::<CloudflareSettings>("cloudflare").expect("cf");
        assert_eq!(cloudflare.zone, "12345");
    }

    #[test]
    fn test_provider_merge_keeps_untouched_providers() {
        let mut registry = ProviderRegistry::builtin();
        registry.register(
            "cloudflare",
            CloudflareSettings { email: "ops@example.com".into(), ..Default::default() },
        );
        let profile = file_profile("provider flags:\n  aws:\n    region: eu-west-1\n");

        merge_providers(&profile, &mut registry).expect("merge");

        assert_eq!(registry.len(), 2);
        let cloudflare = registry.get_as::<CloudflareSettings>("cloudflare").expect("cf");
        assert_eq!(cloudflare.email, "ops@example.com");
    }

    #[test]
    fn test_unknown_provider_is_rejected_without_changes() {
        let mut registry = ProviderRegistry::builtin();
        let profile = file_profile(
            "provider flags:\n  aws:\n    bucket: changed\n  gcs:\n    bucket: other\n",
        );

        let err = merge_providers(&profile, &mut registry).unwrap_err();
        match err {
            ProfileError::UnknownProvider { name, available } => {
                assert_eq!(name, "gcs");
                assert_eq!(available, "aws, cloudflare");
            }
            other => panic!("unexpected error: {other}"),
        }
        let aws = registry.get_as::<AwsSettings>("aws").expect("aws");
        assert_eq!(aws.bucket, "");
        assert!(!registry.contains("gcs"));
    }

    #[test]
    fn test_malformed_provider_block_is_provider_error() {
        let mut registry = ProviderRegistry::builtin();
        let profile = file_profile("provider flags:\n  aws:\n    new-user: [not, a, bool]\n");

        let err = merge_providers(&profile, &mut registry).unwrap_err();
        assert!(matches!(err, ProfileError::ProviderBlock { ref provider, .. } if provider == "aws"));
    }

    #[test]
    fn test_scalar_provider_block_is_provider_error() {
        let mut registry = ProviderRegistry::builtin();
        let profile = file_profile("provider flags:\n  cloudflare: just-a-string\n");

        let err = merge_providers(&profile, &mut registry).unwrap_err();
        assert!(matches!(err, ProfileError::ProviderBlock { .. }), "got {err}");
    }

    #[test]
    fn test_empty_provider_block_changes_nothing() {
        let mut registry = ProviderRegistry::builtin();
        let profile = file_profile("provider flags:\n  aws:\n");

        merge_providers(&profile, &mut registry).expect("merge");
        assert_eq!(registry.get_as::<AwsSettings>("aws"), Some(&AwsSettings::default()));
    }

    #[test]
    fn test_cli_flags_override_file_but_zero_values_do_not_erase() {
        let profile = file_profile(
            "deploy flags:\n  domain: example.com\n  root: public\n  dry-run: true\n",
        );
        let mut filled = EnvHolder::default();
        filled.deploy_flags.root = "build".into();

        let merged = merge_flag_groups(profile, &filled).expect("merge");
        assert_eq!(merged.deploy_flags.domain, "example.com");
        assert_eq!(merged.deploy_flags.root, "build");
        assert!(merged.deploy_flags.dry_run);
    }

    #[test]
    fn test_flag_group_merge_keeps_file_provider_blocks() {
        let profile = file_profile("provider flags:\n  aws:\n    bucket: b\n");
        let merged = merge_flag_groups(profile, &EnvHolder::default()).expect("merge");
        assert!(merged.provider_flags.contains_key("aws"));
    }

    #[test]
    fn test_resolve_profile_commits_registry_on_success() {
        let mut registry = ProviderRegistry::builtin();
        let profile = file_profile(
            "global flags:\n  debug: true\nprovider flags:\n  cloudflare:\n    zone: example.com\n",
        );
        let mut filled = EnvHolder::default();
        filled.global_flags.env = "default".into();

        let merged = resolve_profile(profile, &filled, &mut registry).expect("resolve");
        assert!(merged.global_flags.debug);
        assert_eq!(merged.global_flags.env, "default");
        let cloudflare = registry.get_as::<CloudflareSettings>("cloudflare").expect("cf");
        assert_eq!(cloudflare.zone, "example.com");
    }
}
