//! Shared CLI utilities.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use super::GlobalArgs;
use crate::config::load_env_config;
use crate::domain::EnvHolder;
use crate::providers::ProviderRegistry;
use crate::render::{render_value, OutputFormat};
use crate::utils::panics_to_errors;

/// Effective profile plus the provider settings it was resolved with.
pub struct Resolved {
    pub profile: EnvHolder,
    pub registry: ProviderRegistry,
}

/// What a command would act on, as printed to stdout.
#[derive(Serialize)]
pub struct CommandPlan<'a, F: Serialize> {
    pub command: &'static str,
    pub env: &'a str,
    pub flags: &'a F,
    pub providers: Mapping,
}

/// Start a flag profile holding only the global flags.
pub fn filled_profile(global: &GlobalArgs) -> EnvHolder {
    EnvHolder { global_flags: global.to_flags(), ..Default::default() }
}

/// Resolve `filled` against the config file behind the panic boundary.
pub fn resolve(filled: &EnvHolder) -> Result<Resolved> {
    panics_to_errors(filled.global_flags.debug, || -> Result<Resolved> {
        let mut registry = ProviderRegistry::builtin();
        let profile = load_env_config(filled, &mut registry)?;
        Ok(Resolved { profile, registry })
    })
}

/// Collect the settings of the providers a command refers to.
///
/// Empty names are skipped; a name missing from the registry is an error.
pub fn provider_settings(registry: &ProviderRegistry, names: &[(&str, &str)]) -> Result<Mapping> {
    let mut selected = Mapping::new();
    for (flag, name) in names {
        if name.is_empty() || selected.contains_key(*name) {
            continue;
        }
        let Some(settings) = registry.get(name) else {
            bail!("Unknown provider '{}' given for --{}", name, flag);
        };
        let value = settings
            .to_yaml()
            .with_context(|| format!("Failed serializing settings of provider '{name}'"))?;
        selected.insert(Value::String(name.to_string()), value);
    }
    Ok(selected)
}

pub fn print_output<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<()> {
    print!("{}", render_value(value, format)?);
    Ok(())
}
