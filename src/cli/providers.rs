//! Providers command implementation

use anyhow::{Context, Result};

use super::utils::{filled_profile, print_output, resolve};
use super::GlobalArgs;
use crate::render::OutputFormat;

pub fn run(global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let resolved = resolve(&filled_profile(global))?;
    let providers = resolved.registry.to_yaml().context("Failed serializing provider registry")?;
    print_output(&providers, format)
}
