//! Profile command implementation

use anyhow::Result;

use super::utils::{filled_profile, print_output, resolve};
use super::GlobalArgs;
use crate::render::OutputFormat;

pub fn run(global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let resolved = resolve(&filled_profile(global))?;
    print_output(&resolved.profile, format)
}
