//! Rollback command implementation

use anyhow::Result;
use clap::Args;

use super::utils::{filled_profile, print_output, provider_settings, resolve, CommandPlan};
use super::GlobalArgs;
use crate::domain::RollbackFlags;
use crate::render::OutputFormat;

#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Version to roll back to
    #[arg(id = "target_version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Domain of the site to roll back
    #[arg(short, long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Provider storing the site files
    #[arg(long, value_name = "PROVIDER")]
    pub fs: Option<String>,
}

impl RollbackArgs {
    pub fn to_flags(&self) -> RollbackFlags {
        RollbackFlags {
            domain: self.domain.clone().unwrap_or_default(),
            fs: self.fs.clone().unwrap_or_default(),
            version: self.version.clone().unwrap_or_default(),
        }
    }
}

pub fn run(global: &GlobalArgs, args: RollbackArgs, format: OutputFormat) -> Result<()> {
    let mut filled = filled_profile(global);
    filled.rollback_flags = args.to_flags();

    let resolved = resolve(&filled)?;
    let flags = &resolved.profile.rollback_flags;
    if flags.version.is_empty() {
        tracing::warn!("No version given, rollback would target the previous deploy");
    }
    let providers = provider_settings(&resolved.registry, &[("fs", flags.fs.as_str())])?;

    print_output(
        &CommandPlan {
            command: "rollback",
            env: &resolved.profile.global_flags.env,
            flags,
            providers,
        },
        format,
    )
}
