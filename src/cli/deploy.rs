//! Deploy command implementation

use anyhow::Result;
use clap::Args;

use super::utils::{filled_profile, print_output, provider_settings, resolve, CommandPlan};
use super::GlobalArgs;
use crate::domain::DeployFlags;
use crate::render::OutputFormat;

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Domain of the site to deploy
    #[arg(short, long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Local directory holding the built site
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Files to upload, as a glob relative to --root
    #[arg(long, value_name = "GLOB")]
    pub files: Option<String>,

    /// Destination prefix inside the storage provider
    #[arg(long, value_name = "PREFIX")]
    pub dest: Option<String>,

    /// Provider storing the site files
    #[arg(long, value_name = "PROVIDER")]
    pub fs: Option<String>,

    /// Resolve and print everything without uploading
    #[arg(long)]
    pub dry_run: bool,
}

impl DeployArgs {
    pub fn to_flags(&self) -> DeployFlags {
        DeployFlags {
            domain: self.domain.clone().unwrap_or_default(),
            root: self.root.clone().unwrap_or_default(),
            files: self.files.clone().unwrap_or_default(),
            dest: self.dest.clone().unwrap_or_default(),
            fs: self.fs.clone().unwrap_or_default(),
            dry_run: self.dry_run,
        }
    }
}

pub fn run(global: &GlobalArgs, args: DeployArgs, format: OutputFormat) -> Result<()> {
    let mut filled = filled_profile(global);
    filled.deploy_flags = args.to_flags();

    let resolved = resolve(&filled)?;
    let flags = &resolved.profile.deploy_flags;
    let providers = provider_settings(&resolved.registry, &[("fs", flags.fs.as_str())])?;

    print_output(
        &CommandPlan {
            command: "deploy",
            env: &resolved.profile.global_flags.env,
            flags,
            providers,
        },
        format,
    )
}
