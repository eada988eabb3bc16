//! Create command implementation

use anyhow::Result;
use clap::Args;

use super::utils::{filled_profile, print_output, provider_settings, resolve, CommandPlan};
use super::GlobalArgs;
use crate::domain::CreateFlags;
use crate::render::OutputFormat;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Domain of the site to create
    #[arg(short, long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Provider hosting DNS records
    #[arg(long, value_name = "PROVIDER")]
    pub dns: Option<String>,

    /// Provider storing the site files
    #[arg(long, value_name = "PROVIDER")]
    pub fs: Option<String>,

    /// Provider serving the site through a CDN
    #[arg(long, value_name = "PROVIDER")]
    pub cdn: Option<String>,

    /// Skip SSL certificate provisioning
    #[arg(long)]
    pub no_ssl: bool,
}

impl CreateArgs {
    pub fn to_flags(&self) -> CreateFlags {
        CreateFlags {
            domain: self.domain.clone().unwrap_or_default(),
            dns: self.dns.clone().unwrap_or_default(),
            fs: self.fs.clone().unwrap_or_default(),
            cdn: self.cdn.clone().unwrap_or_default(),
            no_ssl: self.no_ssl,
        }
    }
}

pub fn run(global: &GlobalArgs, args: CreateArgs, format: OutputFormat) -> Result<()> {
    let mut filled = filled_profile(global);
    filled.create_flags = args.to_flags();

    let resolved = resolve(&filled)?;
    let flags = &resolved.profile.create_flags;
    let providers = provider_settings(
        &resolved.registry,
        &[("fs", flags.fs.as_str()), ("dns", flags.dns.as_str()), ("cdn", flags.cdn.as_str())],
    )?;

    print_output(
        &CommandPlan {
            command: "create",
            env: &resolved.profile.global_flags.env,
            flags,
            providers,
        },
        format,
    )
}
