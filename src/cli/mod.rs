//! Command-line interface for launchpad
//!
//! Every command resolves the effective profile (flags over config file) and
//! prints the part of it the command would act on.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::domain::GlobalFlags;
use crate::render::OutputFormat;

mod create;
mod deploy;
mod profile;
mod providers;
mod rollback;
mod utils;

/// Resolve deployment profiles from config files, provider blocks and flags
#[derive(Parser)]
#[command(name = "launchpad")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format for the resolved profile
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Yaml)]
    format: OutputFormat,
}

/// Flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to config file (defaults to ./config.yaml when present)
    #[arg(short = 'c', long, value_name = "FILE", env = "LAUNCHPAD_CONFIG", global = true)]
    pub config: Option<String>,

    /// Environment to use from the config file (defaults to 'default')
    #[arg(short = 'e', long, value_name = "NAME", env = "LAUNCHPAD_ENV", global = true)]
    pub env: Option<String>,

    /// Print every intermediate profile and let internal failures panic
    #[arg(long, global = true)]
    pub debug: bool,
}

impl GlobalArgs {
    pub fn to_flags(&self) -> GlobalFlags {
        GlobalFlags {
            config: self.config.clone().unwrap_or_default(),
            debug: self.debug,
            env: self.env.clone().unwrap_or_default(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the settings used to create a new site
    Create(create::CreateArgs),

    /// Show the settings used to deploy a site
    Deploy(deploy::DeployArgs),

    /// Show the settings used to roll a site back
    Rollback(rollback::RollbackArgs),

    /// Print the fully resolved profile
    Profile,

    /// Print provider settings after applying the config file
    Providers,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Create(args) => create::run(&cli.global, args, cli.format),
        Commands::Deploy(args) => deploy::run(&cli.global, args, cli.format),
        Commands::Rollback(args) => rollback::run(&cli.global, args, cli.format),
        Commands::Profile => profile::run(&cli.global, cli.format),
        Commands::Providers => providers::run(&cli.global, cli.format),
    }
}
