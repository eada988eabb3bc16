//! launchpad: deployment profile resolution CLI

use anyhow::Result;

fn main() -> Result<()> {
    launchpad::cli::run()
}
