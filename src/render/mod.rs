//! Output rendering (diagnostic dumps and resolved profiles)

use console::style;
use serde::Serialize;

use crate::error::{ProfileError, Result};

/// Output format for the resolved profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Render a titled YAML dump of `value`.
pub fn render_dump<T: Serialize + ?Sized>(title: &str, value: &T) -> Result<String> {
    let body = serde_yaml::to_string(value)
        .map_err(|source| ProfileError::Serialize { what: title.to_string(), source })?;
    Ok(format!("{}\n{}", style(title).bold().cyan(), body))
}

/// Print a titled YAML dump to stdout. Used only in debug mode.
pub fn print_dump<T: Serialize + ?Sized>(title: &str, value: &T) -> Result<()> {
    println!("{}", render_dump(title, value)?);
    Ok(())
}

/// Render any serializable value in the requested format.
pub fn render_value<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            json
        }
    };
    Ok(text)
}
