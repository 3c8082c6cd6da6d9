//! Show the effective configuration.

use anyhow::Result;
use console::style;
use converge_core::Config;
use std::path::Path;

/// Print the configuration that waits would use.
pub fn run(config: &Config, source: &Path) -> Result<()> {
    let origin = if source.exists() {
        source.display().to_string()
    } else {
        "built-in defaults".to_string()
    };

    println!("{}", style(format!("# effective configuration ({})", origin)).dim());
    print!("{}", config.to_toml()?);

    Ok(())
}
