//! CLI commands.

pub mod config;
pub mod list;
pub mod value;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner ticked once per poll tick by the host loop.
pub(crate) fn spinner(message: String) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")?);
    pb.set_message(message);
    Ok(pb)
}
