//! Wait for a named value in a state file.

use crate::commands::spinner;
use crate::snapshot::{FileWatchLoop, StateFile};
use anyhow::Result;
use console::style;
use converge_core::{AttrPath, WaitConfig, Waiter};
use std::path::Path;
use std::time::Duration;

/// Block until the value at `path` in `file` is non-null.
pub fn run(wait: &WaitConfig, file: &Path, path: &str, timeout: Option<u64>, print: bool) -> Result<()> {
    let path = AttrPath::parse(path)?;
    let state = StateFile::open(file)?;

    let pb = spinner(format!("waiting for {}", style(&path).cyan()))?;
    let mut waiter = Waiter::new(FileWatchLoop::new(&state, &pb), wait.clone());
    let result = waiter.wait_for_named_value(
        state.document(),
        &path,
        timeout.map(Duration::from_secs),
    );
    pb.finish_and_clear();
    let satisfied = result?;

    println!(
        "{} `{}` set after {:.1}s ({} ticks)",
        style("✓").green(),
        path,
        satisfied.waited.as_secs_f64(),
        satisfied.ticks
    );
    if print {
        println!("{}", serde_json::to_string_pretty(&satisfied.value)?);
    }

    Ok(())
}
