//! Wait for a list in a state file to be populated.

use crate::commands::spinner;
use crate::snapshot::{FileWatchLoop, PathView, StateFile};
use anyhow::Result;
use console::style;
use converge_core::{AttrPath, Observe, WaitConfig, Waiter};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Block until the array at `path` holds `min_count` elements and its first
/// element is not a placeholder.
pub fn run(
    wait: &WaitConfig,
    file: &Path,
    path: &str,
    min_count: usize,
    placeholder_key: &str,
    timeout: Option<u64>,
) -> Result<()> {
    let path = AttrPath::parse(path)?;
    let state = StateFile::open(file)?;

    // A path that does not exist is a typo, not a slow application.
    state.document().observe(|doc| path.select(doc).map(|_| ()))?;

    let label = path.to_string();
    let view = PathView::new(state.document(), &path);
    let pb = spinner(format!(
        "waiting for {} to hold {} item(s)",
        style(&label).cyan(),
        min_count
    ))?;

    let mut waiter = Waiter::new(FileWatchLoop::new(&state, &pb), wait.clone());
    let result = waiter.wait_for_collection_populated(
        &label,
        &view,
        min_count,
        |item: &Value| is_placeholder(item, placeholder_key),
        timeout.map(Duration::from_secs),
    );
    pb.finish_and_clear();
    let satisfied = result?;

    println!(
        "{} `{}` populated with {} item(s) after {:.1}s ({} ticks)",
        style("✓").green(),
        label,
        satisfied.value,
        satisfied.waited.as_secs_f64(),
        satisfied.ticks
    );

    Ok(())
}

/// An element is a placeholder when it is an object whose `key` is `true`.
fn is_placeholder(item: &Value, key: &str) -> bool {
    item.get(key).and_then(Value::as_bool).unwrap_or(false)
}
