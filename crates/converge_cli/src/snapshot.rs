//! JSON state snapshots re-read from disk on every host-loop slice.

use anyhow::{Context, Result};
use converge_core::{AttrPath, HostLoop, Observe};
use indicatif::ProgressBar;
use serde_json::Value;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};

/// A JSON document written by the application under test.
pub struct StateFile {
    path: PathBuf,
    document: RefCell<Value>,
}

impl StateFile {
    /// Load the initial snapshot. The file must exist and parse.
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {}", path.display()))?;
        let document: Value = serde_json::from_str(&content)
            .with_context(|| format!("State file is not valid JSON: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            document: RefCell::new(document),
        })
    }

    /// The latest good snapshot.
    pub fn document(&self) -> &RefCell<Value> {
        &self.document
    }

    /// Re-read the file. A missing or half-written file keeps the previous snapshot.
    pub fn reload(&self) -> bool {
        let parsed = fs::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(document) => {
                let changed = *self.document.borrow() != document;
                if changed {
                    trace!(path = %self.path.display(), "state file changed");
                    *self.document.borrow_mut() = document;
                }
                changed
            }
            Err(reason) => {
                debug!(path = %self.path.display(), %reason, "keeping previous snapshot");
                false
            }
        }
    }
}

/// Host loop for the CLI: sleep one slice, pick up file changes, tick the spinner.
pub struct FileWatchLoop<'a> {
    state: &'a StateFile,
    spinner: &'a ProgressBar,
}

impl<'a> FileWatchLoop<'a> {
    pub fn new(state: &'a StateFile, spinner: &'a ProgressBar) -> Self {
        Self { state, spinner }
    }
}

impl HostLoop for FileWatchLoop<'_> {
    fn process_events(&mut self, duration: Duration) {
        std::thread::sleep(duration);
        self.state.reload();
        self.spinner.tick();
    }
}

/// The value at `path` inside the current snapshot, or `null` when the path
/// does not resolve in it.
pub struct PathView<'a> {
    document: &'a RefCell<Value>,
    path: &'a AttrPath,
}

impl<'a> PathView<'a> {
    pub fn new(document: &'a RefCell<Value>, path: &'a AttrPath) -> Self {
        Self { document, path }
    }
}

impl Observe<Value> for PathView<'_> {
    fn observe<O>(&self, f: impl FnOnce(&Value) -> O) -> O {
        let document = self.document.borrow();
        match self.path.select(&document) {
            Ok(Some(value)) => f(value),
            _ => f(&Value::Null),
        }
    }
}
