//! Named values reachable from a root object.
//!
//! Two ways to name a value:
//!
//! - [`AttrPath`]: a dotted path like `downloads_page.downloads`, walked
//!   against a `serde_json::Value` tree. A segment that does not exist is a
//!   [`WaitError::Resolution`], while a final `null` just means "not yet
//!   computed".
//! - [`Accessor`]: a typed closure over a Rust struct. Missing segments cannot
//!   happen, so only presence is reported.

use crate::error::{Result, WaitError};
use serde_json::Value;
use std::fmt;

/// Result of looking a value up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The value has been computed.
    Present(T),
    /// The value is not computed yet.
    Pending,
}

impl<T> Lookup<T> {
    /// True for [`Lookup::Present`].
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Converts into an `Option`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Pending => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Pending,
        }
    }
}

/// A way of reaching one value from a root of type `R`.
pub trait Resolve<R: ?Sized> {
    /// The value type produced once present.
    type Value;

    /// Name used in logs and timeout messages.
    fn label(&self) -> String;

    /// Look the value up against the current root.
    fn resolve(&self, root: &R) -> Result<Lookup<Self::Value>>;
}

/// A validated dotted attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrPath {
    segments: Vec<String>,
}

impl AttrPath {
    /// Parse `a.b.c`, rejecting empty text and empty segments.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(WaitError::InvalidPath {
                path: text.to_string(),
                reason: "path is empty".into(),
            });
        }

        let segments: Vec<String> = text.split('.').map(str::to_string).collect();
        if let Some(pos) = segments.iter().position(|s| s.trim().is_empty()) {
            return Err(WaitError::InvalidPath {
                path: text.to_string(),
                reason: format!("segment {} is empty", pos + 1),
            });
        }

        Ok(Self { segments })
    }

    /// Path segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Walk the path and borrow the value it names.
    ///
    /// Returns `Ok(None)` when the final value is `null`.
    pub fn select<'a>(&self, root: &'a Value) -> Result<Option<&'a Value>> {
        let mut current = root;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map
                    .get(segment)
                    .ok_or_else(|| self.unresolved(segment, "is missing"))?,
                Value::Array(items) => {
                    let index: usize = segment
                        .parse()
                        .map_err(|_| self.unresolved(segment, "is not an array index"))?;
                    items.get(index).ok_or_else(|| {
                        self.unresolved(
                            segment,
                            &format!("is out of range (length {})", items.len()),
                        )
                    })?
                }
                other => {
                    return Err(self.unresolved(
                        segment,
                        &format!("cannot be read from {}", json_kind(other)),
                    ))
                }
            };
        }

        Ok(if current.is_null() { None } else { Some(current) })
    }

    fn unresolved(&self, segment: &str, reason: &str) -> WaitError {
        WaitError::Resolution {
            path: self.to_string(),
            segment: segment.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl std::str::FromStr for AttrPath {
    type Err = WaitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Resolve<Value> for AttrPath {
    type Value = Value;

    fn label(&self) -> String {
        self.to_string()
    }

    fn resolve(&self, root: &Value) -> Result<Lookup<Value>> {
        Ok(self.select(root)?.cloned().into())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Typed accessor: `None` means the value is not computed yet.
pub struct Accessor<F> {
    label: String,
    get: F,
}

impl<F> Accessor<F> {
    /// Name an accessor function.
    pub fn new(label: impl Into<String>, get: F) -> Self {
        Self {
            label: label.into(),
            get,
        }
    }
}

impl<R: ?Sized, T, F> Resolve<R> for Accessor<F>
where
    F: Fn(&R) -> Option<T>,
{
    type Value = T;

    fn label(&self) -> String {
        self.label.clone()
    }

    fn resolve(&self, root: &R) -> Result<Lookup<T>> {
        Ok((self.get)(root).into())
    }
}
