// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Dot-path filter predicate for trigger applicability.
//!
//! A filter is a flat mapping of dot-separated payload paths to required
//! values. Matching is strict equality on the resolved JSON value; a missing
//! path never equals anything. Evaluation fails closed: a malformed path
//! makes the whole filter evaluate to `false` rather than surfacing an
//! error into dispatch.
//!
//! This is deliberately a narrow path-resolution utility, not a templating
//! or query engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A filter path that cannot be traversed (empty, or containing an empty
/// segment such as `"a..b"`)
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed filter path")]
pub struct MalformedPath;

/// Flat mapping of dot-separated payload paths to required values
///
/// An empty filter matches every payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventFilter(pub serde_json::Map<String, Value>);

impl EventFilter {
    pub fn empty() -> Self {
        Self(serde_json::Map::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the payload satisfies every filter entry
    ///
    /// Pure and synchronous: no I/O, no await points. The first failing
    /// entry short-circuits the whole filter to `false`.
    pub fn matches(&self, payload: &Value) -> bool {
        for (path, expected) in &self.0 {
            let resolved = match resolve_path(payload, path) {
                Ok(v) => v,
                Err(MalformedPath) => {
                    warn!(path = %path, "malformed filter path, failing filter closed");
                    return false;
                }
            };
            match resolved {
                Some(actual) if actual == expected => continue,
                _ => return false,
            }
        }
        true
    }
}

/// Resolve a dot-separated path against a JSON value
///
/// Returns `Ok(None)` when an intermediate key is missing or a non-object
/// is traversed into; `Err(MalformedPath)` only for paths that cannot be
/// split into non-empty segments.
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Result<Option<&'a Value>, MalformedPath> {
    if path.is_empty() {
        return Err(MalformedPath);
    }

    let mut current = Some(value);
    for segment in path.split('.') {
        if segment.is_empty() {
            return Err(MalformedPath);
        }
        current = match current {
            Some(Value::Object(map)) => map.get(segment),
            _ => None,
        };
    }
    Ok(current)
}
