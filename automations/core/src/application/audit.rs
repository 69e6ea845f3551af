// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Audit trail contract.
//!
//! Audit writes are compliance-critical: callers await them and treat a
//! failure as a hard error rather than a degraded-mode warning. Contrast
//! with `AnalyticsSink`, which is best-effort by design.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::context::ExecutionContext;

/// A single audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Dotted action identifier, e.g. "automation.trigger.fired"
    pub action: String,
    /// Kind of entity the action concerns ("event", "trigger", "workflow")
    pub entity_type: String,
    /// Identifier of the concerned entity, when one exists
    pub entity_id: Option<String>,
    /// Free-form structured details
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl AuditEntry {
    pub fn new(action: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            entity_type: entity_type.into(),
            entity_id: None,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Sink for audit trail entries
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Record an entry, attributed to the acting context
    async fn record(&self, ctx: &ExecutionContext, entry: AuditEntry) -> Result<(), AuditError>;
}

/// Audit sink errors
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Audit sink unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Serialization(err.to_string())
    }
}
