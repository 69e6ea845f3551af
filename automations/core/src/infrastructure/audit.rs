// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Audit log sinks.
//!
//! `TracingAuditLog` emits entries on the `trellis::audit` log target so a
//! deployment can route them to the compliance pipeline with a subscriber
//! filter. `InMemoryAuditLog` keeps entries in memory for inspection.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;

use crate::application::audit::{AuditEntry, AuditError, AuditLog};
use crate::domain::context::ExecutionContext;

/// Audit sink that writes entries to the structured log
pub struct TracingAuditLog;

impl TracingAuditLog {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLog for TracingAuditLog {
    async fn record(&self, ctx: &ExecutionContext, entry: AuditEntry) -> Result<(), AuditError> {
        info!(
            target: "trellis::audit",
            tenant_id = %ctx.tenant_id(),
            user_id = ?ctx.user_id(),
            system = ctx.is_system(),
            action = %entry.action,
            entity_type = %entry.entity_type,
            entity_id = ?entry.entity_id,
            metadata = %entry.metadata,
            "Audit entry"
        );
        Ok(())
    }
}

/// Audit sink that records entries in memory, with accessors for
/// asserting on what was recorded
#[derive(Clone)]
pub struct InMemoryAuditLog {
    entries: Arc<Mutex<Vec<(ExecutionContext, AuditEntry)>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All recorded entries, in record order
    pub fn entries(&self) -> Vec<(ExecutionContext, AuditEntry)> {
        self.entries.lock().unwrap().clone()
    }

    /// Recorded actions, in record order
    pub fn actions(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, entry)| entry.action.clone())
            .collect()
    }

    /// Entries recorded for one action
    pub fn entries_for_action(&self, action: &str) -> Vec<(ExecutionContext, AuditEntry)> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, entry)| entry.action == action)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn record(&self, ctx: &ExecutionContext, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries.lock().unwrap().push((ctx.clone(), entry));
        Ok(())
    }
}
