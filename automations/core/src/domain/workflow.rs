// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::tenant::TenantId;

/// Unique identifier for a workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowId(pub Uuid);

impl WorkflowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tenant-configured multi-step automation bound to an event type
///
/// Step definitions live with the workflow-definition surface and are
/// opaque here; the dispatch engine only needs the binding and the enabled
/// flag. Workflows have no filter concept: any enabled workflow bound to an
/// event type is eligible when that type arrives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: WorkflowId,
    pub tenant_id: TenantId,
    pub name: String,
    /// Event type that starts this workflow, matched verbatim
    pub trigger_type: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl Workflow {
    pub fn new(
        tenant_id: TenantId,
        name: impl Into<String>,
        trigger_type: impl Into<String>,
    ) -> Self {
        Self {
            id: WorkflowId::new(),
            tenant_id,
            name: name.into(),
            trigger_type: trigger_type.into(),
            enabled: true,
            created_at: Utc::now(),
        }
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }
}
