// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Workspace notification contract. Used by the dispatcher to surface
//! detached automation failures to the owning tenant; tenants never learn
//! about those failures through the emit path, which has already returned.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::tenant::TenantId;

/// Category of a workspace notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A trigger-initiated agent run failed to launch or complete
    TriggerFailed,
    /// A workflow failed to launch or complete
    WorkflowFailed,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::TriggerFailed => write!(f, "trigger_failed"),
            NotificationKind::WorkflowFailed => write!(f, "workflow_failed"),
        }
    }
}

/// Delivery channel for tenant-facing notifications
#[async_trait]
pub trait WorkspaceNotifier: Send + Sync {
    /// Send a notification to every member of a workspace
    async fn send_to_workspace(
        &self,
        tenant_id: TenantId,
        kind: NotificationKind,
        title: &str,
        body: &str,
        metadata: serde_json::Value,
    ) -> anyhow::Result<()>;
}
