// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use tracing::info;

use crate::application::notifications::{NotificationKind, WorkspaceNotifier};
use crate::domain::tenant::TenantId;

/// Notifier that writes workspace notifications to the structured log.
/// Default wiring for deployments without a delivery channel.
pub struct TracingWorkspaceNotifier;

impl TracingWorkspaceNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingWorkspaceNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkspaceNotifier for TracingWorkspaceNotifier {
    async fn send_to_workspace(
        &self,
        tenant_id: TenantId,
        kind: NotificationKind,
        title: &str,
        body: &str,
        metadata: serde_json::Value,
    ) -> anyhow::Result<()> {
        info!(
            target: "trellis::notifications",
            tenant_id = %tenant_id,
            kind = %kind,
            title = title,
            body = body,
            metadata = %metadata,
            "Workspace notification"
        );
        Ok(())
    }
}
