// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use tracing::debug;

use crate::application::analytics::AnalyticsSink;
use crate::domain::context::ExecutionContext;

/// Analytics sink that writes events to the structured log. Default
/// wiring for deployments without a product analytics backend.
pub struct TracingAnalyticsSink;

impl TracingAnalyticsSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingAnalyticsSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsSink for TracingAnalyticsSink {
    async fn record_event(
        &self,
        ctx: &ExecutionContext,
        name: &str,
        payload: serde_json::Value,
    ) -> anyhow::Result<()> {
        debug!(
            target: "trellis::analytics",
            tenant_id = %ctx.tenant_id(),
            event = name,
            payload = %payload,
            "Analytics event"
        );
        Ok(())
    }
}
