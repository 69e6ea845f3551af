// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use tracing::info;

use trellis_automations_core::domain::context::ExecutionContext;

use crate::application::resolver::UsageRecorder;

/// Usage recorder that writes charges to the structured log. Default
/// wiring for deployments without a billing backend.
pub struct TracingUsageRecorder;

impl TracingUsageRecorder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingUsageRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageRecorder for TracingUsageRecorder {
    async fn record_usage(
        &self,
        ctx: &ExecutionContext,
        meter_key: &str,
        quantity: u64,
        cost: f64,
        metadata: serde_json::Value,
    ) -> anyhow::Result<()> {
        info!(
            target: "trellis::billing",
            tenant_id = %ctx.tenant_id(),
            meter_key = meter_key,
            quantity = quantity,
            cost = cost,
            metadata = %metadata,
            "Usage recorded"
        );
        Ok(())
    }
}
