// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Product analytics contract. Best-effort: callers log failures and move
//! on, a down analytics backend must never stall dispatch.

use async_trait::async_trait;

use crate::domain::context::ExecutionContext;

/// Sink for product analytics events
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Record a named analytics event with a structured payload
    async fn record_event(
        &self,
        ctx: &ExecutionContext,
        name: &str,
        payload: serde_json::Value,
    ) -> anyhow::Result<()>;
}
