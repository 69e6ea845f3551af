// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Contracts for the downstream execution services this engine hands work
//! to. The engine owns everything up to and including launch; agent step
//! loops and workflow step walking live behind these traits, in separate
//! services with their own lifecycles.

use async_trait::async_trait;

use crate::domain::context::ExecutionContext;
use crate::domain::run::RunId;
use crate::domain::workflow::Workflow;

/// Options steering a single agent run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Pin the run to a specific model deployment
    pub deployment_id: Option<uuid::Uuid>,
    /// Resolve the model through a named environment ("production", "staging")
    pub environment: Option<String>,
}

impl RunOptions {
    pub fn with_deployment(mut self, deployment_id: uuid::Uuid) -> Self {
        self.deployment_id = Some(deployment_id);
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }
}

/// Executes agent runs. The run record must already exist in `Pending`
/// state; the runtime drives it through `Running` to a terminal state.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn multi_step_run(
        &self,
        ctx: &ExecutionContext,
        run_id: RunId,
        options: RunOptions,
    ) -> anyhow::Result<()>;
}

/// Walks a workflow's step graph against an input payload.
#[async_trait]
pub trait WorkflowRuntime: Send + Sync {
    async fn execute_steps(
        &self,
        ctx: &ExecutionContext,
        workflow: &Workflow,
        payload: &serde_json::Value,
    ) -> anyhow::Result<()>;
}
