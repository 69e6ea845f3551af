// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Workflow execution: hands a matched workflow and the event payload to
//! the workflow step engine under a system context for the workflow's
//! tenant. Errors propagate; the dispatcher owns failure handling.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;

use crate::application::runtime::WorkflowRuntime;
use crate::domain::context::ExecutionContext;
use crate::domain::event::TenantEvent;
use crate::domain::workflow::Workflow;

/// Launches step execution for matched workflows
#[async_trait]
pub trait WorkflowExecutor: Send + Sync {
    async fn execute(&self, workflow: &Workflow, event: &TenantEvent) -> anyhow::Result<()>;
}

pub struct StandardWorkflowExecutor {
    workflow_runtime: Arc<dyn WorkflowRuntime>,
}

impl StandardWorkflowExecutor {
    pub fn new(workflow_runtime: Arc<dyn WorkflowRuntime>) -> Self {
        Self { workflow_runtime }
    }
}

#[async_trait]
impl WorkflowExecutor for StandardWorkflowExecutor {
    async fn execute(&self, workflow: &Workflow, event: &TenantEvent) -> anyhow::Result<()> {
        let ctx = ExecutionContext::system(workflow.tenant_id);
        self.workflow_runtime
            .execute_steps(&ctx, workflow, &event.payload)
            .await
            .with_context(|| format!("Workflow {} failed", workflow.id))?;
        Ok(())
    }
}
