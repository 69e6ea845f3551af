// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! In-memory repository implementations. Used by tests and by embedders
//! that have not wired a persistent store; the tenant-scoping rules here
//! are the reference semantics any persistent implementation must match.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::repository::{
    RepositoryError, RunRepository, TriggerRepository, WorkflowRepository,
};
use crate::domain::run::{Run, RunId};
use crate::domain::tenant::TenantId;
use crate::domain::trigger::{Trigger, TriggerId};
use crate::domain::workflow::{Workflow, WorkflowId};

// =============================================================================
// Triggers
// =============================================================================

#[derive(Clone)]
pub struct InMemoryTriggerRepository {
    triggers: Arc<RwLock<HashMap<TriggerId, Trigger>>>,
}

impl InMemoryTriggerRepository {
    pub fn new() -> Self {
        Self {
            triggers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryTriggerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TriggerRepository for InMemoryTriggerRepository {
    async fn save(&self, trigger: &Trigger) -> Result<(), RepositoryError> {
        let mut triggers = self.triggers.write().unwrap();
        triggers.insert(trigger.id, trigger.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: TriggerId,
    ) -> Result<Option<Trigger>, RepositoryError> {
        let triggers = self.triggers.read().unwrap();
        Ok(triggers
            .get(&id)
            .filter(|t| t.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_enabled_by_event_type(
        &self,
        tenant_id: TenantId,
        event_type: &str,
    ) -> Result<Vec<Trigger>, RepositoryError> {
        let triggers = self.triggers.read().unwrap();
        Ok(triggers
            .values()
            .filter(|t| t.tenant_id == tenant_id && t.enabled && t.event_type == event_type)
            .cloned()
            .collect())
    }

    async fn delete(&self, tenant_id: TenantId, id: TriggerId) -> Result<(), RepositoryError> {
        let mut triggers = self.triggers.write().unwrap();
        if triggers.get(&id).is_some_and(|t| t.tenant_id == tenant_id) {
            triggers.remove(&id);
        }
        Ok(())
    }
}

// =============================================================================
// Workflows
// =============================================================================

#[derive(Clone)]
pub struct InMemoryWorkflowRepository {
    workflows: Arc<RwLock<HashMap<WorkflowId, Workflow>>>,
}

impl InMemoryWorkflowRepository {
    pub fn new() -> Self {
        Self {
            workflows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryWorkflowRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn save(&self, workflow: &Workflow) -> Result<(), RepositoryError> {
        let mut workflows = self.workflows.write().unwrap();
        workflows.insert(workflow.id, workflow.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: WorkflowId,
    ) -> Result<Option<Workflow>, RepositoryError> {
        let workflows = self.workflows.read().unwrap();
        Ok(workflows
            .get(&id)
            .filter(|w| w.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_enabled_by_trigger_type(
        &self,
        tenant_id: TenantId,
        trigger_type: &str,
    ) -> Result<Vec<Workflow>, RepositoryError> {
        let workflows = self.workflows.read().unwrap();
        Ok(workflows
            .values()
            .filter(|w| w.tenant_id == tenant_id && w.enabled && w.trigger_type == trigger_type)
            .cloned()
            .collect())
    }

    async fn delete(&self, tenant_id: TenantId, id: WorkflowId) -> Result<(), RepositoryError> {
        let mut workflows = self.workflows.write().unwrap();
        if workflows.get(&id).is_some_and(|w| w.tenant_id == tenant_id) {
            workflows.remove(&id);
        }
        Ok(())
    }
}

// =============================================================================
// Runs
// =============================================================================

#[derive(Clone)]
pub struct InMemoryRunRepository {
    runs: Arc<RwLock<HashMap<RunId, Run>>>,
}

impl InMemoryRunRepository {
    pub fn new() -> Self {
        Self {
            runs: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryRunRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RunRepository for InMemoryRunRepository {
    async fn save(&self, run: &Run) -> Result<(), RepositoryError> {
        let mut runs = self.runs.write().unwrap();
        runs.insert(run.id, run.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: RunId,
    ) -> Result<Option<Run>, RepositoryError> {
        let runs = self.runs.read().unwrap();
        Ok(runs.get(&id).filter(|r| r.tenant_id == tenant_id).cloned())
    }

    async fn find_by_tenant(&self, tenant_id: TenantId) -> Result<Vec<Run>, RepositoryError> {
        let runs = self.runs.read().unwrap();
        Ok(runs
            .values()
            .filter(|r| r.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}
