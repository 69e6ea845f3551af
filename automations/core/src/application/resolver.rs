// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Candidate resolution: maps an incoming event to the trigger and
//! workflow rows that should react to it. Pure configuration lookup,
//! no side effects; payload filtering happens later in the dispatcher.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::event::TenantEvent;
use crate::domain::repository::{RepositoryError, TriggerRepository, WorkflowRepository};
use crate::domain::trigger::Trigger;
use crate::domain::workflow::Workflow;

/// Resolves the automation rows subscribed to an event
#[async_trait]
pub trait AutomationResolver: Send + Sync {
    /// Enabled triggers of the event's tenant listening for its exact type
    async fn resolve_triggers(&self, event: &TenantEvent) -> Result<Vec<Trigger>, RepositoryError>;

    /// Enabled workflows of the event's tenant bound to its exact type
    async fn resolve_workflows(&self, event: &TenantEvent)
        -> Result<Vec<Workflow>, RepositoryError>;
}

/// Standard resolver backed by the configuration repositories
pub struct StandardAutomationResolver {
    trigger_repository: Arc<dyn TriggerRepository>,
    workflow_repository: Arc<dyn WorkflowRepository>,
}

impl StandardAutomationResolver {
    pub fn new(
        trigger_repository: Arc<dyn TriggerRepository>,
        workflow_repository: Arc<dyn WorkflowRepository>,
    ) -> Self {
        Self {
            trigger_repository,
            workflow_repository,
        }
    }
}

#[async_trait]
impl AutomationResolver for StandardAutomationResolver {
    async fn resolve_triggers(&self, event: &TenantEvent) -> Result<Vec<Trigger>, RepositoryError> {
        self.trigger_repository
            .find_enabled_by_event_type(event.tenant_id, &event.event_type)
            .await
    }

    async fn resolve_workflows(
        &self,
        event: &TenantEvent,
    ) -> Result<Vec<Workflow>, RepositoryError> {
        self.workflow_repository
            .find_enabled_by_trigger_type(event.tenant_id, &event.event_type)
            .await
    }
}
