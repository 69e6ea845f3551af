// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Composition root for the automations engine. Embedding services hand
//! in their repository and collaborator implementations; the engine wires
//! the standard dispatch chain onto a fresh event bus and exposes the
//! ingestion surface.

use std::sync::Arc;

use tracing::info;

use crate::application::analytics::AnalyticsSink;
use crate::application::audit::AuditLog;
use crate::application::dispatcher::StandardAutomationDispatcher;
use crate::application::notifications::WorkspaceNotifier;
use crate::application::resolver::StandardAutomationResolver;
use crate::application::runtime::{AgentRuntime, WorkflowRuntime};
use crate::application::trigger_executor::StandardTriggerExecutor;
use crate::application::workflow_executor::StandardWorkflowExecutor;
use crate::domain::event::TenantEvent;
use crate::domain::repository::{RunRepository, TriggerRepository, WorkflowRepository};
use crate::infrastructure::event_bus::EventBus;

/// Assembled automations engine
pub struct AutomationsEngine {
    event_bus: Arc<EventBus>,
}

impl AutomationsEngine {
    #[allow(clippy::too_many_arguments)]
    pub async fn new(
        trigger_repository: Arc<dyn TriggerRepository>,
        workflow_repository: Arc<dyn WorkflowRepository>,
        run_repository: Arc<dyn RunRepository>,
        agent_runtime: Arc<dyn AgentRuntime>,
        workflow_runtime: Arc<dyn WorkflowRuntime>,
        audit: Arc<dyn AuditLog>,
        analytics: Arc<dyn AnalyticsSink>,
        notifier: Arc<dyn WorkspaceNotifier>,
    ) -> Self {
        let resolver = Arc::new(StandardAutomationResolver::new(
            trigger_repository,
            workflow_repository,
        ));
        let trigger_executor = Arc::new(StandardTriggerExecutor::new(
            run_repository,
            agent_runtime,
        ));
        let workflow_executor = Arc::new(StandardWorkflowExecutor::new(workflow_runtime));
        let dispatcher = Arc::new(StandardAutomationDispatcher::new(
            resolver,
            trigger_executor,
            workflow_executor,
            audit,
            analytics,
            notifier,
        ));

        let event_bus = Arc::new(EventBus::new());
        event_bus.register_listener(dispatcher).await;
        info!("Automations engine initialized");

        Self { event_bus }
    }

    /// Ingest one tenant event. Returns once dispatch has finished
    /// launching; never waits for the launched automations.
    pub async fn emit(&self, event: TenantEvent) {
        self.event_bus.emit(&event).await;
    }

    /// The engine's bus, for registering additional listeners
    pub fn event_bus(&self) -> Arc<EventBus> {
        self.event_bus.clone()
    }
}
