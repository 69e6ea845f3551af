// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Automation dispatcher: the pipeline between an ingested tenant event
//! and the detached executions it fans out to.
//!
//! Pipeline, per event:
//!
//! 1. Record the event in the audit trail. Audit is compliance-critical,
//!    so a failed write aborts the whole dispatch pass for this event.
//! 2. Record product analytics, best-effort.
//! 3. Resolve candidate triggers; a lookup failure means no candidates,
//!    never a dropped emit.
//! 4. Per candidate: evaluate the payload filter, audit the firing, then
//!    launch execution on a detached task. A candidate whose firing
//!    cannot be audited is skipped; its siblings are unaffected.
//! 5. Resolve and launch workflows the same way.
//!
//! Launches are fire-and-forget: the dispatcher never joins them, so
//! emit latency does not depend on execution time. The detached failure
//! handler here is the single place a failed automation is logged and
//! surfaced to the tenant.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::application::analytics::AnalyticsSink;
use crate::application::audit::{AuditEntry, AuditLog};
use crate::application::notifications::{NotificationKind, WorkspaceNotifier};
use crate::application::resolver::AutomationResolver;
use crate::application::trigger_executor::TriggerExecutor;
use crate::application::workflow_executor::WorkflowExecutor;
use crate::domain::context::ExecutionContext;
use crate::domain::event::TenantEvent;
use crate::domain::trigger::Trigger;
use crate::domain::workflow::Workflow;
use crate::infrastructure::event_bus::EventListener;

/// Audit action recorded when an event enters the dispatch pipeline
pub const AUDIT_EVENT_RECEIVED: &str = "automation.event.received";
/// Audit action recorded immediately before a trigger execution launches
pub const AUDIT_TRIGGER_FIRED: &str = "automation.trigger.fired";
/// Analytics event name for ingested events
pub const ANALYTICS_EVENT_RECEIVED: &str = "automation_event_received";

/// Standard dispatcher wired from the resolver, executors and side-effect
/// sinks. Registered on the event bus as the automation listener.
pub struct StandardAutomationDispatcher {
    resolver: Arc<dyn AutomationResolver>,
    trigger_executor: Arc<dyn TriggerExecutor>,
    workflow_executor: Arc<dyn WorkflowExecutor>,
    audit: Arc<dyn AuditLog>,
    analytics: Arc<dyn AnalyticsSink>,
    notifier: Arc<dyn WorkspaceNotifier>,
}

impl StandardAutomationDispatcher {
    pub fn new(
        resolver: Arc<dyn AutomationResolver>,
        trigger_executor: Arc<dyn TriggerExecutor>,
        workflow_executor: Arc<dyn WorkflowExecutor>,
        audit: Arc<dyn AuditLog>,
        analytics: Arc<dyn AnalyticsSink>,
        notifier: Arc<dyn WorkspaceNotifier>,
    ) -> Self {
        Self {
            resolver,
            trigger_executor,
            workflow_executor,
            audit,
            analytics,
            notifier,
        }
    }

    /// Run the dispatch pipeline for one event.
    ///
    /// Returns once every matched automation has been launched; never
    /// waits for any of them to complete.
    pub async fn handle_incoming_event(&self, event: &TenantEvent) -> anyhow::Result<()> {
        let ctx = ExecutionContext::system(event.tenant_id);

        info!(
            event_id = %event.id,
            event_type = %event.event_type,
            tenant_id = %event.tenant_id,
            "Dispatching event"
        );

        self.audit
            .record(
                &ctx,
                AuditEntry::new(AUDIT_EVENT_RECEIVED, "event")
                    .with_entity_id(event.id.to_string())
                    .with_metadata(json!({ "event_type": event.event_type })),
            )
            .await
            .context("Failed to record event receipt in the audit trail")?;

        if let Err(e) = self
            .analytics
            .record_event(
                &ctx,
                ANALYTICS_EVENT_RECEIVED,
                json!({ "event_type": event.event_type }),
            )
            .await
        {
            warn!(event_id = %event.id, error = %e, "Failed to record analytics event");
        }

        self.dispatch_triggers(event).await;
        self.dispatch_workflows(event).await;

        Ok(())
    }

    async fn dispatch_triggers(&self, event: &TenantEvent) {
        let triggers = match self.resolver.resolve_triggers(event).await {
            Ok(triggers) => triggers,
            Err(e) => {
                warn!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    error = %e,
                    "Trigger lookup failed, dispatching to no triggers"
                );
                return;
            }
        };

        for trigger in triggers {
            if !trigger.filter.matches(&event.payload) {
                debug!(
                    trigger_id = %trigger.id,
                    trigger_name = %trigger.name,
                    event_id = %event.id,
                    "Trigger filter did not match, skipping"
                );
                continue;
            }

            // Attributed to the trigger's author, matching the context the
            // run itself will execute under
            let fired_ctx =
                ExecutionContext::system_on_behalf_of(trigger.tenant_id, trigger.user_id);
            let entry = AuditEntry::new(AUDIT_TRIGGER_FIRED, "trigger")
                .with_entity_id(trigger.id.to_string())
                .with_metadata(json!({
                    "trigger_name": trigger.name,
                    "event_id": event.id.to_string(),
                    "event_type": event.event_type,
                }));
            if let Err(e) = self.audit.record(&fired_ctx, entry).await {
                error!(
                    trigger_id = %trigger.id,
                    event_id = %event.id,
                    error = %e,
                    "Failed to audit trigger firing, not launching"
                );
                continue;
            }

            info!(
                trigger_id = %trigger.id,
                trigger_name = %trigger.name,
                event_id = %event.id,
                "Trigger fired"
            );
            self.launch_trigger(trigger, event.clone());
        }
    }

    async fn dispatch_workflows(&self, event: &TenantEvent) {
        let workflows = match self.resolver.resolve_workflows(event).await {
            Ok(workflows) => workflows,
            Err(e) => {
                warn!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    error = %e,
                    "Workflow lookup failed, dispatching to no workflows"
                );
                return;
            }
        };

        for workflow in workflows {
            info!(
                workflow_id = %workflow.id,
                workflow_name = %workflow.name,
                event_id = %event.id,
                "Workflow matched"
            );
            self.launch_workflow(workflow, event.clone());
        }
    }

    /// Launch one trigger execution on a detached task. The JoinHandle is
    /// dropped; failure handling lives inside the task.
    fn launch_trigger(&self, trigger: Trigger, event: TenantEvent) {
        let executor = Arc::clone(&self.trigger_executor);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = executor.execute(&trigger, &event).await {
                error!(
                    trigger_id = %trigger.id,
                    trigger_name = %trigger.name,
                    event_id = %event.id,
                    error = %e,
                    "Trigger execution failed"
                );
                let body = format!(
                    "Trigger '{}' failed while handling a '{}' event.",
                    trigger.name, event.event_type
                );
                let metadata = json!({
                    "trigger_id": trigger.id.to_string(),
                    "event_id": event.id.to_string(),
                    "event_type": event.event_type,
                    "error": format!("{e:#}"),
                });
                if let Err(notify_err) = notifier
                    .send_to_workspace(
                        trigger.tenant_id,
                        NotificationKind::TriggerFailed,
                        "Automation trigger failed",
                        &body,
                        metadata,
                    )
                    .await
                {
                    warn!(
                        trigger_id = %trigger.id,
                        error = %notify_err,
                        "Failed to deliver trigger failure notification"
                    );
                }
            }
        });
    }

    /// Launch one workflow execution on a detached task.
    fn launch_workflow(&self, workflow: Workflow, event: TenantEvent) {
        let executor = Arc::clone(&self.workflow_executor);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = executor.execute(&workflow, &event).await {
                error!(
                    workflow_id = %workflow.id,
                    workflow_name = %workflow.name,
                    event_id = %event.id,
                    error = %e,
                    "Workflow execution failed"
                );
                let body = format!(
                    "Workflow '{}' failed while handling a '{}' event.",
                    workflow.name, event.event_type
                );
                let metadata = json!({
                    "workflow_id": workflow.id.to_string(),
                    "event_id": event.id.to_string(),
                    "event_type": event.event_type,
                    "error": format!("{e:#}"),
                });
                if let Err(notify_err) = notifier
                    .send_to_workspace(
                        workflow.tenant_id,
                        NotificationKind::WorkflowFailed,
                        "Automation workflow failed",
                        &body,
                        metadata,
                    )
                    .await
                {
                    warn!(
                        workflow_id = %workflow.id,
                        error = %notify_err,
                        "Failed to deliver workflow failure notification"
                    );
                }
            }
        });
    }
}

#[async_trait]
impl EventListener for StandardAutomationDispatcher {
    fn name(&self) -> &str {
        "automation-dispatcher"
    }

    async fn on_event(&self, event: &TenantEvent) -> anyhow::Result<()> {
        self.handle_incoming_event(event).await
    }
}
