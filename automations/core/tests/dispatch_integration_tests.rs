// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

//! Integration tests for the event dispatch pipeline
//!
//! These tests drive the assembled engine end to end:
//! 1. Seed trigger configuration into in-memory repositories
//! 2. Emit a tenant event through the engine
//! 3. Verify audit trail ordering, run creation and input assembly
//! 4. Verify detachment: emit returns while executions are in flight

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use trellis_automations_core::application::dispatcher::AUDIT_TRIGGER_FIRED;
use trellis_automations_core::application::engine::AutomationsEngine;
use trellis_automations_core::application::notifications::{NotificationKind, WorkspaceNotifier};
use trellis_automations_core::application::runtime::{AgentRuntime, RunOptions, WorkflowRuntime};
use trellis_automations_core::domain::context::ExecutionContext;
use trellis_automations_core::domain::event::TenantEvent;
use trellis_automations_core::domain::filter::EventFilter;
use trellis_automations_core::domain::repository::{RunRepository, TriggerRepository};
use trellis_automations_core::domain::run::{RunId, RunStatus};
use trellis_automations_core::domain::tenant::{AgentId, TenantId, UserId};
use trellis_automations_core::domain::trigger::Trigger;
use trellis_automations_core::domain::workflow::Workflow;
use trellis_automations_core::infrastructure::analytics::TracingAnalyticsSink;
use trellis_automations_core::infrastructure::audit::InMemoryAuditLog;
use trellis_automations_core::infrastructure::repositories::{
    InMemoryRunRepository, InMemoryTriggerRepository, InMemoryWorkflowRepository,
};

/// Agent runtime double that records each invocation along with how many
/// firing audit entries existed when it started, to assert audit-before-run
/// ordering without joining the detached task.
struct RecordingAgentRuntime {
    audit: InMemoryAuditLog,
    runs: Arc<Mutex<Vec<(RunId, usize)>>>,
    delay_ms: u64,
    fail: bool,
}

#[async_trait]
impl AgentRuntime for RecordingAgentRuntime {
    async fn multi_step_run(
        &self,
        _ctx: &ExecutionContext,
        run_id: RunId,
        _options: RunOptions,
    ) -> anyhow::Result<()> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        let fired_so_far = self.audit.entries_for_action(AUDIT_TRIGGER_FIRED).len();
        self.runs.lock().unwrap().push((run_id, fired_so_far));
        if self.fail {
            anyhow::bail!("no model capacity");
        }
        Ok(())
    }
}

struct NoopWorkflowRuntime;

#[async_trait]
impl WorkflowRuntime for NoopWorkflowRuntime {
    async fn execute_steps(
        &self,
        _ctx: &ExecutionContext,
        _workflow: &Workflow,
        _payload: &serde_json::Value,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<(TenantId, NotificationKind)>>>,
}

#[async_trait]
impl WorkspaceNotifier for RecordingNotifier {
    async fn send_to_workspace(
        &self,
        tenant_id: TenantId,
        kind: NotificationKind,
        _title: &str,
        _body: &str,
        _metadata: serde_json::Value,
    ) -> anyhow::Result<()> {
        self.notifications.lock().unwrap().push((tenant_id, kind));
        Ok(())
    }
}

struct TestEngine {
    engine: AutomationsEngine,
    triggers: Arc<InMemoryTriggerRepository>,
    runs: Arc<InMemoryRunRepository>,
    audit: InMemoryAuditLog,
    runtime_runs: Arc<Mutex<Vec<(RunId, usize)>>>,
    notifications: Arc<Mutex<Vec<(TenantId, NotificationKind)>>>,
}

async fn build_engine(runtime_delay_ms: u64, runtime_fails: bool) -> TestEngine {
    let triggers = Arc::new(InMemoryTriggerRepository::new());
    let workflows = Arc::new(InMemoryWorkflowRepository::new());
    let runs = Arc::new(InMemoryRunRepository::new());
    let audit = InMemoryAuditLog::new();
    let runtime_runs = Arc::new(Mutex::new(Vec::new()));
    let notifications = Arc::new(Mutex::new(Vec::new()));

    let engine = AutomationsEngine::new(
        triggers.clone(),
        workflows,
        runs.clone(),
        Arc::new(RecordingAgentRuntime {
            audit: audit.clone(),
            runs: runtime_runs.clone(),
            delay_ms: runtime_delay_ms,
            fail: runtime_fails,
        }),
        Arc::new(NoopWorkflowRuntime),
        Arc::new(audit.clone()),
        Arc::new(TracingAnalyticsSink::new()),
        Arc::new(RecordingNotifier {
            notifications: notifications.clone(),
        }),
    )
    .await;

    TestEngine {
        engine,
        triggers,
        runs,
        audit,
        runtime_runs,
        notifications,
    }
}

async fn wait_for(mut cond: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !cond() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not met within 2s");
}

fn plan_filter(plan: &str) -> EventFilter {
    let map = json!({ "plan": plan });
    EventFilter(map.as_object().expect("filter literal is an object").clone())
}

#[tokio::test]
async fn test_matching_event_creates_exactly_one_audited_run() {
    let harness = build_engine(0, false).await;
    let tenant = TenantId::new();

    let trigger = Trigger::new(
        tenant,
        UserId::new(),
        "welcome-enterprise",
        "user.created",
        AgentId::new(),
    )
    .with_filter(plan_filter("enterprise"))
    .with_input_template(json!({"task": "send a welcome note"}));
    harness.triggers.save(&trigger).await.expect("seed trigger");

    let event = TenantEvent::new(
        tenant,
        "user.created",
        json!({"plan": "enterprise", "email": "eng@corp.example"}),
    );
    harness.engine.emit(event).await;

    wait_for(|| !harness.runtime_runs.lock().unwrap().is_empty()).await;

    // Exactly one run, attributed to the trigger author and agent, with
    // the template merged over the event payload
    let runs = harness.runs.find_by_tenant(tenant).await.expect("list runs");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].user_id, trigger.user_id);
    assert_eq!(runs[0].agent_id, trigger.agent_id);
    assert_eq!(runs[0].status, RunStatus::Pending);
    assert_eq!(
        runs[0].input,
        json!({
            "task": "send a welcome note",
            "event": {"plan": "enterprise", "email": "eng@corp.example"}
        })
    );

    // Audit trail: receipt then firing, and the firing entry was already
    // recorded when the run started
    assert_eq!(
        harness.audit.actions(),
        vec!["automation.event.received", "automation.trigger.fired"]
    );
    let invocations = harness.runtime_runs.lock().unwrap();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].0, runs[0].id);
    assert_eq!(invocations[0].1, 1, "firing must be audited before the run starts");
}

#[tokio::test]
async fn test_non_matching_filter_leaves_only_receipt_audit() {
    let harness = build_engine(0, false).await;
    let tenant = TenantId::new();

    let trigger = Trigger::new(
        tenant,
        UserId::new(),
        "welcome-enterprise",
        "user.created",
        AgentId::new(),
    )
    .with_filter(plan_filter("enterprise"));
    harness.triggers.save(&trigger).await.expect("seed trigger");

    let event = TenantEvent::new(tenant, "user.created", json!({"plan": "free"}));
    harness.engine.emit(event).await;

    // Give any stray detached work a chance to run before asserting absence
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(harness.runs.find_by_tenant(tenant).await.expect("list runs").is_empty());
    assert!(harness.runtime_runs.lock().unwrap().is_empty());
    assert_eq!(harness.audit.actions(), vec!["automation.event.received"]);
}

#[tokio::test]
async fn test_cross_tenant_event_does_not_fire_trigger() {
    let harness = build_engine(0, false).await;
    let owner = TenantId::new();
    let other = TenantId::new();

    let trigger = Trigger::new(owner, UserId::new(), "t", "user.created", AgentId::new());
    harness.triggers.save(&trigger).await.expect("seed trigger");

    let event = TenantEvent::new(other, "user.created", json!({}));
    harness.engine.emit(event).await;

    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(harness.runs.find_by_tenant(owner).await.expect("list runs").is_empty());
    assert!(harness.runtime_runs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_emit_returns_while_execution_still_in_flight() {
    let harness = build_engine(200, false).await;
    let tenant = TenantId::new();

    let trigger = Trigger::new(tenant, UserId::new(), "slow", "report.due", AgentId::new());
    harness.triggers.save(&trigger).await.expect("seed trigger");

    let event = TenantEvent::new(tenant, "report.due", json!({}));
    harness.engine.emit(event).await;

    // Emit came back while the runtime is still sleeping
    assert!(harness.runtime_runs.lock().unwrap().is_empty());

    wait_for(|| !harness.runtime_runs.lock().unwrap().is_empty()).await;
    assert_eq!(harness.runs.find_by_tenant(tenant).await.expect("list runs").len(), 1);
}

#[tokio::test]
async fn test_runtime_failure_notifies_workspace_without_failing_emit() {
    let harness = build_engine(0, true).await;
    let tenant = TenantId::new();

    let trigger = Trigger::new(tenant, UserId::new(), "doomed", "user.created", AgentId::new());
    harness.triggers.save(&trigger).await.expect("seed trigger");

    let event = TenantEvent::new(tenant, "user.created", json!({}));
    harness.engine.emit(event).await;

    wait_for(|| !harness.notifications.lock().unwrap().is_empty()).await;

    let notifications = harness.notifications.lock().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].0, tenant);
    assert_eq!(notifications[0].1, NotificationKind::TriggerFailed);
}
