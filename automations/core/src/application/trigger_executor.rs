// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Trigger execution: turns a matched trigger plus the event that matched
//! it into a pending agent run and hands that run to the agent runtime.
//!
//! Runs this path creates are system-initiated on behalf of the trigger's
//! author, so downstream authorization checks pass without the author
//! being online. Errors propagate to the caller; the dispatcher owns
//! failure logging and tenant notification so each failure is surfaced
//! exactly once.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use crate::application::runtime::{AgentRuntime, RunOptions};
use crate::domain::context::ExecutionContext;
use crate::domain::event::TenantEvent;
use crate::domain::repository::RunRepository;
use crate::domain::run::Run;
use crate::domain::trigger::Trigger;

/// Launches agent runs for matched triggers
#[async_trait]
pub trait TriggerExecutor: Send + Sync {
    async fn execute(&self, trigger: &Trigger, event: &TenantEvent) -> anyhow::Result<()>;
}

/// Standard executor backed by the run repository and the agent runtime
pub struct StandardTriggerExecutor {
    run_repository: Arc<dyn RunRepository>,
    agent_runtime: Arc<dyn AgentRuntime>,
}

impl StandardTriggerExecutor {
    pub fn new(
        run_repository: Arc<dyn RunRepository>,
        agent_runtime: Arc<dyn AgentRuntime>,
    ) -> Self {
        Self {
            run_repository,
            agent_runtime,
        }
    }
}

#[async_trait]
impl TriggerExecutor for StandardTriggerExecutor {
    async fn execute(&self, trigger: &Trigger, event: &TenantEvent) -> anyhow::Result<()> {
        let input = build_run_input(trigger, event);
        let ctx = ExecutionContext::system_on_behalf_of(trigger.tenant_id, trigger.user_id);

        let run = Run::new(trigger.tenant_id, trigger.user_id, trigger.agent_id, input);
        self.run_repository
            .save(&run)
            .await
            .with_context(|| format!("Failed to create run for trigger {}", trigger.id))?;

        self.agent_runtime
            .multi_step_run(&ctx, run.id, RunOptions::default())
            .await
            .with_context(|| format!("Agent run {} failed for trigger {}", run.id, trigger.id))?;

        Ok(())
    }
}

/// Builds the run input: a shallow merge of the trigger's input template
/// with the event payload injected under the reserved "event" key. Template
/// keys win on conflict, except "event" which always holds the payload.
fn build_run_input(trigger: &Trigger, event: &TenantEvent) -> serde_json::Value {
    let mut merged = serde_json::Map::new();
    match &trigger.input_template {
        serde_json::Value::Object(template) => {
            merged.extend(template.clone());
        }
        serde_json::Value::Null => {}
        other => {
            debug!(
                trigger_id = %trigger.id,
                template_type = other_type_name(other),
                "Ignoring non-object trigger input template"
            );
        }
    }
    merged.insert("event".to_string(), event.payload.clone());
    serde_json::Value::Object(merged)
}

fn other_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::run::RunId;
    use crate::domain::tenant::{AgentId, TenantId, UserId};
    use crate::infrastructure::repositories::InMemoryRunRepository;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordedRun {
        ctx: ExecutionContext,
        run_id: RunId,
        options: RunOptions,
    }

    struct MockAgentRuntime {
        calls: Mutex<Vec<RecordedRun>>,
        fail: bool,
    }

    impl MockAgentRuntime {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl AgentRuntime for MockAgentRuntime {
        async fn multi_step_run(
            &self,
            ctx: &ExecutionContext,
            run_id: RunId,
            options: RunOptions,
        ) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(RecordedRun {
                ctx: ctx.clone(),
                run_id,
                options,
            });
            if self.fail {
                anyhow::bail!("model provider unreachable");
            }
            Ok(())
        }
    }

    fn trigger_with_template(template: serde_json::Value) -> Trigger {
        Trigger::new(
            TenantId::new(),
            UserId::new(),
            "notify-sales",
            "lead.created",
            AgentId::new(),
        )
        .with_input_template(template)
    }

    #[tokio::test]
    async fn test_execute_creates_pending_run_and_invokes_runtime() {
        let runs = Arc::new(InMemoryRunRepository::new());
        let runtime = Arc::new(MockAgentRuntime::new());
        let executor = StandardTriggerExecutor::new(runs.clone(), runtime.clone());

        let trigger = trigger_with_template(json!({"task": "qualify the lead"}));
        let event = TenantEvent::new(trigger.tenant_id, "lead.created", json!({"email": "a@b.c"}));

        executor.execute(&trigger, &event).await.unwrap();

        let calls = runtime.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].options, RunOptions::default());

        let stored = runs
            .find_by_id(trigger.tenant_id, calls[0].run_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, crate::domain::run::RunStatus::Pending);
        assert_eq!(stored.agent_id, trigger.agent_id);
        assert_eq!(
            stored.input,
            json!({"task": "qualify the lead", "event": {"email": "a@b.c"}})
        );
    }

    #[tokio::test]
    async fn test_execute_uses_system_context_on_behalf_of_author() {
        let runs = Arc::new(InMemoryRunRepository::new());
        let runtime = Arc::new(MockAgentRuntime::new());
        let executor = StandardTriggerExecutor::new(runs, runtime.clone());

        let trigger = trigger_with_template(json!({}));
        let event = TenantEvent::new(trigger.tenant_id, "lead.created", json!({}));

        executor.execute(&trigger, &event).await.unwrap();

        let calls = runtime.calls.lock().unwrap();
        assert!(calls[0].ctx.is_system());
        assert_eq!(calls[0].ctx.tenant_id(), trigger.tenant_id);
        assert_eq!(calls[0].ctx.user_id(), Some(trigger.user_id));
    }

    #[tokio::test]
    async fn test_execute_propagates_runtime_failure() {
        let runs = Arc::new(InMemoryRunRepository::new());
        let runtime = Arc::new(MockAgentRuntime::failing());
        let executor = StandardTriggerExecutor::new(runs.clone(), runtime);

        let trigger = trigger_with_template(json!({}));
        let event = TenantEvent::new(trigger.tenant_id, "lead.created", json!({}));

        let err = executor.execute(&trigger, &event).await.unwrap_err();
        assert!(err.to_string().contains(&trigger.id.to_string()));

        // The pending run was still created before the runtime failed
        let stored = runs.find_by_tenant(trigger.tenant_id).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_build_run_input_template_keys_win_except_event() {
        let trigger =
            trigger_with_template(json!({"task": "summarize", "event": "should be replaced"}));
        let event = TenantEvent::new(trigger.tenant_id, "doc.updated", json!({"doc_id": 7}));

        let input = build_run_input(&trigger, &event);
        assert_eq!(
            input,
            json!({"task": "summarize", "event": {"doc_id": 7}})
        );
    }

    #[test]
    fn test_build_run_input_ignores_non_object_template() {
        for template in [json!("just a string"), json!(42), json!([1, 2])] {
            let trigger = trigger_with_template(template);
            let event = TenantEvent::new(trigger.tenant_id, "doc.updated", json!({"doc_id": 7}));

            let input = build_run_input(&trigger, &event);
            assert_eq!(input, json!({"event": {"doc_id": 7}}));
        }
    }

    #[test]
    fn test_build_run_input_empty_template_still_carries_event() {
        let trigger = Trigger::new(
            TenantId::new(),
            UserId::new(),
            "t",
            "x.y",
            AgentId::new(),
        );
        let event = TenantEvent::new(trigger.tenant_id, "x.y", json!({"k": true}));

        let input = build_run_input(&trigger, &event);
        assert_eq!(input, json!({"event": {"k": true}}));
    }
}
