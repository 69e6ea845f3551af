// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

pub mod analytics;
pub mod audit;
pub mod dispatcher;
pub mod engine;
pub mod notifications;
pub mod resolver;
pub mod runtime;
pub mod trigger_executor;
pub mod workflow_executor;

pub use analytics::AnalyticsSink;
pub use audit::{AuditEntry, AuditError, AuditLog};
pub use dispatcher::StandardAutomationDispatcher;
pub use engine::AutomationsEngine;
pub use notifications::{NotificationKind, WorkspaceNotifier};
pub use resolver::{AutomationResolver, StandardAutomationResolver};
pub use runtime::{AgentRuntime, RunOptions, WorkflowRuntime};
pub use trigger_executor::{StandardTriggerExecutor, TriggerExecutor};
pub use workflow_executor::{StandardWorkflowExecutor, WorkflowExecutor};
