// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

pub mod analytics;
pub mod audit;
pub mod event_bus;
pub mod notifications;
pub mod repositories;

pub use analytics::TracingAnalyticsSink;
pub use audit::{InMemoryAuditLog, TracingAuditLog};
pub use event_bus::{EventBus, EventListener};
pub use notifications::TracingWorkspaceNotifier;
pub use repositories::{InMemoryRunRepository, InMemoryTriggerRepository, InMemoryWorkflowRepository};
