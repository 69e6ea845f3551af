// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Persistence contracts for the automation configuration aggregates,
//! following the DDD Repository pattern: one repository per aggregate,
//! interface defined in the domain layer, implemented in
//! `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `TriggerRepository` | `Trigger` | `InMemoryTriggerRepository` |
//! | `WorkflowRepository` | `Workflow` | `InMemoryWorkflowRepository` |
//! | `RunRepository` | `Run` | `InMemoryRunRepository` |
//!
//! Every query method takes a `TenantId`; there is no unscoped read path,
//! which makes cross-tenant dispatch structurally impossible rather than a
//! matter of call-site discipline. Trigger and Workflow rows are owned by
//! the workspace CRUD surface; this engine only reads them.

use async_trait::async_trait;

use crate::domain::run::{Run, RunId};
use crate::domain::tenant::TenantId;
use crate::domain::trigger::{Trigger, TriggerId};
use crate::domain::workflow::{Workflow, WorkflowId};

/// Repository interface for Trigger configuration rows
#[async_trait]
pub trait TriggerRepository: Send + Sync {
    /// Save trigger (create or update)
    async fn save(&self, trigger: &Trigger) -> Result<(), RepositoryError>;

    /// Find trigger by id within a tenant
    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: TriggerId,
    ) -> Result<Option<Trigger>, RepositoryError>;

    /// Find enabled triggers listening for an event type, exact match
    async fn find_enabled_by_event_type(
        &self,
        tenant_id: TenantId,
        event_type: &str,
    ) -> Result<Vec<Trigger>, RepositoryError>;

    /// Delete trigger by id within a tenant
    async fn delete(&self, tenant_id: TenantId, id: TriggerId) -> Result<(), RepositoryError>;
}

/// Repository interface for Workflow configuration rows
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// Save workflow (create or update)
    async fn save(&self, workflow: &Workflow) -> Result<(), RepositoryError>;

    /// Find workflow by id within a tenant
    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: WorkflowId,
    ) -> Result<Option<Workflow>, RepositoryError>;

    /// Find enabled workflows bound to an event type, exact match
    async fn find_enabled_by_trigger_type(
        &self,
        tenant_id: TenantId,
        trigger_type: &str,
    ) -> Result<Vec<Workflow>, RepositoryError>;

    /// Delete workflow by id within a tenant
    async fn delete(&self, tenant_id: TenantId, id: WorkflowId) -> Result<(), RepositoryError>;
}

/// Repository interface for Run records
///
/// The dispatch engine only creates the initial `Pending` row; the agent
/// execution service owns the record afterwards.
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Save run (create or update)
    async fn save(&self, run: &Run) -> Result<(), RepositoryError>;

    /// Find run by id within a tenant
    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: RunId,
    ) -> Result<Option<Run>, RepositoryError>;

    /// List all runs for a tenant
    async fn find_by_tenant(&self, tenant_id: TenantId) -> Result<Vec<Run>, RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}
