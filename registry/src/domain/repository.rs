// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Persistence contracts for registry aggregates. As elsewhere in the
//! platform, every query takes a `TenantId`; registry rows are never
//! visible across tenant boundaries.

use async_trait::async_trait;

use trellis_automations_core::domain::tenant::TenantId;

use crate::domain::deployment::{Deployment, DeploymentId};
use crate::domain::model::{Model, ModelId, ModelVersion, VersionId};

/// Repository interface for models and their frozen versions
#[async_trait]
pub trait ModelRepository: Send + Sync {
    /// Save model (create or update)
    async fn save_model(&self, model: &Model) -> Result<(), RegistryError>;

    /// Find model by id within a tenant
    async fn find_model_by_id(
        &self,
        tenant_id: TenantId,
        id: ModelId,
    ) -> Result<Option<Model>, RegistryError>;

    /// Save a frozen version
    async fn save_version(&self, version: &ModelVersion) -> Result<(), RegistryError>;

    /// Find a frozen version by id within a tenant
    async fn find_version_by_id(
        &self,
        tenant_id: TenantId,
        id: VersionId,
    ) -> Result<Option<ModelVersion>, RegistryError>;

    /// The model's version with the highest version number
    async fn find_latest_version(
        &self,
        tenant_id: TenantId,
        model_id: ModelId,
    ) -> Result<Option<ModelVersion>, RegistryError>;
}

/// Repository interface for deployments
#[async_trait]
pub trait DeploymentRepository: Send + Sync {
    /// Save deployment (create or update)
    async fn save(&self, deployment: &Deployment) -> Result<(), RegistryError>;

    /// Find deployment by id within a tenant
    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: DeploymentId,
    ) -> Result<Option<Deployment>, RegistryError>;

    /// The deployment binding a model/environment pair, if one exists
    async fn find_by_model_and_environment(
        &self,
        tenant_id: TenantId,
        model_id: ModelId,
        environment: &str,
    ) -> Result<Option<Deployment>, RegistryError>;
}

/// Registry persistence errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Serialization(err.to_string())
    }
}
