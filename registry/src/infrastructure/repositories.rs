// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! In-memory registry repositories, the reference semantics for tenant
//! scoping and latest-version selection.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use trellis_automations_core::domain::tenant::TenantId;

use crate::domain::deployment::{Deployment, DeploymentId};
use crate::domain::model::{Model, ModelId, ModelVersion, VersionId};
use crate::domain::repository::{DeploymentRepository, ModelRepository, RegistryError};

#[derive(Clone)]
pub struct InMemoryModelRepository {
    models: Arc<RwLock<HashMap<ModelId, Model>>>,
    versions: Arc<RwLock<HashMap<VersionId, ModelVersion>>>,
}

impl InMemoryModelRepository {
    pub fn new() -> Self {
        Self {
            models: Arc::new(RwLock::new(HashMap::new())),
            versions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryModelRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelRepository for InMemoryModelRepository {
    async fn save_model(&self, model: &Model) -> Result<(), RegistryError> {
        let mut models = self.models.write().unwrap();
        models.insert(model.id, model.clone());
        Ok(())
    }

    async fn find_model_by_id(
        &self,
        tenant_id: TenantId,
        id: ModelId,
    ) -> Result<Option<Model>, RegistryError> {
        let models = self.models.read().unwrap();
        Ok(models
            .get(&id)
            .filter(|m| m.tenant_id == tenant_id)
            .cloned())
    }

    async fn save_version(&self, version: &ModelVersion) -> Result<(), RegistryError> {
        let mut versions = self.versions.write().unwrap();
        versions.insert(version.id, version.clone());
        Ok(())
    }

    async fn find_version_by_id(
        &self,
        tenant_id: TenantId,
        id: VersionId,
    ) -> Result<Option<ModelVersion>, RegistryError> {
        let versions = self.versions.read().unwrap();
        Ok(versions
            .get(&id)
            .filter(|v| v.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_latest_version(
        &self,
        tenant_id: TenantId,
        model_id: ModelId,
    ) -> Result<Option<ModelVersion>, RegistryError> {
        let versions = self.versions.read().unwrap();
        Ok(versions
            .values()
            .filter(|v| v.tenant_id == tenant_id && v.model_id == model_id)
            .max_by_key(|v| v.version_number)
            .cloned())
    }
}

#[derive(Clone)]
pub struct InMemoryDeploymentRepository {
    deployments: Arc<RwLock<HashMap<DeploymentId, Deployment>>>,
}

impl InMemoryDeploymentRepository {
    pub fn new() -> Self {
        Self {
            deployments: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryDeploymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeploymentRepository for InMemoryDeploymentRepository {
    async fn save(&self, deployment: &Deployment) -> Result<(), RegistryError> {
        let mut deployments = self.deployments.write().unwrap();
        deployments.insert(deployment.id, deployment.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: DeploymentId,
    ) -> Result<Option<Deployment>, RegistryError> {
        let deployments = self.deployments.read().unwrap();
        Ok(deployments
            .get(&id)
            .filter(|d| d.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_by_model_and_environment(
        &self,
        tenant_id: TenantId,
        model_id: ModelId,
        environment: &str,
    ) -> Result<Option<Deployment>, RegistryError> {
        let deployments = self.deployments.read().unwrap();
        Ok(deployments
            .values()
            .find(|d| {
                d.tenant_id == tenant_id && d.model_id == model_id && d.environment == environment
            })
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ModelConfig;

    fn model_for(tenant: TenantId) -> Model {
        Model::new(tenant, "m", ModelConfig::new("openai", "gpt-4o", 128_000))
    }

    #[tokio::test]
    async fn test_latest_version_ignores_insertion_order() {
        let repo = InMemoryModelRepository::new();
        let model = model_for(TenantId::new());
        repo.save_model(&model).await.unwrap();

        let v3 = ModelVersion::new(&model, 3, ModelConfig::new("openai", "v3", 1));
        let v1 = ModelVersion::new(&model, 1, ModelConfig::new("openai", "v1", 1));
        let v2 = ModelVersion::new(&model, 2, ModelConfig::new("openai", "v2", 1));
        repo.save_version(&v3).await.unwrap();
        repo.save_version(&v1).await.unwrap();
        repo.save_version(&v2).await.unwrap();

        let latest = repo
            .find_latest_version(model.tenant_id, model.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.version_number, 3);
        assert_eq!(latest.id, v3.id);
    }

    #[tokio::test]
    async fn test_versions_are_tenant_scoped() {
        let repo = InMemoryModelRepository::new();
        let model = model_for(TenantId::new());
        repo.save_model(&model).await.unwrap();
        let v1 = ModelVersion::new(&model, 1, ModelConfig::new("openai", "v1", 1));
        repo.save_version(&v1).await.unwrap();

        let other_tenant = TenantId::new();
        assert!(repo
            .find_version_by_id(other_tenant, v1.id)
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_latest_version(other_tenant, model.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_deployment_lookup_by_model_and_environment() {
        let repo = InMemoryDeploymentRepository::new();
        let tenant = TenantId::new();
        let model_id = ModelId::new();

        let prod = Deployment::new(tenant, "prod", model_id, "production", VersionId::new());
        let staging = Deployment::new(tenant, "stg", model_id, "staging", VersionId::new());
        repo.save(&prod).await.unwrap();
        repo.save(&staging).await.unwrap();

        let found = repo
            .find_by_model_and_environment(tenant, model_id, "production")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, prod.id);

        assert!(repo
            .find_by_model_and_environment(tenant, model_id, "qa")
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_by_model_and_environment(TenantId::new(), model_id, "production")
            .await
            .unwrap()
            .is_none());
    }
}
