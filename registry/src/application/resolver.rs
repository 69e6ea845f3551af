// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Model resolution.
//!
//! Walks the selector priority ladder until a rung produces a concrete
//! configuration:
//!
//! 1. Pinned deployment
//! 2. Deployment of (model, environment)
//! 3. The model's latest frozen version
//! 4. The model's unversioned current configuration
//! 5. The platform default from `ResolverConfig`
//!
//! A failed or empty lookup on any rung logs a warning and falls through
//! to the next rung; resolution itself never fails. Every resolution is
//! charged once against the configured usage meter, best-effort.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use trellis_automations_core::domain::context::ExecutionContext;

use crate::domain::config::ResolverConfig;
use crate::domain::deployment::{Deployment, DeploymentId};
use crate::domain::model::ModelId;
use crate::domain::repository::{DeploymentRepository, ModelRepository};
use crate::domain::resolution::{
    ModelSelector, ResolutionMetadata, ResolutionSource, ResolvedModel,
};

/// Resolves a selector to a concrete model configuration
#[async_trait]
pub trait ModelResolver: Send + Sync {
    async fn resolve(
        &self,
        ctx: &ExecutionContext,
        selector: &ModelSelector,
    ) -> anyhow::Result<ResolvedModel>;
}

/// Usage metering for billable registry operations
#[async_trait]
pub trait UsageRecorder: Send + Sync {
    async fn record_usage(
        &self,
        ctx: &ExecutionContext,
        meter_key: &str,
        quantity: u64,
        cost: f64,
        metadata: serde_json::Value,
    ) -> anyhow::Result<()>;
}

/// Standard resolver over the registry repositories
pub struct StandardModelResolver {
    models: Arc<dyn ModelRepository>,
    deployments: Arc<dyn DeploymentRepository>,
    usage: Arc<dyn UsageRecorder>,
    config: ResolverConfig,
}

impl StandardModelResolver {
    pub fn new(
        models: Arc<dyn ModelRepository>,
        deployments: Arc<dyn DeploymentRepository>,
        usage: Arc<dyn UsageRecorder>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            models,
            deployments,
            usage,
            config,
        }
    }

    async fn walk_ladder(
        &self,
        ctx: &ExecutionContext,
        selector: &ModelSelector,
    ) -> ResolvedModel {
        if let Some(deployment_id) = selector.deployment_id {
            if let Some(resolved) = self.try_pinned_deployment(ctx, deployment_id).await {
                return resolved;
            }
        }

        if let Some(model_id) = selector.model_id {
            if let Some(environment) = selector.environment.as_deref() {
                if let Some(resolved) = self
                    .try_environment_deployment(ctx, model_id, environment)
                    .await
                {
                    return resolved;
                }
            }

            if let Some(resolved) = self.try_latest_version(ctx, model_id).await {
                return resolved;
            }

            if let Some(resolved) = self.try_current_config(ctx, model_id).await {
                return resolved;
            }
        }

        debug!(
            tenant_id = %ctx.tenant_id(),
            model = %self.config.default_model.model,
            "No selector rung matched, using platform default model"
        );
        ResolvedModel {
            config: self.config.default_model.clone(),
            metadata: ResolutionMetadata::from_source(ResolutionSource::Default),
        }
    }

    async fn try_pinned_deployment(
        &self,
        ctx: &ExecutionContext,
        deployment_id: DeploymentId,
    ) -> Option<ResolvedModel> {
        match self
            .deployments
            .find_by_id(ctx.tenant_id(), deployment_id)
            .await
        {
            Ok(Some(deployment)) => self.resolve_deployment(ctx, &deployment).await,
            Ok(None) => {
                warn!(
                    tenant_id = %ctx.tenant_id(),
                    deployment_id = %deployment_id,
                    "Pinned deployment not found, continuing resolution"
                );
                None
            }
            Err(e) => {
                warn!(
                    tenant_id = %ctx.tenant_id(),
                    deployment_id = %deployment_id,
                    error = %e,
                    "Deployment lookup failed, continuing resolution"
                );
                None
            }
        }
    }

    async fn try_environment_deployment(
        &self,
        ctx: &ExecutionContext,
        model_id: ModelId,
        environment: &str,
    ) -> Option<ResolvedModel> {
        match self
            .deployments
            .find_by_model_and_environment(ctx.tenant_id(), model_id, environment)
            .await
        {
            Ok(Some(deployment)) => self.resolve_deployment(ctx, &deployment).await,
            Ok(None) => None,
            Err(e) => {
                warn!(
                    tenant_id = %ctx.tenant_id(),
                    model_id = %model_id,
                    environment = environment,
                    error = %e,
                    "Environment deployment lookup failed, continuing resolution"
                );
                None
            }
        }
    }

    /// A deployment resolves through the version it is bound to. A
    /// deployment pointing at a missing version is treated as no match.
    async fn resolve_deployment(
        &self,
        ctx: &ExecutionContext,
        deployment: &Deployment,
    ) -> Option<ResolvedModel> {
        match self
            .models
            .find_version_by_id(ctx.tenant_id(), deployment.version_id)
            .await
        {
            Ok(Some(version)) => {
                debug!(
                    tenant_id = %ctx.tenant_id(),
                    deployment_id = %deployment.id,
                    version = version.version_number,
                    "Resolved model through deployment"
                );
                Some(ResolvedModel {
                    config: version.config,
                    metadata: ResolutionMetadata {
                        source: ResolutionSource::Deployment,
                        deployment_id: Some(deployment.id),
                        version_id: Some(version.id),
                        model_id: Some(deployment.model_id),
                        environment: Some(deployment.environment.clone()),
                    },
                })
            }
            Ok(None) => {
                warn!(
                    tenant_id = %ctx.tenant_id(),
                    deployment_id = %deployment.id,
                    version_id = %deployment.version_id,
                    "Deployment references a missing version, continuing resolution"
                );
                None
            }
            Err(e) => {
                warn!(
                    tenant_id = %ctx.tenant_id(),
                    deployment_id = %deployment.id,
                    error = %e,
                    "Version lookup failed, continuing resolution"
                );
                None
            }
        }
    }

    async fn try_latest_version(
        &self,
        ctx: &ExecutionContext,
        model_id: ModelId,
    ) -> Option<ResolvedModel> {
        match self
            .models
            .find_latest_version(ctx.tenant_id(), model_id)
            .await
        {
            Ok(Some(version)) => {
                debug!(
                    tenant_id = %ctx.tenant_id(),
                    model_id = %model_id,
                    version = version.version_number,
                    "Resolved model through its latest version"
                );
                Some(ResolvedModel {
                    config: version.config,
                    metadata: ResolutionMetadata {
                        source: ResolutionSource::Version,
                        deployment_id: None,
                        version_id: Some(version.id),
                        model_id: Some(model_id),
                        environment: None,
                    },
                })
            }
            Ok(None) => None,
            Err(e) => {
                warn!(
                    tenant_id = %ctx.tenant_id(),
                    model_id = %model_id,
                    error = %e,
                    "Latest version lookup failed, continuing resolution"
                );
                None
            }
        }
    }

    async fn try_current_config(
        &self,
        ctx: &ExecutionContext,
        model_id: ModelId,
    ) -> Option<ResolvedModel> {
        match self.models.find_model_by_id(ctx.tenant_id(), model_id).await {
            Ok(Some(model)) => {
                debug!(
                    tenant_id = %ctx.tenant_id(),
                    model_id = %model_id,
                    "Resolved model through its unversioned configuration"
                );
                Some(ResolvedModel {
                    config: model.current_config,
                    metadata: ResolutionMetadata {
                        source: ResolutionSource::Registry,
                        deployment_id: None,
                        version_id: None,
                        model_id: Some(model_id),
                        environment: None,
                    },
                })
            }
            Ok(None) => {
                warn!(
                    tenant_id = %ctx.tenant_id(),
                    model_id = %model_id,
                    "Selected model not found, continuing resolution"
                );
                None
            }
            Err(e) => {
                warn!(
                    tenant_id = %ctx.tenant_id(),
                    model_id = %model_id,
                    error = %e,
                    "Model lookup failed, continuing resolution"
                );
                None
            }
        }
    }

    /// One flat charge per resolution, whatever rung answered. Billing is
    /// best-effort; a metering outage must not block run launches.
    async fn record_resolution_charge(&self, ctx: &ExecutionContext, resolved: &ResolvedModel) {
        let metadata = json!({
            "source": resolved.metadata.source.to_string(),
            "provider": resolved.config.provider,
            "model": resolved.config.model,
        });
        if let Err(e) = self
            .usage
            .record_usage(
                ctx,
                &self.config.meter_key,
                1,
                self.config.resolution_fee,
                metadata,
            )
            .await
        {
            warn!(
                tenant_id = %ctx.tenant_id(),
                meter_key = %self.config.meter_key,
                error = %e,
                "Failed to record model resolution usage"
            );
        }
    }
}

#[async_trait]
impl ModelResolver for StandardModelResolver {
    async fn resolve(
        &self,
        ctx: &ExecutionContext,
        selector: &ModelSelector,
    ) -> anyhow::Result<ResolvedModel> {
        let resolved = self.walk_ladder(ctx, selector).await;
        self.record_resolution_charge(ctx, &resolved).await;
        Ok(resolved)
    }
}
