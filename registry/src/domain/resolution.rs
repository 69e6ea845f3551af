// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Resolution request and result types.

use serde::{Deserialize, Serialize};

use crate::domain::deployment::DeploymentId;
use crate::domain::model::{ModelConfig, ModelId, VersionId};

/// What the caller asked for. All fields optional; the resolver walks its
/// priority ladder over whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSelector {
    /// Pin to a specific deployment, strongest form of selection
    pub deployment_id: Option<DeploymentId>,
    /// Select a logical model
    pub model_id: Option<ModelId>,
    /// Select the deployment of `model_id` in this environment
    pub environment: Option<String>,
}

impl ModelSelector {
    /// Select nothing; resolution falls through to the configured default
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_deployment(deployment_id: DeploymentId) -> Self {
        Self {
            deployment_id: Some(deployment_id),
            ..Self::default()
        }
    }

    pub fn for_model(model_id: ModelId) -> Self {
        Self {
            model_id: Some(model_id),
            ..Self::default()
        }
    }

    pub fn for_environment(model_id: ModelId, environment: impl Into<String>) -> Self {
        Self {
            model_id: Some(model_id),
            environment: Some(environment.into()),
            ..Self::default()
        }
    }
}

/// Which rung of the priority ladder produced the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// A deployment's bound version
    Deployment,
    /// The model's latest frozen version
    Version,
    /// The model's unversioned current configuration
    Registry,
    /// The platform-configured default
    Default,
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionSource::Deployment => write!(f, "deployment"),
            ResolutionSource::Version => write!(f, "version"),
            ResolutionSource::Registry => write!(f, "registry"),
            ResolutionSource::Default => write!(f, "default"),
        }
    }
}

/// Provenance of a resolved configuration, for billing and debugging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionMetadata {
    pub source: ResolutionSource,
    pub deployment_id: Option<DeploymentId>,
    pub version_id: Option<VersionId>,
    pub model_id: Option<ModelId>,
    pub environment: Option<String>,
}

impl ResolutionMetadata {
    pub fn from_source(source: ResolutionSource) -> Self {
        Self {
            source,
            deployment_id: None,
            version_id: None,
            model_id: None,
            environment: None,
        }
    }
}

/// The resolver's answer: a concrete configuration plus where it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedModel {
    pub config: ModelConfig,
    pub metadata: ResolutionMetadata,
}
