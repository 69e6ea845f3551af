// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Deployments: named bindings of a model/environment pair to one frozen
//! version. Repointing a deployment at a new version is how a tenant
//! promotes configuration through environments without touching the
//! consumers that reference it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trellis_automations_core::domain::tenant::TenantId;

use crate::domain::model::{ModelId, VersionId};

/// Unique identifier for a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeploymentId(pub Uuid);

impl DeploymentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for DeploymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live binding of (model, environment) to a version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: DeploymentId,
    pub tenant_id: TenantId,
    pub name: String,
    pub model_id: ModelId,
    /// Environment name, e.g. "production" or "staging"
    pub environment: String,
    /// The frozen version this deployment serves
    pub version_id: VersionId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deployment {
    pub fn new(
        tenant_id: TenantId,
        name: impl Into<String>,
        model_id: ModelId,
        environment: impl Into<String>,
        version_id: VersionId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: DeploymentId::new(),
            tenant_id,
            name: name.into(),
            model_id,
            environment: environment.into(),
            version_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Repoint the deployment at a different version
    pub fn promote(&mut self, version_id: VersionId) {
        self.version_id = version_id;
        self.updated_at = Utc::now();
    }
}
