// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Logical models and their versioned configuration snapshots.
//!
//! A `Model` is a tenant's named entry in the registry and always carries
//! a current (unversioned) configuration. Publishing freezes that
//! configuration into a `ModelVersion`; deployments and resolution then
//! refer to versions, so edits to the current configuration never change
//! what a pinned consumer gets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trellis_automations_core::domain::tenant::TenantId;

/// Unique identifier for a logical model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(pub Uuid);

impl ModelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a frozen model version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionId(pub Uuid);

impl VersionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for VersionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Concrete provider configuration a run executes against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider identifier ("anthropic", "openai", "ollama", ...)
    pub provider: String,
    /// Provider-native model identifier
    pub model: String,
    /// Maximum context window, in tokens
    pub context_window: u32,
    /// Cost per 1K tokens in USD, 0.0 for local providers
    #[serde(default)]
    pub cost_per_1k_tokens: f64,
    /// Provider-specific generation parameters (temperature, top_p, ...)
    #[serde(default)]
    pub parameters: serde_json::Value,
}

impl ModelConfig {
    pub fn new(provider: impl Into<String>, model: impl Into<String>, context_window: u32) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            context_window,
            cost_per_1k_tokens: 0.0,
            parameters: serde_json::Value::Null,
        }
    }
}

/// A tenant's registered logical model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    pub tenant_id: TenantId,
    pub name: String,
    /// Working configuration; what unversioned resolution falls back to
    pub current_config: ModelConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    pub fn new(tenant_id: TenantId, name: impl Into<String>, current_config: ModelConfig) -> Self {
        let now = Utc::now();
        Self {
            id: ModelId::new(),
            tenant_id,
            name: name.into(),
            current_config,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An immutable configuration snapshot of a model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelVersion {
    pub id: VersionId,
    pub model_id: ModelId,
    pub tenant_id: TenantId,
    /// Monotonically increasing per model; highest is "latest"
    pub version_number: u32,
    pub config: ModelConfig,
    pub created_at: DateTime<Utc>,
}

impl ModelVersion {
    pub fn new(model: &Model, version_number: u32, config: ModelConfig) -> Self {
        Self {
            id: VersionId::new(),
            model_id: model.id,
            tenant_id: model.tenant_id,
            version_number,
            config,
            created_at: Utc::now(),
        }
    }
}
