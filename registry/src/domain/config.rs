// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Resolver configuration.
//!
//! Loaded from YAML by the embedding service, with environment variable
//! overrides applied on top so operators can steer the platform default
//! model without a config rollout.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::model::ModelConfig;

/// Configuration for the model resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Fallback configuration when no selector rung matches
    #[serde(default = "default_model")]
    pub default_model: ModelConfig,
    /// Flat fee charged per resolution, in USD
    #[serde(default)]
    pub resolution_fee: f64,
    /// Usage meter resolutions are charged against
    #[serde(default = "default_meter_key")]
    pub meter_key: String,
}

fn default_model() -> ModelConfig {
    ModelConfig::new("openai", "gpt-4o-mini", 128_000)
}

fn default_meter_key() -> String {
    "model_resolution".to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            resolution_fee: 0.0,
            meter_key: default_meter_key(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("TRELLIS_DEFAULT_PROVIDER") {
            tracing::info!("Environment override: TRELLIS_DEFAULT_PROVIDER={}", val);
            self.default_model.provider = val;
        }
        if let Ok(val) = std::env::var("TRELLIS_DEFAULT_MODEL") {
            tracing::info!("Environment override: TRELLIS_DEFAULT_MODEL={}", val);
            self.default_model.model = val;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.default_model.provider.is_empty() {
            anyhow::bail!("default_model.provider must not be empty");
        }
        if self.default_model.model.is_empty() {
            anyhow::bail!("default_model.model must not be empty");
        }
        if self.default_model.context_window == 0 {
            anyhow::bail!("default_model.context_window must be positive");
        }
        if self.resolution_fee < 0.0 {
            anyhow::bail!("resolution_fee must not be negative");
        }
        if self.meter_key.is_empty() {
            anyhow::bail!("meter_key must not be empty");
        }
        Ok(())
    }
}
