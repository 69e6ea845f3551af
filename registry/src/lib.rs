// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Model and deployment registry.
//!
//! Resolves an abstract model request (a deployment pin, a model and
//! environment, or nothing at all) to the concrete provider configuration
//! a run should use, and meters each resolution for billing.
//!
//! # Architecture
//!
//! - **Layer:** Model Registry
//! - **Purpose:** Versioned model configuration and environment-aware resolution

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
