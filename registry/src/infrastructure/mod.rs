// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

pub mod billing;
pub mod repositories;

pub use billing::TracingUsageRecorder;
pub use repositories::{InMemoryDeploymentRepository, InMemoryModelRepository};
