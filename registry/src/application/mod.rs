// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

pub mod resolver;

pub use resolver::{ModelResolver, StandardModelResolver, UsageRecorder};
