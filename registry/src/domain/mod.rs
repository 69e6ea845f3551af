// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

pub mod config;
pub mod deployment;
pub mod model;
pub mod repository;
pub mod resolution;
