// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

pub mod tenant;
pub mod context;
pub mod event;
pub mod filter;
pub mod trigger;
pub mod workflow;
pub mod run;
pub mod repository;
