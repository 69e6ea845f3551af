// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Automations engine core.
//!
//! Receives tenant events and fans out the triggers and workflows configured
//! to react to them, without blocking the producer.
//!
//! # Architecture
//!
//! - **Layer:** Automations Engine
//! - **Purpose:** Event ingestion and trigger/workflow dispatch

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
