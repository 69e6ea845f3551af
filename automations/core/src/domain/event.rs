// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::tenant::TenantId;

/// Unique identifier for an ingested event, used for log and audit
/// correlation only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed, tenant-scoped notification that something happened
///
/// Transient: lives for the duration of one bus emit and is never persisted
/// by this crate. Persistence, if any, is an audit side effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantEvent {
    pub id: EventId,
    pub tenant_id: TenantId,
    /// Event type string, matched verbatim against trigger bindings
    pub event_type: String,
    pub payload: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
}

impl TenantEvent {
    pub fn new(
        tenant_id: TenantId,
        event_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: EventId::new(),
            tenant_id,
            event_type: event_type.into(),
            payload,
            occurred_at: Utc::now(),
        }
    }
}
