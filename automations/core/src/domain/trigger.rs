// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::filter::EventFilter;
use crate::domain::tenant::{AgentId, TenantId, UserId};

/// Unique identifier for a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerId(pub Uuid);

impl TriggerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for TriggerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tenant-configured rule binding an event type and optional filter to an
/// automated agent run
///
/// Rows are owned by the workspace CRUD surface. The dispatch engine only
/// reads enabled rows matching an incoming event's type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    pub id: TriggerId,
    pub tenant_id: TenantId,
    /// User who configured the trigger; runs it fires are attributed to them
    pub user_id: UserId,
    pub name: String,
    /// Event type this trigger listens for, matched verbatim
    pub event_type: String,
    pub enabled: bool,
    /// Payload filter; empty means the trigger fires on every event of its
    /// type
    #[serde(default)]
    pub filter: EventFilter,
    /// Structured data shallow-merged with the live event payload to build
    /// the run input
    #[serde(default)]
    pub input_template: serde_json::Value,
    /// Agent the fired run is created against
    pub agent_id: AgentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trigger {
    pub fn new(
        tenant_id: TenantId,
        user_id: UserId,
        name: impl Into<String>,
        event_type: impl Into<String>,
        agent_id: AgentId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TriggerId::new(),
            tenant_id,
            user_id,
            name: name.into(),
            event_type: event_type.into(),
            enabled: true,
            filter: EventFilter::empty(),
            input_template: serde_json::Value::Null,
            agent_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_filter(mut self, filter: EventFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_input_template(mut self, template: serde_json::Value) -> Self {
        self.input_template = template;
        self
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.updated_at = Utc::now();
    }
}
