// Copyright (c) 2026 Trellis Systems, Inc.
// SPDX-License-Identifier: AGPL-3.0
//! Execution context carried by every automation side effect.
//!
//! Downstream permission checks pattern-match on the variant: user-initiated
//! work carries the caller's actual workspace role, system-initiated work
//! (trigger firings, scheduled jobs) acts with full tenant privilege because
//! the configuration that caused it was authorized when it was created.

use serde::{Deserialize, Serialize};

use crate::domain::tenant::{TenantId, UserId, WorkspaceRole};

/// Identity and privilege under which a piece of work executes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionContext {
    /// A request made by a signed-in user with their actual role
    UserInitiated {
        tenant_id: TenantId,
        user_id: UserId,
        role: WorkspaceRole,
    },
    /// Work started by the platform itself, optionally attributed to the
    /// user whose configuration caused it
    SystemInitiated {
        tenant_id: TenantId,
        on_behalf_of: Option<UserId>,
    },
}

impl ExecutionContext {
    /// Context for a user acting with their own role
    pub fn user(tenant_id: TenantId, user_id: UserId, role: WorkspaceRole) -> Self {
        Self::UserInitiated {
            tenant_id,
            user_id,
            role,
        }
    }

    /// Elevated context for system-initiated work with no attributable user
    pub fn system(tenant_id: TenantId) -> Self {
        Self::SystemInitiated {
            tenant_id,
            on_behalf_of: None,
        }
    }

    /// Elevated context for system-initiated work attributed to the user
    /// whose configuration caused it
    pub fn system_on_behalf_of(tenant_id: TenantId, user_id: UserId) -> Self {
        Self::SystemInitiated {
            tenant_id,
            on_behalf_of: Some(user_id),
        }
    }

    pub fn tenant_id(&self) -> TenantId {
        match self {
            Self::UserInitiated { tenant_id, .. } => *tenant_id,
            Self::SystemInitiated { tenant_id, .. } => *tenant_id,
        }
    }

    /// The user this work is attributed to, when there is one
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::UserInitiated { user_id, .. } => Some(*user_id),
            Self::SystemInitiated { on_behalf_of, .. } => *on_behalf_of,
        }
    }

    /// Effective role for permission checks
    ///
    /// System-initiated work always acts as the workspace owner.
    pub fn effective_role(&self) -> WorkspaceRole {
        match self {
            Self::UserInitiated { role, .. } => *role,
            Self::SystemInitiated { .. } => WorkspaceRole::Owner,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Self::SystemInitiated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_context_is_elevated() {
        let tenant_id = TenantId::new();
        let user_id = UserId::new();
        let ctx = ExecutionContext::system_on_behalf_of(tenant_id, user_id);

        assert!(ctx.is_system());
        assert_eq!(ctx.tenant_id(), tenant_id);
        assert_eq!(ctx.user_id(), Some(user_id));
        assert_eq!(ctx.effective_role(), WorkspaceRole::Owner);
    }

    #[test]
    fn test_user_context_keeps_actual_role() {
        let ctx = ExecutionContext::user(TenantId::new(), UserId::new(), WorkspaceRole::Viewer);

        assert!(!ctx.is_system());
        assert_eq!(ctx.effective_role(), WorkspaceRole::Viewer);
        assert!(!ctx.effective_role().can_manage_automations());
    }

    #[test]
    fn test_system_context_without_user() {
        let ctx = ExecutionContext::system(TenantId::new());

        assert!(ctx.is_system());
        assert_eq!(ctx.user_id(), None);
        assert_eq!(ctx.effective_role(), WorkspaceRole::Owner);
    }
}
