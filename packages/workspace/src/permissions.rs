//! Permission resolution consulted before every mutating operation.
//!
//! Resolution never fails: an unknown user, an empty member list, or a
//! missing role all collapse to the all-false check. The editor treats a
//! false `can_edit` as "render read-only", so no error surface exists
//! here by design.

use crate::member::WorkspaceMember;
use crate::role::{MemberRole, Permission};
use crate::workspace::Workspace;

/// Resolved view of what the current user may do in a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PermissionCheck {
    pub can_edit: bool,
    pub can_view: bool,
    pub can_comment: bool,
    pub can_invite: bool,
    pub can_manage_members: bool,
    pub can_delete: bool,
}

impl PermissionCheck {
    /// The no-access result.
    pub fn none() -> Self {
        Self::default()
    }

    fn from_parts(permissions: &[Permission], role: MemberRole) -> Self {
        let caps = role.capabilities();
        Self {
            can_edit: permissions.contains(&Permission::CanEdit),
            can_view: permissions.contains(&Permission::CanView),
            can_comment: permissions.contains(&Permission::CanComment),
            can_invite: caps.can_invite,
            can_manage_members: caps.can_manage_members,
            can_delete: caps.can_delete_workspace,
        }
    }
}

/// Resolve the permissions of `user_id` within `workspace`.
///
/// Prefers the workspace's current-user-scoped `role` field when the
/// backend supplied one; otherwise searches the member list. Misses
/// resolve to [`PermissionCheck::none`].
pub fn get_user_permissions(workspace: &Workspace, user_id: &str) -> PermissionCheck {
    if let Some(role) = workspace.role {
        return PermissionCheck::from_parts(role.default_permissions(), role);
    }

    match workspace.members.iter().find(|m| m.user_id == user_id) {
        Some(member) => PermissionCheck::from_parts(&member.permissions, member.role),
        None => PermissionCheck::none(),
    }
}

/// Whether `user_id` holds `permission` in `workspace` (member-set
/// lookup only, ignoring the scoped role field).
pub fn has_permission(workspace: &Workspace, user_id: &str, permission: Permission) -> bool {
    get_member(workspace, user_id)
        .map(|m| m.has_permission(permission))
        .unwrap_or(false)
}

pub fn can_edit(workspace: &Workspace, user_id: &str) -> bool {
    has_permission(workspace, user_id, Permission::CanEdit)
}

pub fn can_view(workspace: &Workspace, user_id: &str) -> bool {
    has_permission(workspace, user_id, Permission::CanView)
}

pub fn can_comment(workspace: &Workspace, user_id: &str) -> bool {
    has_permission(workspace, user_id, Permission::CanComment)
}

pub fn is_workspace_owner(workspace: &Workspace, user_id: &str) -> bool {
    if let Some(role) = workspace.role {
        return role == MemberRole::Owner;
    }
    workspace.owner_id == user_id
}

pub fn is_admin_or_owner(workspace: &Workspace, user_id: &str) -> bool {
    if let Some(role) = workspace.role {
        return matches!(role, MemberRole::Owner | MemberRole::Admin);
    }
    matches!(
        get_member_role(workspace, user_id),
        Some(MemberRole::Owner | MemberRole::Admin)
    )
}

pub fn get_member<'a>(workspace: &'a Workspace, user_id: &str) -> Option<&'a WorkspaceMember> {
    workspace.members.iter().find(|m| m.user_id == user_id)
}

pub fn get_member_role(workspace: &Workspace, user_id: &str) -> Option<MemberRole> {
    get_member(workspace, user_id).map(|m| m.role)
}

pub fn can_invite_members(workspace: &Workspace, user_id: &str) -> bool {
    get_member_role(workspace, user_id)
        .map(|r| r.capabilities().can_invite)
        .unwrap_or(false)
}

pub fn can_manage_members(workspace: &Workspace, user_id: &str) -> bool {
    get_member_role(workspace, user_id)
        .map(|r| r.capabilities().can_manage_members)
        .unwrap_or(false)
}

pub fn can_edit_settings(workspace: &Workspace, user_id: &str) -> bool {
    get_member_role(workspace, user_id)
        .map(|r| r.capabilities().can_edit_settings)
        .unwrap_or(false)
}
