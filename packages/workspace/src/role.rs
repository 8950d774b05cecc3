use serde::{Deserialize, Serialize};

/// Fine-grained action grant held per member, independent of role
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    CanEdit,
    CanView,
    CanComment,
}

/// Coarse privilege level. Total order of privilege is
/// owner > admin > member > guest, but capabilities are not strictly
/// nested (a member may invite yet not manage members).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
    Guest,
}

/// What administrative actions a role may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCapabilities {
    pub can_invite: bool,
    pub can_manage_members: bool,
    pub can_delete_workspace: bool,
    pub can_edit_settings: bool,
}

impl MemberRole {
    /// Default permission set granted when a member joins with this role.
    pub fn default_permissions(&self) -> &'static [Permission] {
        match self {
            MemberRole::Owner | MemberRole::Admin | MemberRole::Member => {
                &[Permission::CanEdit, Permission::CanView, Permission::CanComment]
            }
            MemberRole::Guest => &[Permission::CanView, Permission::CanComment],
        }
    }

    pub fn capabilities(&self) -> RoleCapabilities {
        match self {
            MemberRole::Owner => RoleCapabilities {
                can_invite: true,
                can_manage_members: true,
                can_delete_workspace: true,
                can_edit_settings: true,
            },
            MemberRole::Admin => RoleCapabilities {
                can_invite: true,
                can_manage_members: true,
                can_delete_workspace: false,
                can_edit_settings: true,
            },
            MemberRole::Member => RoleCapabilities {
                can_invite: true,
                can_manage_members: false,
                can_delete_workspace: false,
                can_edit_settings: false,
            },
            MemberRole::Guest => RoleCapabilities {
                can_invite: false,
                can_manage_members: false,
                can_delete_workspace: false,
                can_edit_settings: false,
            },
        }
    }
}
