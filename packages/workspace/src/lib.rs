//! # Pagecraft Workspace Model
//!
//! Tenancy and access control: workspaces, members, invitations, and the
//! role/permission tables every mutating operation is gated on.
//!
//! ## Core Principles
//!
//! 1. **Closed role tables**: role → permission and role → capability
//!    mappings are closed-form matches, not data
//! 2. **Permission checks never fail**: an unknown user or an empty
//!    member list resolves to the all-false check, never an error
//! 3. **Roles don't transition on their own**: role changes are explicit
//!    administrative operations, and the sole owner is immutable through
//!    them

mod invitation;
mod member;
mod permissions;
mod role;
mod workspace;

pub use invitation::{InvitationStatus, InviteMemberInput, WorkspaceInvitation};
pub use member::WorkspaceMember;
pub use permissions::{
    can_comment, can_edit, can_edit_settings, can_invite_members, can_manage_members, can_view,
    get_member, get_member_role, get_user_permissions, has_permission, is_admin_or_owner,
    is_workspace_owner, PermissionCheck,
};
pub use role::{MemberRole, Permission, RoleCapabilities};
pub use workspace::{
    CreateWorkspaceInput, MemberError, UpdateMemberInput, Workspace, WorkspaceSettings,
};
