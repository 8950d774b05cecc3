use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::role::{MemberRole, Permission};

/// Invitations live for seven days from creation.
const INVITATION_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Expired,
}

/// Input for creating an invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteMemberInput {
    pub workspace_id: String,
    pub email: String,
    pub role: MemberRole,
    pub permissions: Vec<Permission>,
    pub invited_by: String,
    pub invited_by_name: String,
}

/// A pending offer of membership. Created `pending`, transitions once to
/// `accepted` or `declined`; expiry is checked lazily against a supplied
/// instant rather than by a background timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceInvitation {
    pub id: String,
    pub workspace_id: String,
    pub email: String,
    pub role: MemberRole,
    pub permissions: Vec<Permission>,
    pub invited_by: String,
    pub invited_by_name: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    pub token: String,
}

impl WorkspaceInvitation {
    pub fn new(input: InviteMemberInput) -> Self {
        let now = Utc::now();
        Self {
            id: pagecraft_common::invitation_id(),
            workspace_id: input.workspace_id,
            email: input.email,
            role: input.role,
            permissions: input.permissions,
            invited_by: input.invited_by,
            invited_by_name: input.invited_by_name,
            status: InvitationStatus::Pending,
            created_at: now,
            expires_at: now + Duration::days(INVITATION_TTL_DAYS),
            accepted_at: None,
            token: pagecraft_common::invitation_token(),
        }
    }

    /// Whether the invitation can still be accepted at `at`: only a
    /// `pending` invitation within its expiry window is valid.
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        self.status == InvitationStatus::Pending && self.expires_at > at
    }

    /// Validity against the wall clock.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Accept a pending invitation. Returns false (leaving the
    /// invitation untouched) when it is not pending or already lapsed.
    pub fn accept_at(&mut self, at: DateTime<Utc>) -> bool {
        if !self.is_valid_at(at) {
            return false;
        }
        self.status = InvitationStatus::Accepted;
        self.accepted_at = Some(at);
        true
    }

    pub fn accept(&mut self) -> bool {
        self.accept_at(Utc::now())
    }

    /// Decline a pending invitation. Returns false when it is not
    /// pending.
    pub fn decline(&mut self) -> bool {
        if self.status != InvitationStatus::Pending {
            return false;
        }
        self.status = InvitationStatus::Declined;
        true
    }

    /// Lazily flip a lapsed pending invitation to `expired`. Returns
    /// whether the status changed.
    pub fn lapse_if_expired_at(&mut self, at: DateTime<Utc>) -> bool {
        if self.status == InvitationStatus::Pending && at > self.expires_at {
            self.status = InvitationStatus::Expired;
            true
        } else {
            false
        }
    }
}
