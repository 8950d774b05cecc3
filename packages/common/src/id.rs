//! Opaque id generation for pagecraft entities.
//!
//! Every entity carries a prefixed string id (`block_…`, `page_…`, …) so
//! ids are self-describing in logs and API payloads. The suffix is a v4
//! UUID; ids are stable for the lifetime of the entity and never reused.

use uuid::Uuid;

fn prefixed(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Generate a unique id for a block.
pub fn block_id() -> String {
    prefixed("block")
}

/// Generate a unique id for a page.
pub fn page_id() -> String {
    prefixed("page")
}

/// Generate a unique id for a workspace.
pub fn workspace_id() -> String {
    prefixed("workspace")
}

/// Generate a unique id for a workspace member.
pub fn member_id() -> String {
    prefixed("member")
}

/// Generate a unique id for an invitation.
pub fn invitation_id() -> String {
    prefixed("invitation")
}

/// Generate a unique invitation token (longer-lived secret, distinct
/// from the invitation's id).
pub fn invitation_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let id1 = block_id();
        let id2 = block_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_ids_carry_entity_prefix() {
        assert!(block_id().starts_with("block_"));
        assert!(page_id().starts_with("page_"));
        assert!(workspace_id().starts_with("workspace_"));
        assert!(member_id().starts_with("member_"));
        assert!(invitation_id().starts_with("invitation_"));
    }

    #[test]
    fn test_token_is_not_an_id() {
        let token = invitation_token();
        assert!(!token.contains('_'));
        assert_eq!(token.len(), 64);
    }
}
