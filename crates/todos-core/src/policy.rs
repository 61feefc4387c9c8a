//! Authorization policy - the single place ownership and role rules live.
//!
//! Every access point (single-record mutation, list scoping) consults this
//! module so the rules cannot drift between routes.

use uuid::Uuid;

use crate::domain::Role;

/// Whether a caller may read/update/delete a resource owned by `owner_id`.
///
/// Admins bypass the ownership check; everyone else must own the record.
/// Creation is never checked here because the creator is always the owner.
pub fn can_access(role: Role, caller_id: Uuid, owner_id: Uuid) -> bool {
    role.is_admin() || caller_id == owner_id
}

/// Query scope for listing todos.
///
/// Scoping is decided server-side before results leave the store; it is a
/// query decision, not a per-record filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoScope {
    /// Admin callers see every todo across all owners.
    All,
    /// Non-admin callers see only their own todos.
    Owner(Uuid),
}

impl TodoScope {
    pub fn for_caller(role: Role, caller_id: Uuid) -> Self {
        if role.is_admin() {
            TodoScope::All
        } else {
            TodoScope::Owner(caller_id)
        }
    }
}
