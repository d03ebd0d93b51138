//! Speaker permission filter.

use serde::{Deserialize, Serialize};

use crate::domain::RoleFlags;

/// Who may trigger speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionPolicy {
    /// Restrict speech to moderators (and optionally VIPs).
    pub only_privileged: bool,
    /// When restricted, also admit VIPs.
    pub vip_also_allowed: bool,
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self {
            only_privileged: true,
            vip_also_allowed: false,
        }
    }
}

/// Decide whether an author with `roles` may trigger speech.
///
/// With `only_privileged` off everyone is admitted and the VIP flag is
/// irrelevant.
pub const fn is_allowed(roles: RoleFlags, policy: PermissionPolicy) -> bool {
    !policy.only_privileged || roles.moderator || (policy.vip_also_allowed && roles.vip)
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn policy(only_privileged: bool, vip_also_allowed: bool) -> PermissionPolicy {
        PermissionPolicy {
            only_privileged,
            vip_also_allowed,
        }
    }

    #[test]
    fn unrestricted_admits_everyone() {
        for roles in [RoleFlags::NONE, RoleFlags::MODERATOR, RoleFlags::VIP] {
            assert!(is_allowed(roles, policy(false, false)));
            assert!(is_allowed(roles, policy(false, true)));
        }
    }

    #[test]
    fn restricted_admits_moderators_only() {
        let p = policy(true, false);
        assert!(is_allowed(RoleFlags::MODERATOR, p));
        assert!(!is_allowed(RoleFlags::VIP, p));
        assert!(!is_allowed(RoleFlags::NONE, p));
    }

    #[test]
    fn vip_flag_opens_the_gate_for_vips() {
        let p = policy(true, true);
        assert!(is_allowed(RoleFlags::VIP, p));
        assert!(is_allowed(RoleFlags::MODERATOR, p));
        assert!(!is_allowed(RoleFlags::NONE, p));
    }
}
