//! The manager invariant: a team with members keeps at least one manager.

use super::types::TeamRole;

/// A proposed change to a single role record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    /// The record is deleted (remove or leave).
    Remove(i32),
    /// The record's role becomes `member`.
    Demote(i32),
}

impl RoleChange {
    fn record_id(self) -> i32 {
        match self {
            Self::Remove(id) | Self::Demote(id) => id,
        }
    }
}

/// Returns true if applying `change` to `members` would leave the team with
/// at least one member and no manager.
///
/// `members` must be every record of a single team.
pub fn leaves_team_without_manager(members: &[TeamRole], change: RoleChange) -> bool {
    let target = change.record_id();

    let remaining = members
        .iter()
        .filter(|r| !(matches!(change, RoleChange::Remove(_)) && r.id == target));

    let mut any_member = false;
    for record in remaining {
        any_member = true;
        let demoted = matches!(change, RoleChange::Demote(_)) && record.id == target;
        if record.is_manager() && !demoted {
            return false;
        }
    }

    any_member
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(id: i32, role: &str) -> TeamRole {
        TeamRole {
            id,
            team_id: 1,
            user_id: id * 10,
            role: role.to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_sole_manager_with_members_cannot_leave() {
        let members = vec![record(1, "manager"), record(2, "member")];
        assert!(leaves_team_without_manager(&members, RoleChange::Remove(1)));
    }

    #[test]
    fn test_sole_member_may_leave() {
        let members = vec![record(1, "manager")];
        assert!(!leaves_team_without_manager(&members, RoleChange::Remove(1)));
    }

    #[test]
    fn test_second_manager_allows_leave() {
        let members = vec![record(1, "manager"), record(2, "manager"), record(3, "member")];
        assert!(!leaves_team_without_manager(&members, RoleChange::Remove(1)));
    }

    #[test]
    fn test_member_leaving_is_always_fine() {
        let members = vec![record(1, "manager"), record(2, "member")];
        assert!(!leaves_team_without_manager(&members, RoleChange::Remove(2)));
    }

    #[test]
    fn test_demote_last_manager() {
        // demoting the only record still leaves a member behind
        let alone = vec![record(1, "manager")];
        assert!(leaves_team_without_manager(&alone, RoleChange::Demote(1)));

        let pair = vec![record(1, "manager"), record(2, "manager")];
        assert!(!leaves_team_without_manager(&pair, RoleChange::Demote(2)));
    }

    #[test]
    fn test_unknown_role_does_not_count_as_manager() {
        let members = vec![record(1, "manager"), record(2, "owner")];
        assert!(leaves_team_without_manager(&members, RoleChange::Remove(1)));
    }
}
