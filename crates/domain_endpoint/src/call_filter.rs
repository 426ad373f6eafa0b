//! Boss/secretary call filters
//!
//! A call filter interposes one or more secretaries between callers and a
//! boss. Membership is typed by role; the filtering question the rest of
//! the system asks is "does this secretary filter that boss", answered
//! here as a membership scan and in the repository as a join/count query.

use serde::{Deserialize, Serialize};

use pbx_kernel::{CallFilterId, UserId};

/// How filtered calls are distributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterStrategy {
    /// Ring the boss, then the secretaries one by one
    BossFirstSerial,
    /// Ring the boss and all secretaries together
    BossFirstSimult,
    /// Ring the secretaries one by one, never the boss
    SecretarySerial,
    /// Ring all secretaries together, never the boss
    SecretarySimult,
    /// Ring everyone at once
    All,
}

impl FilterStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterStrategy::BossFirstSerial => "bossfirst-serial",
            FilterStrategy::BossFirstSimult => "bossfirst-simult",
            FilterStrategy::SecretarySerial => "secretary-serial",
            FilterStrategy::SecretarySimult => "secretary-simult",
            FilterStrategy::All => "all",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bossfirst-serial" => Some(FilterStrategy::BossFirstSerial),
            "bossfirst-simult" => Some(FilterStrategy::BossFirstSimult),
            "secretary-serial" => Some(FilterStrategy::SecretarySerial),
            "secretary-simult" => Some(FilterStrategy::SecretarySimult),
            "all" => Some(FilterStrategy::All),
            _ => None,
        }
    }
}

/// Role of a user inside a call filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMemberRole {
    Boss,
    Secretary,
}

/// A call filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallFilter {
    pub id: CallFilterId,
    pub name: String,
    pub strategy: FilterStrategy,
    /// How long each step rings before moving on
    pub ring_seconds: u16,
    pub enabled: bool,
}

impl CallFilter {
    pub fn new(name: impl Into<String>, strategy: FilterStrategy) -> Self {
        Self {
            id: CallFilterId::new(),
            name: name.into(),
            strategy,
            ring_seconds: 20,
            enabled: true,
        }
    }
}

/// Membership of a user in a call filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFilterMember {
    pub filter_id: CallFilterId,
    pub user_id: UserId,
    pub role: FilterMemberRole,
    pub active: bool,
}

/// Returns true if some filter has `secretary` actively filtering `boss`
///
/// Both memberships must be active and belong to the same filter. This is
/// the in-memory twin of the repository's single join/count query.
///
/// # Arguments
///
/// * `boss` - The filtered user
/// * `secretary` - The filtering user
/// * `members` - Membership rows of the filters under consideration
pub fn does_secretary_filter_boss(
    boss: UserId,
    secretary: UserId,
    members: &[CallFilterMember],
) -> bool {
    members
        .iter()
        .filter(|m| m.active && m.role == FilterMemberRole::Boss && m.user_id == boss)
        .any(|boss_membership| {
            members.iter().any(|m| {
                m.active
                    && m.filter_id == boss_membership.filter_id
                    && m.role == FilterMemberRole::Secretary
                    && m.user_id == secretary
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(
        filter_id: CallFilterId,
        user_id: UserId,
        role: FilterMemberRole,
        active: bool,
    ) -> CallFilterMember {
        CallFilterMember {
            filter_id,
            user_id,
            role,
            active,
        }
    }

    #[test]
    fn test_secretary_filters_boss() {
        let filter = CallFilterId::new();
        let (boss, secretary) = (UserId::new(), UserId::new());
        let members = vec![
            member(filter, boss, FilterMemberRole::Boss, true),
            member(filter, secretary, FilterMemberRole::Secretary, true),
        ];
        assert!(does_secretary_filter_boss(boss, secretary, &members));
    }

    #[test]
    fn test_roles_are_directional() {
        let filter = CallFilterId::new();
        let (boss, secretary) = (UserId::new(), UserId::new());
        let members = vec![
            member(filter, boss, FilterMemberRole::Boss, true),
            member(filter, secretary, FilterMemberRole::Secretary, true),
        ];
        assert!(!does_secretary_filter_boss(secretary, boss, &members));
    }

    #[test]
    fn test_memberships_must_share_a_filter() {
        let (boss, secretary) = (UserId::new(), UserId::new());
        let members = vec![
            member(CallFilterId::new(), boss, FilterMemberRole::Boss, true),
            member(
                CallFilterId::new(),
                secretary,
                FilterMemberRole::Secretary,
                true,
            ),
        ];
        assert!(!does_secretary_filter_boss(boss, secretary, &members));
    }

    #[test]
    fn test_inactive_membership_does_not_filter() {
        let filter = CallFilterId::new();
        let (boss, secretary) = (UserId::new(), UserId::new());
        let members = vec![
            member(filter, boss, FilterMemberRole::Boss, true),
            member(filter, secretary, FilterMemberRole::Secretary, false),
        ];
        assert!(!does_secretary_filter_boss(boss, secretary, &members));
    }

    #[test]
    fn test_strategy_round_trip() {
        for s in [
            FilterStrategy::BossFirstSerial,
            FilterStrategy::BossFirstSimult,
            FilterStrategy::SecretarySerial,
            FilterStrategy::SecretarySimult,
            FilterStrategy::All,
        ] {
            assert_eq!(FilterStrategy::parse(s.as_str()), Some(s));
        }
    }
}
