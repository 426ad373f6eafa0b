//! Scenario tests for the endpoint domain
//!
//! Covers the user/line/extension association lifecycle and the
//! boss/secretary filtering rules across whole configurations.

use domain_endpoint::{
    does_secretary_filter_boss, AssociationSet, CallFilter, CallFilterMember, EndpointError,
    FilterMemberRole, FilterStrategy, Line, LineProtocol, User,
};
use pbx_kernel::{ExtensionId, UserId};

mod shared_line {
    use super::*;

    #[test]
    fn test_reception_desk_shares_one_line() {
        let morning = User::new("Ann", "Morning");
        let evening = User::new("Eve", "Night");
        let line = Line::new("reception", LineProtocol::Sip, "default");

        let mut associations = AssociationSet::default();
        associations.associate_user(morning.id, line.id).unwrap();
        associations.associate_user(evening.id, line.id).unwrap();

        assert_eq!(associations.main_user_of(line.id), Some(morning.id));
        assert_eq!(associations.users_of_line(line.id).len(), 2);

        // The desk line stays owned by the first user until the shift
        // worker is dissociated
        let err = associations.dissociate_user(morning.id, line.id).unwrap_err();
        assert!(matches!(err, EndpointError::MainUserHasSecondaries(_)));
    }

    #[test]
    fn test_extension_follows_line_not_user() {
        let user = User::new("Alice", "Wonder");
        let desk = Line::new("desk", LineProtocol::Sip, "default");
        let soft = Line::new("softphone", LineProtocol::Sip, "default");
        let exten = ExtensionId::new();

        let mut associations = AssociationSet::default();
        associations.associate_user(user.id, desk.id).unwrap();
        associations.associate_user(user.id, soft.id).unwrap();
        associations.associate_extension(desk.id, exten).unwrap();

        assert_eq!(associations.extensions_of_line(desk.id), vec![exten]);
        assert!(associations.extensions_of_line(soft.id).is_empty());
        assert_eq!(associations.main_line_of(user.id), Some(desk.id));
    }
}

mod filtering {
    use super::*;

    fn membership(
        filter: &CallFilter,
        user: UserId,
        role: FilterMemberRole,
    ) -> CallFilterMember {
        CallFilterMember {
            filter_id: filter.id,
            user_id: user,
            role,
            active: true,
        }
    }

    #[test]
    fn test_one_secretary_two_bosses() {
        let secretary = UserId::new();
        let (boss_a, boss_b) = (UserId::new(), UserId::new());

        let filter_a = CallFilter::new("boss-a", FilterStrategy::BossFirstSerial);
        let filter_b = CallFilter::new("boss-b", FilterStrategy::SecretarySimult);

        let members = vec![
            membership(&filter_a, boss_a, FilterMemberRole::Boss),
            membership(&filter_a, secretary, FilterMemberRole::Secretary),
            membership(&filter_b, boss_b, FilterMemberRole::Boss),
            membership(&filter_b, secretary, FilterMemberRole::Secretary),
        ];

        assert!(does_secretary_filter_boss(boss_a, secretary, &members));
        assert!(does_secretary_filter_boss(boss_b, secretary, &members));
        assert!(!does_secretary_filter_boss(boss_a, boss_b, &members));
    }

    #[test]
    fn test_unrelated_users_do_not_filter() {
        let filter = CallFilter::new("exec", FilterStrategy::BossFirstSimult);
        let members = vec![membership(&filter, UserId::new(), FilterMemberRole::Boss)];

        assert!(!does_secretary_filter_boss(
            UserId::new(),
            UserId::new(),
            &members
        ));
    }
}
