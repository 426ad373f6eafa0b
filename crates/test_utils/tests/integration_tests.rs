//! Integration Tests for the PBX configuration system
//!
//! These tests verify cross-domain workflows and end-to-end scenarios
//! that involve multiple crates working together.

use test_utils::{
    assert_kind_count, assert_stats_sorted, assert_validation_fails, assert_validation_ok,
    CallCenterFixtures, DialplanFixtures, EndpointFixtures, TemporalFixtures, TestContextBuilder,
    TestQueueLogBuilder, TestUserBuilder,
};

mod provisioning_workflow {
    use super::*;
    use domain_dialplan::{DialplanValidator, Extension, ExtensionDestination, RangeKind};
    use domain_endpoint::AssociationSet;
    use pbx_kernel::ExtenNumber;

    /// Provisions a user end to end: pick a number, validate it, create the
    /// extension, wire user -> line -> extension.
    #[test]
    fn test_provision_user_with_line_and_extension() {
        let context = DialplanFixtures::internal_context();
        let user = TestUserBuilder::new().with_name("Alice", "Wonder").build();
        let line = EndpointFixtures::sip_line();

        // Pick the first free number in the user ranges
        let ranges: Vec<_> = context
            .ranges_of_kind(RangeKind::User)
            .into_iter()
            .copied()
            .collect();
        let number = DialplanValidator::first_available_exten(&ranges, &[1000, 1001])
            .expect("range has free slots");
        assert_eq!(number, 1002);

        let extension = Extension::new(
            ExtenNumber::parse(&number.to_string()).unwrap(),
            context.name.clone(),
            ExtensionDestination::User(user.id),
        );
        assert_validation_ok(&DialplanValidator::validate_extension(&extension, &context));

        let mut associations = AssociationSet::default();
        let user_line = associations.associate_user(user.id, line.id).unwrap();
        assert!(user_line.main_user);
        assert!(user_line.main_line);

        let line_exten = associations
            .associate_extension(line.id, extension.id)
            .unwrap();
        assert!(line_exten.main_extension);
    }

    /// A queue extension must land in the queue range, not the user range
    #[test]
    fn test_queue_number_rejected_in_user_range() {
        let context = DialplanFixtures::internal_context();
        let queue = CallCenterFixtures::support_queue();

        let extension = Extension::new(
            ExtenNumber::parse("1450").unwrap(),
            context.name.clone(),
            ExtensionDestination::Queue(queue.id),
        );
        assert_validation_fails(
            &DialplanValidator::validate_extension(&extension, &context),
            "outside",
        );
    }

    /// Contexts built for the office keep their declared ranges
    #[test]
    fn test_context_builder_roundtrip() {
        let context = TestContextBuilder::new("office")
            .with_user_range(2000, 2999)
            .with_queue_range(5000, 5099)
            .build();

        assert_validation_ok(&DialplanValidator::validate_context(&context));
        assert!(context.has_ranges_for(RangeKind::User));
    }
}

mod shared_line_rules {
    use super::*;
    use domain_endpoint::{AssociationSet, EndpointError};

    /// The owner of a shared line cannot be removed before the guests
    #[test]
    fn test_main_user_leaves_last() {
        let owner = EndpointFixtures::alice();
        let guest = EndpointFixtures::bob();
        let line = EndpointFixtures::sip_line();

        let mut associations = AssociationSet::default();
        associations.associate_user(owner.id, line.id).unwrap();
        associations.associate_user(guest.id, line.id).unwrap();

        let err = associations.dissociate_user(owner.id, line.id).unwrap_err();
        assert!(matches!(err, EndpointError::MainUserHasSecondaries(_)));

        associations.dissociate_user(guest.id, line.id).unwrap();
        associations.dissociate_user(owner.id, line.id).unwrap();
        assert!(associations.main_user_of(line.id).is_none());
    }
}

mod boss_secretary_filtering {
    use super::*;
    use domain_endpoint::{
        does_secretary_filter_boss, CallFilter, CallFilterMember, FilterMemberRole,
        FilterStrategy,
    };
    use domain_funckey::{FuncKeyDestination, FuncKeyMapping, FuncKeyTemplate, FuncKeyValidator};

    /// A secretary filters the boss, and the secretary's phone gets a
    /// supervised filter toggle key.
    #[test]
    fn test_filter_with_funckey_toggle() {
        let boss = EndpointFixtures::alice();
        let secretary = EndpointFixtures::bob();
        let filter = CallFilter::new("direction", FilterStrategy::BossFirstSerial);

        let members = vec![
            CallFilterMember {
                filter_id: filter.id,
                user_id: boss.id,
                role: FilterMemberRole::Boss,
                active: true,
            },
            CallFilterMember {
                filter_id: filter.id,
                user_id: secretary.id,
                role: FilterMemberRole::Secretary,
                active: true,
            },
        ];

        assert!(does_secretary_filter_boss(boss.id, secretary.id, &members));
        assert!(!does_secretary_filter_boss(secretary.id, boss.id, &members));

        let mut template = FuncKeyTemplate::new("secretary desk");
        template
            .add_key(FuncKeyMapping::new(
                1,
                FuncKeyDestination::BsFilter(filter.id),
            ))
            .unwrap();

        let key = template.key_at(1).unwrap();
        assert!(key.blf, "filter keys are supervised by default");
        assert_validation_ok(&FuncKeyValidator::validate_template(&template));
    }

    /// Deactivating the secretary's membership stops the filtering
    #[test]
    fn test_inactive_secretary_does_not_filter() {
        let boss = EndpointFixtures::alice();
        let secretary = EndpointFixtures::bob();
        let filter = CallFilter::new("direction", FilterStrategy::SecretarySimult);

        let members = vec![
            CallFilterMember {
                filter_id: filter.id,
                user_id: boss.id,
                role: FilterMemberRole::Boss,
                active: true,
            },
            CallFilterMember {
                filter_id: filter.id,
                user_id: secretary.id,
                role: FilterMemberRole::Secretary,
                active: false,
            },
        ];

        assert!(!does_secretary_filter_boss(boss.id, secretary.id, &members));
    }
}

mod queue_reporting {
    use super::*;
    use domain_callcenter::{aggregate_by_hour, QueueEventKind};

    /// A morning of traffic on two queues buckets per queue per hour
    #[test]
    fn test_hourly_buckets_across_queues() {
        let events = vec![
            TestQueueLogBuilder::new(
                TemporalFixtures::morning(),
                "support",
                QueueEventKind::Answered,
            )
            .with_agent("Agent/8001")
            .with_wait_time(10)
            .with_talk_time(120)
            .build(),
            TestQueueLogBuilder::new(
                TemporalFixtures::later_same_hour(),
                "support",
                QueueEventKind::Abandoned,
            )
            .with_wait_time(50)
            .build(),
            TestQueueLogBuilder::new(
                TemporalFixtures::next_hour(),
                "support",
                QueueEventKind::Answered,
            )
            .with_wait_time(5)
            .with_talk_time(30)
            .build(),
            TestQueueLogBuilder::new(
                TemporalFixtures::morning(),
                "sales",
                QueueEventKind::Timeout,
            )
            .build(),
        ];

        let stats = aggregate_by_hour(&events);
        assert_eq!(stats.len(), 3);
        assert_stats_sorted(&stats);

        // sales sorts before support
        assert_eq!(stats[0].queue, "sales");
        assert_kind_count(&stats[0], QueueEventKind::Timeout, 1);

        let support_morning = &stats[1];
        assert_kind_count(support_morning, QueueEventKind::Answered, 1);
        assert_kind_count(support_morning, QueueEventKind::Abandoned, 1);
        assert_eq!(support_morning.total_wait_time, 60);
        assert_eq!(support_morning.mean_wait_time(), Some(30.0));
        assert_eq!(support_morning.mean_talk_time(), Some(120.0));
    }

    /// Fixture events carry the shapes the PBX actually logs
    #[test]
    fn test_fixture_events_aggregate() {
        let events = vec![
            CallCenterFixtures::answered_event(TemporalFixtures::morning()),
            CallCenterFixtures::abandoned_event(TemporalFixtures::later_same_hour()),
        ];

        let stats = aggregate_by_hour(&events);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total(), 2);
        assert_eq!(stats[0].total_talk_time, 95);
    }
}

mod database_workflows {
    use super::*;
    use domain_dialplan::{Extension, ExtensionDestination};
    use infra_db::{DatabaseError, DialplanRepository, EndpointRepository, QueueLogRepository};
    use pbx_kernel::ExtenNumber;
    use test_utils::{create_isolated_test_database, get_shared_test_database};

    /// Extension uniqueness is enforced by the database, not a read-check
    #[tokio::test]
    #[ignore = "requires a local Docker daemon"]
    async fn test_duplicate_extension_rejected() {
        let db = create_isolated_test_database().await.unwrap();
        let dialplan = DialplanRepository::new(db.pool().clone());

        dialplan
            .create_context(&DialplanFixtures::internal_context())
            .await
            .unwrap();

        let first = Extension::new(
            ExtenNumber::parse("1000").unwrap(),
            "default",
            ExtensionDestination::Custom("s".to_string()),
        );
        dialplan.create_extension(&first).await.unwrap();

        let second = Extension::new(
            ExtenNumber::parse("1000").unwrap(),
            "default",
            ExtensionDestination::Custom("s".to_string()),
        );
        let err = dialplan.create_extension(&second).await.unwrap_err();
        assert!(matches!(err, DatabaseError::DuplicateEntry(_)));
    }

    /// The association rules hold across the repository too
    #[tokio::test]
    #[ignore = "requires a local Docker daemon"]
    async fn test_main_user_rule_in_database() {
        let db = create_isolated_test_database().await.unwrap();
        let dialplan = DialplanRepository::new(db.pool().clone());
        let endpoint = EndpointRepository::new(db.pool().clone());

        dialplan
            .create_context(&DialplanFixtures::internal_context())
            .await
            .unwrap();

        let owner = EndpointFixtures::alice();
        let guest = EndpointFixtures::bob();
        let line = EndpointFixtures::sip_line();
        endpoint.create_user(&owner).await.unwrap();
        endpoint.create_user(&guest).await.unwrap();
        endpoint.create_line(&line).await.unwrap();

        let assoc = endpoint.associate_user_line(owner.id, line.id).await.unwrap();
        assert!(assoc.main_user);
        let assoc = endpoint.associate_user_line(guest.id, line.id).await.unwrap();
        assert!(!assoc.main_user);

        let err = endpoint
            .dissociate_user_line(owner.id, line.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::AssociationRule(_)));

        endpoint.dissociate_user_line(guest.id, line.id).await.unwrap();
        endpoint.dissociate_user_line(owner.id, line.id).await.unwrap();
    }

    /// A user who never rings (ring_seconds 0) passes validation and the
    /// schema alike
    #[tokio::test]
    #[ignore = "requires a local Docker daemon"]
    async fn test_zero_ring_seconds_stored() {
        use domain_endpoint::EndpointValidator;

        let db = create_isolated_test_database().await.unwrap();
        let endpoint = EndpointRepository::new(db.pool().clone());

        let mut user = TestUserBuilder::new().with_name("Dora", "Bell").build();
        user.ring_seconds = 0;
        assert!(EndpointValidator::validate_user(&user).is_valid);

        endpoint.create_user(&user).await.unwrap();
        let stored = endpoint.get_user(user.id).await.unwrap();
        assert_eq!(stored.ring_seconds, 0);
    }

    /// The SQL aggregation matches the in-memory one
    #[tokio::test]
    #[ignore = "requires a local Docker daemon"]
    async fn test_hourly_stats_match_in_memory() {
        use domain_callcenter::aggregate_by_hour;

        let db = get_shared_test_database().await;
        db.reset().await.unwrap();
        let queue_log = QueueLogRepository::new(db.pool().clone());

        let events = vec![
            CallCenterFixtures::answered_event(TemporalFixtures::morning()),
            CallCenterFixtures::abandoned_event(TemporalFixtures::later_same_hour()),
            CallCenterFixtures::answered_event(TemporalFixtures::next_hour()),
        ];
        for event in &events {
            queue_log.insert_event(event).await.unwrap();
        }

        let from_sql = queue_log
            .hourly_stats(TemporalFixtures::day_start(), TemporalFixtures::day_end())
            .await
            .unwrap();
        let in_memory = aggregate_by_hour(&events);

        assert_eq!(from_sql, in_memory);
    }
}
