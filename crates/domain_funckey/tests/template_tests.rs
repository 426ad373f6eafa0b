//! Template tests over realistic device layouts

use domain_funckey::{
    AgentAction, ForwardKind, FuncKeyDestination, FuncKeyMapping, FuncKeyTemplate,
    FuncKeyValidator,
};
use pbx_kernel::{AgentId, CallFilterId, QueueId, UserId};
use proptest::prelude::*;

fn reception_template() -> FuncKeyTemplate {
    let mut template = FuncKeyTemplate::new("reception");
    template
        .add_key(FuncKeyMapping::new(1, FuncKeyDestination::User(UserId::new())).with_label("Boss"))
        .unwrap();
    template
        .add_key(FuncKeyMapping::new(2, FuncKeyDestination::Queue(QueueId::new())))
        .unwrap();
    template
        .add_key(FuncKeyMapping::new(3, FuncKeyDestination::Park))
        .unwrap();
    template
        .add_key(FuncKeyMapping::new(4, FuncKeyDestination::ParkPosition(701)))
        .unwrap();
    template
}

#[test]
fn test_reception_layout_validates() {
    let template = reception_template();
    let result = FuncKeyValidator::validate_template(&template);
    assert!(result.is_valid, "Errors: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "Warnings: {:?}", result.warnings);
}

#[test]
fn test_reorganizing_a_phone() {
    let mut template = reception_template();

    // Swap park and the parking position via a free slot
    template.move_key(3, 10).unwrap();
    template.move_key(4, 3).unwrap();
    template.move_key(10, 4).unwrap();

    assert_eq!(
        template.key_at(3).map(|k| k.destination.clone()),
        Some(FuncKeyDestination::ParkPosition(701))
    );
    assert_eq!(
        template.key_at(4).map(|k| k.destination.clone()),
        Some(FuncKeyDestination::Park)
    );

    let removed = template.remove_key(2).unwrap();
    assert_eq!(removed.destination.type_str(), "queue");
    assert!(template.key_at(2).is_none());
}

#[test]
fn test_agent_login_key_round_trips_through_columns() {
    let destination = FuncKeyDestination::Agent {
        agent_id: AgentId::new(),
        action: AgentAction::Login,
    };
    let rebuilt =
        FuncKeyDestination::from_columns(destination.type_str(), &destination.type_val()).unwrap();
    assert_eq!(rebuilt, destination);
    assert!(rebuilt.is_supervisable());
}

#[test]
fn test_filter_toggle_key_is_supervised() {
    let key = FuncKeyMapping::new(1, FuncKeyDestination::BsFilter(CallFilterId::new()));
    assert!(key.blf);
}

#[test]
fn test_forward_key_with_letters_rejected() {
    let mut template = FuncKeyTemplate::new("desk");
    template
        .add_key(FuncKeyMapping::new(
            1,
            FuncKeyDestination::Forward {
                kind: ForwardKind::NoAnswer,
                exten: Some("18oo".to_string()),
            },
        ))
        .unwrap();
    let result = FuncKeyValidator::validate_template(&template);
    assert!(!result.is_valid);
}

proptest! {
    #[test]
    fn positions_stay_sorted_and_unique(positions in proptest::collection::vec(1u16..40, 1..20)) {
        let mut template = FuncKeyTemplate::new("generated");
        let mut accepted = 0usize;
        for position in positions {
            if template
                .add_key(FuncKeyMapping::new(position, FuncKeyDestination::Park))
                .is_ok()
            {
                accepted += 1;
            }
        }

        prop_assert_eq!(template.keys.len(), accepted);
        for pair in template.keys.windows(2) {
            prop_assert!(pair[0].position < pair[1].position);
        }
    }

    #[test]
    fn conference_keys_round_trip(room in 0i32..100000) {
        let destination = FuncKeyDestination::Conference(room);
        let rebuilt = FuncKeyDestination::from_columns(
            destination.type_str(),
            &destination.type_val(),
        ).unwrap();
        prop_assert_eq!(rebuilt, destination);
    }
}
