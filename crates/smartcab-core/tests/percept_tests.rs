//! Integration tests for percepts and actions
//! Complements the inline unit tests in src/percept.rs and src/action.rs

use std::collections::HashSet;

use smartcab_core::{Action, Channel, Percept, Reading, SmartcabError, Waypoint};

#[test]
fn test_from_pairs_matches_sensed() {
    let parsed = Percept::from_pairs([
        ("right", "none"),
        ("light", "green"),
        ("left", "forward"),
        ("oncoming", "left"),
    ])
    .unwrap();

    let sensed = Percept::sensed(
        Reading::Green,
        Some(Waypoint::Left),
        Some(Waypoint::Forward),
        None,
    );
    assert_eq!(parsed, sensed);
    assert_eq!(parsed.to_string(), sensed.to_string());
}

#[test]
fn test_from_pairs_rejects_unknown_names() {
    let bad_channel = Percept::from_pairs([("light", "red"), ("weather", "rain")]);
    assert!(matches!(bad_channel, Err(SmartcabError::InvalidArgument(_))));

    let bad_reading = Percept::from_pairs([("light", "amber")]);
    assert!(matches!(bad_reading, Err(SmartcabError::InvalidArgument(_))));
}

#[test]
fn test_later_pair_wins() {
    let percept = Percept::from_pairs([("light", "red"), ("light", "green")]).unwrap();
    assert_eq!(percept.len(), 1);
    assert_eq!(percept.get(Channel::Light), Some(Reading::Green));
}

#[test]
fn test_display_is_order_independent() {
    let a = Percept::from_pairs([("light", "red"), ("oncoming", "none"), ("left", "right")]).unwrap();
    let b = Percept::from_pairs([("left", "right"), ("light", "red"), ("oncoming", "none")]).unwrap();
    assert_eq!(a.to_string(), b.to_string());
    assert_eq!(a.to_string(), "{light: red, oncoming: none, left: right}");
}

#[test]
fn test_percept_json_roundtrip() {
    let percept = Percept::sensed(Reading::Red, None, None, Some(Waypoint::Right))
        .with_hint(Some(Waypoint::Forward));

    let json = serde_json::to_string(&percept).unwrap();
    assert!(json.contains("\"next_waypoint\":\"forward\""));

    let back: Percept = serde_json::from_str(&json).unwrap();
    assert_eq!(back, percept);
}

#[test]
fn test_action_names_and_indices_are_distinct() {
    let names: HashSet<String> = Action::ALL.iter().map(ToString::to_string).collect();
    let indices: HashSet<usize> = Action::ALL.iter().map(|a| a.to_index()).collect();
    assert_eq!(names.len(), Action::COUNT);
    assert_eq!(indices.len(), Action::COUNT);

    for action in Action::ALL {
        assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        assert_eq!(Action::from_index(action.to_index()).unwrap(), action);
    }
}

#[test]
fn test_action_out_of_set_rejected() {
    assert!(matches!(
        "reverse".parse::<Action>(),
        Err(SmartcabError::InvalidArgument(_))
    ));
    assert!(matches!(
        Action::from_index(Action::COUNT),
        Err(SmartcabError::InvalidArgument(_))
    ));
}

#[test]
fn test_waypoints_are_moving_actions() {
    for waypoint in Waypoint::ALL {
        let action = Action::from(waypoint);
        assert_ne!(action, Action::None);
        assert_eq!(action.as_waypoint(), Some(waypoint));
    }
    assert_eq!(Action::None.as_waypoint(), None);
}
