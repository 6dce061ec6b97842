//! Unit tests for the resource lifecycle state machine

use larder_domain::ResourceState;

const ALL: [ResourceState; 6] = [
    ResourceState::Defined,
    ResourceState::Initializing,
    ResourceState::Live,
    ResourceState::Superseded,
    ResourceState::Closing,
    ResourceState::Closed,
];

#[test]
fn test_forward_path_is_allowed() {
    for pair in ALL.windows(2) {
        assert!(
            pair[0].can_transition_to(pair[1]),
            "{:?} -> {:?} should be allowed",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_rollback_only_from_initializing() {
    assert!(ResourceState::Initializing.can_transition_to(ResourceState::Defined));
    assert!(!ResourceState::Live.can_transition_to(ResourceState::Defined));
    assert!(!ResourceState::Superseded.can_transition_to(ResourceState::Live));
}

#[test]
fn test_closed_is_terminal() {
    assert!(ResourceState::Closed.is_terminal());
    for next in ALL {
        assert!(!ResourceState::Closed.can_transition_to(next));
    }
}

#[test]
fn test_round_trip_discriminants() {
    for state in ALL {
        assert_eq!(ResourceState::from_u8(state as u8), Some(state));
    }
    assert_eq!(ResourceState::from_u8(42), None);
    assert_eq!(ResourceState::default(), ResourceState::Defined);
}
