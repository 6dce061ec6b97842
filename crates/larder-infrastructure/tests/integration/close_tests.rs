//! Closing the registry

use crate::test_utils::{Probe, key, probe_registry, probe_source, raw_source};
use larder_domain::Error;
use serde_json::json;

#[test]
fn test_close_closes_every_instance_exactly_once() {
    let (registry, log) = probe_registry();
    registry
        .update_source(key("a.json"), &probe_source(&[("x", "a"), ("y", "a")]))
        .unwrap();
    registry
        .update_source(key("b.json"), &probe_source(&[("y", "b"), ("z", "b")]))
        .unwrap();
    let visible: Vec<_> = ["x", "y", "z"]
        .iter()
        .map(|name| registry.get_as::<Probe>(name).unwrap())
        .collect();

    let closed = registry.close();

    assert_eq!(closed, 4, "three visible instances plus the shadowed one");
    for probe in &visible {
        assert_eq!(probe.close_count(), 1, "{}", probe.label());
    }
    assert_eq!(log.closes("y@a"), 1);
    assert!(registry.list_names().is_empty());
    assert!(registry.is_closed());
}

#[test]
fn test_close_is_idempotent() {
    let (registry, log) = probe_registry();
    registry
        .update_source(key("a.json"), &probe_source(&[("x", "1")]))
        .unwrap();

    assert_eq!(registry.close(), 1);
    assert_eq!(registry.close(), 0);
    drop(registry);
    assert_eq!(log.closes("x@1"), 1);
}

#[test]
fn test_close_after_all_sources_removed() {
    let (registry, log) = probe_registry();
    registry
        .update_source(key("a.json"), &probe_source(&[("x", "1")]))
        .unwrap();
    registry.remove_source(&key("a.json")).unwrap();

    assert_eq!(registry.close(), 0);
    assert_eq!(log.closes("x@1"), 1);
}

#[test]
fn test_failing_close_does_not_block_others() {
    let (registry, log) = probe_registry();
    let raw = raw_source(&[
        ("a", json!({ "type": "probe", "value": "1", "fail_close": true })),
        ("b", json!({ "type": "probe", "value": "1" })),
        ("c", json!({ "type": "probe", "value": "1", "fail_close": true })),
    ]);
    registry.update_source(key("a.json"), &raw).unwrap();

    assert_eq!(registry.close(), 3);
    assert_eq!(log.closes("a@1"), 1);
    assert_eq!(log.closes("b@1"), 1);
    assert_eq!(log.closes("c@1"), 1);
}

#[test]
fn test_updates_after_close_are_refused() {
    let (registry, log) = probe_registry();
    registry.close();

    let err = registry
        .update_source(key("a.json"), &probe_source(&[("x", "1")]))
        .unwrap_err();
    assert!(matches!(err, Error::RegistryClosed));
    assert!(matches!(
        registry.remove_source(&key("a.json")),
        Err(Error::RegistryClosed)
    ));
    assert_eq!(log.inits("x@1"), 0);
    assert!(registry.get("x").is_none());
}

#[test]
fn test_drop_closes_remaining_instances() {
    let (registry, log) = probe_registry();
    registry
        .update_source(key("a.json"), &probe_source(&[("x", "1"), ("y", "1")]))
        .unwrap();

    drop(registry);

    assert_eq!(log.total_closes(), 2);
}
