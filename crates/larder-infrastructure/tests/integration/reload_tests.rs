//! Reloading a source

use crate::test_utils::{Probe, key, probe_registry, probe_source, probe_value};
use larder_domain::ResourceState;
use std::sync::Arc;

#[test]
fn test_identical_resubmission_rebuilds_everything() {
    let (registry, log) = probe_registry();
    let raw = probe_source(&[("x", "1"), ("y", "1")]);

    registry.update_source(key("a.json"), &raw).unwrap();
    let x_first = registry.get_as::<Probe>("x").unwrap();
    let managed_first = Arc::clone(registry.snapshot().entry("x").unwrap());

    let update = registry.update_source(key("a.json"), &raw).unwrap();
    let x_second = registry.get_as::<Probe>("x").unwrap();

    assert!(!Arc::ptr_eq(&x_first, &x_second));
    assert_eq!(log.inits("x@1"), 2);
    assert_eq!(log.inits("y@1"), 2);
    assert_eq!(update.closed, 2);
    assert_eq!(x_first.close_count(), 1);
    assert_eq!(x_second.close_count(), 0);
    assert_eq!(managed_first.state(), ResourceState::Closed);
}

#[test]
fn test_reload_replaces_source_map_wholesale() {
    let (registry, log) = probe_registry();
    registry
        .update_source(key("a.json"), &probe_source(&[("x", "1"), ("y", "1")]))
        .unwrap();

    let update = registry
        .update_source(key("a.json"), &probe_source(&[("y", "2"), ("w", "2")]))
        .unwrap();

    assert_eq!(
        update.resources.iter().map(String::as_str).collect::<Vec<_>>(),
        ["w", "y"]
    );
    assert!(registry.get("x").is_none());
    assert_eq!(probe_value(&registry, "y").as_deref(), Some("2"));
    assert_eq!(log.closes("x@1"), 1);
    assert_eq!(log.closes("y@1"), 1);
}

#[test]
fn test_generation_increases_per_publication() {
    let (registry, _log) = probe_registry();
    assert_eq!(registry.snapshot().generation(), 0);

    let first = registry
        .update_source(key("a.json"), &probe_source(&[("x", "1")]))
        .unwrap();
    let second = registry
        .update_source(key("b.json"), &probe_source(&[("z", "1")]))
        .unwrap();
    let removal = registry.remove_source(&key("a.json")).unwrap().unwrap();

    assert_eq!(first.generation, 1);
    assert_eq!(second.generation, 2);
    assert_eq!(removal.generation, 3);
    assert_eq!(registry.snapshot().generation(), 3);
}

#[test]
fn test_empty_document_clears_source() {
    let (registry, log) = probe_registry();
    registry
        .update_source(key("a.json"), &probe_source(&[("x", "1")]))
        .unwrap();

    let update = registry.update_source(key("a.json"), "").unwrap();

    assert!(update.resources.is_empty());
    assert!(registry.list_names().is_empty());
    assert_eq!(registry.source_keys(), [key("a.json")]);
    assert_eq!(log.closes("x@1"), 1);
}

#[test]
fn test_pinned_snapshot_is_unaffected_by_reload() {
    let (registry, _log) = probe_registry();
    registry
        .update_source(key("a.json"), &probe_source(&[("x", "1")]))
        .unwrap();
    let pinned = registry.snapshot();

    registry
        .update_source(key("a.json"), &probe_source(&[("y", "2")]))
        .unwrap();

    assert!(pinned.contains("x"));
    assert!(!pinned.contains("y"));
    assert!(registry.get("y").is_some());
}

#[test]
fn test_handle_follows_reloads() {
    let (registry, _log) = probe_registry();
    let handle = registry.handle("x");
    assert!(!handle.is_available());
    assert!(handle.get().is_none());

    registry
        .update_source(key("a.json"), &probe_source(&[("x", "1")]))
        .unwrap();
    assert_eq!(handle.get_as::<Probe>().unwrap().value(), "1");

    registry
        .update_source(key("a.json"), &probe_source(&[("x", "2")]))
        .unwrap();
    assert_eq!(handle.get_as::<Probe>().unwrap().value(), "2");
    assert_eq!(handle.name(), "x");

    registry.remove_source(&key("a.json")).unwrap();
    assert!(!handle.is_available());
}
