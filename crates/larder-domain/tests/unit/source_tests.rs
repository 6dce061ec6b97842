//! Unit tests for source keys and formats

use larder_domain::{SourceFormat, SourceKey};
use std::path::Path;

#[test]
fn test_source_key_ordering_is_bytewise() {
    let a = SourceKey::new("/etc/larder/a.json");
    let b = SourceKey::new("/etc/larder/b.json");
    assert!(a < b);
    assert_eq!(a.as_str(), "/etc/larder/a.json");
    assert_eq!(a.to_string(), "/etc/larder/a.json");
}

#[test]
fn test_source_key_from_missing_path_keeps_path() {
    let key = SourceKey::from_path("/definitely/not/here/tools.toml");
    assert_eq!(key.as_str(), "/definitely/not/here/tools.toml");
    assert_eq!(key.format(), SourceFormat::Toml);
}

#[test]
fn test_source_key_from_existing_path_is_canonical() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = dir.path().join("lib.json");
    std::fs::write(&file, "{}").expect("write");
    let relative_ish = dir.path().join(".").join("lib.json");

    let key = SourceKey::from_path(&relative_ish);
    let canonical = std::fs::canonicalize(&file).expect("canonicalize");
    assert_eq!(key.to_path(), canonical);
}

#[test]
fn test_format_from_extension() {
    assert_eq!(SourceFormat::from_path(Path::new("x.json")), SourceFormat::Json);
    assert_eq!(SourceFormat::from_path(Path::new("x.TOML")), SourceFormat::Toml);
    assert_eq!(SourceFormat::from_path(Path::new("x")), SourceFormat::Json);
    assert_eq!(SourceFormat::Toml.extension(), "toml");
}

#[test]
fn test_is_source_path() {
    assert!(SourceFormat::is_source_path(Path::new("/etc/a.json")));
    assert!(SourceFormat::is_source_path(Path::new("/etc/a.toml")));
    assert!(!SourceFormat::is_source_path(Path::new("/etc/a.json.swp")));
    assert!(!SourceFormat::is_source_path(Path::new("/etc/README")));
}
