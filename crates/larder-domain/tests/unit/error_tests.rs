//! Unit tests for domain error types

use larder_domain::Error;

#[test]
fn test_not_found_error() {
    let error = Error::not_found("ldap");
    assert!(error.is_not_found());
    match error {
        Error::NotFound { resource } => assert_eq!(resource, "ldap"),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_parse_error_mentions_source() {
    let error = Error::parse("/etc/larder/db.json", "expected a table");
    let display = error.to_string();
    assert!(display.contains("/etc/larder/db.json"));
    assert!(display.contains("expected a table"));
    assert!(!error.is_not_found());
}

#[test]
fn test_initialization_error_fields() {
    let error = Error::initialization("main_db", "database", "connection refused");
    match &error {
        Error::Initialization {
            name,
            type_tag,
            message,
            source,
        } => {
            assert_eq!(name, "main_db");
            assert_eq!(type_tag, "database");
            assert_eq!(message, "connection refused");
            assert!(source.is_none());
        }
        _ => panic!("Expected Initialization error"),
    }
    assert!(error.to_string().contains("main_db"));
}

#[test]
fn test_initialization_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "templates missing");
    let error = Error::initialization_with_source("pages", "handlebars", "cannot read", io);
    let source = std::error::Error::source(&error).expect("source should be kept");
    assert!(source.to_string().contains("templates missing"));
}

#[test]
fn test_unknown_resource_type_lists_available() {
    let error = Error::UnknownResourceType {
        type_tag: "ftp".to_string(),
        available: vec!["markdown".to_string(), "properties".to_string()],
    };
    let display = error.to_string();
    assert!(display.contains("ftp"));
    assert!(display.contains("markdown"));
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::type_mismatch("realm", "TableRealm");
    assert_eq!(error.to_string(), "Resource 'realm' is not a TableRealm");
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::other("disk gone");
    let error: Error = io.into();
    assert!(matches!(error, Error::IoSimple { .. }));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_err.into();
    assert!(matches!(error, Error::Json { .. }));
}

#[test]
fn test_registry_errors_display() {
    assert_eq!(
        Error::AlreadyStarted.to_string(),
        "Resource registry already started"
    );
    assert_eq!(Error::RegistryClosed.to_string(), "Resource registry is closed");
}
