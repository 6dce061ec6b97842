//! Definition parser tests

use larder_domain::{Error, SourceFormat, SourceKey};
use larder_infrastructure::DefinitionParser;
use serde_json::json;

fn parse(key: &str, raw: &str) -> larder_domain::Result<Vec<larder_domain::ResourceDefinition>> {
    DefinitionParser::new().parse(&SourceKey::new(key), raw)
}

#[test]
fn test_parse_json_source() {
    let raw = r#"{
        "resources": {
            "mailer": { "type": "smtp", "host": "localhost", "port": 25 },
            "templates": { "type": "handlebars", "options": { "strict": true } }
        }
    }"#;
    let definitions = parse("/etc/larder/app.json", raw).unwrap();

    assert_eq!(definitions.len(), 2);
    assert_eq!(definitions[0].name, "mailer");
    assert_eq!(definitions[0].type_tag, "smtp");
    assert_eq!(definitions[0].parameters.get_str("host"), Some("localhost"));
    assert_eq!(definitions[0].parameters.get_u64("port"), Some(25));
    assert!(!definitions[0].parameters.contains("type"));
    assert_eq!(
        definitions[1].parameters.get("options"),
        Some(&json!({ "strict": true }))
    );
}

#[test]
fn test_parse_keeps_document_order() {
    let raw = r#"{"resources":{"zeta":{"type":"t"},"alpha":{"type":"t"},"mid":{"type":"t"}}}"#;
    let names: Vec<_> = parse("order.json", raw)
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
}

#[test]
fn test_parse_toml_source() {
    let raw = r#"
[resources.greeting]
type = "properties"
text = "hello"

[resources.greeting.extra]
lang = "en"
"#;
    let definitions = parse("/etc/larder/app.toml", raw).unwrap();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].type_tag, "properties");
    assert_eq!(definitions[0].parameters.get_str("text"), Some("hello"));
    assert_eq!(
        definitions[0]
            .parameters
            .get_object("extra")
            .and_then(|extra| extra.get("lang")),
        Some(&json!("en"))
    );
}

#[test]
fn test_explicit_format_overrides_extension() {
    let parser = DefinitionParser::new();
    let raw = "[resources.a]\ntype = \"t\"\n";
    let definitions = parser
        .parse_as(&SourceKey::new("inline"), raw, SourceFormat::Toml)
        .unwrap();
    assert_eq!(definitions[0].name, "a");
}

#[test]
fn test_empty_documents_define_nothing() {
    for raw in ["", "   \n", "{}", r#"{"resources": null}"#, r#"{"resources": {}}"#, "null"] {
        assert!(parse("empty.json", raw).unwrap().is_empty(), "{raw:?}");
    }
    assert!(parse("empty.toml", "# nothing here\n").unwrap().is_empty());
}

#[test]
fn test_malformed_documents_are_parse_errors() {
    let cases = [
        "{ not json",
        "[1, 2]",
        r#"{"resources": [1]}"#,
        r#"{"resources": {"a": 3}}"#,
        r#"{"resources": {"a": {}}}"#,
        r#"{"resources": {"a": {"type": 7}}}"#,
        r#"{"resources": {"a": {"type": "  "}}}"#,
        r#"{"resources": {"": {"type": "t"}}}"#,
    ];
    for raw in cases {
        let err = parse("bad.json", raw).unwrap_err();
        assert!(
            matches!(&err, Error::Parse { source_key, .. } if source_key == "bad.json"),
            "{raw:?} gave {err}"
        );
    }
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = parse("bad.toml", "[resources\n").unwrap_err();
    assert!(matches!(err, Error::Parse { source: Some(_), .. }));
}
