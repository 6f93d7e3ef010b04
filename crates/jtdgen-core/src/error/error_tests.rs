#![allow(non_snake_case)]

use super::*;

#[test]
fn CodegenError___unresolved_reference___displays_both_names() {
    let err = CodegenError::UnresolvedReference {
        name: "Missing".into(),
        from: "Foo".into(),
    };

    let display = err.to_string();

    assert_eq!(
        display,
        "unresolved reference: `Foo` refers to missing definition `Missing`"
    );
}

#[test]
fn CodegenError___unresolved_reference___attributed_to_referring_definition() {
    let err = CodegenError::UnresolvedReference {
        name: "Missing".into(),
        from: "Foo".into(),
    };

    assert_eq!(err.definition(), Some("Foo"));
}

#[test]
fn CodegenError___depth_exceeded___displays_limit() {
    let err = CodegenError::SchemaCycleDepthExceeded {
        definition: "Deep".into(),
        depth: 9,
        limit: 8,
    };

    assert_eq!(
        err.to_string(),
        "schema nesting too deep in `Deep`: depth 9 exceeds limit 8"
    );
    assert_eq!(err.definition(), Some("Deep"));
}

#[test]
fn CodegenError___invalid_schema___has_no_definition() {
    let err = CodegenError::InvalidSchema("bad".into());

    assert!(err.definition().is_none());
}

#[test]
fn CodegenError___invariant___is_internal() {
    let err = CodegenError::invariant("Foo", "missing converter");

    assert!(err.is_internal());
    assert_eq!(
        err.to_string(),
        "internal invariant violated in `Foo`: missing converter"
    );
}

#[test]
fn CodegenError___all_variants___have_unique_codes() {
    let errors = vec![
        CodegenError::UnresolvedReference {
            name: "a".into(),
            from: "b".into(),
        },
        CodegenError::SchemaCycleDepthExceeded {
            definition: "a".into(),
            depth: 2,
            limit: 1,
        },
        CodegenError::NameRegistryExhausted {
            candidate: "a".into(),
            attempts: 1,
        },
        CodegenError::invariant("a", "b"),
        CodegenError::InvalidSchema("".into()),
        CodegenError::ConfigError("".into()),
        CodegenError::SerializationError("".into()),
    ];

    let codes: Vec<u32> = errors.iter().map(|e| e.error_code()).collect();
    let unique: std::collections::HashSet<u32> = codes.iter().copied().collect();

    assert_eq!(
        codes.len(),
        unique.len(),
        "All error codes should be unique"
    );
}

#[test]
fn CodegenError___from_serde_error___converts_to_serialization_error() {
    let json_err = serde_json::from_str::<String>("invalid").unwrap_err();

    let err: CodegenError = json_err.into();

    assert!(matches!(err, CodegenError::SerializationError(_)));
}

#[test]
fn CodegenError___from_toml_error___converts_to_config_error() {
    let toml_err = toml::from_str::<toml::Table>("= nope").unwrap_err();

    let err: CodegenError = toml_err.into();

    assert!(matches!(err, CodegenError::ConfigError(_)));
}
