use super::{load_settings, settings_stub, validate_settings, Settings, SETTINGS_SCHEMA_VERSION};
use std::io::Write;

#[test]
fn stub_round_trips_to_defaults() {
    let stub = settings_stub().expect("stub");
    let parsed: Settings = serde_json::from_str(&stub).expect("parse stub");
    assert_eq!(parsed, Settings::default());
}

#[test]
fn partial_settings_fill_defaults() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(br#"{ "constant_prefix": "CL_", "compatibility": { "no_bool_parameters": true } }"#)
        .expect("write settings");
    let settings = load_settings(file.path()).expect("load settings");
    assert_eq!(settings.constant_prefix, "CL_");
    assert_eq!(settings.enum_prefix, "GL_");
    assert_eq!(settings.schema_version, SETTINGS_SCHEMA_VERSION);
    assert!(settings.compatibility.no_bool_parameters);
    assert!(!settings.compatibility.no_advanced_enum_processing);
}

#[test]
fn unknown_fields_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(br#"{ "constant_prefx": "CL_" }"#)
        .expect("write settings");
    assert!(load_settings(file.path()).is_err());
}

#[test]
fn rejects_bad_schema_and_tokens() {
    let settings = Settings {
        schema_version: 99,
        ..Settings::default()
    };
    let err = validate_settings(&settings).expect_err("schema mismatch");
    assert!(err.to_string().contains("schema_version"));

    let settings = Settings {
        acronyms: vec!["RG B".to_string()],
        ..Settings::default()
    };
    let err = validate_settings(&settings).expect_err("bad acronym");
    assert!(err.to_string().contains("acronyms"));
}

#[test]
fn acronym_pattern_lists_extensions_first() {
    let settings = Settings {
        extensions: vec!["ARB".to_string()],
        acronyms: vec!["RGBA".to_string()],
        ..Settings::default()
    };
    assert_eq!(settings.acronym_pattern(), "ARB|RGBA");
    assert!(settings.is_keyword("struct"));
    assert!(!settings.is_keyword("Struct"));
}
