//! `specbind settings-stub` and `specbind typemap`.

mod common;

use common::{specbind, stdout_json, Workspace};

#[test]
fn settings_stub_round_trips_through_the_enums_command() {
    let output = specbind(&["settings-stub"]);
    let stub = stdout_json(&output);
    assert_eq!(stub["schema_version"], 1);
    assert_eq!(stub["complete_enum_name"], "All");

    let workspace = Workspace::create();
    let settings = workspace.write(
        "settings.json",
        &String::from_utf8(output.stdout).expect("utf-8 stub"),
    );
    let spec = workspace.write("signatures.xml", "<signatures/>");
    let output = specbind(&[
        "enums",
        "--spec",
        spec.to_str().expect("utf-8 path"),
        "--settings",
        settings.to_str().expect("utf-8 path"),
    ]);
    let report = stdout_json(&output);
    assert!(report["enums"].as_object().expect("enums").is_empty());
}

#[test]
fn invalid_settings_are_rejected() {
    let workspace = Workspace::create();
    let settings = workspace.write("settings.json", r#"{ "schema_version": 9 }"#);
    let spec = workspace.write("signatures.xml", "<signatures/>");
    let output = specbind(&[
        "enums",
        "--spec",
        spec.to_str().expect("utf-8 path"),
        "--settings",
        settings.to_str().expect("utf-8 path"),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("schema_version"));
}

#[test]
fn typemap_prints_both_maps() {
    let workspace = Workspace::create();
    let types = workspace.write("gl.tm", "# types\nGLenum GLenum\nVoidPointer void*\n");
    let target = workspace.write("csharp.tm", "GLenum Int32\nGLboolean bool\n");
    let output = specbind(&[
        "typemap",
        "--typemap",
        types.to_str().expect("utf-8 path"),
        "--target",
        target.to_str().expect("utf-8 path"),
    ]);
    let report = stdout_json(&output);
    assert_eq!(report["types"]["VoidPointer"], "void*");
    assert_eq!(report["target"]["GLboolean"], "bool");
    assert!(report["diagnostics"].as_array().expect("diagnostics").is_empty());
}
