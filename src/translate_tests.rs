use super::{is_value, Translator};
use crate::config::{Compatibility, Settings};

fn bare_settings() -> Settings {
    Settings {
        constant_prefix: "N".to_string(),
        enum_prefix: String::new(),
        extensions: Vec::new(),
        acronyms: Vec::new(),
        ..Settings::default()
    }
}

#[test]
fn enum_names_fold_into_pascal_case() {
    let settings = Settings::default();
    let translator = Translator::new(&settings).expect("translator");
    assert_eq!(translator.translate_enum_name("GL_RGBA8"), "Rgba8");
    assert_eq!(translator.translate_enum_name("TextureTargetARB"), "TextureTargetArb");
    assert_eq!(
        translator.translate_enum_name("BlendEquationModeEXT"),
        "BlendEquationModeExt"
    );
    assert_eq!(translator.translate_enum_name("GET_PNAME"), "GetPName");
    assert_eq!(translator.translate_enum_name("S_RGB"), "Srgb");
}

#[test]
fn folded_enum_names_pass_through() {
    let settings = Settings::default();
    let translator = Translator::new(&settings).expect("translator");
    for name in ["TextureTarget", "TextureTargetArb", "All", "GLenum", "struct", ""] {
        assert_eq!(translator.translate_enum_name(name), name);
    }
    let once = translator.translate_enum_name("PIXEL_STORE_PARAMETER");
    assert_eq!(once, "PixelStoreParameter");
    assert_eq!(translator.translate_enum_name(&once), once);
}

#[test]
fn digits_start_a_new_segment_in_enum_names() {
    let settings = bare_settings();
    let translator = Translator::new(&settings).expect("translator");
    assert_eq!(translator.translate_enum_name("3D_MODE"), "N3DMode");
    assert_eq!(translator.translate_enum_name("TEXTURE_2d"), "Texture2D");
}

#[test]
fn constant_names_fold_with_component_letters() {
    let settings = Settings::default();
    let translator = Translator::new(&settings).expect("translator");
    assert_eq!(translator.translate_constant_name("TEXTURE_2D", false), "Texture2D");
    assert_eq!(translator.translate_constant_name("R3_G3_B2", false), "R3G3B2");
    assert_eq!(
        translator.translate_constant_name("ONE_MINUS_SRC_ALPHA", false),
        "OneMinusSrcAlpha"
    );
    assert_eq!(translator.translate_constant_name("TRUE", false), "True");
    assert_eq!(translator.translate_constant_name("TEXTURE_2D", true), "TEXTURE_2D");
}

#[test]
fn constant_name_transform_is_idempotent() {
    let settings = Settings::default();
    let translator = Translator::new(&settings).expect("translator");
    for raw in [
        "TEXTURE_2D",
        "RGBA8",
        "R3_G3_B2",
        "COLOR_BUFFER_BIT",
        "COMPRESSED_RGBA_S3TC_DXT5",
        "2X_BIT",
        "Texture2D",
    ] {
        let once = translator.translate_constant_name(raw, false);
        let twice = translator.translate_constant_name(&once, false);
        assert_eq!(once, twice, "not idempotent for {raw}");
    }
}

#[test]
fn legacy_mode_keeps_constant_names() {
    let settings = Settings {
        compatibility: Compatibility {
            no_advanced_enum_processing: true,
            ..Compatibility::default()
        },
        ..Settings::default()
    };
    let translator = Translator::new(&settings).expect("translator");
    assert_eq!(translator.translate_constant_name("TEXTURE_2D", false), "TEXTURE_2D");
}

#[test]
fn values_drop_suffixes_and_prefixes() {
    let settings = Settings::default();
    let translator = Translator::new(&settings).expect("translator");
    assert_eq!(translator.translate_constant_value("0x80ACu"), "0x80AC");
    assert_eq!(
        translator.translate_constant_value("0xFFFFFFFFFFFFFFFFull"),
        "0xFFFFFFFFFFFFFFFF"
    );
    assert_eq!(translator.translate_constant_value("0x0DE1"), "0x0DE1");
    assert_eq!(translator.translate_constant_value("42"), "42");
    assert_eq!(translator.translate_constant_value("-1"), "-1");
    assert_eq!(
        translator.translate_constant_value("GL_FOG_COORDINATE_ARRAY_TYPE"),
        "FogCoordinateArrayType"
    );
}

#[test]
fn numeric_classification() {
    assert!(is_value("0x10"));
    assert!(is_value("0X10"));
    assert!(is_value("17"));
    assert!(is_value(" 17 "));
    assert!(!is_value("ONE"));
    assert!(!is_value(""));
}

#[test]
fn extensions_match_case_insensitively_at_the_end() {
    let settings = Settings::default();
    let translator = Translator::new(&settings).expect("translator");
    assert_eq!(translator.get_extension("TextureTargetARB"), "ARB");
    assert_eq!(translator.get_extension("TextureTargetArb"), "Arb");
    assert_eq!(translator.get_extension("TextureTarget"), "");
    assert_eq!(translator.get_extension("FogModeExt"), "Ext");
    assert_eq!(translator.get_extension("PixelFormat2D"), "");
    assert_eq!(translator.get_extension("Twin"), "");
}
