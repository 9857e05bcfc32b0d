//! Process-wide naming settings.
//!
//! Settings are loaded once, validated, and then passed by reference into the
//! reader, translator, and processor so no stage depends on ambient state.
use anyhow::{anyhow, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current schema version for settings files.
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

const DEFAULT_EXTENSIONS: &[&str] = &[
    "ARB", "EXT", "ATI", "NV", "NVX", "SUNX", "SUN", "SGIS", "SGIX", "SGI", "MESAX", "MESA",
    "3DFX", "IBM", "GREMEDY", "HP", "INTEL", "PGI", "INGR", "APPLE", "OML", "I3D", "ARM",
    "ANGLE", "OES", "QCOM", "VIV", "IMG", "AMD", "KHR", "OVR", "DMP", "FJ", "S3", "WIN", "REND",
];

const DEFAULT_ACRONYMS: &[&str] = &[
    "EGL", "3TC", "DXT", "ES", "GL", "CL", "RGBA", "BGRA", "RGB", "BGR", "ALPHA",
];

const DEFAULT_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

fn default_schema_version() -> u32 {
    SETTINGS_SCHEMA_VERSION
}

fn default_prefix() -> String {
    "GL_".to_string()
}

fn default_complete_enum_name() -> String {
    "All".to_string()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub(crate) fn default_extensions() -> Vec<String> {
    to_strings(DEFAULT_EXTENSIONS)
}

fn default_acronyms() -> Vec<String> {
    to_strings(DEFAULT_ACRONYMS)
}

fn default_keywords() -> Vec<String> {
    to_strings(DEFAULT_KEYWORDS)
}

/// Naming and compatibility settings shared by every pipeline stage.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Prefix carried by raw constant names and values (`GL_`).
    #[serde(default = "default_prefix")]
    pub constant_prefix: String,
    /// Prefix stripped from translated enum names.
    #[serde(default = "default_prefix")]
    pub enum_prefix: String,
    /// Name of the synthetic enum that accumulates every token of a document.
    #[serde(default = "default_complete_enum_name")]
    pub complete_enum_name: String,
    /// Reserved words of the target language; enum names matching one are left alone.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Vendor suffixes recognized at the end of enum names.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Tokens that start their own word segment during case folding, in
    /// addition to every vendor suffix.
    #[serde(default = "default_acronyms")]
    pub acronyms: Vec<String>,
    #[serde(default)]
    pub compatibility: Compatibility,
}

/// Legacy behavior switches.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Compatibility {
    /// Keep constant names exactly as spelled in the specification.
    #[serde(default)]
    pub no_advanced_enum_processing: bool,
    /// Map `bool` target types to `Int32` when reading target type maps.
    #[serde(default)]
    pub no_bool_parameters: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            constant_prefix: default_prefix(),
            enum_prefix: default_prefix(),
            complete_enum_name: default_complete_enum_name(),
            keywords: default_keywords(),
            extensions: default_extensions(),
            acronyms: default_acronyms(),
            compatibility: Compatibility::default(),
        }
    }
}

impl Settings {
    pub fn is_keyword(&self, name: &str) -> bool {
        self.keywords.iter().any(|keyword| keyword == name)
    }

    /// Alternation pattern of every acronym, vendor suffixes first.
    pub(crate) fn acronym_pattern(&self) -> String {
        self.extensions
            .iter()
            .chain(self.acronyms.iter())
            .map(|token| regex::escape(token.as_str()))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Render a pretty JSON settings stub for new projects.
pub fn settings_stub() -> Result<String> {
    serde_json::to_string_pretty(&Settings::default()).context("serialize settings stub")
}

/// Load and validate settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let bytes = fs::read(path).with_context(|| format!("read settings {}", path.display()))?;
    let settings: Settings =
        serde_json::from_slice(&bytes).context("parse settings JSON")?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Validate schema version and user-provided tokens.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    ensure!(
        settings.schema_version == SETTINGS_SCHEMA_VERSION,
        "unsupported settings schema_version {}",
        settings.schema_version
    );
    for (label, prefix) in [
        ("constant_prefix", &settings.constant_prefix),
        ("enum_prefix", &settings.enum_prefix),
    ] {
        if prefix.chars().any(char::is_whitespace) {
            return Err(anyhow!("{label} must not contain whitespace (got {prefix:?})"));
        }
    }
    ensure!(
        !settings.complete_enum_name.trim().is_empty(),
        "complete_enum_name must be non-empty"
    );
    validate_tokens(&settings.extensions, "extensions")?;
    validate_tokens(&settings.acronyms, "acronyms")?;
    Ok(())
}

fn validate_tokens(tokens: &[String], label: &str) -> Result<()> {
    for token in tokens {
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(anyhow!(
                "{label} entries must be non-empty and alphanumeric (got {token:?})"
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
