//! Type-map files.
//!
//! Line-oriented tables mapping a registry type name to a target type name.
//! Blank lines and `#` comments are skipped; the first field is the key.
use crate::config::Settings;
use crate::diagnostics::{Diagnostic, Diagnostics};
use anyhow::{Context, Result};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub type TypeMap = BTreeMap<String, String>;

/// Read a registry type map (`GLenum unsigned int`, `VoidPointer void*`).
pub fn read_type_map(path: &Path) -> Result<(TypeMap, Diagnostics)> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read type map {}", path.display()))?;
    let parsed = parse_type_map(&text);
    tracing::info!(path = %path.display(), types = parsed.0.len(), "read type map");
    Ok(parsed)
}

/// Read a target type map (`GLenum Int32`).
pub fn read_target_type_map(path: &Path, settings: &Settings) -> Result<(TypeMap, Diagnostics)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read target type map {}", path.display()))?;
    let parsed = parse_target_type_map(&text, settings);
    tracing::info!(path = %path.display(), types = parsed.0.len(), "read target type map");
    Ok(parsed)
}

pub fn parse_type_map(text: &str) -> (TypeMap, Diagnostics) {
    let mut map = TypeMap::new();
    let mut diagnostics = Diagnostics::new();
    for words in records(text, &[' ', ',', '*', '\t'], 1) {
        let key = words[0];
        let target = match (key, &words[1..]) {
            (key, _) if key.eq_ignore_ascii_case("void") => "void",
            ("VoidPointer" | "ConstVoidPointer", _) => "void*",
            ("CharPointer" | "charPointerARB" | "ConstCharPointer", _) => "String",
            (_, [declared, ..]) if declared.contains("GLvoid") => "void",
            (_, ["const", "GLubyte", ..]) => "String",
            (_, ["struct", name, ..]) => *name,
            (_, [declared, ..]) => *declared,
            (_, []) => continue,
        };
        insert_first(&mut map, key, target, &mut diagnostics);
    }
    (map, diagnostics)
}

pub fn parse_target_type_map(text: &str, settings: &Settings) -> (TypeMap, Diagnostics) {
    let mut map = TypeMap::new();
    let mut diagnostics = Diagnostics::new();
    for words in records(text, &[' ', ',', '\t'], 2) {
        let target = match words[1] {
            "bool" if settings.compatibility.no_bool_parameters => "Int32",
            other => other,
        };
        insert_first(&mut map, words[0], target, &mut diagnostics);
    }
    (map, diagnostics)
}

/// Non-comment lines split into fields; lines with fewer than `min_fields`
/// are skipped.
fn records<'a>(
    text: &'a str,
    separators: &'a [char],
    min_fields: usize,
) -> impl Iterator<Item = Vec<&'a str>> + 'a {
    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(move |line| {
            line.split(separators)
                .filter(|word| !word.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(move |words| words.len() >= min_fields)
}

fn insert_first(map: &mut TypeMap, key: &str, target: &str, diagnostics: &mut Diagnostics) {
    match map.entry(key.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(target.to_string());
        }
        Entry::Occupied(_) => diagnostics.push(Diagnostic::DuplicateTypeMapping {
            key: key.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Compatibility;

    const REGISTRY_TYPES: &str = "\
# registry types
GLenum unsigned int
void void
VOID *
VoidPointer void*
ConstCharPointer const char*
GLvoid* GLvoid*
GLstring const GLubyte *
GLsync struct __GLsync *
lonely
GLenum int
";

    #[test]
    fn registry_types_apply_special_cases() {
        let (map, diagnostics) = parse_type_map(REGISTRY_TYPES);
        assert_eq!(map["GLenum"], "unsigned");
        assert_eq!(map["void"], "void");
        assert_eq!(map["VOID"], "void");
        assert_eq!(map["VoidPointer"], "void*");
        assert_eq!(map["ConstCharPointer"], "String");
        assert_eq!(map["GLvoid"], "void");
        assert_eq!(map["GLstring"], "String");
        assert_eq!(map["GLsync"], "__GLsync");
        assert!(!map.contains_key("lonely"));
        assert_eq!(
            diagnostics.into_vec(),
            vec![Diagnostic::DuplicateTypeMapping {
                key: "GLenum".to_string()
            }]
        );
    }

    #[test]
    fn target_types_map_bool_in_legacy_mode() {
        let text = "GLenum, Int32\nGLboolean\tbool\n# comment\nshort\n";
        let (map, diagnostics) = parse_target_type_map(text, &Settings::default());
        assert!(diagnostics.is_empty());
        assert_eq!(map["GLenum"], "Int32");
        assert_eq!(map["GLboolean"], "bool");
        assert_eq!(map.len(), 2);

        let legacy = Settings {
            compatibility: Compatibility {
                no_bool_parameters: true,
                ..Compatibility::default()
            },
            ..Settings::default()
        };
        let (map, _) = parse_target_type_map(text, &legacy);
        assert_eq!(map["GLboolean"], "Int32");
    }

    #[test]
    fn missing_files_are_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = read_type_map(&dir.path().join("gl.tm")).expect_err("missing");
        assert!(format!("{err:#}").contains("gl.tm"));

        let path = dir.path().join("csharp.tm");
        fs::write(&path, "GLenum Int32\n").expect("write");
        let (map, _) = read_target_type_map(&path, &Settings::default()).expect("read");
        assert_eq!(map["GLenum"], "Int32");
    }
}
