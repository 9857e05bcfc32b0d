//! Specification reader.
//!
//! One document is read per call. `delete` sections for a version are applied
//! before its `add` sections, and every `add` section is parsed in two
//! passes: enum/token collection, then resolution of `reuse` directives.
use crate::config::Settings;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::enums::{EnumCollection, VendorSuffixes};
use crate::model::{Constant, EnumDefinition};
use crate::select::{
    attr, child_elements, children_named, sections, signatures_root, spec_version, SectionFilter,
};
use anyhow::{bail, ensure, Context, Result};
use roxmltree::{Document, Node};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Documents older than the API-qualified layout carry this schema version.
const LEGACY_SPEC_VERSION: &str = "1";

/// "Copy every constant of `source` into `target`."
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReuseDirective {
    target: String,
    source: String,
}

pub struct SpecReader<'a> {
    settings: &'a Settings,
    suffixes: VendorSuffixes,
}

impl<'a> SpecReader<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            suffixes: VendorSuffixes::from_settings(settings),
        }
    }

    /// Read the enums of the specification at `path` into `enums`.
    ///
    /// `api_versions` is a pipe-separated list; each version selects its own
    /// `add`/`delete` sections. On error `enums` is left untouched.
    pub fn read_enums(
        &self,
        path: &Path,
        enums: &mut EnumCollection,
        api_name: &str,
        api_versions: &str,
    ) -> Result<Diagnostics> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read specification {}", path.display()))?;
        self.read_enums_str(&text, enums, api_name, api_versions)
            .with_context(|| format!("read enums from {}", path.display()))
    }

    pub fn read_enums_str(
        &self,
        xml: &str,
        enums: &mut EnumCollection,
        api_name: &str,
        api_versions: &str,
    ) -> Result<Diagnostics> {
        let document = Document::parse(xml).context("parse specification XML")?;
        let root = signatures_root(&document)?;

        let version = spec_version(root);
        // Legacy documents hold a single API, so the API name cannot filter them.
        let api = (version != LEGACY_SPEC_VERSION).then_some(api_name);
        tracing::debug!(
            spec_version = %version,
            api = api.unwrap_or_default(),
            api_versions,
            "reading enums"
        );

        let mut working = enums.clone();
        let mut diagnostics = Diagnostics::new();
        for api_version in api_versions.split('|') {
            let filter = SectionFilter::new(api, Some(api_version));

            for section in sections(root, "delete", filter) {
                for node in children_named(section, "enum") {
                    let name = required_name(node)?;
                    if working.remove(name).is_some() {
                        tracing::debug!(name, api_version, "deleted enum");
                    }
                }
            }

            for section in sections(root, "add", filter) {
                let parsed = self.read_section(section, &mut diagnostics)?;
                working.merge_collection(parsed, &mut diagnostics);
            }
        }

        tracing::info!(
            enums = working.len(),
            warnings = diagnostics.len(),
            "read specification enums"
        );
        *enums = working;
        Ok(diagnostics)
    }

    fn read_section(
        &self,
        section: Node<'_, '_>,
        diagnostics: &mut Diagnostics,
    ) -> Result<EnumCollection> {
        let mut enums = EnumCollection::with_suffixes(self.suffixes.clone());
        let mut all = EnumDefinition::new(self.settings.complete_enum_name.as_str());
        let mut reuse = Vec::new();

        for node in children_named(section, "enum") {
            let definition = self.read_enum(node, &mut all, &mut reuse, diagnostics)?;
            enums.add_recorded(definition.name.clone(), definition, diagnostics);
        }

        resolve_reuse(&mut enums, reuse, diagnostics)?;
        enums.add_recorded(all.name.clone(), all, diagnostics);
        Ok(enums)
    }
}

/// Trimmed `name` attribute of an `<enum>` element; empty names are fatal.
fn required_name<'a>(node: Node<'a, '_>) -> Result<&'a str> {
    let name = attr(node, "name");
    if name.is_empty() {
        let position = node.document().text_pos_at(node.range().start);
        bail!(
            "empty name for enum element at line {}, column {}",
            position.row,
            position.col
        );
    }
    Ok(name)
}

impl SpecReader<'_> {
    /// First pass over one `<enum>` element.
    fn read_enum(
        &self,
        node: Node<'_, '_>,
        all: &mut EnumDefinition,
        reuse: &mut Vec<ReuseDirective>,
        diagnostics: &mut Diagnostics,
    ) -> Result<EnumDefinition> {
        let name = required_name(node)?;
        let mut definition = EnumDefinition::new(name);
        definition.type_name = non_empty(attr(node, "type"));
        definition.obsolete = non_empty(attr(node, "obsolete"));

        for child in child_elements(node) {
            let constant = match child.tag_name().name() {
                "token" => Constant::new(attr(child, "name"), attr(child, "value")),
                "use" => Constant::aliased(attr(child, "token"), attr(child, "enum")),
                "reuse" => {
                    reuse.push(ReuseDirective {
                        target: name.to_string(),
                        source: attr(child, "enum").to_string(),
                    });
                    continue;
                }
                other => bail!("unsupported element <{other}> in enum {name}"),
            };
            all.merge_recorded(constant.clone(), &self.suffixes, diagnostics);
            definition.merge_recorded(constant, &self.suffixes, diagnostics);
        }

        Ok(definition)
    }
}

/// Second pass: apply reuse directives until no enum grows.
///
/// Directives are scanned in document order and the scan restarts from the
/// first directive whenever an enum grows, so earlier directives see every
/// constant before later ones add conflicting values. Each restart adds at
/// least one key to a target, which bounds restarts by targets times
/// distinct keys; exceeding that bound is a fatal error.
fn resolve_reuse(
    enums: &mut EnumCollection,
    mut directives: Vec<ReuseDirective>,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let max_restarts = {
        let targets: BTreeSet<&str> = directives
            .iter()
            .map(|directive| directive.target.as_str())
            .collect();
        let keys: BTreeSet<&str> = enums
            .values()
            .flat_map(|definition| definition.constants.keys())
            .map(String::as_str)
            .collect();
        targets.len() * keys.len() + 1
    };
    let suffixes = enums.suffixes().clone();

    let mut restarts = 0;
    let mut index = 0;
    while let Some(directive) = directives.get(index) {
        let Some(source) = enums.get(&directive.source) else {
            diagnostics.push(Diagnostic::UnresolvedReuse {
                enum_name: directive.target.clone(),
                reuse: directive.source.clone(),
            });
            directives.remove(index);
            continue;
        };
        let constants: Vec<Constant> = source.constants.values().cloned().collect();
        let Some(target) = enums.get_mut(&directive.target) else {
            index += 1;
            continue;
        };

        let before = target.len();
        for constant in constants {
            target.merge_recorded(constant, &suffixes, diagnostics);
        }
        if target.len() == before {
            index += 1;
            continue;
        }

        restarts += 1;
        ensure!(
            restarts <= max_restarts,
            "reuse directives did not converge after {max_restarts} restarts"
        );
        index = 0;
    }
    tracing::debug!(restarts, "resolved reuse directives");
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
