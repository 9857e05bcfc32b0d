//! Override application and alias resolution.
//!
//! Each override document runs the same ordered passes over the collection:
//! enum renames, case-collision marking, constant translation with token
//! overrides, bare-alias inference, and reference resolution.
use crate::config::Settings;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::enums::EnumCollection;
use crate::model::{Constant, EnumDefinition};
use crate::overrides::{EnumOverride, OverrideDocument};
use crate::translate::{is_value, Translator};
use anyhow::Result;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::mem;
use std::path::PathBuf;

/// Resolves the value of a constant that carries a `reference`.
pub trait ReferenceResolver {
    /// The literal value `constant` stands for, or `None` when the reference
    /// cannot be followed to a literal.
    fn resolve(&self, constant: &Constant, enums: &EnumCollection) -> Option<String>;
}

/// Follows `enum.token` references until a literal value is reached.
///
/// A constant whose value is already a literal only needs its enum to exist.
/// Revisiting an `(enum, token)` pair fails the resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainResolver;

impl ReferenceResolver for ChainResolver {
    fn resolve(&self, constant: &Constant, enums: &EnumCollection) -> Option<String> {
        let mut enum_name = constant.reference.as_deref()?;
        if is_value(&constant.value) {
            return enums
                .contains_key(enum_name)
                .then(|| constant.value.clone());
        }

        let mut token = constant.value.as_str();
        let mut visited = BTreeSet::new();
        loop {
            if !visited.insert((enum_name, token)) {
                return None;
            }
            let target = enums.get(enum_name)?.constants.get(token)?;
            match target.reference.as_deref() {
                Some(next) if !is_value(&target.value) => {
                    enum_name = next;
                    token = target.value.as_str();
                }
                _ => return Some(target.value.clone()),
            }
        }
    }
}

pub struct EnumProcessor<'a> {
    translator: Translator<'a>,
    overrides: Vec<PathBuf>,
    resolver: Box<dyn ReferenceResolver + 'a>,
}

impl<'a> EnumProcessor<'a> {
    pub fn new(settings: &'a Settings, overrides: Vec<PathBuf>) -> Result<Self> {
        Ok(Self {
            translator: Translator::new(settings)?,
            overrides,
            resolver: Box::new(ChainResolver),
        })
    }

    pub fn with_resolver(mut self, resolver: impl ReferenceResolver + 'a) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Run every override document, in order, over `enums`.
    ///
    /// Without override documents the passes still run once so the result is
    /// always normalized.
    pub fn process(
        &self,
        enums: EnumCollection,
        api_name: &str,
    ) -> Result<(EnumCollection, Diagnostics)> {
        let mut diagnostics = Diagnostics::new();
        if self.overrides.is_empty() {
            let empty = OverrideDocument::default();
            let enums = self.process_document(enums, &empty, api_name, &mut diagnostics);
            return Ok((enums, diagnostics));
        }

        let mut enums = enums;
        for path in &self.overrides {
            let document = OverrideDocument::load(path)?;
            tracing::info!(path = %path.display(), "processing enums");
            enums = self.process_document(enums, &document, api_name, &mut diagnostics);
        }
        Ok((enums, diagnostics))
    }

    pub fn process_document(
        &self,
        enums: EnumCollection,
        document: &OverrideDocument,
        api_name: &str,
        diagnostics: &mut Diagnostics,
    ) -> EnumCollection {
        let api = (!api_name.is_empty()).then_some(api_name);

        let mut enums = self.rename_enums(enums, document, api, diagnostics);
        mark_case_collisions(&mut enums);
        for definition in enums.values_mut() {
            self.translate_constants(definition);
            if let Some(found) = document.find_enum(api, &definition.name) {
                apply_token_overrides(definition, found, diagnostics);
            }
        }
        self.infer_bare_aliases(&mut enums);
        self.resolve_references(&mut enums, diagnostics);

        tracing::debug!(
            enums = enums.len(),
            warnings = diagnostics.len(),
            "processed override document"
        );
        enums
    }

    /// Apply enum renames and fold names; the collection is rebuilt since
    /// keys change.
    fn rename_enums(
        &self,
        enums: EnumCollection,
        document: &OverrideDocument,
        api: Option<&str>,
        diagnostics: &mut Diagnostics,
    ) -> EnumCollection {
        let mut renamed = EnumCollection::with_suffixes(self.translator.suffixes().clone());
        for (_, mut definition) in enums {
            let name = document
                .find_enum(api, &definition.name)
                .and_then(|found| found.name.as_deref())
                .unwrap_or(definition.name.as_str());
            let name = self.translator.translate_enum_name(name);
            if name != definition.name {
                tracing::debug!(from = %definition.name, to = %name, "renamed enum");
            }
            definition.name = name.clone();
            renamed.add_recorded(name, definition, diagnostics);
        }
        renamed
    }

    /// Translate names, values, and references; the first constant to claim
    /// a translated name keeps it.
    fn translate_constants(&self, definition: &mut EnumDefinition) {
        let constants = mem::take(&mut definition.constants);
        for (_, mut constant) in constants {
            constant.name = self.translator.translate_constant_name(&constant.name, false);
            constant.value = self.translator.translate_constant_value(&constant.value);
            constant.reference = constant
                .reference
                .map(|reference| self.translator.translate_enum_name(&reference));
            if let Entry::Vacant(slot) = definition.constants.entry(constant.name.clone()) {
                slot.insert(constant);
            }
        }
    }

    /// Give symbolic values with no reference the first enum that defines a
    /// token by that name.
    fn infer_bare_aliases(&self, enums: &mut EnumCollection) {
        let settings = self.translator.settings();
        let catch_all = self
            .translator
            .translate_enum_name(&settings.complete_enum_name);

        let mut found: BTreeMap<(String, String), String> = BTreeMap::new();
        for (enum_name, definition) in enums.iter() {
            for (key, constant) in &definition.constants {
                if constant.reference.is_some()
                    || constant.value.is_empty()
                    || constant.value.starts_with(|c: char| c.is_ascii_digit())
                {
                    continue;
                }
                let owner = enums
                    .iter()
                    .filter(|(name, _)| **name != catch_all)
                    .find(|(_, other)| other.constants.contains_key(&constant.value));
                if let Some((owner, _)) = owner {
                    found.insert((enum_name.clone(), key.clone()), owner.clone());
                }
            }
        }

        for ((enum_name, key), owner) in found {
            if let Some(constant) = enums
                .get_mut(&enum_name)
                .and_then(|definition| definition.constants.get_mut(&key))
            {
                tracing::debug!(enum_name = %enum_name, token = %key, reference = %owner, "inferred alias");
                constant.reference = Some(owner);
            }
        }
    }

    /// Replace referenced values with their literals; unresolved constants
    /// are removed.
    fn resolve_references(&self, enums: &mut EnumCollection, diagnostics: &mut Diagnostics) {
        let mut resolved = Vec::new();
        for (enum_name, definition) in enums.iter() {
            for (key, constant) in &definition.constants {
                if let Some(reference) = &constant.reference {
                    let value = self.resolver.resolve(constant, enums);
                    resolved.push((enum_name.clone(), key.clone(), reference.clone(), value));
                }
            }
        }

        for (enum_name, key, reference, value) in resolved {
            let Some(definition) = enums.get_mut(&enum_name) else {
                continue;
            };
            match value {
                Some(value) => {
                    if let Some(constant) = definition.constants.get_mut(&key) {
                        constant.value = value;
                    }
                }
                None => {
                    definition.constants.remove(&key);
                    diagnostics.push(Diagnostic::UnresolvedReference {
                        enum_name,
                        token: key,
                        reference,
                    });
                }
            }
        }
    }
}

/// Enums whose names differ only by case cannot coexist in a
/// case-insensitive target; both sides are marked non-compliant.
fn mark_case_collisions(enums: &mut EnumCollection) {
    let names: Vec<String> = enums.keys().cloned().collect();
    let mut colliding = BTreeSet::new();
    for (index, name) in names.iter().enumerate() {
        let folded = name.to_lowercase();
        for other in &names[index + 1..] {
            if name != other && folded == other.to_lowercase() {
                colliding.insert(name.clone());
                colliding.insert(other.clone());
            }
        }
    }

    for name in colliding {
        if let Some(definition) = enums.get_mut(&name) {
            tracing::debug!(enum_name = %name, "case collision");
            definition.compliant = false;
        }
    }
}

/// Apply token overrides, re-keying renamed constants. A rename onto a taken
/// key drops the constant.
fn apply_token_overrides(
    definition: &mut EnumDefinition,
    found: &EnumOverride,
    diagnostics: &mut Diagnostics,
) {
    let constants = mem::take(&mut definition.constants);
    for (_, mut constant) in constants {
        if let Some(token) = found.find_token(&constant.original_name, &constant.name) {
            if let Some(name) = &token.name {
                constant.name = name.clone();
            }
            if let Some(value) = &token.value {
                constant.value = value.clone();
            }
            if let Some(reference) = &token.reference {
                constant.reference = Some(reference.clone());
            }
        }
        match definition.constants.entry(constant.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(constant);
            }
            Entry::Occupied(_) => diagnostics.push(Diagnostic::DroppedDuplicate {
                enum_name: definition.name.clone(),
                token: constant.name,
            }),
        }
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
