//! Ordered, merge-on-insert collection of enum definitions.
//!
//! Keys iterate in lexicographic order so every pass over the collection is
//! deterministic. A rename is always expressed as `remove` + `add`.
use crate::config::{default_extensions, Settings};
use crate::diagnostics::Diagnostics;
use crate::model::EnumDefinition;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ops::Index;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnumCollection {
    enums: BTreeMap<String, EnumDefinition>,
    #[serde(skip)]
    suffixes: VendorSuffixes,
}

impl EnumCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty collection whose merges rank references by `suffixes`.
    pub fn with_suffixes(suffixes: VendorSuffixes) -> Self {
        Self {
            enums: BTreeMap::new(),
            suffixes,
        }
    }

    pub fn suffixes(&self) -> &VendorSuffixes {
        &self.suffixes
    }

    /// Insert `definition`, or merge its constants into the enum already
    /// stored under `name`.
    pub fn add(&mut self, name: impl Into<String>, definition: EnumDefinition) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        self.add_recorded(name, definition, &mut diagnostics);
        diagnostics
    }

    pub fn add_recorded(
        &mut self,
        name: impl Into<String>,
        definition: EnumDefinition,
        diagnostics: &mut Diagnostics,
    ) {
        match self.enums.entry(name.into()) {
            btree_map::Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                for constant in definition.constants.into_values() {
                    existing.merge_recorded(constant, &self.suffixes, diagnostics);
                }
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(definition);
            }
        }
    }

    /// Merge every enum of `other` into this collection.
    pub fn merge_collection(&mut self, other: EnumCollection, diagnostics: &mut Diagnostics) {
        for (name, definition) in other.enums {
            self.add_recorded(name, definition, diagnostics);
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<EnumDefinition> {
        self.enums.remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&EnumDefinition> {
        self.enums.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut EnumDefinition> {
        self.enums.get_mut(name)
    }

    /// Look up an enum that must exist.
    pub fn get_required(&self, name: &str) -> Result<&EnumDefinition> {
        self.enums
            .get(name)
            .ok_or_else(|| anyhow!("enum {name} not found"))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.enums.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &EnumDefinition> {
        self.enums.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut EnumDefinition> {
        self.enums.values_mut()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, EnumDefinition> {
        self.enums.iter()
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

impl Index<&str> for EnumCollection {
    type Output = EnumDefinition;

    fn index(&self, name: &str) -> &EnumDefinition {
        match self.enums.get(name) {
            Some(definition) => definition,
            None => panic!("enum {name} not found"),
        }
    }
}

impl IntoIterator for EnumCollection {
    type Item = (String, EnumDefinition);
    type IntoIter = btree_map::IntoIter<String, EnumDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.enums.into_iter()
    }
}

impl<'a> IntoIterator for &'a EnumCollection {
    type Item = (&'a String, &'a EnumDefinition);
    type IntoIter = btree_map::Iter<'a, String, EnumDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.enums.iter()
    }
}

/// Vendor tags recognized at the end of enum names (`ARB`, `EXT`, `NV`, ...).
///
/// Matching is case-insensitive so folded names (`FogModeArb`) keep their
/// tag. The tag must start a word: its first character is not lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSuffixes {
    // Longest first, so `SGIX` wins over `SGI`.
    suffixes: Vec<String>,
}

impl VendorSuffixes {
    pub fn new(extensions: &[String]) -> Self {
        let mut suffixes: Vec<String> = extensions
            .iter()
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_ascii_uppercase())
            .collect();
        suffixes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        suffixes.dedup();
        Self { suffixes }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.extensions)
    }

    /// Vendor tag at the end of `name`, spelled as it appears; empty for core
    /// names.
    pub fn suffix<'n>(&self, name: &'n str) -> &'n str {
        self.suffixes
            .iter()
            .find_map(|ext| {
                let start = name.len().checked_sub(ext.len())?;
                let tail = name.get(start..)?;
                let starts_word = !tail.starts_with(|c: char| c.is_lowercase());
                (starts_word && tail.eq_ignore_ascii_case(ext)).then_some(tail)
            })
            .unwrap_or_default()
    }
}

impl Default for VendorSuffixes {
    fn default() -> Self {
        Self::new(&default_extensions())
    }
}

/// Order two extension suffixes: `Less` prefers `ext1`, `Greater` prefers
/// `ext2`. Core (empty) beats ARB, which beats EXT, which beats any other
/// vendor.
pub fn order_of_preference(ext1: &str, ext2: &str) -> Ordering {
    let ordering = prefer_empty(ext1, ext2);
    if ordering != Ordering::Equal {
        return ordering;
    }

    let ext1 = remove_ignore_case(ext1, "arb");
    let ext2 = remove_ignore_case(ext2, "arb");
    let ordering = prefer_empty(&ext1, &ext2);
    if ordering != Ordering::Equal {
        return ordering;
    }

    let ext1 = remove_ignore_case(&ext1, "ext");
    let ext2 = remove_ignore_case(&ext2, "ext");
    prefer_empty(&ext1, &ext2)
}

fn prefer_empty(ext1: &str, ext2: &str) -> Ordering {
    match (ext1.is_empty(), ext2.is_empty()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn remove_ignore_case(text: &str, marker: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(offset) = lower[cursor..].find(marker) {
        result.push_str(&text[cursor..cursor + offset]);
        cursor += offset + marker.len();
    }
    result.push_str(&text[cursor..]);
    result
}

#[cfg(test)]
#[path = "enums_tests.rs"]
mod tests;
