//! Identifier and literal translation.
//!
//! Raw registry spellings (`GL_TEXTURE_2D`, `TextureTargetARB`, `0x80ACu`)
//! are folded into the target naming convention. Every transform here is a
//! pure function of its input and the settings it was built from.
use crate::config::Settings;
use crate::enums::VendorSuffixes;
use anyhow::{Context, Result};
use regex::Regex;

/// Case-folding fixes for segments the folding state machine splits wrongly.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("Pname", "PName"),
    ("AttribIp", "AttribIP"),
    ("SRgb", "Srgb"),
];

/// Letters that abbreviate a component count after a digit (2D, R3G3B2).
const COMPONENT_LETTERS: &[char] = &['D', 'R', 'G', 'B', 'A'];

pub struct Translator<'a> {
    settings: &'a Settings,
    acronyms: Option<Regex>,
    suffixes: VendorSuffixes,
}

impl<'a> Translator<'a> {
    pub fn new(settings: &'a Settings) -> Result<Self> {
        let pattern = settings.acronym_pattern();
        let acronyms = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(&pattern).context("compile acronym pattern")?)
        };
        Ok(Self {
            settings,
            acronyms,
            suffixes: VendorSuffixes::from_settings(settings),
        })
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    pub fn suffixes(&self) -> &VendorSuffixes {
        &self.suffixes
    }

    /// Vendor suffix at the end of `name`, spelled as it appears.
    pub fn get_extension<'n>(&self, name: &'n str) -> &'n str {
        self.suffixes.suffix(name)
    }

    fn is_already_processed(&self, name: &str) -> bool {
        let extension = self.get_extension(name);
        let unprocessed = name.contains('_')
            || name.contains('-')
            || name.starts_with(|c: char| c.is_ascii_digit())
            || name.chars().all(char::is_uppercase)
            || (!extension.is_empty() && extension.chars().all(char::is_uppercase));
        !unprocessed
    }

    /// Fold an enum name (`TextureTargetARB`, `GL_RGBA8`) into PascalCase.
    ///
    /// Names that already look folded pass through unchanged, which keeps the
    /// transform idempotent.
    pub fn translate_enum_name(&self, name: &str) -> String {
        if name.is_empty() || self.settings.is_keyword(name) || self.is_already_processed(name) {
            return name.to_string();
        }

        let mut name = self.strip_enum_prefix(name).to_string();
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name = format!("{}{}", self.settings.constant_prefix, name);
        }
        let name = self.split_acronyms(&name);

        let mut translated = String::with_capacity(name.len());
        let mut at_boundary = true;
        let mut previous_uppercase = false;
        for c in name.chars() {
            if c == '_' || c == '-' {
                at_boundary = true;
                continue;
            }

            if at_boundary {
                translated.extend(c.to_uppercase());
            } else if previous_uppercase {
                translated.extend(c.to_lowercase());
            } else {
                translated.push(c);
            }

            previous_uppercase = c.is_uppercase();
            at_boundary = c.is_ascii_digit();
        }

        let mut translated = uppercase_first(&translated);
        for (from, to) in REPLACEMENTS {
            translated = translated.replace(from, to);
        }
        self.strip_enum_prefix(&translated).to_string()
    }

    fn strip_enum_prefix<'n>(&self, name: &'n str) -> &'n str {
        let prefix = self.settings.enum_prefix.as_str();
        match name.strip_prefix(prefix) {
            Some(rest) if !prefix.is_empty() && !rest.is_empty() => rest,
            _ => name,
        }
    }

    /// Insert a separator after every acronym so it folds as its own segment.
    fn split_acronyms(&self, name: &str) -> String {
        let Some(acronyms) = &self.acronyms else {
            return name.to_string();
        };
        let mut split = String::with_capacity(name.len() + 4);
        let mut cursor = 0;
        for found in acronyms.find_iter(name) {
            split.push_str(&name[cursor..found.end()]);
            split.push('_');
            cursor = found.end();
        }
        split.push_str(&name[cursor..]);
        split
    }

    /// Fold a constant name (`TEXTURE_2D` -> `Texture2D`).
    ///
    /// With `is_value` set the text is a literal and is returned as-is.
    pub fn translate_constant_name(&self, name: &str, is_value: bool) -> String {
        if name.is_empty() || is_value {
            return name.to_string();
        }

        let all_caps = name
            .chars()
            .all(|c| !c.is_alphabetic() || c.is_uppercase());
        let advanced = !self.settings.compatibility.no_advanced_enum_processing;
        if !advanced || !(all_caps || name.contains('_')) {
            return name.to_string();
        }

        let name = if name.starts_with(|c: char| c.is_ascii_digit()) {
            format!("{}{}", self.settings.constant_prefix, name)
        } else {
            name.to_string()
        };

        let mut translated = String::with_capacity(name.len());
        let mut next_uppercase = true;
        let mut after_digit = false;
        for c in name.chars() {
            if c == '_' || c == '-' {
                next_uppercase = true;
                continue;
            }
            if c.is_ascii_digit() {
                translated.push(c);
                after_digit = true;
                continue;
            }

            if after_digit && COMPONENT_LETTERS.contains(&c) {
                next_uppercase = true;
            }
            if next_uppercase {
                translated.extend(c.to_uppercase());
            } else {
                translated.extend(c.to_lowercase());
            }
            after_digit = false;
            next_uppercase = false;
        }

        uppercase_first(&translated)
    }

    /// Normalize a constant value: numeric literals lose their C suffixes,
    /// symbolic values are folded like constant names.
    pub fn translate_constant_value(&self, value: &str) -> String {
        let mut value = value;
        if has_hex_marker(value) {
            value = value.trim_end_matches(['u', 'U', 'l', 'L']);
        }

        let prefix = self.settings.constant_prefix.as_str();
        if !prefix.is_empty() {
            value = value.strip_prefix(prefix).unwrap_or(value);
        }

        self.translate_constant_name(value, is_value(value))
    }
}

/// True when `text` is a numeric literal: hex-prefixed or a base-10 integer.
pub fn is_value(text: &str) -> bool {
    has_hex_marker(text) || text.trim().parse::<i64>().is_ok()
}

fn has_hex_marker(text: &str) -> bool {
    text.get(..2)
        .is_some_and(|marker| marker.eq_ignore_ascii_case("0x"))
}

fn uppercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "translate_tests.rs"]
mod tests;
