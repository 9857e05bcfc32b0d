use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::enums::{order_of_preference, VendorSuffixes};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One named token inside an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    pub name: String,
    /// Name as first read; override rules match against it.
    pub original_name: String,
    pub value: String,
    /// Enum the value resolves against when the value names another token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            original_name: name.clone(),
            name,
            value: value.into(),
            reference: None,
        }
    }

    /// A token borrowed from another enum: the value is the token's own name.
    pub fn aliased(token: impl Into<String>, enum_name: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            original_name: token.clone(),
            name: token.clone(),
            value: token,
            reference: Some(enum_name.into()),
        }
    }

    pub fn with_reference(mut self, enum_name: impl Into<String>) -> Self {
        self.reference = Some(enum_name.into());
        self
    }
}

/// What happened when a constant was merged into an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Replaced,
    Unchanged,
    Conflict { existing: String, incoming: String },
}

/// A named group of constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDefinition {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub is_flag_collection: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obsolete: Option<String>,
    /// Cleared when another enum's name differs from this one only by case.
    pub compliant: bool,
    pub constants: BTreeMap<String, Constant>,
}

impl EnumDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            // Every bitmask enum in the registry carries "mask" in its name.
            is_flag_collection: name.to_lowercase().contains("mask"),
            name,
            type_name: None,
            obsolete: None,
            compliant: true,
            constants: BTreeMap::new(),
        }
    }

    /// Builder form of [`EnumDefinition::merge_constant`] with the default
    /// vendor suffixes.
    pub fn with_constant(mut self, constant: Constant) -> Self {
        self.merge_constant(constant, &VendorSuffixes::default());
        self
    }

    /// Merge one constant under the uniqueness rule.
    ///
    /// A duplicate name with a different value keeps the first value, except
    /// that a plain literal displaces an alias. Equal values with different
    /// references keep the reference to the preferred extension variant.
    pub fn merge_constant(
        &mut self,
        constant: Constant,
        suffixes: &VendorSuffixes,
    ) -> MergeOutcome {
        let Some(existing) = self.constants.get_mut(&constant.name) else {
            self.constants.insert(constant.name.clone(), constant);
            return MergeOutcome::Inserted;
        };

        if existing.value != constant.value {
            let existing_aliased = existing.reference.is_some();
            let incoming_aliased = constant.reference.is_some();
            return match (existing_aliased, incoming_aliased) {
                (true, false) => {
                    *existing = constant;
                    MergeOutcome::Replaced
                }
                (false, true) => MergeOutcome::Unchanged,
                _ => MergeOutcome::Conflict {
                    existing: existing.value.clone(),
                    incoming: constant.value,
                },
            };
        }

        let references = (
            existing.reference.as_deref(),
            constant.reference.as_deref(),
        );
        let prefer_incoming = match references {
            (Some(current), Some(incoming)) if current != incoming => {
                order_of_preference(suffixes.suffix(incoming), suffixes.suffix(current))
                    == Ordering::Less
            }
            _ => false,
        };
        if prefer_incoming {
            existing.reference = constant.reference;
            MergeOutcome::Replaced
        } else {
            MergeOutcome::Unchanged
        }
    }

    /// Merge a constant and record a conflict when one occurs.
    pub fn merge_recorded(
        &mut self,
        constant: Constant,
        suffixes: &VendorSuffixes,
        diagnostics: &mut Diagnostics,
    ) {
        let token = constant.name.clone();
        if let MergeOutcome::Conflict { existing, incoming } =
            self.merge_constant(constant, suffixes)
        {
            diagnostics.push(Diagnostic::ConflictingToken {
                enum_name: self.name.clone(),
                token,
                existing,
                incoming,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}
