//! Recoverable pipeline events.
//!
//! Every "log and continue" condition is recorded as a typed event so callers
//! and tests can assert on what was dropped or kept.
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Two definitions of one token disagree; the existing value was kept.
    ConflictingToken {
        enum_name: String,
        token: String,
        existing: String,
        incoming: String,
    },
    /// A reuse directive names an enum the document never defines.
    UnresolvedReuse { enum_name: String, reuse: String },
    /// A token's reference did not resolve; the token was removed.
    UnresolvedReference {
        enum_name: String,
        token: String,
        reference: String,
    },
    /// A token could not be re-keyed because the name is already taken.
    DroppedDuplicate { enum_name: String, token: String },
    /// A type-map file maps the same key twice; the first mapping was kept.
    DuplicateTypeMapping { key: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ConflictingToken {
                enum_name,
                token,
                existing,
                incoming,
            } => write!(
                f,
                "conflicting token {enum_name}.{token} with value {existing} != {incoming}"
            ),
            Diagnostic::UnresolvedReuse { enum_name, reuse } => {
                write!(f, "reuse target {reuse} not found for enum {enum_name}")
            }
            Diagnostic::UnresolvedReference {
                enum_name,
                token,
                reference,
            } => write!(
                f,
                "reference {reference} not found for token {enum_name}.{token}"
            ),
            Diagnostic::DroppedDuplicate { enum_name, token } => {
                write!(f, "failed to add constant {token} to enum {enum_name}")
            }
            Diagnostic::DuplicateTypeMapping { key } => {
                write!(f, "duplicate type mapping for {key}")
            }
        }
    }
}

/// Ordered list of diagnostics produced by one pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and mirror it to the log.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(kind = diagnostic.kind(), "{diagnostic}");
        self.events.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.events.extend(other.events);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.events
    }
}

impl Diagnostic {
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::ConflictingToken { .. } => "conflicting_token",
            Diagnostic::UnresolvedReuse { .. } => "unresolved_reuse",
            Diagnostic::UnresolvedReference { .. } => "unresolved_reference",
            Diagnostic::DroppedDuplicate { .. } => "dropped_duplicate",
            Diagnostic::DuplicateTypeMapping { .. } => "duplicate_type_mapping",
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
