//! Recoverable findings. Each one is logged when found and kept on the
//! returned [`crate::ir::Schema`].
use std::fmt;

use serde::Serialize;

use crate::definition::FieldPath;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub path: FieldPath,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The field was left out of its parent type.
    UnrecognizedFieldType { tag: String },
    /// A slice zone with no usable choices yields a memberless union.
    EmptySliceZone,
    /// An object type ended up with no fields.
    EmptyObject { type_name: String },
    /// The same field id appears in two tabs; only one definition is kept.
    DuplicateTabField { kept_tab: String, dropped_tab: String },
    /// Two origins produced the same type name (only under `CollisionPolicy::Warn`).
    NamingCollision { type_name: String, first: String },
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, path: &FieldPath, kind: DiagnosticKind) {
        let diagnostic = Diagnostic { path: path.clone(), kind };
        log::warn!("{diagnostic}");
        self.items.push(diagnostic);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnrecognizedFieldType { tag } => {
                write!(f, "{}: unprocessed field of type \"{tag}\"", self.path)
            }
            DiagnosticKind::EmptySliceZone => {
                write!(f, "{}: slice zone has no choices, its union has no members", self.path)
            }
            DiagnosticKind::EmptyObject { type_name } => {
                write!(f, "{}: type `{type_name}` has no fields", self.path)
            }
            DiagnosticKind::DuplicateTabField { kept_tab, dropped_tab } => write!(
                f,
                "{}: defined in tabs \"{kept_tab}\" and \"{dropped_tab}\", keeping \"{kept_tab}\"",
                self.path
            ),
            DiagnosticKind::NamingCollision { type_name, first } => write!(
                f,
                "{}: type name `{type_name}` already generated by {first}",
                self.path
            ),
        }
    }
}
