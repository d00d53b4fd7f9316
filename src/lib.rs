//! Prismic custom-type definitions → GraphQL schema types.
//!
//! ```text
//! raw JSON ─▶ definition ─▶ mapping (leaf / group / slices) ─▶ assemble ─▶ ir::Schema ─▶ sdl
//! ```
pub mod assemble;
pub mod cli;
pub mod definition;
pub mod diagnostics;
pub mod error;
pub mod ir;
pub mod mapping;
pub mod naming;
pub mod options;
pub mod path_de;
pub mod registry;
pub mod sdl;

pub use assemble::{build_schema, build_schema_from_json, build_schema_from_str, build_schema_with};
pub use definition::{CustomTypeDefinition, FieldDefinition, FieldKind, FieldPath, LeafKind};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{Result, SchemaError};
pub use ir::{Schema, Ty};
pub use naming::NameGenerator;
pub use options::{BuildOptions, CollisionPolicy, TabPrecedence};
