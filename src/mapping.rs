//! Field definition → schema type.
//!
//! One recursive walk per custom type. Children are fully built before the
//! type that embeds them, every synthesized name is claimed in the
//! [`NameRegistry`], and anything recoverable goes to [`Diagnostics`].
//!
//! Naming rules (`ct` = custom type id):
//! - group: `namespaced(ct, "Group", field)`
//! - slice variant: `public(ct, zone, slice)`, with `…__Primary` / `…__Item` helpers
//! - slice zone union: `namespaced(ct, zone, "Slice")`
pub mod leaf;
pub mod group;
pub mod slices;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::definition::{FieldDefinition, FieldKind, FieldPath};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{Result, SchemaError};
use crate::ir::{Field, ObjectType, Ty};
use crate::naming::NameGenerator;
use crate::options::BuildOptions;
use crate::registry::NameRegistry;

// GraphQL `Name`; field ids are written into the schema as-is.
static FIELD_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").unwrap());

pub struct Mapper<'a> {
    custom_type_id: &'a str,
    options: &'a BuildOptions,
    names: NameGenerator,
    registry: NameRegistry,
    diagnostics: Diagnostics,
}

impl<'a> Mapper<'a> {
    pub fn new(custom_type_id: &'a str, options: &'a BuildOptions) -> Self {
        Self {
            custom_type_id,
            options,
            names: NameGenerator::new(options.prefix.clone()),
            registry: NameRegistry::new(options.collisions),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn custom_type_id(&self) -> &str {
        self.custom_type_id
    }

    pub fn names(&self) -> &NameGenerator {
        &self.names
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Unified dispatcher. `None` means the field is left out of its parent.
    pub fn map_field(&mut self, path: &FieldPath, id: &str, field: &FieldDefinition) -> Result<Option<Ty>> {
        if path.depth() > self.options.max_depth {
            return Err(SchemaError::malformed(
                path,
                format!("nesting deeper than {} levels", self.options.max_depth),
            ));
        }

        match &field.kind {
            FieldKind::Leaf(kind) => self.map_leaf(*kind, path).map(Some),
            FieldKind::Group { fields } => self.map_group(path, id, field, fields).map(Some),
            FieldKind::Slices { choices } => self.map_slice_zone(path, id, choices).map(Some),
            FieldKind::Slice(_) => Err(SchemaError::malformed(
                path,
                "Slice is only valid as a choice of a Slices field",
            )),
            FieldKind::Unrecognized { tag } => {
                self.diagnostics
                    .report(path, DiagnosticKind::UnrecognizedFieldType { tag: tag.clone() });
                Ok(None)
            }
        }
    }

    /// Map every entry of a collection, in order, dropping unrecognized ones.
    pub fn map_fields<'d, I>(&mut self, parent: &FieldPath, fields: I) -> Result<Vec<Field>>
    where
        I: IntoIterator<Item = (&'d String, &'d FieldDefinition)>,
    {
        let mut out = Vec::new();
        for (id, field) in fields {
            let path = parent.child(id);
            if !FIELD_NAME.is_match(id) {
                return Err(SchemaError::malformed(
                    &path,
                    format!("field id `{id}` is not a valid GraphQL field name"),
                ));
            }
            if let Some(ty) = self.map_field(&path, id, field)? {
                out.push(Field {
                    name: id.clone(),
                    ty,
                    description: field.config.description(),
                });
            }
        }
        Ok(out)
    }

    /// Claim `name` for `path` and build the object. Empty objects are kept but reported.
    pub fn object(
        &mut self,
        name: String,
        path: &FieldPath,
        fields: Vec<Field>,
        description: Option<String>,
    ) -> Result<ObjectType> {
        self.registry
            .claim(&name, &path.to_string(), path, &mut self.diagnostics)?;
        if fields.is_empty() {
            self.diagnostics.report(
                path,
                DiagnosticKind::EmptyObject { type_name: name.clone() },
            );
        }
        log::debug!("{path}: object {name} with {} field(s)", fields.len());
        Ok(ObjectType { name, description, fields })
    }

    fn claim_builtin(&mut self, name: &str, path: &FieldPath) -> Result<()> {
        self.registry
            .claim(name, "built-in field shape", path, &mut self.diagnostics)
    }
}
