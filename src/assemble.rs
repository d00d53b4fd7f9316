//! Custom type → schema.
//!
//! Tabs are flattened into one collection, `uid` is lifted out as the
//! identifier field, everything else goes under `data`:
//!
//! ```text
//! type PrismicPage { uid: String!  data: PrismicPage__Data }
//! ```
use indexmap::IndexMap;
use serde_json::Value;

use crate::definition::{CustomTypeDefinition, FieldDefinition, FieldKind, FieldPath};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{Result, SchemaError};
use crate::ir::{Field, Schema, Ty};
use crate::mapping::Mapper;
use crate::options::{BuildOptions, TabPrecedence};

const UID_FIELD: &str = "uid";

/// Build with default options.
pub fn build_schema(custom_type_id: &str, definition: &CustomTypeDefinition) -> Result<Schema> {
    build_schema_with(custom_type_id, definition, &BuildOptions::default())
}

/// Parse raw JSON and build.
pub fn build_schema_from_json(custom_type_id: &str, raw: &Value, options: &BuildOptions) -> Result<Schema> {
    let definition = CustomTypeDefinition::from_json(custom_type_id, raw)?;
    build_schema_with(custom_type_id, &definition, options)
}

pub fn build_schema_from_str(custom_type_id: &str, source: &str, options: &BuildOptions) -> Result<Schema> {
    let raw = crate::path_de::read_definition(source)?;
    build_schema_from_json(custom_type_id, &raw, options)
}

pub fn build_schema_with(
    custom_type_id: &str,
    definition: &CustomTypeDefinition,
    options: &BuildOptions,
) -> Result<Schema> {
    let root = FieldPath::root(custom_type_id);
    let mut mapper = Mapper::new(custom_type_id, options);

    let mut fields = flatten_tabs(&root, definition, options.tab_precedence, mapper.diagnostics_mut());
    let uid = fields.shift_remove(UID_FIELD);

    // 1) identifier
    let uid_field = match uid {
        Some(field) => map_uid(&mut mapper, &root.child(UID_FIELD), field)?.map(|ty| Field {
            name: UID_FIELD.to_string(),
            ty,
            description: field.config.description(),
        }),
        None => None,
    };

    // 2) data
    let data_fields = mapper.map_fields(&root, fields.iter().map(|(id, field)| (id, *field)))?;
    let data_name = mapper.names().namespaced_name(&[custom_type_id, "Data"]);
    let data = mapper.object(data_name, &root, data_fields, None)?;

    // 3) root
    let mut root_fields: Vec<Field> = uid_field.into_iter().collect();
    root_fields.push(Field { name: "data".to_string(), ty: Ty::Object(data), description: None });
    let root_name = mapper.names().public_name(&[custom_type_id]);
    let query = mapper.object(root_name, &root, root_fields, None)?;

    let diagnostics = mapper.into_diagnostics().into_vec();
    log::info!(
        "{custom_type_id}: built {} with {} diagnostic(s)",
        query.name,
        diagnostics.len()
    );
    Ok(Schema { query, diagnostics })
}

/// Merge all tabs; a field id seen in two tabs is resolved by `precedence`.
/// Position is always that of the first occurrence.
fn flatten_tabs<'d>(
    root: &FieldPath,
    definition: &'d CustomTypeDefinition,
    precedence: TabPrecedence,
    diagnostics: &mut Diagnostics,
) -> IndexMap<String, &'d FieldDefinition> {
    let mut merged: IndexMap<String, (&'d str, &'d FieldDefinition)> = IndexMap::new();
    for (tab, fields) in &definition.tabs {
        for (id, field) in fields {
            let Some(slot) = merged.get_mut(id) else {
                merged.insert(id.clone(), (tab.as_str(), field));
                continue;
            };
            let (kept_tab, dropped_tab) = match precedence {
                TabPrecedence::FirstSeenWins => (slot.0, tab.as_str()),
                TabPrecedence::LastSeenWins => {
                    let dropped = slot.0;
                    *slot = (tab.as_str(), field);
                    (tab.as_str(), dropped)
                }
            };
            diagnostics.report(
                &root.child(id),
                DiagnosticKind::DuplicateTabField {
                    kept_tab: kept_tab.to_string(),
                    dropped_tab: dropped_tab.to_string(),
                },
            );
        }
    }
    merged.into_iter().map(|(id, (_, field))| (id, field)).collect()
}

fn map_uid(mapper: &mut Mapper<'_>, path: &FieldPath, field: &FieldDefinition) -> Result<Option<Ty>> {
    match &field.kind {
        FieldKind::Leaf(_) | FieldKind::Unrecognized { .. } => mapper.map_field(path, UID_FIELD, field),
        other => Err(SchemaError::malformed(
            path,
            format!("`uid` must be a leaf field, found {}", other.tag()),
        )),
    }
}
