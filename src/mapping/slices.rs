//! Slice zones.
//!
//! A zone `body` on custom type `page` with a `quote` choice produces:
//!
//! ```text
//! PrismicPage__Body__Quote__Primary   non-repeat fields
//! PrismicPage__Body__Quote__Item      repeat fields
//! PrismicPageBodyQuote                { primary: …Primary, items: [ …Item ] }
//! PrismicPage__Body__Slice            union of every choice's variant
//! ```
//!
//! and the zone field itself is `[PrismicPage__Body__Slice]`. The variant name
//! is public: consumers resolve slice instances to it by exact name.
use crate::definition::{FieldCollection, FieldKind, FieldPath, SliceDefinition};
use crate::diagnostics::DiagnosticKind;
use crate::error::{Result, SchemaError};
use crate::ir::{Field, ObjectType, Ty, UnionType};

use super::Mapper;

impl Mapper<'_> {
    pub fn map_slice_zone(&mut self, path: &FieldPath, zone_id: &str, choices: &FieldCollection) -> Result<Ty> {
        let mut members = Vec::with_capacity(choices.len());
        for (slice_id, choice) in choices {
            let choice_path = path.child(slice_id);
            match &choice.kind {
                FieldKind::Slice(slice) => {
                    members.push(self.map_slice(&choice_path, zone_id, slice_id, slice)?);
                }
                FieldKind::Unrecognized { tag } => {
                    self.diagnostics_mut()
                        .report(&choice_path, DiagnosticKind::UnrecognizedFieldType { tag: tag.clone() });
                }
                other => {
                    return Err(SchemaError::malformed(
                        &choice_path,
                        format!("slice zone choice must be a Slice, found {}", other.tag()),
                    ));
                }
            }
        }

        if members.is_empty() {
            self.diagnostics_mut().report(path, DiagnosticKind::EmptySliceZone);
        }

        let name = self
            .names()
            .namespaced_name(&[self.custom_type_id(), zone_id, "Slice"]);
        self.registry
            .claim(&name, &path.to_string(), path, &mut self.diagnostics)?;
        log::debug!("{path}: union {name} with {} member(s)", members.len());

        Ok(Ty::list(Ty::Union(UnionType { name, members })))
    }

    /// One variant of a zone: `public(ct, zone, slice)` composed of primary + items.
    pub fn map_slice(
        &mut self,
        path: &FieldPath,
        zone_id: &str,
        slice_id: &str,
        slice: &SliceDefinition,
    ) -> Result<ObjectType> {
        let custom_type_id = self.custom_type_id().to_string();

        let primary_path = path.child("non-repeat");
        let primary_fields = self.map_fields(&primary_path, &slice.non_repeat)?;
        let primary_name = self
            .names()
            .namespaced_name(&[custom_type_id.as_str(), zone_id, slice_id, "Primary"]);
        let primary = self.object(primary_name, &primary_path, primary_fields, None)?;

        let item_path = path.child("repeat");
        let item_fields = self.map_fields(&item_path, &slice.repeat)?;
        let item_name = self
            .names()
            .namespaced_name(&[custom_type_id.as_str(), zone_id, slice_id, "Item"]);
        let item = self.object(item_name, &item_path, item_fields, None)?;

        let variant_name = self
            .names()
            .public_name(&[custom_type_id.as_str(), zone_id, slice_id]);
        let fields = vec![
            Field {
                name: "primary".to_string(),
                ty: Ty::Object(primary),
                description: None,
            },
            Field {
                name: "items".to_string(),
                ty: Ty::list(Ty::Object(item)),
                description: None,
            },
        ];
        self.object(variant_name, path, fields, None)
    }
}
