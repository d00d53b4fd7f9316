// Scalar and fixed-shape leaf kinds.
//
// | kind                          | type                     |
// |-------------------------------|--------------------------|
// | Color, Select, Text, UID      | String!                  |
// | Number                        | Float!                   |
// | Date, Timestamp               | String! (ISO 8601)       |
// | StructuredText                | Prismic__Html            |
// | GeoPoint                      | Prismic__GeoPoint        |
// | Embed                         | Prismic__Embed           |
// | Image                         | Prismic__Image           |
// | Link                          | Prismic__Link            |
//
// Shapes live under `<prefix>__` so they never share a name with a custom
// type's root (`PrismicImage` for a custom type `image`).

use crate::definition::{FieldPath, LeafKind};
use crate::error::Result;
use crate::ir::{Field, ObjectType, Ty};
use crate::naming::NameGenerator;

use super::Mapper;

/// Pure mapping of one leaf kind.
pub fn leaf_type(kind: LeafKind, names: &NameGenerator) -> Ty {
    match kind {
        LeafKind::Color | LeafKind::Select | LeafKind::Text | LeafKind::Uid => Ty::non_null(Ty::String),
        LeafKind::Number => Ty::non_null(Ty::Float),
        LeafKind::Date | LeafKind::Timestamp => Ty::non_null(Ty::String),
        LeafKind::StructuredText => Ty::Object(shape(
            names.builtin_name(&["HTML"]),
            vec![
                ("html", Ty::non_null(Ty::String)),
                ("text", Ty::non_null(Ty::String)),
            ],
        )),
        LeafKind::GeoPoint => Ty::Object(shape(
            names.builtin_name(&["GeoPoint"]),
            vec![
                ("latitude", Ty::non_null(Ty::Float)),
                ("longitude", Ty::non_null(Ty::Float)),
            ],
        )),
        // TODO: one member per embed provider once provider payloads are pinned down.
        LeafKind::Embed => Ty::Object(shape(
            names.builtin_name(&["Embed"]),
            vec![("name", Ty::non_null(Ty::String))],
        )),
        LeafKind::Image => {
            let dimensions = shape(
                names.builtin_name(&["Image", "Dimensions"]),
                vec![
                    ("width", Ty::non_null(Ty::Int)),
                    ("height", Ty::non_null(Ty::Int)),
                ],
            );
            Ty::Object(shape(
                names.builtin_name(&["Image"]),
                vec![
                    ("alt", Ty::non_null(Ty::String)),
                    ("copyright", Ty::non_null(Ty::String)),
                    ("dimensions", Ty::Object(dimensions)),
                    ("url", Ty::non_null(Ty::String)),
                ],
            ))
        }
        // TODO: split into Document / Media / Web members keyed on `link_type`.
        LeafKind::Link => Ty::Object(shape(
            names.builtin_name(&["Link"]),
            vec![
                ("id", Ty::non_null(Ty::String)),
                ("link_type", Ty::non_null(Ty::String)),
            ],
        )),
    }
}

impl Mapper<'_> {
    pub fn map_leaf(&mut self, kind: LeafKind, path: &FieldPath) -> Result<Ty> {
        let ty = leaf_type(kind, self.names());
        let mut shapes = Vec::new();
        collect_object_names(&ty, &mut shapes);
        for name in shapes {
            self.claim_builtin(name, path)?;
        }
        Ok(ty)
    }
}

fn shape(name: String, fields: Vec<(&str, Ty)>) -> ObjectType {
    ObjectType {
        name,
        description: None,
        fields: fields
            .into_iter()
            .map(|(name, ty)| Field { name: name.to_string(), ty, description: None })
            .collect(),
    }
}

fn collect_object_names<'t>(ty: &'t Ty, out: &mut Vec<&'t str>) {
    if let Ty::Object(object) = ty.named() {
        out.push(&object.name);
        for field in &object.fields {
            collect_object_names(&field.ty, out);
        }
    }
}
