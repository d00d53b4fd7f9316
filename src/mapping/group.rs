use crate::definition::{FieldCollection, FieldDefinition, FieldPath};
use crate::error::Result;
use crate::ir::Ty;

use super::Mapper;

impl Mapper<'_> {
    /// Group → nullable `namespaced(ct, "Group", field)` object of its mapped sub-fields.
    /// `uid` has no special meaning in here.
    pub fn map_group(
        &mut self,
        path: &FieldPath,
        field_id: &str,
        field: &FieldDefinition,
        fields: &FieldCollection,
    ) -> Result<Ty> {
        let members = self.map_fields(path, fields)?;
        let name = self
            .names()
            .namespaced_name(&[self.custom_type_id(), "Group", field_id]);
        let object = self.object(name, path, members, field.config.description())?;
        Ok(Ty::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::FieldKind;
    use crate::error::SchemaError;
    use crate::options::BuildOptions;
    use serde_json::json;

    fn group(value: serde_json::Value) -> FieldDefinition {
        FieldDefinition::from_json(&FieldPath::root("page"), &value).unwrap()
    }

    fn map(mapper: &mut Mapper<'_>, id: &str, def: &FieldDefinition) -> Result<Ty> {
        let FieldKind::Group { fields } = &def.kind else { panic!("expected group") };
        mapper.map_group(&FieldPath::root("page").child(id), id, def, fields)
    }

    #[test]
    fn group_has_one_member_per_leaf() {
        let opts = BuildOptions::default();
        let mut mapper = Mapper::new("page", &opts);
        let def = group(json!({
            "type": "Group",
            "config": { "label": "Gallery", "fields": {
                "caption": { "type": "Text" },
                "weight": { "type": "Number" },
                "photo": { "type": "Image" },
                "uid": { "type": "UID" }
            } }
        }));
        let ty = map(&mut mapper, "gallery", &def).unwrap();
        assert!(ty.is_nullable());
        let Ty::Object(object) = ty else { panic!("expected object") };
        assert_eq!(object.name, "PrismicPage__Group__Gallery");
        assert_eq!(object.description.as_deref(), Some("Gallery"));
        let shape: Vec<_> = object.fields.iter().map(|f| format!("{}: {}", f.name, f.ty)).collect();
        assert_eq!(
            shape,
            ["caption: String!", "weight: Float!", "photo: Prismic__Image", "uid: String!"]
        );
    }

    #[test]
    fn nested_groups_are_built_bottom_up() {
        let opts = BuildOptions::default();
        let mut mapper = Mapper::new("page", &opts);
        let def = group(json!({
            "type": "Group",
            "config": { "fields": {
                "links": { "type": "Group", "config": { "fields": {
                    "target": { "type": "Link" }
                } } }
            } }
        }));
        let Ty::Object(outer) = map(&mut mapper, "footer", &def).unwrap() else { panic!() };
        let inner = &outer.field("links").unwrap().ty;
        assert_eq!(inner.to_string(), "PrismicPage__Group__Links");
        let Ty::Object(inner) = inner else { panic!() };
        assert_eq!(inner.field("target").unwrap().ty.to_string(), "Prismic__Link");
    }

    #[test]
    fn same_group_id_in_two_places_collides() {
        let opts = BuildOptions::default();
        let mut mapper = Mapper::new("page", &opts);
        let def = group(json!({
            "type": "Group",
            "config": { "fields": {
                "items": { "type": "Group", "config": { "fields": { "a": { "type": "Text" } } } }
            } }
        }));
        map(&mut mapper, "left", &def).unwrap();
        let err = map(&mut mapper, "right", &def).unwrap_err();
        match err {
            SchemaError::NamingCollision { name, first, second } => {
                assert_eq!(name, "PrismicPage__Group__Items");
                assert_eq!(first, "page:left.items");
                assert_eq!(second, "page:right.items");
            }
            other => panic!("unexpected {other}"),
        }
    }
}
