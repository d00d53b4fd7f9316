// Schema type graph produced by mapping. Children are embedded by value, so a
// built tree is immutable and self-contained.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::diagnostics::Diagnostic;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ty {
    String,
    Float,
    Int,
    Object(ObjectType),
    Union(UnionType),
    List { of: Box<Ty> },
    NonNull { of: Box<Ty> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<Field>, // authoring order
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub ty: Ty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionType {
    pub name: String,
    pub members: Vec<ObjectType>, // `choices` order
}

/// A named definition reachable from the query type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NamedType<'a> {
    Object(&'a ObjectType),
    Union(&'a UnionType),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub query: ObjectType,
    pub diagnostics: Vec<Diagnostic>,
}

impl Ty {
    pub fn non_null(ty: Ty) -> Ty {
        Ty::NonNull { of: Box::new(ty) }
    }

    pub fn list(ty: Ty) -> Ty {
        Ty::List { of: Box::new(ty) }
    }

    pub fn is_nullable(&self) -> bool {
        !matches!(self, Ty::NonNull { .. })
    }

    /// Strip list / non-null wrappers.
    pub fn named(&self) -> &Ty {
        match self {
            Ty::List { of } | Ty::NonNull { of } => of.named(),
            other => other,
        }
    }

    pub fn name(&self) -> &str {
        match self.named() {
            Ty::String => "String",
            Ty::Float => "Float",
            Ty::Int => "Int",
            Ty::Object(object) => object.name.as_str(),
            Ty::Union(union) => union.name.as_str(),
            Ty::List { .. } | Ty::NonNull { .. } => unreachable!("wrappers are stripped by named()"),
        }
    }
}

/// GraphQL type reference syntax: `String!`, `[PrismicPage__Body__Slice]`.
impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::List { of } => write!(f, "[{of}]"),
            Ty::NonNull { of } => write!(f, "{of}!"),
            other => f.write_str(other.name()),
        }
    }
}

impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl<'a> NamedType<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            NamedType::Object(object) => object.name.as_str(),
            NamedType::Union(union) => union.name.as_str(),
        }
    }
}

impl Schema {
    pub fn root_name(&self) -> &str {
        &self.query.name
    }

    /// Every named type once, pre-order from the query type, first occurrence wins.
    pub fn types(&self) -> Vec<NamedType<'_>> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        visit_object(&self.query, &mut seen, &mut out);
        out
    }

    pub fn find_object(&self, name: &str) -> Option<&ObjectType> {
        self.types().into_iter().find_map(|t| match t {
            NamedType::Object(object) if object.name == name => Some(object),
            _ => None,
        })
    }

    pub fn find_union(&self, name: &str) -> Option<&UnionType> {
        self.types().into_iter().find_map(|t| match t {
            NamedType::Union(union) if union.name == name => Some(union),
            _ => None,
        })
    }
}

fn visit_object<'a>(object: &'a ObjectType, seen: &mut HashSet<&'a str>, out: &mut Vec<NamedType<'a>>) {
    if !seen.insert(&object.name) {
        return;
    }
    out.push(NamedType::Object(object));
    for field in &object.fields {
        visit_ty(&field.ty, seen, out);
    }
}

fn visit_ty<'a>(ty: &'a Ty, seen: &mut HashSet<&'a str>, out: &mut Vec<NamedType<'a>>) {
    match ty.named() {
        Ty::Object(object) => visit_object(object, seen, out),
        Ty::Union(union) => {
            if !seen.insert(&union.name) {
                return;
            }
            out.push(NamedType::Union(union));
            for member in &union.members {
                visit_object(member, seen, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: &str, fields: Vec<(&str, Ty)>) -> ObjectType {
        ObjectType {
            name: name.into(),
            description: None,
            fields: fields
                .into_iter()
                .map(|(n, ty)| Field { name: n.into(), ty, description: None })
                .collect(),
        }
    }

    #[test]
    fn type_reference_display() {
        assert_eq!(Ty::non_null(Ty::String).to_string(), "String!");
        let item = object("Item", vec![]);
        assert_eq!(Ty::list(Ty::Object(item)).to_string(), "[Item]");
        assert_eq!(Ty::non_null(Ty::list(Ty::non_null(Ty::Int))).to_string(), "[Int!]!");
    }

    #[test]
    fn types_are_unique_and_preorder() {
        let shared = object("Shared", vec![("x", Ty::Float)]);
        let root = object(
            "Root",
            vec![
                ("a", Ty::Object(shared.clone())),
                ("b", Ty::list(Ty::Union(UnionType {
                    name: "U".into(),
                    members: vec![object("M", vec![("s", Ty::Object(shared))])],
                }))),
            ],
        );
        let schema = Schema { query: root, diagnostics: vec![] };
        let names: Vec<_> = schema.types().iter().map(|t| t.name()).collect();
        assert_eq!(names, ["Root", "Shared", "U", "M"]);
        assert!(schema.find_union("U").is_some());
        assert!(schema.find_object("M").is_some());
        assert!(schema.find_object("U").is_none());
    }
}
