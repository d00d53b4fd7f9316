//! GraphQL SDL rendering.
//!
//! One definition per named type in [`Schema::types`] order, then the
//! `schema` block. Memberless unions / fieldless objects are written as bare
//! `union X` / `type X`; they were already reported as diagnostics.
use std::fmt::Write;

use crate::ir::{NamedType, ObjectType, Schema, UnionType};

pub fn render(schema: &Schema) -> String {
    let mut out = String::new();
    for named in schema.types() {
        match named {
            NamedType::Object(object) => render_object(&mut out, object),
            NamedType::Union(union) => render_union(&mut out, union),
        }
        out.push('\n');
    }
    let _ = writeln!(out, "schema {{\n  query: {}\n}}", schema.root_name());
    out
}

fn render_object(out: &mut String, object: &ObjectType) {
    if let Some(description) = &object.description {
        let _ = writeln!(out, "{}", string_literal(description));
    }
    if object.fields.is_empty() {
        let _ = writeln!(out, "type {}", object.name);
        return;
    }
    let _ = writeln!(out, "type {} {{", object.name);
    for field in &object.fields {
        if let Some(description) = &field.description {
            let _ = writeln!(out, "  {}", string_literal(description));
        }
        let _ = writeln!(out, "  {}: {}", field.name, field.ty);
    }
    out.push_str("}\n");
}

fn render_union(out: &mut String, union: &UnionType) {
    let members = union
        .members
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>();
    if members.is_empty() {
        let _ = writeln!(out, "union {}", union.name);
    } else {
        let _ = writeln!(out, "union {} = {}", union.name, members.join(" | "));
    }
}

// JSON string escaping is a subset of GraphQL's.
fn string_literal(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::build_schema_from_json;
    use crate::options::BuildOptions;
    use serde_json::json;

    #[test]
    fn renders_page_with_slices() {
        let schema = build_schema_from_json(
            "page",
            &json!({
                "Main": {
                    "uid": { "type": "UID" },
                    "title": { "type": "Text", "config": { "label": "Title" } },
                    "body": { "type": "Slices", "config": { "choices": {
                        "quote": { "type": "Slice", "non-repeat": { "text": { "type": "Text" } } }
                    } } }
                }
            }),
            &BuildOptions::default(),
        )
        .unwrap();

        let expected = r#"type PrismicPage {
  uid: String!
  data: PrismicPage__Data
}

type PrismicPage__Data {
  "Title"
  title: String!
  body: [PrismicPage__Body__Slice]
}

union PrismicPage__Body__Slice = PrismicPageBodyQuote

type PrismicPageBodyQuote {
  primary: PrismicPage__Body__Quote__Primary
  items: [PrismicPage__Body__Quote__Item]
}

type PrismicPage__Body__Quote__Primary {
  text: String!
}

type PrismicPage__Body__Quote__Item

schema {
  query: PrismicPage
}
"#;
        assert_eq!(render(&schema), expected);
    }

    #[test]
    fn empty_union_has_no_members() {
        let schema = build_schema_from_json(
            "page",
            &json!({ "Main": { "body": { "type": "Slices", "config": { "choices": {} } } } }),
            &BuildOptions::default(),
        )
        .unwrap();
        assert!(render(&schema).contains("union PrismicPage__Body__Slice\n"));
    }

    #[test]
    fn placeholder_follows_label_in_description() {
        let schema = build_schema_from_json(
            "page",
            &json!({ "Main": { "title": { "type": "Text", "config": {
                "label": "Title", "placeholder": "Enter a title"
            } } } }),
            &BuildOptions::default(),
        )
        .unwrap();
        let rendered = render(&schema);
        assert!(rendered.contains("  \"Title\\n\\nEnter a title\"\n  title: String!\n"), "{rendered}");
    }

    #[test]
    fn descriptions_are_escaped() {
        assert_eq!(string_literal("say \"hi\""), r#""say \"hi\"""#);
    }
}
