//! Generated type name → where it came from, for one build.
use indexmap::IndexMap;

use crate::definition::FieldPath;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{Result, SchemaError};
use crate::options::CollisionPolicy;

#[derive(Debug)]
pub struct NameRegistry {
    policy: CollisionPolicy,
    origins: IndexMap<String, String>,
}

impl NameRegistry {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            origins: IndexMap::new(),
        }
    }

    /// Claim `name` for `origin`. Claiming again from the same origin is a no-op;
    /// shared leaf shapes rely on that.
    pub fn claim(
        &mut self,
        name: &str,
        origin: &str,
        path: &FieldPath,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        match self.origins.get(name) {
            None => {
                self.origins.insert(name.to_string(), origin.to_string());
                Ok(())
            }
            Some(first) if first == origin => Ok(()),
            Some(first) => match self.policy {
                CollisionPolicy::Error => Err(SchemaError::NamingCollision {
                    name: name.to_string(),
                    first: first.clone(),
                    second: origin.to_string(),
                }),
                CollisionPolicy::Warn => {
                    diagnostics.report(
                        path,
                        DiagnosticKind::NamingCollision {
                            type_name: name.to_string(),
                            first: first.clone(),
                        },
                    );
                    Ok(())
                }
            },
        }
    }
}

#[cfg(test)]
impl NameRegistry {
    fn origin_of(&self, name: &str) -> Option<&str> {
        self.origins.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_is_idempotent() {
        let mut reg = NameRegistry::new(CollisionPolicy::Error);
        let mut diags = Diagnostics::new();
        let path = FieldPath::root("page");
        reg.claim("Prismic__Html", "built-in", &path, &mut diags).unwrap();
        reg.claim("Prismic__Html", "built-in", &path, &mut diags).unwrap();
        assert_eq!(reg.origins.len(), 1);
        assert_eq!(reg.origin_of("Prismic__Html"), Some("built-in"));
    }

    #[test]
    fn different_origin_errors_under_error_policy() {
        let mut reg = NameRegistry::new(CollisionPolicy::Error);
        let mut diags = Diagnostics::new();
        let path = FieldPath::root("page");
        reg.claim("X", "page:a", &path, &mut diags).unwrap();
        let err = reg.claim("X", "page:b", &path, &mut diags).unwrap_err();
        assert_eq!(err.to_string(), "type name `X` generated by both page:a and page:b");
    }

    #[test]
    fn different_origin_warns_under_warn_policy() {
        let mut reg = NameRegistry::new(CollisionPolicy::Warn);
        let mut diags = Diagnostics::new();
        let path = FieldPath::root("page").child("b");
        reg.claim("X", "page:a", &path, &mut diags).unwrap();
        reg.claim("X", "page:b", &path, &mut diags).unwrap();
        let items = diags.into_vec();
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0].kind, DiagnosticKind::NamingCollision { .. }));
        assert_eq!(reg.origin_of("X"), Some("page:a"));
    }
}
