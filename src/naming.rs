//! Deterministic type names.
//!
//! Every fragment is reduced to words (split on any non-alphanumeric run and on
//! lower→upper case changes) and each word is capitalised, so `hero_banner`,
//! `hero-banner`, `heroBanner` and `HERO_BANNER` all become `HeroBanner`.
//!
//! Built-in field shapes use `builtin_name`, which puts the separator right after
//! the prefix (`Prismic__Image`) so no custom type id can produce the same name.
//!
//! Public names are matched by exact string outside this crate:
//! `PrismicPage`, `PrismicPageBodyQuote`. Changing anything here is a breaking
//! change for those consumers.
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_PREFIX: &str = "Prismic";

const NAMESPACE_SEPARATOR: &str = "__";

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameGenerator {
    prefix: String,
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl NameGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `Prismic` + fragments joined with nothing.
    pub fn public_name<S: AsRef<str>>(&self, parts: &[S]) -> String {
        self.join(parts, "")
    }

    /// `Prismic` + fragments joined with `__`.
    pub fn namespaced_name<S: AsRef<str>>(&self, parts: &[S]) -> String {
        self.join(parts, NAMESPACE_SEPARATOR)
    }

    /// `Prismic__` + fragments joined with `__`; shared field shapes only.
    pub fn builtin_name<S: AsRef<str>>(&self, parts: &[S]) -> String {
        format!("{}{NAMESPACE_SEPARATOR}{}", self.prefix, self.join_fragments(parts, NAMESPACE_SEPARATOR))
    }

    fn join<S: AsRef<str>>(&self, parts: &[S], separator: &str) -> String {
        format!("{}{}", self.prefix, self.join_fragments(parts, separator))
    }

    fn join_fragments<S: AsRef<str>>(&self, parts: &[S], separator: &str) -> String {
        parts
            .iter()
            .map(|part| pascal_case(part.as_ref()))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Canonical capitalised-word form of one fragment.
pub fn pascal_case(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    for chunk in SEPARATORS.split(fragment).filter(|c| !c.is_empty()) {
        for word in split_case_words(chunk) {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.extend(chars.flat_map(char::to_lowercase));
            }
        }
    }
    out
}

// `heroBanner` → [hero, Banner]; `HTMLBlock` → [HTML, Block]
fn split_case_words(chunk: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut words = Vec::new();
    let mut start = 0;
    for i in 1..chars.len() {
        let (at, c) = chars[i];
        let prev = chars[i - 1].1;
        let next_is_lower = chars.get(i + 1).is_some_and(|(_, n)| n.is_lowercase());
        let boundary = c.is_uppercase()
            && (prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower));
        if boundary {
            words.push(&chunk[start..at]);
            start = at;
        }
    }
    words.push(&chunk[start..]);
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hero_banner")]
    #[case("hero-banner")]
    #[case("heroBanner")]
    #[case("HeroBanner")]
    #[case("HERO_BANNER")]
    #[case("hero banner")]
    #[case("  hero__banner ")]
    fn fragments_are_case_and_separator_insensitive(#[case] fragment: &str) {
        assert_eq!(pascal_case(fragment), "HeroBanner");
    }

    #[rstest]
    #[case("page", "Page")]
    #[case("HTML", "Html")]
    #[case("HTMLBlock", "HtmlBlock")]
    #[case("image2x", "Image2x")]
    #[case("call_to_action", "CallToAction")]
    #[case("", "")]
    fn pascal_case_words(#[case] fragment: &str, #[case] expected: &str) {
        assert_eq!(pascal_case(fragment), expected);
    }

    #[test]
    fn public_and_namespaced_names() {
        let names = NameGenerator::default();
        assert_eq!(names.public_name(&["page"]), "PrismicPage");
        assert_eq!(names.public_name(&["page", "body", "quote"]), "PrismicPageBodyQuote");
        assert_eq!(names.namespaced_name(&["page", "Data"]), "PrismicPage__Data");
        assert_eq!(
            names.namespaced_name(&["page", "body", "quote", "Primary"]),
            "PrismicPage__Body__Quote__Primary"
        );
    }

    #[test]
    fn names_are_stable_across_spellings() {
        let names = NameGenerator::default();
        let a = names.namespaced_name(&["blog_post", "body", "call_to_action", "Item"]);
        let b = names.namespaced_name(&["BlogPost", "Body", "callToAction", "item"]);
        assert_eq!(a, b);
        assert_eq!(a, names.namespaced_name(&["blog_post", "body", "call_to_action", "Item"]));
    }

    #[test]
    fn builtin_names_stay_out_of_the_public_namespace() {
        let names = NameGenerator::default();
        assert_eq!(names.builtin_name(&["HTML"]), "Prismic__Html");
        assert_eq!(names.builtin_name(&["Image", "Dimensions"]), "Prismic__Image__Dimensions");
        for id in ["image", "link", "embed", "html", "geo_point"] {
            assert_ne!(names.builtin_name(&[id]), names.public_name(&[id]));
        }
    }

    #[test]
    fn custom_prefix() {
        let names = NameGenerator::new("Cms");
        assert_eq!(names.public_name(&["article"]), "CmsArticle");
        assert_eq!(names.prefix(), "Cms");
    }
}
