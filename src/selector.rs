//! Selector synthesis.
//!
//! For each (element, clause) pair the resolver builds two selectors:
//!
//! - a **primary** compound selector that re-targets the reusable style class
//!   at this specific element: `#id` (if any), every class the element already
//!   carries, then the reusable class. Tags are deliberately not included so
//!   the rule stays reusable across element types. The additive form keeps the
//!   generated rule's specificity at least as high as any pre-existing rule
//!   naming the same id/classes.
//! - a **legacy fallback** attribute-contains selector scoped under a global
//!   legacy-engine marker class, for browsers without `@media` support. It is
//!   unconditional and identical for every element sharing a token, so the
//!   aggregator's byte-identity dedup collapses it to one copy per token.

use crate::config::Config;
use crate::dom::Element;
use crate::query::QueryClause;
use serde::{Deserialize, Serialize};

/// Snapshot of an element's pre-existing identity, taken at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIdentity {
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Pass-unique identifier (`cq-1`, `cq-2`, …) written back to the element.
    pub query_id: String,
}

impl ElementIdentity {
    /// Capture an element's id and class list, pairing them with the queryId
    /// the orchestrator assigned.
    pub fn capture(element: &Element, query_id: String) -> Self {
        Self {
            id: element.id().map(|s| s.to_string()),
            classes: element.classes(),
            query_id,
        }
    }
}

/// The two selectors produced for one (element, clause) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelectors {
    pub primary: String,
    pub legacy: String,
}

impl ResolvedSelectors {
    pub fn into_vec(self) -> Vec<String> {
        vec![self.primary, self.legacy]
    }
}

pub fn resolve(
    identity: &ElementIdentity,
    clause: &QueryClause,
    config: &Config,
) -> ResolvedSelectors {
    let style_class = format!("{}{}", config.style_prefix, clause.style_token);

    let mut primary = String::new();
    if let Some(ref id) = identity.id {
        primary.push('#');
        primary.push_str(&escape_selector(id));
    }
    for class in &identity.classes {
        primary.push('.');
        primary.push_str(&escape_selector(class));
    }
    primary.push('.');
    primary.push_str(&escape_selector(&style_class));

    let legacy = format!(
        ".{} [{}*=\".{}\"]",
        escape_selector(&config.legacy_marker_class),
        config.marker_attribute,
        style_class
    );

    ResolvedSelectors { primary, legacy }
}

/// Escapes CSS special characters so an authored id/class can be used in a
/// selector.
fn escape_selector(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        match ch {
            '.' | '/' | '[' | ']' | '(' | ')' | '%' | '#' | ':' | '@' | '!' | ',' | '~'
            | '^' | '$' | '&' | '+' | '=' | '<' | '>' | '|' | '\'' | '"' | ';' | '{'
            | '}' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn identity(id: Option<&str>, classes: &[&str]) -> ElementIdentity {
        ElementIdentity {
            id: id.map(|s| s.to_string()),
            classes: classes.iter().map(|s| s.to_string()).collect(),
            query_id: "cq-1".to_string(),
        }
    }

    fn w460() -> QueryClause {
        QueryClause {
            condition: "(min-width: 460px)".to_string(),
            style_token: "w460".to_string(),
        }
    }

    #[test]
    fn specificity_escalation_order_is_id_then_classes_then_style_class() {
        let resolved = resolve(&identity(Some("foo"), &["bar", "baz"]), &w460(), &Config::new());
        assert_eq!(resolved.primary, "#foo.bar.baz.classquery-w460");
    }

    #[test]
    fn bare_element_gets_just_the_style_class() {
        let resolved = resolve(&identity(None, &[]), &w460(), &Config::new());
        assert_eq!(resolved.primary, ".classquery-w460");
    }

    #[test]
    fn legacy_selector_is_scoped_and_token_specific() {
        let resolved = resolve(&identity(None, &[]), &w460(), &Config::new());
        assert_eq!(
            resolved.legacy,
            r#".ltie9 [data-classquery*=".classquery-w460"]"#
        );
    }

    #[test]
    fn legacy_selector_ignores_element_identity() {
        let a = resolve(&identity(Some("foo"), &["bar"]), &w460(), &Config::new());
        let b = resolve(&identity(None, &["other"]), &w460(), &Config::new());
        assert_eq!(a.legacy, b.legacy);
    }

    #[test]
    fn special_characters_are_escaped() {
        let resolved = resolve(&identity(None, &["a:b"]), &w460(), &Config::new());
        assert_eq!(resolved.primary, r".a\:b.classquery-w460");
    }
}
