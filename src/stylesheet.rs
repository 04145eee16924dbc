//! Stylesheet serialization.
//!
//! One `@media` block per breakpoint group, each with an empty declaration
//! body: the visual declarations live in the author-authored reusable
//! `.classquery-*` classes, the generated block only re-targets them at the
//! requesting elements under the condition.

use crate::breakpoints::BreakpointGroup;
use crate::config::Config;
use crate::dom::Document;

/// Render all groups into one stylesheet text, in group order.
pub fn render(groups: &[BreakpointGroup]) -> String {
    let mut css = String::new();
    for group in groups {
        css.push_str("@media ");
        // Authored conditions usually arrive already parenthesized; only add
        // a wrapping pair when they do not.
        if group.condition.starts_with('(') {
            css.push_str(&group.condition);
        } else {
            css.push('(');
            css.push_str(&group.condition);
            css.push(')');
        }
        css.push_str(" { ");
        css.push_str(&group.selectors.join(", "));
        css.push_str(" { } }\n");
    }
    css
}

/// Append the rendered stylesheet to the document as a single style node.
///
/// No-ops when there are no groups: a page without marked elements must see
/// zero DOM mutations from the emitter.
pub fn emit_into(document: &mut Document, groups: &[BreakpointGroup], config: &Config) {
    if groups.is_empty() {
        return;
    }
    let css = render(groups);
    document.append_style(&css, &config.stylesheet_attribute());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn group(condition: &str, selectors: &[&str]) -> BreakpointGroup {
        BreakpointGroup {
            condition: condition.to_string(),
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn renders_one_block_per_group() {
        let css = render(&[
            group("(min-width: 460px)", &[".classquery-w460"]),
            group("(min-width: 600px)", &["#a.classquery-w600"]),
        ]);
        assert_eq!(
            css,
            "@media (min-width: 460px) { .classquery-w460 { } }\n\
             @media (min-width: 600px) { #a.classquery-w600 { } }\n"
        );
    }

    #[test]
    fn selectors_are_comma_joined() {
        let css = render(&[group(
            "(min-width: 460px)",
            &[
                ".classquery-w460",
                r#".ltie9 [data-classquery*=".classquery-w460"]"#,
            ],
        )]);
        assert_eq!(
            css,
            "@media (min-width: 460px) { .classquery-w460, \
             .ltie9 [data-classquery*=\".classquery-w460\"] { } }\n"
        );
    }

    #[test]
    fn unparenthesized_condition_is_wrapped() {
        let css = render(&[group("min-width: 460px", &[".a"])]);
        assert!(css.starts_with("@media (min-width: 460px) {"));
    }

    #[test]
    fn already_parenthesized_compound_is_not_rewrapped() {
        let css = render(&[group("(min-width: 600px) and (max-width: 900px)", &[".a"])]);
        assert!(css.starts_with("@media (min-width: 600px) and (max-width: 900px) {"));
    }

    #[test]
    fn emit_with_no_groups_leaves_document_untouched() {
        let mut doc = Document::parse("<html><head /><body /></html>").unwrap();
        let before = doc.to_html();
        emit_into(&mut doc, &[], &Config::new());
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn emit_appends_a_single_style_node() {
        let mut doc = Document::parse("<html><head /><body /></html>").unwrap();
        emit_into(
            &mut doc,
            &[group("(min-width: 460px)", &[".classquery-w460"])],
            &Config::new(),
        );
        let html = doc.to_html();
        assert_eq!(html.matches("<style").count(), 1);
        assert!(html.contains("data-classquery-stylesheet=\"generated\""));
    }
}
