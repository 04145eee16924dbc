//! Marker attribute grammar.
//!
//! ```text
//! data-classquery="<condition>, <styleToken>[; <condition>, <styleToken>]*"
//! ```
//!
//! Clauses are separated by `;`. Inside a clause the condition and the style
//! token are separated by the FIRST `,` only — compound conditions such as
//! `(min-width: 600px) and (max-width: 900px)` keep their own commas and
//! parentheses verbatim. The parser is total: it never fails, it only skips
//! clauses it cannot decode and reports them as diagnostics.

use crate::error::Diagnostic;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One condition + style token pair, as authored.
///
/// `condition` is the literal media-condition text after trimming the
/// surrounding whitespace; it is never interpreted, only echoed into the
/// generated `@media` header. `style_token` is the bare suffix of the reusable
/// style class (`w460` for `.classquery-w460`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryClause {
    pub condition: String,
    pub style_token: String,
}

/// Result of decoding one marker attribute: the clauses that parsed, plus a
/// diagnostic per clause that did not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedDeclaration {
    pub clauses: Vec<QueryClause>,
    pub diagnostics: Vec<Diagnostic>,
}

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap())
}

/// Decode one marker attribute value.
///
/// `style_prefix` is the reusable-class prefix (e.g. `classquery-`); authors
/// may write the token as `.classquery-w460`, `classquery-w460` or plain
/// `w460` — all three normalize to the bare suffix `w460` so the resolver can
/// re-add the prefix consistently.
pub fn parse_declaration(raw: &str, style_prefix: &str) -> ParsedDeclaration {
    let mut parsed = ParsedDeclaration::default();

    for (index, clause) in raw.split(';').enumerate() {
        let clause = clause.trim();
        // Stray `;;` or leading/trailing separators: not worth a diagnostic.
        if clause.is_empty() {
            continue;
        }

        let Some((condition, token)) = clause.split_once(',') else {
            parsed.diagnostics.push(Diagnostic::MissingSeparator {
                index,
                clause: clause.to_string(),
            });
            continue;
        };

        let condition = condition.trim();
        if condition.is_empty() {
            parsed.diagnostics.push(Diagnostic::EmptyCondition { index });
            continue;
        }

        let token = token.trim();
        if token.is_empty() {
            parsed.diagnostics.push(Diagnostic::EmptyStyleToken { index });
            continue;
        }

        let token = normalize_token(token, style_prefix);
        if !token_regex().is_match(token) {
            parsed.diagnostics.push(Diagnostic::InvalidStyleToken {
                index,
                token: token.to_string(),
            });
            continue;
        }

        parsed.clauses.push(QueryClause {
            condition: condition.to_string(),
            style_token: token.to_string(),
        });
    }

    parsed
}

/// Strip the optional leading `.` and the reusable-class prefix.
fn normalize_token<'a>(token: &'a str, style_prefix: &str) -> &'a str {
    let token = token.strip_prefix('.').unwrap_or(token);
    token.strip_prefix(style_prefix).unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PREFIX: &str = "classquery-";

    fn clause(condition: &str, token: &str) -> QueryClause {
        QueryClause {
            condition: condition.to_string(),
            style_token: token.to_string(),
        }
    }

    #[test]
    fn single_clause() {
        let parsed = parse_declaration("(min-width: 460px), .classquery-w460", PREFIX);
        assert_eq!(parsed.clauses, vec![clause("(min-width: 460px)", "w460")]);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn multiple_clauses_preserve_order() {
        let parsed = parse_declaration(
            "(min-width: 460px), .classquery-w460; (min-width: 600px), .classquery-w600",
            PREFIX,
        );
        assert_eq!(
            parsed.clauses,
            vec![
                clause("(min-width: 460px)", "w460"),
                clause("(min-width: 600px)", "w600"),
            ]
        );
    }

    #[test]
    fn splits_on_first_comma_only() {
        // Compound condition keeps its internal text untouched
        let parsed = parse_declaration(
            "(min-width: 600px) and (max-width: 900px), .classquery-w600",
            PREFIX,
        );
        assert_eq!(
            parsed.clauses,
            vec![clause("(min-width: 600px) and (max-width: 900px)", "w600")]
        );
    }

    #[test]
    fn token_forms_normalize_to_bare_suffix() {
        for token in [".classquery-w460", "classquery-w460", "w460"] {
            let parsed = parse_declaration(&format!("(min-width: 460px), {}", token), PREFIX);
            assert_eq!(parsed.clauses[0].style_token, "w460");
        }
    }

    #[test]
    fn empty_clauses_are_skipped_silently() {
        let parsed = parse_declaration(";;(min-width: 460px), w460;;", PREFIX);
        assert_eq!(parsed.clauses.len(), 1);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn malformed_clause_does_not_break_the_rest() {
        let parsed = parse_declaration(
            "(min-width: 460px), w460; no-comma-here; (min-width: 600px), w600",
            PREFIX,
        );
        assert_eq!(
            parsed.clauses,
            vec![
                clause("(min-width: 460px)", "w460"),
                clause("(min-width: 600px)", "w600"),
            ]
        );
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::MissingSeparator {
                index: 1,
                clause: "no-comma-here".to_string(),
            }]
        );
    }

    #[test]
    fn empty_condition_and_token_are_diagnosed() {
        let parsed = parse_declaration(", w460; (min-width: 460px), ", PREFIX);
        assert!(parsed.clauses.is_empty());
        assert_eq!(
            parsed.diagnostics,
            vec![
                Diagnostic::EmptyCondition { index: 0 },
                Diagnostic::EmptyStyleToken { index: 1 },
            ]
        );
    }

    #[test]
    fn invalid_token_characters_are_diagnosed() {
        let parsed = parse_declaration("(min-width: 460px), .classquery-4x{}", PREFIX);
        assert!(parsed.clauses.is_empty());
        assert_eq!(
            parsed.diagnostics,
            vec![Diagnostic::InvalidStyleToken {
                index: 0,
                token: "4x{}".to_string(),
            }]
        );
    }

    #[test]
    fn condition_internal_whitespace_is_preserved() {
        let parsed = parse_declaration("  (min-width:  460px)  , w460", PREFIX);
        assert_eq!(parsed.clauses[0].condition, "(min-width:  460px)");
    }
}
