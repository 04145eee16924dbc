//! The page pass.
//!
//! One synchronous, document-order walk: lifecycle class on, scan and assign
//! queryIds, parse → resolve → aggregate per marked element, one emit,
//! lifecycle class swap. All working state lives in the pass itself — there is
//! no process-global "already processed" registry; idempotence rests on the
//! queryId attribute written back to each element.

use crate::breakpoints::BreakpointAggregator;
use crate::config::Config;
use crate::dom::{Document, Element, Node};
use crate::error::Diagnostic;
use crate::query;
use crate::selector::{self, ElementIdentity};
use crate::stylesheet;
use serde::{Deserialize, Serialize};

/// What one pass did to the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    /// Elements that received a fresh queryId this pass.
    pub elements_processed: usize,
    /// Elements skipped because they already carried a queryId.
    pub elements_skipped: usize,
    /// The generated stylesheet text, if any group was produced.
    pub stylesheet: Option<String>,
    /// Clause-local problems found while decoding marker attributes.
    pub diagnostics: Vec<Diagnostic>,
}

struct Pass<'a> {
    config: &'a Config,
    aggregator: BreakpointAggregator,
    next_id: usize,
    processed: usize,
    skipped: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Pass<'a> {
    fn new(config: &'a Config) -> Self {
        Self {
            config,
            aggregator: BreakpointAggregator::new(),
            next_id: 0,
            processed: 0,
            skipped: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Pre-order walk — document order, as the cascade depends on it.
    fn scan(&mut self, element: &mut Element) {
        self.visit(element);
        for child in element.children.iter_mut() {
            if let Node::Element(e) = child {
                self.scan(e);
            }
        }
    }

    fn visit(&mut self, element: &mut Element) {
        let declaration = match element.attribute(&self.config.marker_attribute) {
            Some(raw) if !raw.trim().is_empty() => raw.to_string(),
            // Absent or empty marker attribute: not an error, just unmarked.
            _ => return,
        };

        if element.has_attribute(&self.config.query_id_attribute) {
            log::debug!(
                "element <{}> already carries '{}', skipping",
                element.tag,
                self.config.query_id_attribute
            );
            self.skipped += 1;
            return;
        }

        self.next_id += 1;
        let query_id = format!("cq-{}", self.next_id);
        element.set_attribute(&self.config.query_id_attribute, &query_id);
        self.processed += 1;

        let mut identity = ElementIdentity::capture(element, query_id);
        // The root carries a transient lifecycle class during the pass; a
        // marked root must not bake it into its selector, since the class is
        // swapped once the pass finishes and the rule would never match.
        let init = self.config.init_class();
        let complete = self.config.complete_class();
        identity.classes.retain(|c| *c != init && *c != complete);
        let parsed = query::parse_declaration(&declaration, &self.config.style_prefix);
        for diagnostic in &parsed.diagnostics {
            log::warn!("<{}> [{}]: {}", element.tag, identity.query_id, diagnostic);
        }
        self.diagnostics.extend(parsed.diagnostics);

        for clause in &parsed.clauses {
            let resolved = selector::resolve(&identity, clause, self.config);
            self.aggregator.add(&clause.condition, resolved.into_vec());
        }
    }
}

/// Run one full pass over a parsed page.
///
/// Infallible by design: authoring mistakes degrade to skipped clauses in the
/// report, never an abort. The stylesheet is computed fully in memory before
/// the single appending write, and the lifecycle classes toggle even when the
/// page has no marked elements at all.
pub fn process_document(document: &mut Document, config: &Config) -> PageReport {
    document.root_mut().add_class(&config.init_class());

    let mut pass = Pass::new(config);
    pass.scan(document.root_mut());

    let groups = pass.aggregator.finalize();
    let stylesheet_text = if groups.is_empty() {
        None
    } else {
        Some(stylesheet::render(&groups))
    };
    stylesheet::emit_into(document, &groups, config);

    let root = document.root_mut();
    root.remove_class(&config.init_class());
    root.add_class(&config.complete_class());

    PageReport {
        elements_processed: pass.processed,
        elements_skipped: pass.skipped,
        stylesheet: stylesheet_text,
        diagnostics: pass.diagnostics,
    }
}
