//! # classquery
//!
//! Per-element responsive behaviour for CMS-authored content, without
//! hand-written media queries or element-query polyfills.
//!
//! Authors mark an element with a small query-like grammar naming a media
//! condition and a reusable style class:
//!
//! ```text
//! <div data-classquery="(min-width: 460px), .classquery-w460"></div>
//! ```
//!
//! One synchronous pass translates every such declaration into standard
//! media-query CSS scoped precisely to that element, emitted as a single
//! `<style>` node. From then on the browser's native style engine does all the
//! work — the engine registers no listeners and never evaluates a condition
//! itself.
//!
//! ## Pipeline
//! - **Parser** ([`query`]) — marker attribute → ordered clause list + diagnostics
//! - **Resolver** ([`selector`]) — element identity × clause → primary and
//!   legacy-fallback selectors
//! - **Aggregator** ([`breakpoints`]) — selectors folded into one group per
//!   distinct literal condition
//! - **Emitter** ([`stylesheet`]) — one `@media` block per group, one style
//!   node per page
//! - **Orchestrator** ([`page`]) — document-order scan, queryId write-back,
//!   lifecycle classes on the root
//!
//! ## Example
//! ```ignore
//! use classquery::process_html;
//!
//! let page = process_html(r#"<html><head /><body>
//!     <div id="hero" class="card" data-classquery="(min-width: 460px), .classquery-w460" />
//! </body></html>"#).expect("well-formed markup");
//!
//! assert!(page.report.stylesheet.unwrap().contains("#hero.card.classquery-w460"));
//! ```

pub mod breakpoints;
pub mod config;
pub mod dom;
pub mod error;
pub mod page;
pub mod query;
pub mod selector;
pub mod stylesheet;

// --- Core types ---
pub use breakpoints::{BreakpointAggregator, BreakpointGroup};
pub use config::Config;
pub use dom::Document;
pub use error::{ClassQueryError, ClassQueryResult, Diagnostic};
pub use page::{process_document, PageReport};
pub use query::{parse_declaration, ParsedDeclaration, QueryClause};
pub use selector::{ElementIdentity, ResolvedSelectors};

/// A page after one full pass: the mutated markup plus the pass report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedPage {
    pub html: String,
    pub report: PageReport,
}

/// Parse markup, run one pass with the default configuration, and
/// re-serialize.
pub fn process_html(markup: &str) -> ClassQueryResult<ProcessedPage> {
    process_html_with_config(markup, &Config::default())
}

/// Parse markup, run one pass with a custom configuration, and re-serialize.
pub fn process_html_with_config(markup: &str, config: &Config) -> ClassQueryResult<ProcessedPage> {
    let mut document = Document::parse(markup)?;
    let report = page::process_document(&mut document, config);
    Ok(ProcessedPage {
        html: document.to_html(),
        report,
    })
}
