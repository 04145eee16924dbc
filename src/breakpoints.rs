//! Per-condition selector grouping.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// All selectors requesting one literal media condition, emitted together as
/// one `@media` block. Selector order is first-insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointGroup {
    pub condition: String,
    pub selectors: Vec<String>,
}

/// Folds resolved selectors into per-condition groups.
///
/// Conditions are compared by exact literal text (the parser already trimmed
/// the outer whitespace); internal spacing differences produce separate
/// groups, a deliberate strictness trade-off over a full CSS-condition parser.
/// Group order is the order conditions are first encountered during the scan,
/// and byte-identical selector text is kept once per group.
#[derive(Debug, Default)]
pub struct BreakpointAggregator {
    groups: Vec<BreakpointGroup>,
    index: HashMap<String, usize>,
    seen: HashSet<(usize, String)>,
}

impl BreakpointAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add selectors under a condition, creating the group on first sight.
    pub fn add<I, S>(&mut self, condition: &str, selectors: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slot = match self.index.get(condition) {
            Some(&i) => i,
            None => {
                self.groups.push(BreakpointGroup {
                    condition: condition.to_string(),
                    selectors: Vec::new(),
                });
                let i = self.groups.len() - 1;
                self.index.insert(condition.to_string(), i);
                i
            }
        };

        for selector in selectors {
            let selector = selector.into();
            if self.seen.insert((slot, selector.clone())) {
                self.groups[slot].selectors.push(selector);
            }
        }
    }

    /// Consume the aggregator, yielding groups in first-encounter order.
    pub fn finalize(self) -> Vec<BreakpointGroup> {
        self.groups
    }
}
