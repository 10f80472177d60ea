//! Per-experiment metadata folding.
//!
//! Non-structural column values are folded into their row's experiment.
//! When rows disagree, the most frequent value wins with ties broken by
//! first-seen order, and the full set of distinct values is kept so
//! nothing is silently overwritten.

use std::collections::BTreeMap;

use assay_model::MetaConsistency;

/// Accumulates metadata values for one experiment: per-column value counts
/// in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct MetaAccumulator {
    columns: BTreeMap<String, Vec<(String, usize)>>,
}

impl MetaAccumulator {
    pub(crate) fn observe(&mut self, column: &str, value: String) {
        let values = self.columns.entry(column.to_string()).or_default();
        match values.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => values.push((value, 1)),
        }
    }

    /// Resolve into the winning value and the consistency record per
    /// column. Later values only displace the winner with a strictly
    /// greater count, so equal counts keep the first-seen value.
    pub(crate) fn resolve(
        self,
    ) -> (BTreeMap<String, String>, BTreeMap<String, MetaConsistency>) {
        let mut raw = BTreeMap::new();
        let mut consistency = BTreeMap::new();
        for (column, values) in self.columns {
            let Some(mut winner) = values.first() else {
                continue;
            };
            for candidate in &values[1..] {
                if candidate.1 > winner.1 {
                    winner = candidate;
                }
            }
            raw.insert(column.clone(), winner.0.clone());
            consistency.insert(
                column,
                MetaConsistency {
                    consistent: values.len() <= 1,
                    distinct_values: values.iter().map(|(value, _)| value.clone()).collect(),
                },
            );
        }
        (raw, consistency)
    }
}
