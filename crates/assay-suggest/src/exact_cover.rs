//! Deterministic acceptance check for grouping suggestions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::GroupingSuggestion;

/// Why a grouping suggestion was rejected: it is not an exact cover of the
/// raw values. Each list is sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error(
    "grouping is not an exact cover: {} uncovered, {} duplicated, {} unknown value(s)",
    .uncovered.len(),
    .duplicated.len(),
    .unknown.len()
)]
pub struct CoverError {
    /// Raw values no group claims.
    pub uncovered: Vec<String>,
    /// Raw values claimed more than once.
    pub duplicated: Vec<String>,
    /// Group members that are not raw values at all.
    pub unknown: Vec<String>,
}

/// Accept a grouping only if every raw value maps to exactly one canonical
/// label.
///
/// This is the gate between advisory output and the dataset: a suggestion
/// that fails here is surfaced back to the user with the offending values
/// named, never merged.
pub fn verify_exact_cover(
    raw_values: &[String],
    suggestion: &GroupingSuggestion,
) -> Result<(), CoverError> {
    let raw_set: BTreeSet<&str> = raw_values.iter().map(String::as_str).collect();
    let mut claims: BTreeMap<&str, usize> = BTreeMap::new();
    let mut unknown = BTreeSet::new();
    for group in &suggestion.groups {
        for member in &group.members {
            if raw_set.contains(member.as_str()) {
                *claims.entry(member.as_str()).or_insert(0) += 1;
            } else {
                unknown.insert(member.clone());
            }
        }
    }

    let uncovered: Vec<String> = raw_set
        .iter()
        .filter(|value| !claims.contains_key(**value))
        .map(|value| (*value).to_string())
        .collect();
    let duplicated: Vec<String> = claims
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(value, _)| (*value).to_string())
        .collect();
    let unknown: Vec<String> = unknown.into_iter().collect();

    if uncovered.is_empty() && duplicated.is_empty() && unknown.is_empty() {
        Ok(())
    } else {
        Err(CoverError {
            uncovered,
            duplicated,
            unknown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CanonicalGroup;

    fn values(list: &[&str]) -> Vec<String> {
        list.iter().map(|v| (*v).to_string()).collect()
    }

    fn suggestion(groups: &[(&str, &[&str])]) -> GroupingSuggestion {
        GroupingSuggestion {
            groups: groups
                .iter()
                .map(|(label, members)| CanonicalGroup {
                    label: (*label).to_string(),
                    members: values(members),
                })
                .collect(),
        }
    }

    #[test]
    fn complete_partition_is_accepted() {
        let raw = values(&["ctrl", "control", "treated"]);
        let grouping = suggestion(&[
            ("Control", &["ctrl", "control"]),
            ("Treated", &["treated"]),
        ]);
        assert!(verify_exact_cover(&raw, &grouping).is_ok());
    }

    #[test]
    fn missing_value_is_named_in_the_rejection() {
        let raw = values(&["ctrl", "treated", "mock"]);
        let grouping = suggestion(&[("Control", &["ctrl"]), ("Treated", &["treated"])]);
        let err = verify_exact_cover(&raw, &grouping).expect_err("must reject");
        assert_eq!(err.uncovered, values(&["mock"]));
        assert!(err.duplicated.is_empty());
    }

    #[test]
    fn doubly_assigned_value_is_named_in_the_rejection() {
        let raw = values(&["ctrl", "treated"]);
        let grouping = suggestion(&[
            ("Control", &["ctrl"]),
            ("Treated", &["treated", "ctrl"]),
        ]);
        let err = verify_exact_cover(&raw, &grouping).expect_err("must reject");
        assert_eq!(err.duplicated, values(&["ctrl"]));
    }

    #[test]
    fn invented_members_are_rejected_as_unknown() {
        let raw = values(&["ctrl"]);
        let grouping = suggestion(&[("Control", &["ctrl", "kontrolle"])]);
        let err = verify_exact_cover(&raw, &grouping).expect_err("must reject");
        assert_eq!(err.unknown, values(&["kontrolle"]));
    }

    #[test]
    fn repeated_raw_values_need_only_one_claim() {
        // The raw list may repeat values row-by-row; coverage is per
        // distinct value.
        let raw = values(&["ctrl", "ctrl", "treated"]);
        let grouping = suggestion(&[
            ("Control", &["ctrl"]),
            ("Treated", &["treated"]),
        ]);
        assert!(verify_exact_cover(&raw, &grouping).is_ok());
    }
}
