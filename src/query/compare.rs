//! Clause-level comparison of two query versions.
//!
//! Walks the *current* query's clauses in order and pairs each with a clause
//! of the *saved* query: first by exact normalized identity, then by the
//! best fuzzy term-set overlap above a threshold. Unpaired current clauses
//! are additions; unpaired saved clauses are removals. The ordered output
//! reads as "what changed going from saved to current", anchored to the
//! current query's clause order with removals appended at the end.
//!
//! Comparison is total: any pair of parsed structures (including
//! [`QueryStructure::Empty`]) produces a diff, never an error.

use crate::query::structure::{QueryClause, QueryStructure};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Minimum Jaccard similarity of term sets for a fuzzy clause pairing.
const FUZZY_MATCH_THRESHOLD: f64 = 0.3;

/// Configuration for the comparator.
///
/// The fuzzy threshold was chosen empirically; it is exposed so it can be
/// validated against real query-revision corpora rather than recompiled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareConfig {
    /// A fuzzy pairing requires a term-set Jaccard similarity strictly
    /// above this value.
    pub fuzzy_threshold: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: FUZZY_MATCH_THRESHOLD,
        }
    }
}

/// One entry of the clause-level diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClauseDiff {
    /// Identical term sets (order- and case-insensitive).
    Exact { clause: QueryClause, similarity: f64 },
    /// Paired by term overlap; some terms changed.
    Partial {
        current: QueryClause,
        saved: QueryClause,
        /// Jaccard similarity of the two term sets.
        similarity: f64,
        /// Terms only in the current clause.
        added_terms: Vec<String>,
        /// Terms only in the saved clause.
        removed_terms: Vec<String>,
        /// Terms in both.
        common_terms: Vec<String>,
    },
    /// A clause only the current query has.
    Added { clause: QueryClause },
    /// A clause only the saved query has.
    Removed { clause: QueryClause },
}

/// Result of comparing two parsed queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryComparison {
    /// Exact and partial pairings, in current-query order.
    pub matched: Vec<ClauseDiff>,
    /// Clauses introduced by the current query.
    pub added: Vec<ClauseDiff>,
    /// Clauses the current query dropped.
    pub removed: Vec<ClauseDiff>,
    /// All entries: matched and added anchored to the current query's
    /// clause order, removed appended at the end.
    pub ordered: Vec<ClauseDiff>,
}

/// Compares two parsed queries with the default configuration.
pub fn compare(saved: &QueryStructure, current: &QueryStructure) -> QueryComparison {
    compare_with(saved, current, &CompareConfig::default())
}

/// Compares two parsed queries.
///
/// Each current clause consumes at most one saved clause: exact pairings by
/// normalized identity first, then the best-scoring unconsumed fuzzy
/// candidate above the threshold. Saved clauses left unconsumed become
/// removals.
pub fn compare_with(
    saved: &QueryStructure,
    current: &QueryStructure,
    config: &CompareConfig,
) -> QueryComparison {
    let saved_clauses = saved.clauses();
    let mut consumed = vec![false; saved_clauses.len()];
    let mut comparison = QueryComparison::default();

    for clause in current.clauses() {
        let exact = saved_clauses
            .iter()
            .enumerate()
            .find(|(i, s)| !consumed[*i] && s.normalized == clause.normalized);
        if let Some((idx, _)) = exact {
            consumed[idx] = true;
            let entry = ClauseDiff::Exact {
                clause: clause.clone(),
                similarity: 1.0,
            };
            comparison.matched.push(entry.clone());
            comparison.ordered.push(entry);
            continue;
        }

        if let Some((idx, score)) = best_fuzzy_candidate(clause, saved_clauses, &consumed, config) {
            consumed[idx] = true;
            let entry = partial_entry(clause, &saved_clauses[idx], score);
            comparison.matched.push(entry.clone());
            comparison.ordered.push(entry);
            continue;
        }

        let entry = ClauseDiff::Added {
            clause: clause.clone(),
        };
        comparison.added.push(entry.clone());
        comparison.ordered.push(entry);
    }

    for (idx, clause) in saved_clauses.iter().enumerate() {
        if !consumed[idx] {
            let entry = ClauseDiff::Removed {
                clause: clause.clone(),
            };
            comparison.removed.push(entry.clone());
            comparison.ordered.push(entry);
        }
    }

    debug!(
        matched = comparison.matched.len(),
        added = comparison.added.len(),
        removed = comparison.removed.len(),
        "compared query structures"
    );
    comparison
}

/// The best-scoring unconsumed saved clause with Jaccard similarity above
/// the threshold.
fn best_fuzzy_candidate(
    clause: &QueryClause,
    saved_clauses: &[QueryClause],
    consumed: &[bool],
    config: &CompareConfig,
) -> Option<(usize, f64)> {
    let current_terms = clause.term_set();
    let mut best: Option<(usize, f64)> = None;
    for (idx, saved) in saved_clauses.iter().enumerate() {
        if consumed[idx] {
            continue;
        }
        let score = jaccard(&current_terms, &saved.term_set());
        if score > config.fuzzy_threshold && best.is_none_or(|(_, b)| score > b) {
            best = Some((idx, score));
        }
    }
    best
}

fn partial_entry(current: &QueryClause, saved: &QueryClause, similarity: f64) -> ClauseDiff {
    let current_set = current.term_set();
    let saved_set = saved.term_set();
    let added_terms = current
        .terms
        .iter()
        .filter(|t| !saved_set.contains(t.as_str()))
        .cloned()
        .collect();
    let removed_terms = saved
        .terms
        .iter()
        .filter(|t| !current_set.contains(t.as_str()))
        .cloned()
        .collect();
    let common_terms = current
        .terms
        .iter()
        .filter(|t| saved_set.contains(t.as_str()))
        .cloned()
        .collect();
    ClauseDiff::Partial {
        current: current.clone(),
        saved: saved.clone(),
        similarity,
        added_terms,
        removed_terms,
        common_terms,
    }
}

/// Jaccard similarity of two term sets. Two empty sets score 0 (empty
/// clauses pair exactly on their empty identity before fuzzy matching).
fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// The section kind a diff entry renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Unchanged,
    Modified,
    Added,
    Removed,
}

/// A human-readable section of the diff display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffSection {
    pub kind: DiffKind,
    /// Clause text to display: the current clause's raw text, or the saved
    /// clause's for removals.
    pub clause: String,
    /// Pairing similarity: 1.0 for unchanged, the Jaccard score for
    /// modified, 0.0 for added/removed.
    pub similarity: f64,
    pub added_terms: Vec<String>,
    pub removed_terms: Vec<String>,
    pub common_terms: Vec<String>,
}

/// Renders a comparison into display sections, one per ordered entry.
pub fn render(comparison: &QueryComparison) -> Vec<DiffSection> {
    comparison
        .ordered
        .iter()
        .map(|entry| match entry {
            ClauseDiff::Exact { clause, similarity } => DiffSection {
                kind: DiffKind::Unchanged,
                clause: clause.raw.clone(),
                similarity: *similarity,
                added_terms: Vec::new(),
                removed_terms: Vec::new(),
                common_terms: clause.terms.clone(),
            },
            ClauseDiff::Partial {
                current,
                similarity,
                added_terms,
                removed_terms,
                common_terms,
                ..
            } => DiffSection {
                kind: DiffKind::Modified,
                clause: current.raw.clone(),
                similarity: *similarity,
                added_terms: added_terms.clone(),
                removed_terms: removed_terms.clone(),
                common_terms: common_terms.clone(),
            },
            ClauseDiff::Added { clause } => DiffSection {
                kind: DiffKind::Added,
                clause: clause.raw.clone(),
                similarity: 0.0,
                added_terms: clause.terms.clone(),
                removed_terms: Vec::new(),
                common_terms: Vec::new(),
            },
            ClauseDiff::Removed { clause } => DiffSection {
                kind: DiffKind::Removed,
                clause: clause.raw.clone(),
                similarity: 0.0,
                added_terms: Vec::new(),
                removed_terms: clause.terms.clone(),
                common_terms: Vec::new(),
            },
        })
        .collect()
}

/// A complete diff of two query strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDiff {
    /// The clause-level comparison.
    pub comparison: QueryComparison,
    /// Display sections in ordered-entry order.
    pub display: Vec<DiffSection>,
}

/// Parses both query strings and diffs them. Total: malformed input
/// degrades through the parser's best-effort split, so the diff view never
/// fails outright.
pub fn diff(saved: &str, current: &str) -> QueryDiff {
    let comparison = compare(&crate::query::parse(saved), &crate::query::parse(current));
    let display = render(&comparison);
    QueryDiff {
        comparison,
        display,
    }
}
