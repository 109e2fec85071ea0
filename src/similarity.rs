//! String similarity and author-overlap heuristics.
//!
//! Shared by the deduplication engine and the query comparator. All scoring
//! operates on normalized text: lower-cased, punctuation replaced with
//! spaces, whitespace collapsed. Callers in hot loops should normalize once
//! via [`normalize`] and score with [`normalized_similarity`] rather than
//! paying the normalization on every pairwise comparison.

use crate::Author;
use crate::utils::convert_unicode_escapes;
use itertools::Itertools;
use std::collections::HashSet;

/// Minimum `len(shorter) / len(longer)` ratio for the containment
/// short-circuit to apply.
const CONTAINMENT_LENGTH_RATIO: f64 = 0.85;

/// Score returned by the containment short-circuit.
const CONTAINMENT_SCORE: f64 = 0.9;

/// Number of shared author names that confirms a match on its own.
pub const SUFFICIENT_AUTHOR_OVERLAP: usize = 2;

/// Normalizes a string for fuzzy comparison: repair `<U+xxxx>` escapes,
/// lower-case, replace punctuation with spaces, collapse whitespace, trim.
pub fn normalize(s: &str) -> String {
    convert_unicode_escapes(s)
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .join(" ")
}

/// Similarity of two raw strings in `[0, 1]`.
///
/// Both inputs are normalized first; see [`normalized_similarity`] for the
/// scoring rules.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_similarity(&normalize(a), &normalize(b))
}

/// Similarity of two already-normalized strings in `[0, 1]`.
///
/// - Equal strings score `1.0`.
/// - If either is empty, `0.0`.
/// - If the shorter is a substring of the longer and covers at least 85% of
///   its length, `0.9` without computing an edit distance. Catches
///   truncated titles and subtitle-only differences.
/// - Otherwise the normalized Levenshtein similarity,
///   `1 - distance / max(len)`.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (shorter, short_len, longer, long_len) = if a_len <= b_len {
        (a, a_len, b, b_len)
    } else {
        (b, b_len, a, a_len)
    };
    if longer.contains(shorter) && short_len as f64 / long_len as f64 >= CONTAINMENT_LENGTH_RATIO {
        return CONTAINMENT_SCORE;
    }
    strsim::normalized_levenshtein(a, b)
}

/// Number of author names shared between two author lists, compared on
/// normalized names. Symmetric; duplicate names within one list count once.
pub fn author_overlap(list1: &[Author], list2: &[Author]) -> usize {
    name_overlap(&author_name_set(list1), &author_name_set(list2))
}

/// Overlap count over pre-normalized name sets.
pub(crate) fn name_overlap(set1: &HashSet<String>, set2: &HashSet<String>) -> usize {
    set1.intersection(set2).count()
}

/// Normalized, de-duplicated author names for an author list. Empty names
/// are dropped.
pub(crate) fn author_name_set(authors: &[Author]) -> HashSet<String> {
    authors
        .iter()
        .map(|a| normalize(&a.name))
        .filter(|n| !n.is_empty())
        .collect()
}
