//! Parsed boolean query representation.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One top-level AND-separated clause: an OR-group of terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryClause {
    /// The clause text as it appeared in the query.
    pub raw: String,
    /// Extracted terms in query order, lower-cased, without quotes or field
    /// qualifiers.
    pub terms: Vec<String>,
    /// The clause's identity for exact comparison: terms sorted
    /// lexicographically and joined with `|`. Term order and case never
    /// affect equality.
    pub normalized: String,
}

impl QueryClause {
    pub(crate) fn new(raw: impl Into<String>, terms: Vec<String>) -> Self {
        let normalized = terms.iter().sorted().join("|");
        Self {
            raw: raw.into(),
            terms,
            normalized,
        }
    }

    /// The clause's terms as a set, for overlap scoring.
    pub fn term_set(&self) -> HashSet<&str> {
        self.terms.iter().map(String::as_str).collect()
    }
}

/// The parsed shape of a boolean query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QueryStructure {
    /// An empty (or whitespace-only) query.
    Empty,
    /// AND-separated clauses in query order.
    Boolean { clauses: Vec<QueryClause> },
}

impl QueryStructure {
    /// The query's clauses; empty for [`QueryStructure::Empty`].
    pub fn clauses(&self) -> &[QueryClause] {
        match self {
            Self::Empty => &[],
            Self::Boolean { clauses } => clauses,
        }
    }

    /// Whether the query had no content at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
