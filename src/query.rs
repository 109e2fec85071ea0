//! Boolean query structure parsing, comparison, and synthesis.
//!
//! A search query is modelled as AND-separated *clauses*, each an OR-group
//! of terms. [`parse`] extracts that structure from a raw query string,
//! [`compare`]/[`diff`] align two versions of a query clause by clause, and
//! [`build_query`] renders PICO keyword sets into the boolean syntax of a
//! specific database (see [`syntax`]).
//!
//! # Example
//!
//! ```
//! use litsearch::query;
//!
//! let structure = query::parse(r#"("adults" OR "elderly") AND ("telemedicine")"#);
//! let clauses = structure.clauses();
//! assert_eq!(clauses.len(), 2);
//! assert_eq!(clauses[0].terms, vec!["adults", "elderly"]);
//! ```

mod compare;
mod parse;
mod structure;
mod synth;
pub mod syntax;

pub use compare::{
    ClauseDiff, CompareConfig, DiffKind, DiffSection, QueryComparison, QueryDiff, compare,
    compare_with, diff, render,
};
pub use parse::parse;
pub use structure::{QueryClause, QueryStructure};
pub use synth::build_query;
