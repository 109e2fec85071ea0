//! Core engine of a research-literature search assistant.
//!
//! `litsearch` implements the algorithmic heart of a systematic-review search
//! workflow: merging duplicate articles pulled from multiple bibliographic
//! databases, parsing and diffing boolean search queries, and synthesizing
//! per-database query strings from PICO keyword sets.
//!
//! # Key Features
//!
//! - **Deduplication & Merge**: cluster articles from multiple sources into
//!   duplicate groups using DOI, title-similarity, and author-overlap
//!   heuristics, then merge each group into one canonical record.
//! - **Query Structure Parsing**: tokenize a boolean query into AND-separated
//!   clauses of OR-terms, nesting- and quote-aware, with a normalized
//!   identity per clause.
//! - **Query Diffing**: align clauses between two versions of a query
//!   (exact / fuzzy / added / removed) and report term-level changes.
//! - **Query Synthesis**: render active PICO keywords and controlled
//!   vocabulary into the boolean syntax of PubMed, Scopus, Embase, and
//!   others.
//! - **Export**: serialize the deduplicated article list to CSV or RIS.
//!
//! # Deduplication
//!
//! ```rust
//! use litsearch::{Article, Deduplicator};
//!
//! let articles = vec![
//!     Article {
//!         title: "Telemedicine for hypertension management".to_string(),
//!         doi: Some("10.1234/tele.2023.001".to_string()),
//!         source_db: "pubmed".to_string(),
//!         ..Default::default()
//!     },
//!     Article {
//!         title: "Telemedicine for Hypertension Management.".to_string(),
//!         doi: Some("https://doi.org/10.1234/TELE.2023.001".to_string()),
//!         source_db: "scopus".to_string(),
//!         ..Default::default()
//!     },
//! ];
//!
//! let deduplicator = Deduplicator::new();
//! let canonical = deduplicator.deduplicate(&articles);
//! assert_eq!(canonical.len(), 1);
//! assert_eq!(canonical[0].source_db, "pubmed; scopus");
//! ```
//!
//! # Query Parsing and Diffing
//!
//! ```rust
//! use litsearch::query;
//!
//! let saved = r#"("telehealth" OR "telemedicine") AND ("adults")"#;
//! let current = r#"("telemedicine" OR "remote care") AND ("adults")"#;
//!
//! let diff = query::diff(saved, current);
//! assert_eq!(diff.display.len(), 2);
//! ```
//!
//! # Query Synthesis
//!
//! ```rust
//! use litsearch::keywords::{Keyword, PicoCategory, PicoKeywords, TermSource};
//! use litsearch::query::{build_query, syntax};
//!
//! let keywords = PicoKeywords::default()
//!     .with_added_keyword(PicoCategory::Population, Keyword::new("adults", TermSource::Manual));
//!
//! let pubmed = syntax::lookup("pubmed").unwrap();
//! let query = build_query(&keywords, pubmed).unwrap();
//! assert_eq!(query, r#"("adults"[tiab])"#);
//! ```
//!
//! # Thread Safety
//!
//! All core operations are pure, synchronous functions over in-memory data.
//! There is no shared mutable state; every type is `Send + Sync`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub mod dedupe;
pub mod export;
pub mod keywords;
pub mod query;
pub mod similarity;
mod regex;
mod utils;

// Reexports
pub use dedupe::{Deduplicator, DeduplicatorConfig};
pub use query::{QueryClause, QueryStructure};

/// A specialized Result type for litsearch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced at the crate boundary.
///
/// The core algorithms (parse, compare, deduplicate, synthesize) are total
/// and never fail; errors only arise from export serialization and database
/// syntax lookup.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown database key: {0}")]
    UnknownDatabase(String),

    #[error("export failed: {0}")]
    Export(String),
}

/// An author of an article.
///
/// Order within [`Article::authors`] is kept for display; matching ignores
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Author name as supplied by the source API.
    pub name: String,
}

impl Author {
    /// Creates an author from any string-like name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A single article as supplied by a source adapter, or a canonical merged
/// record after deduplication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Title of the work.
    pub title: String,
    /// Authors in display order.
    pub authors: Vec<Author>,
    /// Publication year.
    pub year: Option<i32>,
    /// Raw publication date, used as a fallback ordering field.
    pub pubdate: Option<String>,
    /// Publication venue. Different source APIs report the venue under
    /// different field names; all three aliases are carried and merged
    /// independently.
    pub venue: Option<String>,
    /// Journal name (alias of `venue` used by some sources).
    pub journal: Option<String>,
    /// Source-reported publication name (alias used by some sources).
    pub source: Option<String>,
    /// Digital Object Identifier, as supplied. Normalization happens during
    /// matching.
    pub doi: Option<String>,
    /// Other identifiers, keyed by kind (e.g. `"PubMed"`, `"CorpusId"`).
    pub external_ids: HashMap<String, String>,
    /// Abstract text.
    pub abstract_text: Option<String>,
    /// Landing page or full-text URL.
    pub url: Option<String>,
    /// Citation count as reported by the source.
    pub citation_count: Option<u32>,
    /// Fields of study assigned by the source.
    pub fields_of_study: Vec<String>,
    /// Source database key at ingestion (e.g. `"pubmed"`). After merging,
    /// a `"; "`-joined sorted set of all contributing source keys.
    pub source_db: String,
    /// `{source_db}_{native_id}`, unique within one source. Detects the same
    /// record fetched twice from one source.
    pub unique_id: String,
}

impl Article {
    /// Creates an empty article attributed to `source_db`.
    ///
    /// The `unique_id` is `{source_db}_{native_id}`; when the source adapter
    /// has no native identifier a random one is generated so that two
    /// distinct records never collide.
    pub fn from_source(source_db: impl Into<String>, native_id: Option<&str>) -> Self {
        let source_db = source_db.into();
        let native_id = match native_id {
            Some(id) => id.to_string(),
            None => nanoid::nanoid!(),
        };
        Self {
            unique_id: format!("{source_db}_{native_id}"),
            source_db,
            ..Default::default()
        }
    }

    /// The venue to display, preferring the most specific alias present.
    pub fn display_venue(&self) -> Option<&str> {
        self.journal
            .as_deref()
            .or(self.venue.as_deref())
            .or(self.source.as_deref())
    }

    /// Source keys this article came from. A single key at ingestion,
    /// several after merging.
    pub fn source_tokens(&self) -> impl Iterator<Item = &str> {
        self.source_db
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
