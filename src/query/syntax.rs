//! Per-database search syntax tables.
//!
//! Each bibliographic database renders phrases, controlled-vocabulary terms,
//! and operators differently. A [`DatabaseSyntax`] is a static rules table
//! the synthesizer consults; controlled-vocabulary rendering is an explicit
//! mapping from vocabulary type to renderer, with the phrase renderer as the
//! defined fallback for types the database has no native support for.

use crate::{Error, Result};

type PhraseRenderer = fn(term: &str, field: &str) -> String;
type VocabRenderer = fn(term: &str) -> String;

/// A searchable field a database exposes, e.g. PubMed's `tiab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchField {
    /// Token used in the rendered query.
    pub token: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

/// The boolean-query syntax rules of one bibliographic database.
#[derive(Debug, Clone)]
pub struct DatabaseSyntax {
    key: &'static str,
    name: &'static str,
    search_fields: &'static [SearchField],
    separator: &'static str,
    not_operator: &'static str,
    phrase: PhraseRenderer,
    /// Lower-cased vocabulary type → renderer.
    vocab: &'static [(&'static str, VocabRenderer)],
}

impl DatabaseSyntax {
    /// Registry key, e.g. `"pubmed"`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Display name, e.g. `"PubMed"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Operator joining category groups, usually `" AND "`.
    pub fn separator(&self) -> &'static str {
        self.separator
    }

    /// Negation operator prefixed to the excluded group.
    pub fn not_operator(&self) -> &'static str {
        self.not_operator
    }

    /// The fields this database can restrict a phrase to. The first entry
    /// is the default.
    pub fn search_fields(&self) -> &'static [SearchField] {
        self.search_fields
    }

    /// Field token for a keyword's field index; out-of-range indices fall
    /// back to the database's default field.
    pub fn field_token(&self, index: usize) -> &'static str {
        self.search_fields
            .get(index)
            .unwrap_or(&self.search_fields[0])
            .token
    }

    /// Renders a free-text phrase restricted to the field at `field_index`.
    pub fn render_phrase(&self, term: &str, field_index: usize) -> String {
        (self.phrase)(term, self.field_token(field_index))
    }

    /// Renders a free-text phrase with the database's default field.
    pub fn render_default_phrase(&self, term: &str) -> String {
        self.render_phrase(term, 0)
    }

    /// Renders a controlled-vocabulary term. Types the database has no
    /// renderer for fall back silently to the default phrase rendering.
    pub fn render_vocab(&self, vocab_type: &str, term: &str) -> String {
        let wanted = vocab_type.to_lowercase();
        self.vocab
            .iter()
            .find(|(kind, _)| *kind == wanted)
            .map(|(_, renderer)| renderer(term))
            .unwrap_or_else(|| self.render_default_phrase(term))
    }
}

fn pubmed_phrase(term: &str, field: &str) -> String {
    format!("\"{term}\"[{field}]")
}

fn pubmed_mesh(term: &str) -> String {
    format!("\"{term}\"[MeSH Terms]")
}

fn scopus_phrase(term: &str, field: &str) -> String {
    format!("{field}(\"{term}\")")
}

fn embase_phrase(term: &str, field: &str) -> String {
    format!("'{term}':{field}")
}

fn embase_emtree(term: &str) -> String {
    format!("'{term}'/exp")
}

fn plain_phrase(term: &str, _field: &str) -> String {
    format!("\"{term}\"")
}

pub static PUBMED: DatabaseSyntax = DatabaseSyntax {
    key: "pubmed",
    name: "PubMed",
    search_fields: &[
        SearchField { token: "tiab", label: "Title/Abstract" },
        SearchField { token: "ti", label: "Title" },
        SearchField { token: "tw", label: "Text Word" },
        SearchField { token: "all", label: "All Fields" },
    ],
    separator: " AND ",
    not_operator: "NOT",
    phrase: pubmed_phrase,
    vocab: &[("mesh", pubmed_mesh)],
};

pub static SCOPUS: DatabaseSyntax = DatabaseSyntax {
    key: "scopus",
    name: "Scopus",
    search_fields: &[
        SearchField { token: "TITLE-ABS-KEY", label: "Title/Abstract/Keywords" },
        SearchField { token: "TITLE", label: "Title" },
        SearchField { token: "ABS", label: "Abstract" },
        SearchField { token: "ALL", label: "All Fields" },
    ],
    separator: " AND ",
    not_operator: "AND NOT",
    phrase: scopus_phrase,
    vocab: &[],
};

pub static EMBASE: DatabaseSyntax = DatabaseSyntax {
    key: "embase",
    name: "Embase",
    search_fields: &[
        SearchField { token: "ti,ab,kw", label: "Title/Abstract/Keywords" },
        SearchField { token: "ti", label: "Title" },
        SearchField { token: "ab", label: "Abstract" },
    ],
    separator: " AND ",
    not_operator: "NOT",
    phrase: embase_phrase,
    vocab: &[("emtree", embase_emtree)],
};

pub static SEMANTIC_SCHOLAR: DatabaseSyntax = DatabaseSyntax {
    key: "semanticscholar",
    name: "Semantic Scholar",
    search_fields: &[SearchField { token: "all", label: "All Fields" }],
    separator: " AND ",
    not_operator: "NOT",
    phrase: plain_phrase,
    vocab: &[],
};

pub static CORE: DatabaseSyntax = DatabaseSyntax {
    key: "core",
    name: "CORE",
    search_fields: &[SearchField { token: "all", label: "All Fields" }],
    separator: " AND ",
    not_operator: "NOT",
    phrase: plain_phrase,
    vocab: &[],
};

/// All built-in database syntax tables.
pub static ALL: &[&DatabaseSyntax] = &[&PUBMED, &SCOPUS, &EMBASE, &SEMANTIC_SCHOLAR, &CORE];

/// Looks up a built-in syntax table by registry key (case-insensitive).
///
/// # Errors
///
/// Returns [`Error::UnknownDatabase`] when no table matches.
pub fn lookup(key: &str) -> Result<&'static DatabaseSyntax> {
    let wanted = key.trim().to_lowercase();
    ALL.iter()
        .find(|db| db.key == wanted)
        .copied()
        .ok_or(Error::UnknownDatabase(wanted))
}
