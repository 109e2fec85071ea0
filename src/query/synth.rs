//! Boolean query synthesis from PICO keyword sets.

use crate::keywords::{PicoCategory, PicoKeywords};
use crate::query::syntax::DatabaseSyntax;

/// Builds the final boolean query for one database from the active terms of
/// a PICO keyword set.
///
/// Each PICO category with at least one active, non-blank term contributes
/// one parenthesized OR-group; keywords render through the database's
/// phrase syntax with their selected field, controlled-vocabulary terms
/// through the type-specific renderer (falling back to the phrase form).
/// Categories without active terms contribute nothing, not an empty
/// placeholder group. Negative keywords append a `NOT`-group, but only when
/// a positive query exists; negative terms alone never form a query.
///
/// Returns `None` when no category has an active term.
///
/// # Examples
///
/// ```
/// use litsearch::keywords::{Keyword, PicoCategory, PicoKeywords, TermSource};
/// use litsearch::query::{build_query, syntax};
///
/// let keywords = PicoKeywords::default()
///     .with_added_keyword(PicoCategory::Population, Keyword::new("adults", TermSource::Ai))
///     .with_added_keyword(PicoCategory::Outcome, Keyword::new("blood pressure", TermSource::Ai));
///
/// let query = build_query(&keywords, &syntax::PUBMED).unwrap();
/// assert_eq!(query, r#"("adults"[tiab]) AND ("blood pressure"[tiab])"#);
/// ```
pub fn build_query(keywords: &PicoKeywords, syntax: &DatabaseSyntax) -> Option<String> {
    let mut groups: Vec<String> = Vec::new();

    for category in PicoCategory::ALL {
        let set = keywords.set(category);
        let mut rendered: Vec<String> = Vec::new();

        for keyword in set.keywords.iter().filter(|k| k.active) {
            let term = keyword.term.trim();
            if term.is_empty() {
                continue;
            }
            rendered.push(syntax.render_phrase(term, keyword.search_field));
        }
        for vocab in set.controlled_vocabulary.iter().filter(|v| v.active) {
            let term = vocab.term.trim();
            if term.is_empty() {
                continue;
            }
            rendered.push(syntax.render_vocab(&vocab.vocab_type, term));
        }

        if !rendered.is_empty() {
            groups.push(format!("({})", rendered.join(" OR ")));
        }
    }

    if groups.is_empty() {
        return None;
    }
    let mut query = groups.join(syntax.separator());

    let negatives: Vec<String> = keywords
        .negative
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| syntax.render_default_phrase(t))
        .collect();
    if !negatives.is_empty() {
        query = format!(
            "{query} {} ({})",
            syntax.not_operator(),
            negatives.join(" OR ")
        );
    }

    Some(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::{Keyword, TermSource, VocabTerm};
    use crate::query::parse;
    use crate::query::syntax;
    use pretty_assertions::assert_eq;

    fn keyword(term: &str) -> Keyword {
        Keyword::new(term, TermSource::Ai)
    }

    #[test]
    fn test_pubmed_scenario() {
        let keywords = PicoKeywords::default()
            .with_added_keyword(PicoCategory::Population, keyword("adults"))
            .with_added_keyword(PicoCategory::Intervention, keyword("telemedicine"))
            .with_added_keyword(PicoCategory::Outcome, keyword("blood pressure"));

        let query = build_query(&keywords, &syntax::PUBMED).unwrap();
        assert_eq!(
            query,
            r#"("adults"[tiab]) AND ("telemedicine"[tiab]) AND ("blood pressure"[tiab])"#
        );
    }

    #[test]
    fn test_empty_categories_contribute_no_clause() {
        let keywords = PicoKeywords::default()
            .with_added_keyword(PicoCategory::Population, keyword("adults"))
            .with_added_keyword(PicoCategory::Outcome, keyword("mortality"));

        let query = build_query(&keywords, &syntax::PUBMED).unwrap();
        // Clause count seen by the parser equals the number of non-empty
        // categories.
        assert_eq!(parse(&query).clauses().len(), 2);
    }

    #[test]
    fn test_inactive_terms_are_skipped() {
        let mut inactive = keyword("children");
        inactive.active = false;
        let keywords = PicoKeywords::default()
            .with_added_keyword(PicoCategory::Population, keyword("adults"))
            .with_added_keyword(PicoCategory::Population, inactive);

        let query = build_query(&keywords, &syntax::PUBMED).unwrap();
        assert_eq!(query, r#"("adults"[tiab])"#);
    }

    #[test]
    fn test_or_group_within_category() {
        let keywords = PicoKeywords::default()
            .with_added_keyword(PicoCategory::Intervention, keyword("telemedicine"))
            .with_added_keyword(PicoCategory::Intervention, keyword("telehealth"));

        let query = build_query(&keywords, &syntax::PUBMED).unwrap();
        assert_eq!(query, r#"("telemedicine"[tiab] OR "telehealth"[tiab])"#);
    }

    #[test]
    fn test_vocab_terms_use_type_renderer() {
        let keywords = PicoKeywords::default()
            .with_added_keyword(PicoCategory::Intervention, keyword("telemedicine"))
            .with_added_vocab(
                PicoCategory::Intervention,
                VocabTerm::new("Telemedicine", "MeSH", TermSource::Ai),
            );

        let query = build_query(&keywords, &syntax::PUBMED).unwrap();
        assert_eq!(
            query,
            r#"("telemedicine"[tiab] OR "Telemedicine"[MeSH Terms])"#
        );
    }

    #[test]
    fn test_unknown_vocab_type_falls_back_to_phrase() {
        let keywords = PicoKeywords::default().with_added_vocab(
            PicoCategory::Intervention,
            VocabTerm::new("Telemedicine", "Emtree", TermSource::Ai),
        );

        // PubMed has no Emtree renderer; falls back to the default phrase.
        let query = build_query(&keywords, &syntax::PUBMED).unwrap();
        assert_eq!(query, r#"("Telemedicine"[tiab])"#);
    }

    #[test]
    fn test_negative_keywords_append_not_group() {
        let keywords = PicoKeywords {
            negative: vec!["animals".to_string(), "children".to_string()],
            ..PicoKeywords::default()
        }
        .with_added_keyword(PicoCategory::Population, keyword("adults"));

        let query = build_query(&keywords, &syntax::PUBMED).unwrap();
        assert_eq!(
            query,
            r#"("adults"[tiab]) NOT ("animals"[tiab] OR "children"[tiab])"#
        );
    }

    #[test]
    fn test_negative_terms_alone_never_form_a_query() {
        let keywords = PicoKeywords {
            negative: vec!["animals".to_string()],
            ..PicoKeywords::default()
        };
        assert_eq!(build_query(&keywords, &syntax::PUBMED), None);
    }

    #[test]
    fn test_blank_negative_terms_are_ignored() {
        let keywords = PicoKeywords {
            negative: vec!["  ".to_string(), String::new()],
            ..PicoKeywords::default()
        }
        .with_added_keyword(PicoCategory::Population, keyword("adults"));

        let query = build_query(&keywords, &syntax::PUBMED).unwrap();
        assert_eq!(query, r#"("adults"[tiab])"#);
    }

    #[test]
    fn test_scopus_and_embase_forms() {
        let keywords = PicoKeywords::default()
            .with_added_keyword(PicoCategory::Population, keyword("adults"))
            .with_added_vocab(
                PicoCategory::Intervention,
                VocabTerm::new("telemedicine", "Emtree", TermSource::Manual),
            );

        let scopus = build_query(&keywords, &syntax::SCOPUS).unwrap();
        assert_eq!(
            scopus,
            r#"(TITLE-ABS-KEY("adults")) AND (TITLE-ABS-KEY("telemedicine"))"#
        );

        let embase = build_query(&keywords, &syntax::EMBASE).unwrap();
        assert_eq!(embase, "('adults':ti,ab,kw) AND ('telemedicine'/exp)");
    }

    #[test]
    fn test_no_active_terms_yields_none() {
        assert_eq!(build_query(&PicoKeywords::default(), &syntax::PUBMED), None);
    }
}
