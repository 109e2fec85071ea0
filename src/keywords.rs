//! PICO keyword and controlled-vocabulary term model.
//!
//! A research question is broken into the four PICO categories, each holding
//! free-text keywords and controlled-vocabulary terms. Terms are produced by
//! AI generation or manual entry and are toggled in and out of the query via
//! their `active` flag rather than deleted.
//!
//! Updates are copy-on-write: the `with_*` helpers return a new
//! [`PicoKeywords`] with only the addressed path replaced, leaving the
//! original untouched. An update addressing an out-of-range index is a
//! no-op.

use serde::{Deserialize, Serialize};

/// The four categories of a PICO research question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PicoCategory {
    Population,
    Intervention,
    Comparison,
    Outcome,
}

impl PicoCategory {
    /// All categories, in PICO order.
    pub const ALL: [PicoCategory; 4] = [
        PicoCategory::Population,
        PicoCategory::Intervention,
        PicoCategory::Comparison,
        PicoCategory::Outcome,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PicoCategory::Population => "Population",
            PicoCategory::Intervention => "Intervention",
            PicoCategory::Comparison => "Comparison",
            PicoCategory::Outcome => "Outcome",
        }
    }
}

/// How a term entered the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermSource {
    /// Suggested by AI generation.
    Ai,
    /// Entered by the user.
    Manual,
}

/// A free-text keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    /// Whether the term participates in query synthesis.
    pub active: bool,
    pub source: TermSource,
    /// Index into the target database's search-field table; out-of-range
    /// values fall back to the database default.
    pub search_field: usize,
}

impl Keyword {
    /// Creates an active keyword on the default search field.
    pub fn new(term: impl Into<String>, source: TermSource) -> Self {
        Self {
            term: term.into(),
            active: true,
            source,
            search_field: 0,
        }
    }
}

/// A controlled-vocabulary term, e.g. a MeSH heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabTerm {
    pub term: String,
    /// Whether the term participates in query synthesis.
    pub active: bool,
    pub source: TermSource,
    /// Vocabulary name, e.g. `"MeSH"` or `"Emtree"`; matched
    /// case-insensitively against the database's renderers.
    pub vocab_type: String,
}

impl VocabTerm {
    /// Creates an active controlled-vocabulary term.
    pub fn new(
        term: impl Into<String>,
        vocab_type: impl Into<String>,
        source: TermSource,
    ) -> Self {
        Self {
            term: term.into(),
            active: true,
            source,
            vocab_type: vocab_type.into(),
        }
    }
}

/// The terms of one PICO category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSet {
    pub keywords: Vec<Keyword>,
    pub controlled_vocabulary: Vec<VocabTerm>,
}

/// All keywords of a research question: one [`TermSet`] per PICO category
/// plus globally excluded terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicoKeywords {
    pub population: TermSet,
    pub intervention: TermSet,
    pub comparison: TermSet,
    pub outcome: TermSet,
    /// Terms excluded from every query via the database's NOT operator.
    pub negative: Vec<String>,
}

impl PicoKeywords {
    /// The term set of one category.
    pub fn set(&self, category: PicoCategory) -> &TermSet {
        match category {
            PicoCategory::Population => &self.population,
            PicoCategory::Intervention => &self.intervention,
            PicoCategory::Comparison => &self.comparison,
            PicoCategory::Outcome => &self.outcome,
        }
    }

    fn set_mut(&mut self, category: PicoCategory) -> &mut TermSet {
        match category {
            PicoCategory::Population => &mut self.population,
            PicoCategory::Intervention => &mut self.intervention,
            PicoCategory::Comparison => &mut self.comparison,
            PicoCategory::Outcome => &mut self.outcome,
        }
    }

    /// Returns a copy with `keyword` appended to `category`.
    #[must_use]
    pub fn with_added_keyword(&self, category: PicoCategory, keyword: Keyword) -> Self {
        let mut updated = self.clone();
        updated.set_mut(category).keywords.push(keyword);
        updated
    }

    /// Returns a copy with `vocab` appended to `category`.
    #[must_use]
    pub fn with_added_vocab(&self, category: PicoCategory, vocab: VocabTerm) -> Self {
        let mut updated = self.clone();
        updated.set_mut(category).controlled_vocabulary.push(vocab);
        updated
    }

    /// Returns a copy with the `active` flag of one keyword changed.
    #[must_use]
    pub fn with_keyword_active(&self, category: PicoCategory, index: usize, active: bool) -> Self {
        let mut updated = self.clone();
        if let Some(keyword) = updated.set_mut(category).keywords.get_mut(index) {
            keyword.active = active;
        }
        updated
    }

    /// Returns a copy with the text of one keyword changed.
    #[must_use]
    pub fn with_keyword_term(&self, category: PicoCategory, index: usize, term: &str) -> Self {
        let mut updated = self.clone();
        if let Some(keyword) = updated.set_mut(category).keywords.get_mut(index) {
            keyword.term = term.to_string();
        }
        updated
    }

    /// Returns a copy with the search field of one keyword changed.
    #[must_use]
    pub fn with_keyword_field(
        &self,
        category: PicoCategory,
        index: usize,
        search_field: usize,
    ) -> Self {
        let mut updated = self.clone();
        if let Some(keyword) = updated.set_mut(category).keywords.get_mut(index) {
            keyword.search_field = search_field;
        }
        updated
    }

    /// Returns a copy with the `active` flag of one controlled-vocabulary
    /// term changed.
    #[must_use]
    pub fn with_vocab_active(&self, category: PicoCategory, index: usize, active: bool) -> Self {
        let mut updated = self.clone();
        if let Some(vocab) = updated
            .set_mut(category)
            .controlled_vocabulary
            .get_mut(index)
        {
            vocab.active = active;
        }
        updated
    }

    /// Active keywords of one category.
    pub fn active_keywords(&self, category: PicoCategory) -> impl Iterator<Item = &Keyword> {
        self.set(category).keywords.iter().filter(|k| k.active)
    }

    /// Active controlled-vocabulary terms of one category.
    pub fn active_vocab(&self, category: PicoCategory) -> impl Iterator<Item = &VocabTerm> {
        self.set(category)
            .controlled_vocabulary
            .iter()
            .filter(|v| v.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> PicoKeywords {
        PicoKeywords::default()
            .with_added_keyword(PicoCategory::Population, Keyword::new("adults", TermSource::Ai))
            .with_added_keyword(PicoCategory::Population, Keyword::new("elderly", TermSource::Manual))
            .with_added_vocab(
                PicoCategory::Intervention,
                VocabTerm::new("Telemedicine", "MeSH", TermSource::Ai),
            )
    }

    #[test]
    fn test_toggle_leaves_original_untouched() {
        let original = sample();
        let updated = original.with_keyword_active(PicoCategory::Population, 0, false);

        assert!(original.population.keywords[0].active);
        assert!(!updated.population.keywords[0].active);
        // Everything else is unchanged.
        assert_eq!(updated.population.keywords[1], original.population.keywords[1]);
        assert_eq!(updated.intervention, original.intervention);
    }

    #[test]
    fn test_edit_term_text() {
        let updated = sample().with_keyword_term(PicoCategory::Population, 1, "older adults");
        assert_eq!(updated.population.keywords[1].term, "older adults");
        assert_eq!(updated.population.keywords[1].source, TermSource::Manual);
    }

    #[test]
    fn test_edit_search_field() {
        let updated = sample().with_keyword_field(PicoCategory::Population, 0, 2);
        assert_eq!(updated.population.keywords[0].search_field, 2);
    }

    #[test]
    fn test_vocab_toggle() {
        let updated = sample().with_vocab_active(PicoCategory::Intervention, 0, false);
        assert!(!updated.intervention.controlled_vocabulary[0].active);
    }

    #[test]
    fn test_out_of_range_update_is_noop() {
        let original = sample();
        let updated = original.with_keyword_active(PicoCategory::Outcome, 7, false);
        assert_eq!(updated, original);
    }

    #[test]
    fn test_active_iterators_skip_inactive() {
        let keywords = sample().with_keyword_active(PicoCategory::Population, 0, false);
        let active: Vec<_> = keywords
            .active_keywords(PicoCategory::Population)
            .map(|k| k.term.as_str())
            .collect();
        assert_eq!(active, vec!["elderly"]);
    }

    #[test]
    fn test_category_accessors() {
        let keywords = sample();
        assert_eq!(keywords.set(PicoCategory::Population).keywords.len(), 2);
        assert_eq!(PicoCategory::Population.label(), "Population");
        assert_eq!(PicoCategory::ALL.len(), 4);
    }
}
