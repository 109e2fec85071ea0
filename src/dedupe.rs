//! Article deduplication and merge engine.
//!
//! Clusters a flat list of articles pulled from multiple source databases
//! into duplicate groups and merges each group into one canonical record.
//! Matching combines three signals, strongest first:
//!
//! 1. **Source-overlap guard**: articles that already share a source key are
//!    never merged; within one database each record is assumed distinct.
//! 2. **DOI match**: equal normalized DOIs confirm a duplicate outright.
//! 3. **Title similarity + author overlap**: near-identical titles confirmed
//!    by at least one shared author, or a sufficient author overlap combined
//!    with a weaker title match.
//!
//! Deduplication is a pure, total function: articles with missing fields
//! simply fail to match on those fields.
//!
//! ## Usage
//!
//! ```rust
//! use litsearch::{Article, Author, Deduplicator};
//!
//! let articles = vec![
//!     Article {
//!         title: "Telemonitoring of blood pressure in adults".to_string(),
//!         authors: vec![Author::new("Smith, John")],
//!         doi: Some("10.1234/tm.2022.17".to_string()),
//!         source_db: "pubmed".to_string(),
//!         ..Default::default()
//!     },
//!     Article {
//!         title: "Telemonitoring of Blood Pressure in Adults".to_string(),
//!         authors: vec![Author::new("Smith, John")],
//!         doi: Some("doi:10.1234/TM.2022.17".to_string()),
//!         source_db: "semanticscholar".to_string(),
//!         ..Default::default()
//!     },
//! ];
//!
//! let canonical = Deduplicator::new().deduplicate(&articles);
//! assert_eq!(canonical.len(), 1);
//! assert_eq!(canonical[0].source_db, "pubmed; semanticscholar");
//! ```
//!
//! ## Performance
//!
//! Clustering is O(n²) in article count. All normalization (titles, author
//! names, DOIs, source tokens) is hoisted out of the pairwise loop and done
//! once per article, so the quadratic part only compares precomputed values.

use crate::similarity::{
    SUFFICIENT_AUTHOR_OVERLAP, author_name_set, name_overlap, normalize, normalized_similarity,
};
use crate::utils::normalize_doi;
use crate::{Article, Author};
use itertools::Itertools;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

const STRONG_TITLE_SIMILARITY_THRESHOLD: f64 = 0.85;
const WEAK_TITLE_SIMILARITY_THRESHOLD: f64 = 0.70;
const MIN_COMPARABLE_TITLE_LEN: usize = 10;
const MIN_RELIABLE_TITLE_LEN: usize = 5;

/// Configuration options for the duplicate predicate.
///
/// The default thresholds were chosen empirically; they are exposed here so
/// they can be tuned against a labelled duplicate/non-duplicate corpus
/// rather than recompiled.
#[derive(Debug, Clone, PartialEq)]
pub struct DeduplicatorConfig {
    /// Title similarity at or above which a pair is considered a strong
    /// title match (then confirmed by author overlap).
    pub strong_title_threshold: f64,
    /// Title similarity at or above which a pair with sufficient author
    /// overlap is considered a duplicate.
    pub weak_title_threshold: f64,
    /// Minimum normalized title length (chars, both sides) for the strong
    /// title rule to apply at all.
    pub min_comparable_title_len: usize,
    /// Below this normalized title length (chars, either side) titles are
    /// treated as too short to compare and author overlap decides alone.
    pub min_reliable_title_len: usize,
    /// Number of shared author names that counts as sufficient overlap.
    pub sufficient_author_overlap: usize,
}

impl Default for DeduplicatorConfig {
    fn default() -> Self {
        Self {
            strong_title_threshold: STRONG_TITLE_SIMILARITY_THRESHOLD,
            weak_title_threshold: WEAK_TITLE_SIMILARITY_THRESHOLD,
            min_comparable_title_len: MIN_COMPARABLE_TITLE_LEN,
            min_reliable_title_len: MIN_RELIABLE_TITLE_LEN,
            sufficient_author_overlap: SUFFICIENT_AUTHOR_OVERLAP,
        }
    }
}

/// Deduplication engine over articles from multiple source databases.
///
/// See the [module documentation](self) for the matching rules.
#[derive(Debug, Default, Clone)]
pub struct Deduplicator {
    config: DeduplicatorConfig,
}

/// Per-article values precomputed before the pairwise clustering loop.
#[derive(Debug)]
struct PreparedArticle<'a> {
    original: &'a Article,
    sources: HashSet<String>,
    doi: Option<String>,
    title: String,
    title_len: usize,
    authors: HashSet<String>,
}

impl<'a> PreparedArticle<'a> {
    fn new(article: &'a Article) -> Self {
        let title = normalize(&article.title);
        let title_len = title.chars().count();
        Self {
            original: article,
            sources: article.source_tokens().map(str::to_string).collect(),
            doi: article.doi.as_deref().and_then(normalize_doi),
            title,
            title_len,
            authors: author_name_set(&article.authors),
        }
    }
}

impl Deduplicator {
    /// Creates a deduplicator with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a deduplicator with custom thresholds.
    ///
    /// # Examples
    ///
    /// ```
    /// use litsearch::dedupe::{Deduplicator, DeduplicatorConfig};
    ///
    /// let config = DeduplicatorConfig {
    ///     strong_title_threshold: 0.9,
    ///     ..Default::default()
    /// };
    /// let deduplicator = Deduplicator::new().with_config(config);
    /// ```
    #[must_use]
    pub fn with_config(mut self, config: DeduplicatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Deduplicates `articles` into a list of canonical records.
    ///
    /// Records with a `unique_id` already seen are dropped up front (the
    /// same native record fetched twice from one source). Remaining articles
    /// are clustered greedily and each group is merged; groups appear in
    /// first-occurrence order of their first member.
    pub fn deduplicate(&self, articles: &[Article]) -> Vec<Article> {
        let distinct = drop_refetched(articles);
        let prepared: Vec<PreparedArticle> = distinct.iter().map(|&a| PreparedArticle::new(a)).collect();
        let groups = self.cluster(&prepared);
        debug!(
            input = articles.len(),
            output = groups.len(),
            "deduplicated articles"
        );
        groups
            .iter()
            .map(|group| {
                let members: Vec<&Article> = group.iter().map(|&i| prepared[i].original).collect();
                merge_group(&members)
            })
            .collect()
    }

    /// Clusters `articles` into duplicate groups without merging, returning
    /// indices into the input slice. Singleton groups are included; callers
    /// that only want true duplicates can filter on group size.
    ///
    /// Unlike [`deduplicate`](Self::deduplicate) no records are dropped, so
    /// indices map directly onto the input.
    pub fn duplicate_groups(&self, articles: &[Article]) -> Vec<Vec<usize>> {
        let prepared: Vec<PreparedArticle> = articles.iter().map(PreparedArticle::new).collect();
        self.cluster(&prepared)
    }

    /// Greedy single-pass clustering. Each unprocessed article seeds a
    /// group; later unprocessed articles join when they match *any* current
    /// group member, so groups grow transitively during the scan.
    fn cluster(&self, prepared: &[PreparedArticle]) -> Vec<Vec<usize>> {
        let mut processed = vec![false; prepared.len()];
        let mut groups = Vec::new();

        for i in 0..prepared.len() {
            if processed[i] {
                continue;
            }
            processed[i] = true;
            let mut group = vec![i];

            for j in (i + 1)..prepared.len() {
                if processed[j] {
                    continue;
                }
                if group
                    .iter()
                    .any(|&m| self.is_duplicate(&prepared[m], &prepared[j]))
                {
                    processed[j] = true;
                    group.push(j);
                }
            }

            if group.len() > 1 {
                debug!(
                    members = group.len(),
                    title = %prepared[i].original.title,
                    "found duplicate group"
                );
            }
            groups.push(group);
        }

        groups
    }

    /// The duplicate predicate. Symmetric: every signal compares sets or
    /// unordered pairs.
    fn is_duplicate(&self, a: &PreparedArticle, b: &PreparedArticle) -> bool {
        // Articles already sharing a source key were distinct within that
        // source; merging them would count one record twice.
        if !a.sources.is_disjoint(&b.sources) {
            return false;
        }

        if let (Some(doi_a), Some(doi_b)) = (&a.doi, &b.doi) {
            if doi_a == doi_b {
                return true;
            }
        }

        let title_similarity = normalized_similarity(&a.title, &b.title);
        let overlap = name_overlap(&a.authors, &b.authors);

        if a.title_len >= self.config.min_comparable_title_len
            && b.title_len >= self.config.min_comparable_title_len
            && title_similarity >= self.config.strong_title_threshold
        {
            if a.authors.is_empty() || b.authors.is_empty() {
                // No author data to contradict a near-identical title.
                return true;
            }
            if overlap >= 1 {
                return true;
            }
            // Strong title but disjoint author lists: not confirmed here,
            // fall through to the author-overlap rule.
        }

        if overlap >= self.config.sufficient_author_overlap {
            let titles_unreliable = a.title_len < self.config.min_reliable_title_len
                || b.title_len < self.config.min_reliable_title_len;
            if titles_unreliable || title_similarity >= self.config.weak_title_threshold {
                return true;
            }
        }

        false
    }
}

/// Drops articles whose `unique_id` was already seen, keeping the first.
fn drop_refetched(articles: &[Article]) -> Vec<&Article> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .filter(|a| a.unique_id.is_empty() || seen.insert(a.unique_id.as_str()))
        .collect()
}

/// Merges a duplicate group into one canonical record.
///
/// The first member is the representative; metadata is absorbed from every
/// other member in group order: longest title/venue/abstract win, authors
/// are unioned by normalized name (first-seen spelling kept), years and
/// citation counts take the maximum, identifiers only fill gaps.
fn merge_group(members: &[&Article]) -> Article {
    let mut merged = members[0].clone();
    if members.len() == 1 {
        return merged;
    }

    let mut seen_authors: HashSet<String> = author_name_set(&merged.authors);

    for other in &members[1..] {
        absorb_longest_str(&mut merged.title, &other.title);
        absorb_longest(&mut merged.venue, &other.venue);
        absorb_longest(&mut merged.journal, &other.journal);
        absorb_longest(&mut merged.source, &other.source);
        absorb_longest(&mut merged.abstract_text, &other.abstract_text);

        for author in &other.authors {
            let name = normalize(&author.name);
            if !name.is_empty() && seen_authors.insert(name) {
                merged.authors.push(Author::new(author.name.clone()));
            }
        }

        merged.year = merged.year.max(other.year);
        if other.pubdate > merged.pubdate {
            merged.pubdate = other.pubdate.clone();
        }
        merged.citation_count = merged.citation_count.max(other.citation_count);

        if merged.doi.is_none() {
            merged.doi = other.doi.clone();
        }
        if merged.url.is_none() {
            merged.url = other.url.clone();
        }
        for (kind, id) in &other.external_ids {
            merged
                .external_ids
                .entry(kind.clone())
                .or_insert_with(|| id.clone());
        }
        if other.fields_of_study.len() > merged.fields_of_study.len() {
            merged.fields_of_study = other.fields_of_study.clone();
        }
    }

    merged.source_db = members
        .iter()
        .flat_map(|m| m.source_tokens())
        .collect::<BTreeSet<_>>()
        .iter()
        .join("; ");

    merged
}

/// Replaces `target` when `candidate` is longer (by char count).
fn absorb_longest_str(target: &mut String, candidate: &str) {
    if candidate.chars().count() > target.chars().count() {
        *target = candidate.to_string();
    }
}

/// Replaces `target` when `candidate` holds a longer string.
fn absorb_longest(target: &mut Option<String>, candidate: &Option<String>) {
    if let Some(candidate) = candidate {
        let target_len = target.as_deref().map_or(0, |t| t.chars().count());
        if candidate.chars().count() > target_len {
            *target = Some(candidate.clone());
        }
    }
}
