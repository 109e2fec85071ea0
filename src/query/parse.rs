//! Boolean query string parser.
//!
//! Splits a query into AND-separated clauses of OR-terms with a scanner
//! that respects quoting and parenthesis nesting: an operator inside quotes
//! or at a deeper paren level is not a split point. Parsing is best-effort
//! and total; malformed input degrades to a coarser clause/term split
//! instead of failing.

use crate::query::structure::{QueryClause, QueryStructure};

/// Parses a boolean query string into its clause structure.
///
/// An empty or whitespace-only query yields [`QueryStructure::Empty`].
/// Unbalanced quotes or parentheses never cause an error: an unclosed quote
/// swallows the rest of the input into the current term, an unmatched `)`
/// is treated as depth zero.
///
/// # Examples
///
/// ```
/// use litsearch::query::parse;
///
/// let structure = parse(r#"("heart failure"[tiab] OR "HF"[tiab]) AND ("adults")"#);
/// let clauses = structure.clauses();
/// assert_eq!(clauses.len(), 2);
/// assert_eq!(clauses[0].terms, vec!["heart failure", "hf"]);
/// ```
pub fn parse(query: &str) -> QueryStructure {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return QueryStructure::Empty;
    }
    let clauses = split_top_level(trimmed, "AND")
        .into_iter()
        .map(parse_clause)
        .collect();
    QueryStructure::Boolean { clauses }
}

/// Splits one AND-clause into its OR-terms.
fn parse_clause(raw: String) -> QueryClause {
    let inner = strip_enclosing_parens(&raw);
    let terms: Vec<String> = split_top_level(inner, "OR")
        .into_iter()
        .map(|t| clean_term(&t))
        .filter(|t| !t.is_empty())
        .collect();
    QueryClause::new(raw, terms)
}

/// Splits `input` on top-level, whole-word, case-insensitive occurrences of
/// `op`. Occurrences inside quotes or parentheses are part of the segment.
/// Whitespace-only segments are dropped.
fn split_top_level(input: &str, op: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let op: Vec<char> = op.chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;
    let mut in_quotes = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            in_quotes = !in_quotes;
        } else if !in_quotes {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ => {
                    if depth == 0 && matches_word(&chars, i, &op) {
                        segments.push(std::mem::take(&mut current));
                        i += op.len();
                        continue;
                    }
                }
            }
        }
        current.push(c);
        i += 1;
    }
    segments.push(current);

    segments
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Whether `op` occurs at `chars[at..]` as a whole word, case-insensitively.
fn matches_word(chars: &[char], at: usize, op: &[char]) -> bool {
    if at + op.len() > chars.len() {
        return false;
    }
    if !chars[at..at + op.len()]
        .iter()
        .zip(op)
        .all(|(c, o)| c.eq_ignore_ascii_case(o))
    {
        return false;
    }
    let boundary_before = at == 0 || !chars[at - 1].is_alphanumeric();
    let boundary_after = at + op.len() == chars.len() || !chars[at + op.len()].is_alphanumeric();
    boundary_before && boundary_after
}

/// Strips one pair of parentheses enclosing the whole string, if the opening
/// paren really closes at the end (quote-aware).
fn strip_enclosing_parens(s: &str) -> &str {
    let trimmed = s.trim();
    if !(trimmed.starts_with('(') && trimmed.ends_with(')')) {
        return trimmed;
    }
    let mut depth = 0usize;
    let mut in_quotes = false;
    for (idx, c) in trimmed.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    // The first paren closed before the end: not enclosing.
                    if idx != trimmed.len() - 1 {
                        return trimmed;
                    }
                    return trimmed[1..trimmed.len() - 1].trim();
                }
            }
            _ => {}
        }
    }
    // Unbalanced; leave as-is.
    trimmed
}

/// Cleans an extracted term: strip a trailing `[field]` qualifier, strip
/// enclosing quotes, trim, lower-case.
fn clean_term(raw: &str) -> String {
    let mut term = raw.trim();
    if term.ends_with(']') {
        if let Some(open) = term.rfind('[') {
            term = term[..open].trim_end();
        }
    }
    term.trim_matches('"').trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn clause_terms(query: &str) -> Vec<Vec<String>> {
        parse(query)
            .clauses()
            .iter()
            .map(|c| c.terms.clone())
            .collect()
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(parse(""), QueryStructure::Empty);
        assert_eq!(parse("   "), QueryStructure::Empty);
    }

    #[test]
    fn test_two_clauses_with_or_groups() {
        let terms = clause_terms(r#"("a" OR "b") AND ("c")"#);
        assert_eq!(terms, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_normalized_ignores_term_order_and_case() {
        let a = parse(r#""B" OR "a""#);
        let b = parse(r#""a" OR "b""#);
        assert_eq!(a.clauses()[0].normalized, b.clauses()[0].normalized);
    }

    #[test]
    fn test_field_qualifiers_are_stripped() {
        let terms = clause_terms(r#"("heart failure"[tiab] OR "HF"[ti]) AND ("adults"[tiab])"#);
        assert_eq!(terms, vec![vec!["heart failure", "hf"], vec!["adults"]]);
    }

    #[test]
    fn test_and_inside_quotes_is_not_a_split_point() {
        let terms = clause_terms(r#""diet and exercise" AND "adults""#);
        assert_eq!(terms, vec![vec!["diet and exercise"], vec!["adults"]]);
    }

    #[test]
    fn test_and_inside_nested_parens_is_not_a_split_point() {
        let structure = parse(r#"(("a" AND "b") OR "c") AND "d""#);
        let clauses = structure.clauses();
        assert_eq!(clauses.len(), 2);
        // The nested AND-group stays one OR-term of the first clause.
        assert_eq!(clauses[0].terms, vec![r#"("a" and "b")"#, "c"]);
        assert_eq!(clauses[1].terms, vec!["d"]);
    }

    #[rstest]
    #[case("and", "AND")]
    #[case("And", "AND")]
    #[case("aNd", "AND")]
    fn test_operator_case_insensitive(#[case] op: &str, #[case] _canonical: &str) {
        let query = format!(r#""a" {op} "b""#);
        assert_eq!(clause_terms(&query), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_operator_requires_word_boundary() {
        // "band" and "android" contain the operator letters but are terms.
        let terms = clause_terms("band AND android");
        assert_eq!(terms, vec![vec!["band"], vec!["android"]]);
    }

    #[test]
    fn test_unbalanced_quote_swallows_rest() {
        let terms = clause_terms(r#""unterminated AND still one clause"#);
        assert_eq!(terms, vec![vec!["unterminated and still one clause"]]);
    }

    #[test]
    fn test_unbalanced_parens_terminate() {
        let structure = parse(r#")) AND ("a""#);
        assert_eq!(structure.clauses().len(), 2);
        let structure = parse(r#"("a" OR ("b") AND "c""#);
        assert!(!structure.clauses().is_empty());
    }

    #[test]
    fn test_empty_clause_from_empty_parens() {
        let structure = parse(r#"("a") AND ()"#);
        let clauses = structure.clauses();
        assert_eq!(clauses.len(), 2);
        assert!(clauses[1].terms.is_empty());
        assert_eq!(clauses[1].raw, "()");
    }

    #[test]
    fn test_consecutive_operators_drop_empty_segment() {
        let terms = clause_terms(r#""a" AND AND "b""#);
        assert_eq!(terms, vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_raw_preserves_original_clause_text() {
        let structure = parse(r#"("a" OR "b") AND ("c")"#);
        assert_eq!(structure.clauses()[0].raw, r#"("a" OR "b")"#);
        assert_eq!(structure.clauses()[1].raw, r#"("c")"#);
    }

    #[test]
    fn test_enclosing_parens_only_stripped_when_enclosing() {
        // The leading paren closes mid-string, so the clause is not
        // unwrapped; each parenthesized group becomes one OR-term, kept
        // verbatim apart from lower-casing.
        let terms = clause_terms(r#"("a") OR ("b")"#);
        assert_eq!(terms, vec![vec![r#"("a")"#, r#"("b")"#]]);
    }
}
