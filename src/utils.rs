use crate::regex::{Captures, Regex};
use std::sync::LazyLock;

static DOI_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://(?:dx\.)?doi\.org/|doi:\s*)").unwrap());

static UNICODE_ESCAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<U\+([0-9A-Fa-f]+)>").unwrap());

/// Normalizes a DOI for comparison: trim, lower-case, and strip a leading
/// `https://doi.org/`, `http://dx.doi.org/`, or `doi:` prefix.
///
/// Returns `None` when nothing usable remains.
pub(crate) fn normalize_doi(doi_str: &str) -> Option<String> {
    let doi = doi_str.trim().to_lowercase();
    if doi.is_empty() {
        return None;
    }
    let stripped = DOI_PREFIX_REGEX.replace(&doi, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Repairs `<U+xxxx>` escape sequences that some database exports emit in
/// place of non-ASCII characters. Sequences that do not decode to a valid
/// scalar value are left as-is.
pub(crate) fn convert_unicode_escapes(input: &str) -> String {
    if !input.contains("<U+") {
        return input.to_string();
    }
    UNICODE_ESCAPE_REGEX
        .replace_all(input, |caps: &Captures| {
            u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map(|c| c.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .to_string()
}
