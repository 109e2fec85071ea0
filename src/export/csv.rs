//! CSV serializer for canonical article lists.

use crate::{Article, Error, Result};
use itertools::Itertools;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Export(err.to_string())
    }
}

/// Serializes articles as CSV with a fixed header row.
///
/// Authors are joined with `"; "`; the merged `source_db` string is written
/// verbatim.
///
/// # Errors
///
/// Returns [`Error::Export`] when the underlying writer fails.
pub fn write_csv(articles: &[Article]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Title",
        "Authors",
        "Year",
        "Journal",
        "DOI",
        "URL",
        "Sources",
        "Abstract",
    ])?;

    for article in articles {
        let authors = article.authors.iter().map(|a| a.name.as_str()).join("; ");
        let year = article.year.map(|y| y.to_string()).unwrap_or_default();
        writer.write_record([
            article.title.as_str(),
            authors.as_str(),
            year.as_str(),
            article.display_venue().unwrap_or(""),
            article.doi.as_deref().unwrap_or(""),
            article.url.as_deref().unwrap_or(""),
            article.source_db.as_str(),
            article.abstract_text.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Author;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_csv_rows() {
        let articles = vec![
            Article {
                title: "Telemonitoring of blood pressure".to_string(),
                authors: vec![Author::new("Smith, John"), Author::new("Doe, Jane")],
                year: Some(2022),
                journal: Some("Journal of Telemedicine".to_string()),
                doi: Some("10.1/bp".to_string()),
                source_db: "pubmed; scopus".to_string(),
                ..Default::default()
            },
            Article {
                title: "An unrelated study of sleep".to_string(),
                source_db: "core".to_string(),
                ..Default::default()
            },
        ];

        let out = write_csv(&articles).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Title,Authors,Year,Journal,DOI,URL,Sources,Abstract"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Telemonitoring of blood pressure,\"Smith, John; Doe, Jane\",2022,Journal of Telemedicine,10.1/bp,,pubmed; scopus,"
        );
        assert_eq!(
            lines.next().unwrap(),
            "An unrelated study of sleep,,,,,,core,"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_list_yields_header_only() {
        let out = write_csv(&[]).unwrap();
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_venue_alias_fallback() {
        let article = Article {
            title: "Venue fallback".to_string(),
            venue: Some("NeurIPS".to_string()),
            ..Default::default()
        };
        let out = write_csv(&[article]).unwrap();
        assert!(out.contains("NeurIPS"));
    }
}
