//! RIS serializer for canonical article lists.

use crate::Article;

/// Serializes articles as RIS records.
///
/// One `TY`/`ER`-delimited record per article; optional fields are omitted
/// when absent. Merged records keep their combined `source_db` in the `DP`
/// (database provider) tag.
pub fn write_ris(articles: &[Article]) -> String {
    let mut out = String::new();
    for article in articles {
        push_tag(&mut out, "TY", "JOUR");
        push_tag(&mut out, "TI", &article.title);
        for author in &article.authors {
            push_tag(&mut out, "AU", &author.name);
        }
        if let Some(year) = article.year {
            push_tag(&mut out, "PY", &year.to_string());
        }
        if let Some(journal) = article.display_venue() {
            push_tag(&mut out, "JO", journal);
        }
        if let Some(doi) = &article.doi {
            push_tag(&mut out, "DO", doi);
        }
        if let Some(url) = &article.url {
            push_tag(&mut out, "UR", url);
        }
        if let Some(abstract_text) = &article.abstract_text {
            push_tag(&mut out, "AB", abstract_text);
        }
        if !article.source_db.is_empty() {
            push_tag(&mut out, "DP", &article.source_db);
        }
        out.push_str("ER  - \n\n");
    }
    out
}

fn push_tag(out: &mut String, tag: &str, value: &str) {
    out.push_str(tag);
    out.push_str("  - ");
    out.push_str(value);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Author;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_ris_record() {
        let article = Article {
            title: "Telemonitoring of blood pressure".to_string(),
            authors: vec![Author::new("Smith, John"), Author::new("Doe, Jane")],
            year: Some(2022),
            journal: Some("Journal of Telemedicine".to_string()),
            doi: Some("10.1/bp".to_string()),
            abstract_text: Some("Background: example.".to_string()),
            source_db: "pubmed; scopus".to_string(),
            ..Default::default()
        };

        let ris = write_ris(std::slice::from_ref(&article));
        let expected = "TY  - JOUR\n\
                        TI  - Telemonitoring of blood pressure\n\
                        AU  - Smith, John\n\
                        AU  - Doe, Jane\n\
                        PY  - 2022\n\
                        JO  - Journal of Telemedicine\n\
                        DO  - 10.1/bp\n\
                        AB  - Background: example.\n\
                        DP  - pubmed; scopus\n\
                        ER  - \n\n";
        assert_eq!(ris, expected);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let article = Article {
            title: "Untitled draft".to_string(),
            source_db: "core".to_string(),
            ..Default::default()
        };
        let ris = write_ris(&[article]);
        assert!(!ris.contains("PY  -"));
        assert!(!ris.contains("DO  -"));
        assert!(ris.contains("DP  - core"));
    }

    #[test]
    fn test_one_record_per_article() {
        let articles = vec![
            Article {
                title: "First".to_string(),
                ..Default::default()
            },
            Article {
                title: "Second".to_string(),
                ..Default::default()
            },
        ];
        let ris = write_ris(&articles);
        assert_eq!(ris.matches("ER  - ").count(), 2);
    }
}
