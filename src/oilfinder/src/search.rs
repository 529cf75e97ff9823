//! Free-text record search

use crate::catalog::{CatalogEntry, CatalogIndex};
use crate::record::DetailRecord;

/// Every record whose make, model, `"<make> <model>"` or `model_year_text`
/// contains the query, case-insensitively, in catalog order.
///
/// A blank query matches nothing.
pub fn search<'a>(query: &str, index: &'a CatalogIndex) -> Vec<&'a DetailRecord> {
    search_entries(query, index)
        .into_iter()
        .map(|entry| entry.record)
        .collect()
}

/// Like [`search`], keeping the keys of each hit
pub fn search_entries<'a>(query: &str, index: &'a CatalogIndex) -> Vec<CatalogEntry<'a>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for make in index.makes() {
        let make_lower = make.name.to_lowercase();
        let make_matches = make_lower.contains(&query);

        for model in &make.models {
            let model_lower = model.name.to_lowercase();
            let name_matches = make_matches
                || model_lower.contains(&query)
                || format!("{make_lower} {model_lower}").contains(&query);

            for year in &model.years {
                let text_matches = || {
                    year.record
                        .model_year_text
                        .as_deref()
                        .is_some_and(|text| text.to_lowercase().contains(&query))
                };

                if name_matches || text_matches() {
                    hits.push(CatalogEntry {
                        make: &make.name,
                        model: &model.name,
                        year_range: &year.range,
                        record: &year.record,
                    });
                }
            }
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogLayout;
    use serde_json::json;

    fn index() -> CatalogIndex {
        CatalogIndex::from_value(
            json!({
                "TOYOTA": {
                    "Corolla": {
                        "1970-1979": { "model_year_text": "Toyota Corolla 1970-1979" },
                        "1980-1987": { "model_year_text": "Toyota Corolla 1980-1987" }
                    },
                    "Crown": {
                        "1955-1962": {}
                    }
                },
                "BMW": {
                    "3 Series": {
                        "1990-1995": { "model_year_text": "BMW 3 Series 1990-1995", "engine_oil": "XL30" }
                    },
                    "2002": {
                        "1968-1976": { "model_year_text": "BMW 2002 Tii" }
                    }
                },
                "LEXUS": {
                    "LS400": {
                        "1989-1994": { "model_year_text": "Toyota Celsior (Lexus LS400)" }
                    }
                }
            }),
            CatalogLayout::Nested,
        )
        .unwrap()
    }

    #[test]
    fn test_make_match_returns_every_record() {
        let index = index();
        let hits = search_entries("toyota", &index);
        let keys: Vec<(&str, &str)> = hits.iter().map(|h| (h.make, h.year_range)).collect();
        assert_eq!(
            keys,
            vec![
                ("TOYOTA", "1970-1979"),
                ("TOYOTA", "1980-1987"),
                ("TOYOTA", "1955-1962"),
                ("LEXUS", "1989-1994"),
            ]
        );
    }

    #[test]
    fn test_hits_contain_query_somewhere() {
        let index = index();
        let query = "corolla";
        for hit in search_entries(query, &index) {
            let text = hit.record.model_year_text.clone().unwrap_or_default();
            let haystack = format!("{} {} {}", hit.make, hit.model, text).to_lowercase();
            assert!(haystack.contains(query));
        }
        assert_eq!(search(query, &index).len(), 2);
    }

    #[test]
    fn test_combined_make_model() {
        let index = index();
        let hits = search("bmw 3 ser", &index);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].engine_oil.as_deref(), Some("XL30"));
    }

    #[test]
    fn test_model_year_text_match() {
        let index = index();
        let hits = search("tii", &index);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title(), "BMW 2002 Tii");
    }

    #[test]
    fn test_blank_query_and_empty_index() {
        let index = index();
        assert!(search("", &index).is_empty());
        assert!(search("   ", &index).is_empty());
        assert!(search("bmw", &CatalogIndex::default()).is_empty());
        assert!(search("zastava", &index).is_empty());
    }

    #[test]
    fn test_bmw_scenario() {
        let index = CatalogIndex::from_value(
            json!({
                "BMW": {
                    "3 Series": {
                        "1990-1995": { "model_year_text": "BMW 3 Series 1990-1995", "engine_oil": "XL30" }
                    }
                }
            }),
            CatalogLayout::Nested,
        )
        .unwrap();

        let hits = search("bmw", &index);
        assert_eq!(hits.len(), 1);

        let slugs = crate::products::SlugTable::from_pairs([("classic-xl30", "https://x/y")]);
        let fluid = hits[0].engine_oil.as_deref().unwrap();
        assert_eq!(
            crate::products::resolve_product_url(fluid, &slugs).as_deref(),
            Some("https://x/y")
        );
    }
}
