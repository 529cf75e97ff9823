//! Make and model suggestions for partial queries
//!
//! Matching is plain case-insensitive substring containment in catalog order.
//! There is no scoring: the first matches found win, so a closer match that
//! sits later in the catalog can be cut off by the limits below.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogIndex;
use crate::format::{make_label, model_label};

/// Shortest trimmed query that produces suggestions
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Maximum make suggestions
pub const MAX_MAKES: usize = 3;

/// Maximum model suggestions across all makes
pub const MAX_MODELS: usize = 5;

/// Models listed for a make whose own name matches
pub const MODELS_PER_MATCHING_MAKE: usize = 3;

/// Matching models listed for any other make
pub const MODELS_PER_OTHER_MAKE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Make,
    Model,
}

/// A make, or a make+model pair, offered for a partial query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub make: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Suggestion {
    pub fn make(make: &str) -> Self {
        Suggestion {
            kind: SuggestionKind::Make,
            make: make.to_string(),
            model: None,
        }
    }

    pub fn model(make: &str, model: &str) -> Self {
        Suggestion {
            kind: SuggestionKind::Model,
            make: make.to_string(),
            model: Some(model.to_string()),
        }
    }

    /// Display label: `"BMW"` for makes, `"Bmw 3 SERIES"` for models
    pub fn label(&self) -> String {
        match &self.model {
            Some(model) => model_label(&self.make, model),
            None => make_label(&self.make),
        }
    }

    /// Query to run when this suggestion is picked
    pub fn search_text(&self) -> String {
        match &self.model {
            Some(model) => format!("{} {}", self.make, model),
            None => self.make.clone(),
        }
    }
}

/// Suggestions for one query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub makes: Vec<Suggestion>,
    pub models: Vec<Suggestion>,
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        self.makes.is_empty() && self.models.is_empty()
    }

    pub fn make_labels(&self) -> Vec<String> {
        self.makes.iter().map(Suggestion::label).collect()
    }

    pub fn model_labels(&self) -> Vec<String> {
        self.models.iter().map(Suggestion::label).collect()
    }
}

/// Caller-chosen suggestion policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestOptions {
    pub min_query_len: usize,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        SuggestOptions {
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

impl SuggestOptions {
    /// True if the trimmed query is long enough to look up
    pub fn accepts(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.min_query_len
    }
}

/// Suggest makes and models with the default policy
pub fn suggest(query: &str, index: &CatalogIndex) -> Suggestions {
    suggest_with(query, index, &SuggestOptions::default())
}

/// Suggest makes and models for a partial query.
///
/// Makes: every make containing the query, first [`MAX_MAKES`].
///
/// Models, per make in catalog order: when the make itself matches, its first
/// [`MODELS_PER_MATCHING_MAKE`] models whatever their names; otherwise up to
/// [`MODELS_PER_OTHER_MAKE`] models containing the query. The combined list is
/// cut to [`MAX_MODELS`].
pub fn suggest_with(query: &str, index: &CatalogIndex, options: &SuggestOptions) -> Suggestions {
    if !options.accepts(query) {
        return Suggestions::default();
    }
    let query = query.trim().to_lowercase();

    let makes = index
        .makes()
        .iter()
        .filter(|make| make.name.to_lowercase().contains(&query))
        .take(MAX_MAKES)
        .map(|make| Suggestion::make(&make.name))
        .collect();

    let mut models = Vec::new();
    for make in index.makes() {
        if models.len() >= MAX_MODELS {
            break;
        }

        if make.name.to_lowercase().contains(&query) {
            models.extend(
                make.models
                    .iter()
                    .take(MODELS_PER_MATCHING_MAKE)
                    .map(|model| Suggestion::model(&make.name, &model.name)),
            );
        } else {
            models.extend(
                make.models
                    .iter()
                    .filter(|model| model.name.to_lowercase().contains(&query))
                    .take(MODELS_PER_OTHER_MAKE)
                    .map(|model| Suggestion::model(&make.name, &model.name)),
            );
        }
    }
    models.truncate(MAX_MODELS);

    Suggestions { makes, models }
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
                    "Corolla": {}, "Camry": {}, "RAV4": {}, "Prius": {}, "Land Cruiser": {}
                },
                "TRIUMPH": { "Spitfire": {}, "TR6": {}, "Herald": {} },
                "TVR": { "Griffith": {}, "Chimaera": {} },
                "TALBOT": { "Sunbeam": {} },
                "VOLKSWAGEN": { "Golf": {}, "Beetle": {}, "Polo": {} },
                "ALFA ROMEO": { "Giulia": {}, "Spider": {} },
                "LAND ROVER": { "Defender": {} }
            }),
            CatalogLayout::Nested,
        )
        .unwrap()
    }

    fn make_names(s: &Suggestions) -> Vec<&str> {
        s.makes.iter().map(|m| m.make.as_str()).collect()
    }

    #[test]
    fn test_short_query_is_empty() {
        let index = index();
        assert!(suggest("", &index).is_empty());
        assert!(suggest("t", &index).is_empty());
        assert!(suggest("  t  ", &index).is_empty());

        let strict = SuggestOptions { min_query_len: 3 };
        assert!(suggest_with("tv", &index, &strict).is_empty());
        assert!(!suggest_with("tvr", &index, &strict).is_empty());
    }

    #[test]
    fn test_every_make_suggests_itself() {
        let index = index();
        for make in index.make_names() {
            let result = suggest(&make.to_lowercase(), &index);
            assert!(make_names(&result).contains(&make), "{make}");
        }
    }

    #[test]
    fn test_make_limit_and_order() {
        let index = index();
        let result = suggest_with("t", &index, &SuggestOptions { min_query_len: 1 });
        assert_eq!(make_names(&result), vec!["TOYOTA", "TRIUMPH", "TVR"]);
        assert_eq!(result.makes.len(), MAX_MAKES);
        assert_eq!(result.models.len(), MAX_MODELS);
    }

    #[test]
    fn test_matching_make_lists_its_models() {
        let index = index();
        let result = suggest("toyota", &index);
        let models: Vec<(&str, &str)> = result
            .models
            .iter()
            .map(|s| (s.make.as_str(), s.model.as_deref().unwrap()))
            .collect();
        assert_eq!(
            models,
            vec![("TOYOTA", "Corolla"), ("TOYOTA", "Camry"), ("TOYOTA", "RAV4")]
        );
    }

    #[test]
    fn test_other_makes_list_matching_models() {
        let index = index();
        let result = suggest("land", &index);

        assert_eq!(make_names(&result), vec!["LAND ROVER"]);
        let labels = result.model_labels();
        assert_eq!(labels, vec!["Toyota LAND CRUISER", "Land Rover DEFENDER"]);
    }

    #[test]
    fn test_model_limit_per_other_make() {
        let index = index();
        let result = suggest("er", &index);
        let triumph: Vec<&str> = result
            .models
            .iter()
            .filter(|s| s.make == "TRIUMPH")
            .map(|s| s.model.as_deref().unwrap())
            .collect();
        assert_eq!(triumph, vec!["Herald"]);

        let toyota = result.models.iter().filter(|s| s.make == "TOYOTA").count();
        assert!(toyota <= MODELS_PER_OTHER_MAKE);
        assert!(result.models.len() <= MAX_MODELS);
    }

    #[test]
    fn test_labels_and_search_text() {
        let make = Suggestion::make("Alfa Romeo");
        assert_eq!(make.label(), "ALFA ROMEO");
        assert_eq!(make.search_text(), "Alfa Romeo");

        let model = Suggestion::model("ALFA ROMEO", "Giulia");
        assert_eq!(model.label(), "Alfa Romeo GIULIA");
        assert_eq!(model.search_text(), "ALFA ROMEO Giulia");
    }

    #[test]
    fn test_empty_index() {
        let result = suggest("bmw", &CatalogIndex::default());
        assert_eq!(result, Suggestions::default());
    }
}
