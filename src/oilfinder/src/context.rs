//! Read-only lookup context shared by every front end

use std::path::Path;

use crate::catalog::{CatalogEntry, CatalogIndex, CatalogLayout, FALLBACK_MAKES};
use crate::products::{resolve_product_url, SlugTable};
use crate::record::DetailRecord;
use crate::search::search_entries;
use crate::suggest::{suggest_with, SuggestOptions, Suggestions};

/// Loaded catalog (if any), slug table and suggestion policy.
///
/// Built once at startup and only read afterwards. Without a catalog, makes
/// come from [`FALLBACK_MAKES`] and every lookup sees an empty index.
#[derive(Debug, Clone, Default)]
pub struct LookupContext {
    catalog: Option<CatalogIndex>,
    empty: CatalogIndex,
    slugs: SlugTable,
    suggest: SuggestOptions,
}

impl LookupContext {
    pub fn new(catalog: Option<CatalogIndex>, slugs: SlugTable) -> Self {
        LookupContext {
            catalog,
            empty: CatalogIndex::default(),
            slugs,
            suggest: SuggestOptions::default(),
        }
    }

    /// Load the catalog at `path`, falling back to no catalog on failure
    pub fn load_or_fallback(path: &Path, layout: CatalogLayout, slugs: SlugTable) -> Self {
        let catalog = match CatalogIndex::load(path, layout) {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "catalog unavailable, using fallback makes");
                None
            }
        };
        Self::new(catalog, slugs)
    }

    pub fn with_suggest_options(mut self, options: SuggestOptions) -> Self {
        self.suggest = options;
        self
    }

    /// The loaded catalog, if any
    pub fn catalog(&self) -> Option<&CatalogIndex> {
        self.catalog.as_ref()
    }

    /// The loaded catalog, or an empty one
    pub fn index(&self) -> &CatalogIndex {
        self.catalog.as_ref().unwrap_or(&self.empty)
    }

    pub fn is_fallback(&self) -> bool {
        self.catalog.is_none()
    }

    pub fn slugs(&self) -> &SlugTable {
        &self.slugs
    }

    pub fn suggest_options(&self) -> &SuggestOptions {
        &self.suggest
    }

    /// Make names, sorted; the fallback list when no catalog is loaded
    pub fn makes(&self) -> Vec<String> {
        let mut makes: Vec<String> = match &self.catalog {
            Some(index) => index.make_names().map(String::from).collect(),
            None => FALLBACK_MAKES.iter().map(|m| m.to_string()).collect(),
        };
        makes.sort();
        makes
    }

    /// Model names of a make, sorted; empty for unknown makes
    pub fn models(&self, make: &str) -> Vec<String> {
        let mut models: Vec<String> = self
            .index()
            .make(make)
            .map(|m| m.model_names().map(String::from).collect())
            .unwrap_or_default();
        models.sort();
        models
    }

    /// Year ranges of a model, sorted; empty when unknown
    pub fn years(&self, make: &str, model: &str) -> Vec<String> {
        let mut years: Vec<String> = self
            .index()
            .make(make)
            .and_then(|m| m.model(model))
            .map(|m| m.year_ranges().map(String::from).collect())
            .unwrap_or_default();
        years.sort();
        years
    }

    pub fn record(&self, make: &str, model: &str, year_range: &str) -> Option<&DetailRecord> {
        self.index().record(make, model, year_range)
    }

    pub fn suggest(&self, query: &str) -> Suggestions {
        suggest_with(query, self.index(), &self.suggest)
    }

    pub fn search(&self, query: &str) -> Vec<CatalogEntry<'_>> {
        search_entries(query, self.index())
    }

    pub fn product_url(&self, fluid: &str) -> Option<String> {
        resolve_product_url(fluid, &self.slugs)
    }
}
