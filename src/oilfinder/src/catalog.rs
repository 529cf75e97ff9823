//! Catalog index
//!
//! The catalog is a read-only `make → model → year range → record` tree built
//! once from JSON. Source order is kept at every level and is the iteration
//! order used by suggestions and search.
//!
//! Two JSON layouts are understood:
//!
//! - [`CatalogLayout::Nested`]: `{ make: { model: { year: record } } }`
//! - [`CatalogLayout::Flat`]: `{ "MAKE model words": { year: record } }`, where
//!   the make is derived from the leading word(s) of the key.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::DetailRecord;

/// Makes offered when no catalog could be loaded
pub const FALLBACK_MAKES: &[&str] = &["AC", "ALFA ROMEO", "ASTON MARTIN", "AUDI", "BENTLEY", "BMW"];

/// Two-word makes recognised when deriving makes from flat keys
pub const MULTI_WORD_MAKES: &[&str] = &[
    "ALFA ROMEO",
    "LAND ROVER",
    "ROLLS ROYCE",
    "ASTON MARTIN",
    "MERCEDES BENZ",
    "AUSTIN HEALEY",
];

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Shape(String),

    #[error("Unknown catalog layout: {0} (expected nested or flat)")]
    UnknownLayout(String),
}

/// On-disk shape of the catalog JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogLayout {
    #[default]
    Nested,
    Flat,
}

impl FromStr for CatalogLayout {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nested" => Ok(CatalogLayout::Nested),
            "flat" => Ok(CatalogLayout::Flat),
            _ => Err(CatalogError::UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for CatalogLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogLayout::Nested => write!(f, "nested"),
            CatalogLayout::Flat => write!(f, "flat"),
        }
    }
}

/// One year range under a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearEntry {
    pub range: String,
    pub record: DetailRecord,
}

/// One model under a make
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub name: String,
    pub years: Vec<YearEntry>,
}

/// One make and its models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeEntry {
    pub name: String,
    pub models: Vec<ModelEntry>,
}

/// A record together with the keys that reach it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub make: &'a str,
    pub model: &'a str,
    pub year_range: &'a str,
    pub record: &'a DetailRecord,
}

/// Read-only make → model → year range → record index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogIndex {
    makes: Vec<MakeEntry>,
}

fn eq_loose(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Find by exact name first, then case-insensitively
fn find_named<'a, T>(items: &'a [T], name: &str, key: impl Fn(&T) -> &str) -> Option<&'a T> {
    items
        .iter()
        .find(|item| key(*item) == name)
        .or_else(|| items.iter().find(|item| eq_loose(key(*item), name)))
}

impl MakeEntry {
    pub fn model(&self, name: &str) -> Option<&ModelEntry> {
        find_named(&self.models, name, |m| m.name.as_str())
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }
}

impl ModelEntry {
    pub fn year(&self, range: &str) -> Option<&YearEntry> {
        find_named(&self.years, range, |y| y.range.as_str())
    }

    pub fn year_ranges(&self) -> impl Iterator<Item = &str> {
        self.years.iter().map(|y| y.range.as_str())
    }
}

impl CatalogIndex {
    /// Load a catalog file
    pub fn load(path: &Path, layout: CatalogLayout) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json, layout)
    }

    /// Parse a catalog from JSON text
    pub fn from_json_str(json: &str, layout: CatalogLayout) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value, layout)
    }

    /// Build a catalog from parsed JSON.
    ///
    /// The root must be an object. Malformed branches below the root are
    /// skipped with a warning instead of failing the load.
    pub fn from_value(value: Value, layout: CatalogLayout) -> Result<Self, CatalogError> {
        let Value::Object(root) = value else {
            return Err(CatalogError::Shape("root is not an object".into()));
        };

        let index = match layout {
            CatalogLayout::Nested => Self::from_nested(root),
            CatalogLayout::Flat => Self::from_flat(root),
        };

        tracing::info!(
            layout = %layout,
            makes = index.makes.len(),
            records = index.len(),
            "catalog loaded"
        );
        Ok(index)
    }

    fn from_nested(root: Map<String, Value>) -> Self {
        let mut index = CatalogIndex::default();

        for (make, models) in root {
            let Value::Object(models) = models else {
                tracing::warn!(%make, "skipping make: models are not an object");
                continue;
            };
            index.ensure_make(&make);

            for (model, years) in models {
                let Value::Object(years) = years else {
                    tracing::warn!(%make, %model, "skipping model: years are not an object");
                    continue;
                };
                index.insert_years(&make, &model, years);
            }
        }

        index
    }

    fn from_flat(root: Map<String, Value>) -> Self {
        let mut index = CatalogIndex::default();

        for (key, years) in root {
            let Some((make, model)) = derive_make(&key) else {
                tracing::warn!(%key, "skipping key: no recognisable make");
                continue;
            };
            let Value::Object(years) = years else {
                tracing::warn!(%key, "skipping key: years are not an object");
                continue;
            };
            index.insert_years(&make, &model, years);
        }

        index
    }

    fn ensure_make(&mut self, make: &str) -> &mut MakeEntry {
        let pos = match self.makes.iter().position(|m| m.name == make) {
            Some(pos) => pos,
            None => {
                self.makes.push(MakeEntry {
                    name: make.to_string(),
                    models: Vec::new(),
                });
                self.makes.len() - 1
            }
        };
        &mut self.makes[pos]
    }

    fn ensure_model(&mut self, make: &str, model: &str) -> &mut ModelEntry {
        let make = self.ensure_make(make);
        let pos = match make.models.iter().position(|m| m.name == model) {
            Some(pos) => pos,
            None => {
                make.models.push(ModelEntry {
                    name: model.to_string(),
                    years: Vec::new(),
                });
                make.models.len() - 1
            }
        };
        &mut make.models[pos]
    }

    fn insert_years(&mut self, make: &str, model: &str, years: Map<String, Value>) {
        let entry = self.ensure_model(make, model);

        for (range, record) in years {
            let record: DetailRecord = match serde_json::from_value(record) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(make, model, %range, error = %e, "skipping malformed record");
                    continue;
                }
            };

            if let Some(existing) = entry.years.iter_mut().find(|y| y.range == range) {
                tracing::warn!(make, model, %range, "duplicate year range, keeping the later record");
                existing.record = record;
            } else {
                entry.years.push(YearEntry { range, record });
            }
        }
    }

    /// Makes in source order
    pub fn makes(&self) -> &[MakeEntry] {
        &self.makes
    }

    pub fn make_names(&self) -> impl Iterator<Item = &str> {
        self.makes.iter().map(|m| m.name.as_str())
    }

    /// Look up a make, exactly first and then case-insensitively
    pub fn make(&self, name: &str) -> Option<&MakeEntry> {
        find_named(&self.makes, name, |m| m.name.as_str())
    }

    /// The record for one (make, model, year range) triple
    pub fn record(&self, make: &str, model: &str, year_range: &str) -> Option<&DetailRecord> {
        self.make(make)?
            .model(model)?
            .year(year_range)
            .map(|y| &y.record)
    }

    /// Every record with its keys, in index order
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.makes.iter().flat_map(|make| {
            make.models.iter().flat_map(move |model| {
                model.years.iter().map(move |year| CatalogEntry {
                    make: &make.name,
                    model: &model.name,
                    year_range: &year.range,
                    record: &year.record,
                })
            })
        })
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.makes
            .iter()
            .flat_map(|m| &m.models)
            .map(|m| m.years.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split a flat catalog key into (make, model).
///
/// The make is the first word upper-cased, or the first two words for
/// [`MULTI_WORD_MAKES`]. Keys starting with a number or a single character
/// have no make. When nothing follows the make the whole key is the model.
pub fn derive_make(key: &str) -> Option<(String, String)> {
    let words: Vec<&str> = key.split_whitespace().collect();
    let first = words.first()?.to_uppercase();

    if first.chars().all(|c| c.is_ascii_digit()) || first.chars().count() < 2 {
        return None;
    }

    let (make, rest) = match words.get(1) {
        Some(second) => {
            let pair = format!("{} {}", first, second.to_uppercase());
            if MULTI_WORD_MAKES.contains(&pair.as_str()) {
                (pair, &words[2..])
            } else {
                (first, &words[1..])
            }
        }
        None => (first, &words[1..]),
    };

    let model = if rest.is_empty() {
        key.trim().to_string()
    } else {
        rest.join(" ")
    };

    Some((make, model))
}

impl Serialize for ModelEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.years.len()))?;
        for year in &self.years {
            map.serialize_entry(&year.range, &year.record)?;
        }
        map.end()
    }
}

impl Serialize for MakeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.models.len()))?;
        for model in &self.models {
            map.serialize_entry(&model.name, model)?;
        }
        map.end()
    }
}

/// Serializes in the nested layout, preserving order
impl Serialize for CatalogIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.makes.len()))?;
        for make in &self.makes {
            map.serialize_entry(&make.name, make)?;
        }
        map.end()
    }
}
