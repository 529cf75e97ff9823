//! Product links for fluid labels
//!
//! A fluid label such as `"XL20W50"` is turned into a fixed, ordered list of
//! slug candidates. The first candidate present in the [`SlugTable`] wins;
//! otherwise the label is sent to the storefront search.

pub mod builtin;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Marker for "ask a specialist" recommendations that never get a product link
pub const CONSULT_SENTINEL: &str = "consult";

#[derive(Error, Debug)]
pub enum SlugTableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Lowercase slug variant -> absolute product URL, plus the search fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugTable {
    entries: HashMap<String, String>,
    search_url: String,
}

impl Default for SlugTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SlugTable {
    /// The retailer's curated product table
    pub fn builtin() -> Self {
        Self::from_pairs(builtin::PRODUCT_URLS.entries().map(|(k, v)| (*k, *v)))
    }

    /// A table with no products; every lookup falls back to search
    pub fn empty() -> Self {
        Self::from_pairs(std::iter::empty::<(&str, &str)>())
    }

    /// Build a table from (slug, url) pairs. Slugs are lower-cased.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        SlugTable {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
            search_url: builtin::SEARCH_URL.to_string(),
        }
    }

    /// Parse a JSON object of `"slug": "url"` pairs
    pub fn from_json_str(json: &str) -> Result<Self, SlugTableError> {
        let pairs: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::from_pairs(pairs))
    }

    /// Load a JSON slug table from disk
    pub fn load(path: &Path) -> Result<Self, SlugTableError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Replace the search endpoint used for unmatched labels
    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    pub fn get(&self, slug: &str) -> Option<&str> {
        self.entries.get(slug).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Storefront search link for a label, query-encoded as `q`
    pub fn search_link(&self, label: &str) -> String {
        format!("{}?q={}", self.search_url, urlencoding::encode(label))
    }
}

/// True if the label contains the consult sentinel in any case
pub fn is_consult(fluid: &str) -> bool {
    fluid.to_lowercase().contains(CONSULT_SENTINEL)
}

/// Insert a space at every ASCII letter/digit boundary.
///
/// `"XL30"` → `"XL 30"`, `"XL20W50"` → `"XL 20 W 50"`. Letter→letter and
/// digit→digit pairs are left alone.
pub fn spaced_form(fluid: &str) -> String {
    let mut out = String::with_capacity(fluid.len() + 4);
    let mut prev: Option<char> = None;

    for c in fluid.chars() {
        if let Some(p) = prev {
            let boundary = (p.is_ascii_alphabetic() && c.is_ascii_digit())
                || (p.is_ascii_digit() && c.is_ascii_alphabetic());
            if boundary {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }

    out
}

/// Replace each run of whitespace with `sep`
fn join_whitespace(s: &str, sep: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push_str(sep);
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}

/// Slug candidates for a label, in lookup priority order
pub fn slug_candidates(fluid: &str) -> [String; 7] {
    let raw = fluid.to_lowercase();
    let spaced = spaced_form(fluid).to_lowercase();
    let raw_dashed = join_whitespace(&raw, "-");
    let spaced_dashed = join_whitespace(&spaced, "-");

    [
        join_whitespace(&raw, ""),
        raw_dashed.clone(),
        join_whitespace(&raw.replace('/', "-"), "-"),
        format!("classic-{raw_dashed}"),
        join_whitespace(&spaced, ""),
        spaced_dashed.clone(),
        format!("classic-{spaced_dashed}"),
    ]
}

/// Resolve the purchase link for a fluid label.
///
/// Returns `None` for empty labels and consult recommendations. Any other
/// label resolves to a product page or, failing that, a search link.
pub fn resolve_product_url(fluid: &str, table: &SlugTable) -> Option<String> {
    if fluid.is_empty() || is_consult(fluid) {
        return None;
    }

    for candidate in slug_candidates(fluid) {
        if let Some(url) = table.get(&candidate) {
            tracing::debug!(fluid, slug = %candidate, url, "direct product link");
            return Some(url.to_string());
        }
    }

    tracing::debug!(fluid, "no product slug, using search link");
    Some(table.search_link(&spaced_form(fluid)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced_form() {
        assert_eq!(spaced_form("XL30"), "XL 30");
        assert_eq!(spaced_form("XL20W50"), "XL 20 W 50");
        assert_eq!(spaced_form("EP90"), "EP 90");
        assert_eq!(spaced_form("TQF"), "TQF");
        assert_eq!(spaced_form("140"), "140");
        assert_eq!(spaced_form("GTX 10W-40"), "GTX 10 W-40");
        assert_eq!(spaced_form(""), "");
    }

    #[test]
    fn test_slug_candidates_order() {
        let candidates = slug_candidates("XL 20W/50");
        assert_eq!(
            candidates,
            [
                "xl20w/50".to_string(),
                "xl-20w/50".to_string(),
                "xl-20w-50".to_string(),
                "classic-xl-20w/50".to_string(),
                "xl20w/50".to_string(),
                "xl-20-w/50".to_string(),
                "classic-xl-20-w/50".to_string(),
            ]
        );
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let candidates = slug_candidates("Classic  XL30");
        assert_eq!(candidates[0], "classicxl30");
        assert_eq!(candidates[1], "classic-xl30");
    }

    #[test]
    fn test_consult_never_links() {
        let table = SlugTable::builtin();
        assert_eq!(resolve_product_url("Consult specialist", &table), None);
        assert_eq!(resolve_product_url("please consult", &table), None);
        assert_eq!(resolve_product_url("CONSULT", &table), None);
        assert_eq!(resolve_product_url("", &table), None);
    }

    #[test]
    fn test_classic_prefix_candidate() {
        let table = SlugTable::from_pairs([("classic-xl30", "https://x/y")]);
        assert_eq!(
            resolve_product_url("XL30", &table).as_deref(),
            Some("https://x/y")
        );
    }

    #[test]
    fn test_first_candidate_wins() {
        let table = SlugTable::from_pairs([
            ("xl30", "https://first"),
            ("classic-xl30", "https://fourth"),
        ]);
        assert_eq!(
            resolve_product_url("XL30", &table).as_deref(),
            Some("https://first")
        );
    }

    #[test]
    fn test_spaced_candidate() {
        let table = SlugTable::from_pairs([("xl-20-w-50", "https://spaced")]);
        assert_eq!(
            resolve_product_url("XL20W50", &table).as_deref(),
            Some("https://spaced")
        );
    }

    #[test]
    fn test_search_fallback() {
        let url = resolve_product_url("XL20W50", &SlugTable::empty()).unwrap();
        assert_eq!(
            url,
            "https://www.castrolclassic.co.za/search?q=XL%2020%20W%2050"
        );
    }

    #[test]
    fn test_custom_search_url() {
        let table = SlugTable::empty().with_search_url("https://shop.test/find");
        assert_eq!(
            resolve_product_url("EP90", &table).as_deref(),
            Some("https://shop.test/find?q=EP%2090")
        );
    }

    #[test]
    fn test_builtin_table() {
        let table = SlugTable::builtin();
        assert_eq!(table.len(), builtin::PRODUCT_URLS.len());
        assert_eq!(
            resolve_product_url("XL 20W50", &table).as_deref(),
            Some("https://www.castrolclassic.co.za/products/castrol-classic-xl-20w50-1l")
        );
        assert_eq!(
            resolve_product_url("GTX 10W 40", &table).as_deref(),
            Some("https://www.castrolclassic.co.za/products/castrol-gtx-classic-10w-40-5l")
        );
    }

    #[test]
    fn test_from_json_lowercases_keys() {
        let table = SlugTable::from_json_str(r#"{"Classic-EP90": "https://ep90"}"#).unwrap();
        assert_eq!(table.get("classic-ep90"), Some("https://ep90"));
        assert!(SlugTable::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, r#"{"tqf": "https://tqf"}"#).unwrap();

        let table = SlugTable::load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert!(matches!(
            SlugTable::load(&dir.path().join("missing.json")),
            Err(SlugTableError::Io(_))
        ));
    }
}
