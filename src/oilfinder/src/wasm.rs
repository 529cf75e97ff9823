//! WebAssembly bindings for oilfinder
//!
//! JavaScript-friendly wrappers around the catalog, suggestion, search and
//! product-link functions. Structured results are returned as JSON strings.

use crate::catalog::{CatalogIndex, CatalogLayout};
use crate::context::LookupContext;
use crate::products::{resolve_product_url as rust_resolve, SlugTable};
use crate::request::{
    Debouncer as RustDebouncer, RequestSequencer as RustSequencer, RequestState, RequestTicket,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialize failed: {}", e)))
}

fn to_array<I, S>(items: I) -> js_sys::Array
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let arr = js_sys::Array::new();
    for item in items {
        arr.push(&JsValue::from_str(item.as_ref()));
    }
    arr
}

/// Resolve the purchase link for a fluid label with the built-in product table
///
/// # Returns
/// The product or search URL, or `undefined` for consult recommendations
#[wasm_bindgen(js_name = resolveProductUrl)]
pub fn resolve_product_url(fluid: &str) -> Option<String> {
    rust_resolve(fluid, &SlugTable::builtin())
}

/// JavaScript-friendly catalog wrapper
#[wasm_bindgen]
pub struct Catalog {
    inner: LookupContext,
}

#[derive(Serialize)]
struct SearchHit<'a> {
    make: &'a str,
    model: &'a str,
    year_range: &'a str,
    record: crate::record::DetailRecord,
    recommendations: Vec<crate::record::Recommendation>,
}

#[wasm_bindgen]
impl Catalog {
    /// Parse a catalog from JSON text
    ///
    /// # Arguments
    /// * `json` - Catalog JSON
    /// * `layout` - `"nested"` (default) or `"flat"`
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str, layout: Option<String>) -> Result<Catalog, JsValue> {
        let layout = match layout {
            Some(layout) => layout
                .parse::<CatalogLayout>()
                .map_err(|e| JsValue::from_str(&format!("Parse failed: {}", e)))?,
            None => CatalogLayout::default(),
        };
        let index = CatalogIndex::from_json_str(json, layout)
            .map_err(|e| JsValue::from_str(&format!("Parse failed: {}", e)))?;
        Ok(Catalog {
            inner: LookupContext::new(Some(index), SlugTable::builtin()),
        })
    }

    /// A catalog that failed to load: fallback makes and nothing else
    #[wasm_bindgen(js_name = fallback)]
    pub fn fallback() -> Catalog {
        Catalog {
            inner: LookupContext::new(None, SlugTable::builtin()),
        }
    }

    #[wasm_bindgen(js_name = makes)]
    pub fn makes(&self) -> js_sys::Array {
        to_array(self.inner.makes())
    }

    #[wasm_bindgen(js_name = models)]
    pub fn models(&self, make: &str) -> js_sys::Array {
        to_array(self.inner.models(make))
    }

    #[wasm_bindgen(js_name = years)]
    pub fn years(&self, make: &str, model: &str) -> js_sys::Array {
        to_array(self.inner.years(make, model))
    }

    /// Suggestions for a partial query as JSON `{ makes, models }`
    #[wasm_bindgen(js_name = suggest)]
    pub fn suggest(&self, query: &str) -> Result<String, JsValue> {
        to_json(&self.inner.suggest(query))
    }

    /// Search hits with resolved product links and normalized stored links,
    /// as a JSON array
    #[wasm_bindgen(js_name = search)]
    pub fn search(&self, query: &str) -> Result<String, JsValue> {
        let hits: Vec<SearchHit> = self
            .inner
            .search(query)
            .into_iter()
            .map(|entry| SearchHit {
                make: entry.make,
                model: entry.model,
                year_range: entry.year_range,
                record: entry.record.with_normalized_links(),
                recommendations: entry.record.recommendations(self.inner.slugs()),
            })
            .collect();
        to_json(&hits)
    }

    #[wasm_bindgen(getter = recordCount)]
    pub fn record_count(&self) -> usize {
        self.inner.index().len()
    }

    #[wasm_bindgen(js_name = isFallback)]
    pub fn is_fallback(&self) -> bool {
        self.inner.is_fallback()
    }
}

/// JavaScript-friendly latest-wins request tracker
#[wasm_bindgen]
pub struct RequestSequencer {
    inner: RustSequencer,
}

#[wasm_bindgen]
impl RequestSequencer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RequestSequencer {
        RequestSequencer {
            inner: RustSequencer::new(),
        }
    }

    /// Start a request and return its ticket number
    #[wasm_bindgen(js_name = issue)]
    pub fn issue(&mut self) -> f64 {
        self.inner.issue().seq() as f64
    }

    /// Record a response; true if it is the newest and should be shown
    #[wasm_bindgen(js_name = complete)]
    pub fn complete(&mut self, ticket: f64) -> bool {
        let Some(ticket) = self.ticket(ticket) else {
            return false;
        };
        matches!(self.inner.complete(ticket), RequestState::Resolved(_))
    }

    #[wasm_bindgen(js_name = isCurrent)]
    pub fn is_current(&self, ticket: f64) -> bool {
        self.ticket(ticket)
            .is_some_and(|t| !matches!(self.inner.state(t), RequestState::Superseded))
    }

    #[wasm_bindgen(js_name = cancel)]
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }

    fn ticket(&self, seq: f64) -> Option<RequestTicket> {
        self.inner.latest().filter(|t| t.seq() as f64 == seq)
    }
}

impl Default for RequestSequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// JavaScript-friendly input debouncer
#[wasm_bindgen]
pub struct Debouncer {
    inner: RustDebouncer,
}

#[wasm_bindgen]
impl Debouncer {
    /// Create a debouncer; the delay defaults to 300 ms
    #[wasm_bindgen(constructor)]
    pub fn new(delay_ms: Option<f64>) -> Debouncer {
        let inner = match delay_ms {
            Some(ms) => RustDebouncer::new(ms.max(0.0) as u64),
            None => RustDebouncer::default(),
        };
        Debouncer { inner }
    }

    /// Register input at `now_ms` (e.g. `performance.now()`)
    #[wasm_bindgen(js_name = input)]
    pub fn input(&mut self, query: &str, now_ms: f64) {
        self.inner.input(query, now_ms.max(0.0) as u64);
    }

    /// The pending query once it is due
    #[wasm_bindgen(js_name = poll)]
    pub fn poll(&mut self, now_ms: f64) -> Option<String> {
        self.inner.poll(now_ms.max(0.0) as u64)
    }

    #[wasm_bindgen(js_name = dueAt)]
    pub fn due_at(&self) -> Option<f64> {
        self.inner.due_at().map(|ms| ms as f64)
    }

    #[wasm_bindgen(js_name = clear)]
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
