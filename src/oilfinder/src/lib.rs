//! # oilfinder
//!
//! Vehicle lubricant lookup engine - catalog index, suggestions, search and
//! product links.
//!
//! This library provides functionality to:
//! - Load a make → model → year range catalog of fluid recommendations
//! - Suggest makes and models for partial queries
//! - Search records by free text
//! - Resolve purchase links for fluid labels
//! - Sequence asynchronous lookups so only the newest result is shown
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use oilfinder::{CatalogLayout, LookupContext, SlugTable};
//!
//! let ctx = LookupContext::load_or_fallback(
//!     Path::new("data/data.json"),
//!     CatalogLayout::Nested,
//!     SlugTable::builtin(),
//! );
//!
//! for label in ctx.suggest("bmw").make_labels() {
//!     println!("{label}");
//! }
//!
//! for hit in ctx.search("bmw 3") {
//!     println!("{}", hit.record.title());
//!     for rec in hit.record.recommendations(ctx.slugs()) {
//!         println!("  {}: {} {:?}", rec.label, rec.fluid, rec.product_url);
//!     }
//! }
//! ```

pub mod catalog;
pub mod context;
pub mod format;
pub mod products;
pub mod record;
pub mod request;
pub mod search;
pub mod suggest;

#[cfg(feature = "wasm")]
pub mod wasm;

#[doc(inline)]
pub use catalog::{
    derive_make, CatalogEntry, CatalogError, CatalogIndex, CatalogLayout, MakeEntry, ModelEntry,
    YearEntry, FALLBACK_MAKES,
};
#[doc(inline)]
pub use context::LookupContext;
#[doc(inline)]
pub use format::{make_label, model_label, title_case};
#[doc(inline)]
pub use products::{resolve_product_url, slug_candidates, spaced_form, SlugTable, SlugTableError};
#[doc(inline)]
pub use record::{DetailRecord, FluidKind, Recommendation, FLUID_KINDS};
#[doc(inline)]
pub use request::{Debouncer, RequestSequencer, RequestState, RequestTicket, DEFAULT_DEBOUNCE_MS};
#[doc(inline)]
pub use search::{search, search_entries};
#[doc(inline)]
pub use suggest::{suggest, suggest_with, SuggestOptions, Suggestion, SuggestionKind, Suggestions};
