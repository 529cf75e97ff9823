//! Local lookup command handlers
//!
//! Handles `makes`, `models`, `years`, `suggest`, `search` and `product`
//! against the configured catalog file.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use oilfinder::{CatalogEntry, LookupContext, SlugTable, SuggestOptions, Suggestions};
use serde::Serialize;

use crate::cli::CatalogArgs;
use crate::config::Config;

/// Shown when a search matches nothing
pub const NO_RESULTS: &str = "No results found. Please try a more specific search.";

/// Load a product table, or the built-in one when no path is given
pub fn load_slugs(path: Option<&Path>) -> Result<SlugTable> {
    match path {
        Some(path) => SlugTable::load(path)
            .with_context(|| format!("Failed to load product table {}", path.display())),
        None => Ok(SlugTable::builtin()),
    }
}

/// Build the lookup context from flags, then config, then defaults
pub fn open(args: &CatalogArgs, config: &Config) -> Result<LookupContext> {
    let products = args.products.as_deref().or(config.products.as_deref());
    let slugs = load_slugs(products)?;

    let data = args.data.clone().unwrap_or_else(|| config.data_path());
    let layout = args.layout.unwrap_or_else(|| config.layout());

    let ctx = LookupContext::load_or_fallback(&data, layout, slugs);
    if ctx.is_fallback() {
        eprintln!(
            "Warning: could not load {}; only the fallback make list is available",
            data.display()
        );
    }
    Ok(ctx)
}

pub fn makes(ctx: &LookupContext) {
    print_lines(&ctx.makes());
}

pub fn models(ctx: &LookupContext, make: &str) {
    print_lines(&ctx.models(make));
}

pub fn years(ctx: &LookupContext, make: &str, model: &str) {
    print_lines(&ctx.years(make, model));
}

pub fn suggest(ctx: LookupContext, query: &str, min_len: usize) {
    let ctx = ctx.with_suggest_options(SuggestOptions {
        min_query_len: min_len,
    });
    print!("{}", render_suggestions(&ctx.suggest(query)));
}

pub fn search(ctx: &LookupContext, query: &str, json: bool) -> Result<()> {
    let hits = ctx.search(query);

    if json {
        let out: Vec<SearchHit> = hits
            .iter()
            .map(|hit| SearchHit::new(hit, ctx.slugs()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render_search(&hits, ctx.slugs()));
    }

    Ok(())
}

pub fn product(fluid: &str, products: Option<&Path>) -> Result<()> {
    let slugs = load_slugs(products)?;
    match oilfinder::resolve_product_url(fluid, &slugs) {
        Some(url) => println!("{}", url),
        None => println!("No product link for '{}'", fluid),
    }
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[derive(Serialize)]
struct SearchHit<'a> {
    make: &'a str,
    model: &'a str,
    year_range: &'a str,
    title: &'a str,
    recommendations: Vec<oilfinder::Recommendation>,
}

impl<'a> SearchHit<'a> {
    fn new(hit: &CatalogEntry<'a>, slugs: &SlugTable) -> Self {
        SearchHit {
            make: hit.make,
            model: hit.model,
            year_range: hit.year_range,
            title: hit.record.title(),
            recommendations: hit.record.recommendations(slugs),
        }
    }
}

/// Suggestion labels, makes first, one per line
pub fn render_suggestions(suggestions: &Suggestions) -> String {
    let mut out = String::new();
    for label in suggestions.make_labels() {
        let _ = writeln!(out, "make   {}", label);
    }
    for label in suggestions.model_labels() {
        let _ = writeln!(out, "model  {}", label);
    }
    out
}

/// Search hits as text: title, then each fluid with its link
pub fn render_search(hits: &[CatalogEntry<'_>], slugs: &SlugTable) -> String {
    if hits.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    let mut out = String::new();
    for (i, hit) in hits.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", hit.record.title());
        for rec in hit.record.recommendations(slugs) {
            let _ = writeln!(out, "  {}: {}", rec.label, rec.fluid);
            if let Some(url) = rec.product_url {
                let _ = writeln!(out, "    {}", url);
            }
        }
    }
    out
}
