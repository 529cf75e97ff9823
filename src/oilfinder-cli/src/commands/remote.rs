//! Remote API command handlers
//!
//! Runs suggestions and searches against a running oilfinder server.
//! Error bodies from the server are reported verbatim.

use std::fmt::Write as _;

use anyhow::{bail, Result};
use oilfinder::DetailRecord;

use super::lookup::NO_RESULTS;

/// Message carried by an error response, or the whole body if it has none
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or_else(|| body.to_string())
}

pub fn suggest_url(server: &str, query: &str) -> String {
    format!(
        "{}/api/suggest/{}",
        server.trim_end_matches('/'),
        urlencoding::encode(query)
    )
}

pub fn details_url(server: &str) -> String {
    format!("{}/api/details", server.trim_end_matches('/'))
}

fn check_status(
    response: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<ureq::Response> {
    match response {
        Ok(resp) => Ok(resp),
        Err(ureq::Error::Status(code, resp)) => {
            let body = resp.into_string().unwrap_or_default();
            bail!("Server returned {}: {}", code, error_message(&body));
        }
        Err(e) => {
            bail!("Request failed: {}", e);
        }
    }
}

pub fn suggest(server: &str, query: &str) -> Result<()> {
    let url = suggest_url(server, query);
    tracing::debug!(%url, "fetching suggestions");

    let result: serde_json::Value = check_status(ureq::get(&url).call())?.into_json()?;

    for label in result["makes"].as_array().into_iter().flatten() {
        println!("make   {}", label.as_str().unwrap_or_default());
    }
    for label in result["models"].as_array().into_iter().flatten() {
        println!("model  {}", label.as_str().unwrap_or_default());
    }

    Ok(())
}

pub fn search(server: &str, query: &str) -> Result<()> {
    let url = details_url(server);
    tracing::debug!(%url, query, "searching");

    let response = ureq::post(&url)
        .set("Content-Type", "application/json")
        .send_json(serde_json::json!({ "query": query }));
    let records: Vec<DetailRecord> = check_status(response)?.into_json()?;

    print!("{}", render_records(&records));
    Ok(())
}

/// Server records as text: title, then each fluid with its stored link
pub fn render_records(records: &[DetailRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let record = record.with_normalized_links();
        let _ = writeln!(out, "{}", record.title());
        for (kind, fluid) in record.fluids() {
            let _ = writeln!(out, "  {}: {}", kind.label(), fluid);
            if let Some(link) = record.purchase_link(kind) {
                let _ = writeln!(out, "    {}", link);
            }
        }
    }
    out
}
