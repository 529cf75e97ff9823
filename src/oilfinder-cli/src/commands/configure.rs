//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up oilfinder CLI defaults.

use crate::config::Config;
use anyhow::Result;
use oilfinder::CatalogLayout;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `data` - Default catalog file
/// * `layout` - Default catalog layout
/// * `products` - Default product slug table
/// * `server` - Default server URL
/// * `show` - If true, show current configuration
pub fn handle(
    data: Option<PathBuf>,
    layout: Option<CatalogLayout>,
    products: Option<PathBuf>,
    server: Option<String>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if apply(&mut config, data, layout, products, server) {
        config.save()?;
        println!("Configuration updated");
        if let Ok(path) = Config::config_path() {
            println!("Config saved to: {}", path.display());
        }
    } else {
        show_usage();
    }

    Ok(())
}

/// Apply the given settings, returning true if anything changed
fn apply(
    config: &mut Config,
    data: Option<PathBuf>,
    layout: Option<CatalogLayout>,
    products: Option<PathBuf>,
    server: Option<String>,
) -> bool {
    let mut changed = false;

    if let Some(data) = data {
        config.data = Some(data);
        changed = true;
    }
    if let Some(layout) = layout {
        config.layout = Some(layout);
        changed = true;
    }
    if let Some(products) = products {
        config.products = Some(products);
        changed = true;
    }
    if let Some(server) = server {
        config.server = Some(server);
        changed = true;
    }

    changed
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Catalog: {}", config.data_path().display());
    println!("Layout: {}", config.layout());
    match &config.products {
        Some(path) => println!("Products: {}", path.display()),
        None => println!("Products: built-in table"),
    }
    println!("Server: {}", config.server_url());

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: oilfinder configure [--data PATH] [--layout nested|flat]");
    println!("                           [--products PATH] [--server URL]");
    println!("   or: oilfinder configure --show");
}
