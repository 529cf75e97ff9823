//! Core CLI definitions

use clap::{Args, Parser, Subcommand};
use oilfinder::CatalogLayout;
use std::path::PathBuf;

use super::remote::RemoteCommand;

#[derive(Parser)]
#[command(name = "oilfinder")]
#[command(about = "Vehicle lubricant lookups", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Catalog selection shared by the local lookup commands
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Catalog JSON file (uses configured default if not provided)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Catalog layout: nested or flat
    #[arg(short, long)]
    pub layout: Option<CatalogLayout>,

    /// Product slug table JSON, replacing the built-in table
    #[arg(long)]
    pub products: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List makes
    #[command(visible_alias = "mk")]
    Makes {
        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// List models of a make
    #[command(visible_alias = "mo")]
    Models {
        /// Make name (case-insensitive)
        make: String,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// List year ranges of a model
    #[command(visible_alias = "y")]
    Years {
        /// Make name (case-insensitive)
        make: String,

        /// Model name (case-insensitive)
        model: String,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Suggest makes and models for a partial query
    #[command(visible_alias = "su")]
    Suggest {
        /// Partial make or model
        query: String,

        /// Shortest query that produces suggestions
        #[arg(long, default_value_t = oilfinder::suggest::DEFAULT_MIN_QUERY_LEN)]
        min_len: usize,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Search records and show recommended fluids
    #[command(visible_alias = "s")]
    Search {
        /// Free-text query
        query: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Resolve the purchase link for a fluid label
    #[command(visible_alias = "p")]
    Product {
        /// Fluid label, e.g. "XL20W50"
        fluid: String,

        /// Product slug table JSON, replacing the built-in table
        #[arg(long)]
        products: Option<PathBuf>,
    },

    /// Query a running oilfinder server
    #[command(visible_alias = "r")]
    Remote {
        /// Server base URL (uses configured default if not provided)
        #[arg(long, global = true)]
        server: Option<String>,

        #[command(subcommand)]
        command: RemoteCommand,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default catalog file
        #[arg(long)]
        data: Option<PathBuf>,

        /// Set default catalog layout
        #[arg(long)]
        layout: Option<CatalogLayout>,

        /// Set default product slug table
        #[arg(long)]
        products: Option<PathBuf>,

        /// Set default server URL
        #[arg(long)]
        server: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
