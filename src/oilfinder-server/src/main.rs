//! oilfinder API server
//!
//! Serves lubricant recommendations over HTTP from a catalog loaded once at
//! startup.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use oilfinder::{CatalogLayout, LookupContext, SlugTable};
use oilfinder_server::{router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI
// =============================================================================

#[derive(Parser)]
#[command(name = "oilfinder-server")]
#[command(about = "HTTP API for vehicle lubricant recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "5000")]
        port: u16,

        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,

        /// Catalog JSON file
        #[arg(short, long, env = "OILFINDER_DATA", default_value = "data/data.json")]
        data: PathBuf,

        /// Catalog layout (nested or flat)
        #[arg(short, long, env = "OILFINDER_LAYOUT", default_value = "nested")]
        layout: CatalogLayout,

        /// Product slug table JSON, replacing the built-in table
        #[arg(long, env = "OILFINDER_PRODUCTS")]
        products: Option<PathBuf>,

        /// Storefront search URL for labels without a product page
        #[arg(long, env = "OILFINDER_SEARCH_URL")]
        search_url: Option<String>,

        /// Directory of static files served for unmatched paths
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            bind,
            data,
            layout,
            products,
            search_url,
            static_dir,
        } => {
            // Initialize tracing
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "oilfinder_server=info,oilfinder=info,tower_http=debug".into()),
                )
                .with(tracing_subscriber::fmt::layer())
                .init();

            let slugs = match &products {
                Some(path) => SlugTable::load(path)
                    .with_context(|| format!("Failed to load product table {}", path.display()))?,
                None => SlugTable::builtin(),
            };
            let slugs = match search_url {
                Some(url) => slugs.with_search_url(url),
                None => slugs,
            };
            tracing::info!("Product table: {} slugs", slugs.len());

            let ctx = LookupContext::load_or_fallback(&data, layout, slugs);
            if ctx.is_fallback() {
                tracing::warn!("Serving fallback makes only");
            } else {
                tracing::info!("Catalog: {} records from {}", ctx.index().len(), data.display());
            }

            let state = Arc::new(AppState { ctx });
            let app = router(state, static_dir.as_deref());

            let bind_addr = format!("{}:{}", bind, port);
            tracing::info!("Starting server on {}", bind_addr);
            tracing::info!("OpenAPI spec available at /openapi.json");
            tracing::info!("Interactive docs at /scalar");

            let listener = tokio::net::TcpListener::bind(&bind_addr)
                .await
                .with_context(|| format!("Failed to bind {}", bind_addr))?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
