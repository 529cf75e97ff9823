mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;

use cli::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Configure {
            data,
            layout,
            products,
            server,
            show,
        } => {
            commands::configure::handle(data, layout, products, server, show)?;
        }

        Commands::Makes { catalog } => {
            let ctx = commands::lookup::open(&catalog, &Config::load()?)?;
            commands::lookup::makes(&ctx);
        }

        Commands::Models { make, catalog } => {
            let ctx = commands::lookup::open(&catalog, &Config::load()?)?;
            commands::lookup::models(&ctx, &make);
        }

        Commands::Years {
            make,
            model,
            catalog,
        } => {
            let ctx = commands::lookup::open(&catalog, &Config::load()?)?;
            commands::lookup::years(&ctx, &make, &model);
        }

        Commands::Suggest {
            query,
            min_len,
            catalog,
        } => {
            let ctx = commands::lookup::open(&catalog, &Config::load()?)?;
            commands::lookup::suggest(ctx, &query, min_len);
        }

        Commands::Search {
            query,
            json,
            catalog,
        } => {
            let ctx = commands::lookup::open(&catalog, &Config::load()?)?;
            commands::lookup::search(&ctx, &query, json)?;
        }

        Commands::Product { fluid, products } => {
            let config = Config::load()?;
            let products = products.or(config.products);
            commands::lookup::product(&fluid, products.as_deref())?;
        }

        Commands::Remote { server, command } => {
            let config = Config::load()?;
            let server = server.unwrap_or_else(|| config.server_url().to_string());

            match command {
                RemoteCommand::Suggest { query } => commands::remote::suggest(&server, &query)?,
                RemoteCommand::Search { query } => commands::remote::search(&server, &query)?,
            }
        }
    }

    Ok(())
}
