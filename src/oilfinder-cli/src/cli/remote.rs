//! Remote API subcommands

use clap::Subcommand;

#[derive(Subcommand)]
pub enum RemoteCommand {
    /// Suggest makes and models from the server
    Suggest {
        /// Partial make or model
        query: String,
    },

    /// Search records on the server
    Search {
        /// Free-text query
        query: String,
    },
}
