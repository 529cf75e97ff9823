//! CLI argument definitions for oilfinder
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod remote;

pub use core::{CatalogArgs, Cli, Commands};
pub use remote::RemoteCommand;
