//! Command handlers for the oilfinder CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod lookup;
pub mod remote;
