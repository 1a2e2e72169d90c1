//! Command handlers for d4builds CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod sync;
pub mod transform;
