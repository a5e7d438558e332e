//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod export;
mod source;
mod stats;

pub use completions::handle_completions;
pub use config::handle_config;
pub use export::handle_export;
pub use stats::{handle_items, handle_lengths, handle_summary, handle_timestamps};
