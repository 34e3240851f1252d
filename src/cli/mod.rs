//! CLI module
//!
//! Command-line interface over the source clients.
//!
//! # Commands
//!
//! - `wallhaven` - Search wallpapers
//! - `unsplash` - Search photos
//! - `reddit` - Walk a subreddit listing
//!
//! Each command prints one JSON object per item and, with `--download`,
//! saves the media next to it.

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;

#[cfg(test)]
mod tests;
