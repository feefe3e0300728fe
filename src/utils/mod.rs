//! Utility modules shared by generation and the CLI.

pub mod fs;
pub mod hash;
mod plural;

pub use plural::{plural_count, plural_s};
