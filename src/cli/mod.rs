//! Command-line interface module.

mod args;
pub mod generate;
pub mod inspect;

pub use args::{Cli, Commands, RouteArgs};
