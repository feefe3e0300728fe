//! globegen - localized file-system routes for app-directory frameworks.
//!
//! The generator reads an origin route tree, assigns every route a
//! language-independent name and a localized path per locale, and writes
//! a parallel localized tree plus a route schema. The runtime half
//! ([`router`]) matches and builds localized paths from that schema.

pub mod config;
pub mod generate;
pub mod logger;
pub mod materialize;
pub mod route;
pub mod router;
pub mod schema;
pub mod utils;
pub mod watch;

#[cfg(test)]
mod testing;
