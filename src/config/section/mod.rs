//! Configuration section definitions.
//!
//! | Module   | TOML Section   | Purpose                                   |
//! |----------|----------------|-------------------------------------------|
//! | `routes` | `[routes]`     | Origin/localized directories, metadata    |
//! | `domain` | `[[domains]]`  | Domain-based locale routing               |

mod domain;
mod routes;

pub use domain::DomainConfig;
pub use routes::RoutesConfig;
