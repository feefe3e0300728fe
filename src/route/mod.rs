//! Origin routes: classification, path grammar and discovery.
//!
//! | Module        | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `grammar`     | Route name / route pattern rewrites              |
//! | `kind`        | File role classification                         |
//! | `translation` | Per-directory segment translations               |
//! | `origin`      | Recursive discovery of the origin tree           |

pub mod grammar;
mod kind;
mod origin;
mod translation;

pub use kind::{RouteKind, TemplateClass, markdown_locale};
pub use origin::{OriginRoute, discover};
pub use translation::{SegmentTranslations, load_translations};

use indexmap::IndexMap;
use std::path::PathBuf;
use thiserror::Error;

/// `locale -> value`, in configured locale order.
pub type LocaleMap<T> = IndexMap<String, T>;

/// Errors raised while discovering origin routes.
#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("cannot find origin directory `{0}`")]
    OriginNotFound(PathBuf),

    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid segment translations in `{path}`: {message}")]
    Translation { path: PathBuf, message: String },
}
