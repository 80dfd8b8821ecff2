//! Loading compilation units for symassert.
//!
//! - `Frontend`: the seam to whatever parses and type-checks packages
//! - `Loader`: validates a load (exactly one unit, no errors) and consults
//!   the cache
//! - `LoadCache`: memoizes units by path, capability mask and build tags,
//!   answering lighter requests from heavier loads

mod cache;
mod config;
mod frontend;
mod loader;

pub use cache::LoadCache;
pub use config::{BuildTags, LoadConfig, LoadMode, Platform};
pub use frontend::{DirectoryScan, Frontend, FrontendError, LoadedPackage};
pub use loader::{LoadError, Loader};
