//! Validated, cache-aware loading of a single unit.

use std::sync::Arc;

use symassert_ir::CompilationUnit;

use crate::cache::LoadCache;
use crate::config::{LoadConfig, LoadMode};
use crate::frontend::{Frontend, FrontendError};

/// Failure to load exactly one usable unit.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// File patterns and recursive wildcards are not package paths.
    #[error("invalid package path {path:?}")]
    InvalidPath { path: String },

    #[error("failed to load {path:?}: {source}")]
    Frontend {
        path: String,
        #[source]
        source: FrontendError,
    },

    #[error("no package found for {path:?}")]
    NoPackages { path: String },

    #[error("{path:?} matched {count} packages, expected one")]
    MultiplePackages { path: String, count: usize },

    /// The unit, or one of its dependencies, failed to compile.
    #[error("package {unit} has errors: {message}")]
    Package { unit: String, message: String },
}

impl LoadError {
    /// The path that failed to load.
    pub fn path(&self) -> &str {
        match self {
            LoadError::InvalidPath { path }
            | LoadError::Frontend { path, .. }
            | LoadError::NoPackages { path }
            | LoadError::MultiplePackages { path, .. } => path,
            LoadError::Package { unit, .. } => unit,
        }
    }
}

/// Loads units through a `Frontend`, optionally memoized by a `LoadCache`.
#[derive(Clone)]
pub struct Loader {
    frontend: Arc<dyn Frontend>,
    cache: Option<Arc<LoadCache>>,
}

impl Loader {
    pub fn new(frontend: Arc<dyn Frontend>) -> Self {
        Loader {
            frontend,
            cache: None,
        }
    }

    /// Memoize loads in `cache`, which may be shared with other loaders.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<LoadCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn frontend(&self) -> &Arc<dyn Frontend> {
        &self.frontend
    }

    pub fn cache(&self) -> Option<&Arc<LoadCache>> {
        self.cache.as_ref()
    }

    /// Load exactly one unit for `path`.
    ///
    /// With a cache attached, a miss is loaded with the name and module
    /// categories added, so the stored entry also answers the identity
    /// queries providers make.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(path = %path, mode = ?config.mode, tags = %config.tags)
    )]
    pub fn load(&self, config: &LoadConfig, path: &str) -> Result<Arc<CompilationUnit>, LoadError> {
        if path.is_empty() || path.starts_with("file=") || path.ends_with("...") {
            return Err(LoadError::InvalidPath {
                path: path.to_owned(),
            });
        }

        let config = match &self.cache {
            Some(cache) => {
                if let Some(unit) = cache.get(config.mode, &config.tags, path) {
                    tracing::debug!("load cache hit");
                    return Ok(unit);
                }
                config.widened(LoadMode::NAME | LoadMode::MODULE)
            }
            None => config.clone(),
        };

        let mut packages = self
            .frontend
            .load(&config, path)
            .map_err(|source| LoadError::Frontend {
                path: path.to_owned(),
                source,
            })?;

        if let Some(pkg) = packages.iter().find(|p| !p.errors.is_empty()) {
            let message = pkg.errors.first().cloned().unwrap_or_default();
            return Err(LoadError::Package {
                unit: pkg.unit.canonical_path().to_owned(),
                message,
            });
        }

        let count = packages.len();
        let unit = match (packages.pop(), count) {
            (Some(pkg), 1) => Arc::new(pkg.unit),
            (None, _) => {
                return Err(LoadError::NoPackages {
                    path: path.to_owned(),
                })
            }
            (Some(_), count) => {
                return Err(LoadError::MultiplePackages {
                    path: path.to_owned(),
                    count,
                })
            }
        };
        tracing::debug!(id = unit.id(), decls = unit.len(), "loaded unit");

        Ok(match &self.cache {
            Some(cache) => cache.put(config.mode, &config.tags, path, unit),
            None => unit,
        })
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}
