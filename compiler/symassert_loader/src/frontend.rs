//! The compilation front-end seam.
//!
//! Parsing and type-checking are not done here. A `Frontend` is handed a
//! `LoadConfig` and an import specifier and returns the units it produced;
//! the `Loader` validates and caches the result.

use std::path::Path;

use symassert_ir::CompilationUnit;

use crate::config::{BuildTags, LoadConfig};

/// Failure reported by a front-end, carried verbatim.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct FrontendError {
    message: String,
}

impl FrontendError {
    #[cold]
    pub fn new(message: impl Into<String>) -> Self {
        FrontendError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// One unit returned by a front-end load, with the errors it reported.
#[derive(Debug)]
pub struct LoadedPackage {
    pub unit: CompilationUnit,
    /// Internal errors of the unit or its dependencies, in visit order.
    pub errors: Vec<String>,
}

impl LoadedPackage {
    pub fn new(unit: CompilationUnit) -> Self {
        LoadedPackage {
            unit,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.errors.push(error.into());
        self
    }
}

/// Result of inspecting a directory restricted to a set of file names.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DirectoryScan {
    /// Source files the front-end would compile from that directory.
    pub selected: Vec<String>,
    /// Build tags implied by the constraints of the allowed files.
    pub tags: BuildTags,
}

/// A compilation front-end.
pub trait Frontend: Send + Sync {
    /// Load the unit(s) matching `path` under `config`.
    fn load(&self, config: &LoadConfig, path: &str) -> Result<Vec<LoadedPackage>, FrontendError>;

    /// Derive the build tags of compiling exactly `allowed` from `dir`, and
    /// report which files of `dir` the front-end would select.
    fn derive_tags(&self, dir: &Path, allowed: &[String]) -> Result<DirectoryScan, FrontendError>;
}
