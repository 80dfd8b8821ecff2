//! In-memory front-end.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use symassert_ir::{is_local_import, UnitBuilder};
use symassert_loader::{
    BuildTags, DirectoryScan, Frontend, FrontendError, LoadConfig, LoadMode, LoadedPackage,
};

/// Builds the unit of a package for the tags of a load.
pub type UnitFn = Arc<dyn Fn(&BuildTags) -> UnitBuilder + Send + Sync>;

struct MockPackage {
    canonical: String,
    local: Vec<String>,
    build: UnitFn,
    errors: Vec<String>,
}

struct MockFile {
    name: String,
    /// Tags that must all be set for the file to be compiled.
    constraints: BuildTags,
}

/// A `Frontend` serving scripted packages and directories.
///
/// Packages are addressed by canonical path or by a registered local path.
/// Loads without `TYPES` yield units without declarations and loads
/// without `MODULE` yield units without module information, like a real
/// front-end asked for less. Every load is recorded.
#[derive(Default)]
pub struct MockFrontend {
    packages: Vec<MockPackage>,
    dirs: FxHashMap<PathBuf, Vec<MockFile>>,
    loads: Mutex<Vec<(String, LoadConfig)>>,
}

impl MockFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `canonical`, building its unit with `build`.
    #[must_use]
    pub fn package(
        mut self,
        canonical: &str,
        build: impl Fn(&BuildTags) -> UnitBuilder + Send + Sync + 'static,
    ) -> Self {
        self.packages.push(MockPackage {
            canonical: canonical.to_owned(),
            local: Vec::new(),
            build: Arc::new(build),
            errors: Vec::new(),
        });
        self
    }

    /// Make the package at `canonical` also loadable as `local`.
    #[must_use]
    pub fn local_path(mut self, local: &str, canonical: &str) -> Self {
        if let Some(pkg) = self.packages.iter_mut().find(|p| p.canonical == canonical) {
            pkg.local.push(local.to_owned());
        }
        self
    }

    /// Make every load of `canonical` report `error`.
    #[must_use]
    pub fn broken(mut self, canonical: &str, error: &str) -> Self {
        if let Some(pkg) = self.packages.iter_mut().find(|p| p.canonical == canonical) {
            pkg.errors.push(error.to_owned());
        }
        self
    }

    /// Serve a directory listing. Each file comes with the tags its build
    /// constraint requires.
    #[must_use]
    pub fn directory(mut self, dir: impl Into<PathBuf>, files: &[(&str, &[&str])]) -> Self {
        let files = files
            .iter()
            .map(|(name, constraints)| MockFile {
                name: (*name).to_owned(),
                constraints: BuildTags::new(constraints.iter().copied()),
            })
            .collect();
        self.dirs.insert(dir.into(), files);
        self
    }

    /// Number of loads served so far.
    pub fn load_count(&self) -> usize {
        self.loads.lock().len()
    }

    /// Number of loads of `path` served so far.
    pub fn loads_of(&self, path: &str) -> usize {
        self.loads.lock().iter().filter(|(p, _)| p == path).count()
    }

    /// Every load served so far, in order.
    pub fn loads(&self) -> Vec<(String, LoadConfig)> {
        self.loads.lock().clone()
    }

    fn find(&self, path: &str) -> Option<&MockPackage> {
        self.packages
            .iter()
            .find(|p| p.canonical == path || p.local.iter().any(|l| l == path))
    }
}

impl Frontend for MockFrontend {
    fn load(&self, config: &LoadConfig, path: &str) -> Result<Vec<LoadedPackage>, FrontendError> {
        self.loads.lock().push((path.to_owned(), config.clone()));

        let pkg = self
            .find(path)
            .ok_or_else(|| FrontendError::new(format!("cannot find package {path:?}")))?;

        let mut builder = (pkg.build)(&config.tags);
        if is_local_import(path) {
            builder = builder.alias(path);
        }
        if !config.mode.contains(LoadMode::TYPES) {
            builder = builder.without_declarations();
        }
        if !config.mode.contains(LoadMode::MODULE) {
            builder = builder.without_module();
        }

        let loaded = pkg
            .errors
            .iter()
            .fold(LoadedPackage::new(builder.build()), |loaded, e| loaded.with_error(e.as_str()));
        Ok(vec![loaded])
    }

    fn derive_tags(&self, dir: &Path, allowed: &[String]) -> Result<DirectoryScan, FrontendError> {
        let files = self
            .dirs
            .get(dir)
            .ok_or_else(|| FrontendError::new(format!("cannot read directory {}", dir.display())))?;

        let mut tags = BuildTags::default();
        for name in allowed {
            let file = files
                .iter()
                .find(|f| &f.name == name)
                .ok_or_else(|| FrontendError::new(format!("no such file: {name}")))?;
            tags = tags.union(&file.constraints);
        }

        let selected = files
            .iter()
            .filter(|f| f.constraints.iter().all(|t| tags.contains(t)))
            .map(|f| f.name.clone())
            .collect();
        Ok(DirectoryScan { selected, tags })
    }
}

impl std::fmt::Debug for MockFrontend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockFrontend")
            .field("packages", &self.packages.iter().map(|p| &p.canonical).collect::<Vec<_>>())
            .field("loads", &self.load_count())
            .finish_non_exhaustive()
    }
}
