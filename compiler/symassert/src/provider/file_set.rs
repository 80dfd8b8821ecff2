//! Provider bound to one package compiled from an explicit file list.
//!
//! The build tags are not configured by the caller: they are whatever tags
//! select exactly the listed files. The list must therefore be a complete
//! build variant of its directory; a file the front-end would also compile
//! under those tags is an error.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashSet;
use symassert_ir::{is_local_import, split_qualified, CompilationUnit, DeclRef, ModuleInfo};
use symassert_loader::{BuildTags, LoadConfig, LoadError, LoadMode, Loader};

use super::Provider;
use crate::error::{FileSetMismatch, ProviderError};

/// Resolves symbols of one package restricted to a set of source files.
#[derive(Debug)]
pub struct FileSetProvider {
    loader: Loader,
    import_path: String,
    files: Vec<String>,
    display_name: String,
    canonical_path: String,
    module: Option<ModuleInfo>,
    /// Every qualifier that names the bound package.
    qualifiers: FxHashSet<String>,
    scope: Option<Arc<CompilationUnit>>,
}

impl FileSetProvider {
    /// Bind to the package at `import_path` and load it from `files`.
    #[tracing::instrument(level = "debug", skip(loader, files), fields(files = files.len()))]
    pub fn new(loader: Loader, import_path: &str, files: &[String]) -> Result<Self, ProviderError> {
        if import_path.is_empty() {
            return Err(ProviderError::InvalidPath {
                path: import_path.to_owned(),
            });
        }

        let identity = loader.load(
            &LoadConfig::new(LoadMode::NAME | LoadMode::MODULE),
            import_path,
        )?;
        let qualifiers = [import_path, identity.display_name(), identity.canonical_path()]
            .into_iter()
            .map(str::to_owned)
            .collect();

        let mut provider = FileSetProvider {
            loader,
            import_path: import_path.to_owned(),
            files: files.to_vec(),
            display_name: identity.display_name().to_owned(),
            canonical_path: identity.canonical_path().to_owned(),
            module: identity.module().cloned(),
            qualifiers,
            scope: None,
        };
        provider.load(import_path)?;
        Ok(provider)
    }

    pub fn canonical_path(&self) -> &str {
        &self.canonical_path
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Whether `qualifier` names the bound package.
    pub fn is_qualifier(&self, qualifier: &str) -> bool {
        self.qualifiers.contains(qualifier)
    }

    fn load_scope(&mut self) -> Result<(), ProviderError> {
        if self.scope.is_some() {
            return Ok(());
        }

        let tags = self.build_tags()?;
        tracing::debug!(%tags, "derived build tags");
        let config = LoadConfig::new(LoadMode::NAME | LoadMode::TYPES).with_tags(tags);
        self.scope = Some(self.loader.load(&config, &self.import_path)?);
        Ok(())
    }

    /// Directory holding the package sources.
    fn package_dir(&self) -> Result<PathBuf, ProviderError> {
        if is_local_import(&self.import_path) {
            return Ok(PathBuf::from(&self.import_path));
        }
        let no_module = || FileSetMismatch::NoModule {
            path: self.import_path.clone(),
        };
        let module = self.module.as_ref().ok_or_else(no_module)?;
        let rest = self
            .import_path
            .strip_prefix(module.path.as_str())
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .ok_or_else(no_module)?;
        Ok(module.dir.join(rest.trim_start_matches('/')))
    }

    fn build_tags(&self) -> Result<BuildTags, ProviderError> {
        let mut dirs = BTreeSet::new();
        let mut names = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let path = Path::new(file);
            let dir = path.parent().map(Path::to_string_lossy).unwrap_or_default();
            dirs.insert(dir.into_owned());
            if let Some(name) = path.file_name() {
                names.push(name.to_string_lossy().into_owned());
            }
        }
        if dirs.len() > 1 {
            return Err(FileSetMismatch::MultipleDirectories {
                dirs: dirs.into_iter().collect(),
            }
            .into());
        }

        let dir = self.package_dir()?;
        let scan = self
            .loader
            .frontend()
            .derive_tags(&dir, &names)
            .map_err(|source| LoadError::Frontend {
                path: dir.display().to_string(),
                source,
            })?;

        if let Some(file) = scan.selected.iter().find(|f| !names.contains(f)) {
            return Err(FileSetMismatch::UnlistedFile { file: file.clone() }.into());
        }
        Ok(scan.tags)
    }
}

impl Provider for FileSetProvider {
    #[tracing::instrument(level = "debug", skip(self), fields(package = %self.canonical_path))]
    fn load(&mut self, path: &str) -> Result<(), ProviderError> {
        if path.is_empty() {
            return Err(ProviderError::InvalidPath {
                path: path.to_owned(),
            });
        }

        if !self.qualifiers.contains(path) {
            if is_local_import(path) {
                let resolved = self.loader.load(&LoadConfig::new(LoadMode::NAME), path)?;
                if resolved.canonical_path() == self.canonical_path {
                    self.qualifiers.insert(path.to_owned());
                    return self.load_scope();
                }
            }
            return Err(ProviderError::WrongPackage {
                path: path.to_owned(),
                expected: self.canonical_path.clone(),
            });
        }

        self.load_scope()
    }

    fn lookup(&self, symbol: &str) -> Option<DeclRef> {
        let (mut qualifier, name) = split_qualified(symbol);
        if qualifier.is_empty() {
            qualifier = self.display_name.as_str();
        }
        if !self.qualifiers.contains(qualifier) {
            return None;
        }
        self.scope.as_ref()?.lookup(name)
    }

    fn describe(&self) -> String {
        format!("file-set provider {} ({} files)", self.canonical_path, self.files.len())
    }
}
