//! Provider that loads whole packages by import path.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use symassert_ir::{is_local_import, split_qualified, CompilationUnit, DeclRef};
use symassert_loader::{BuildTags, LoadConfig, LoadMode, Loader, Platform};

use super::Provider;
use crate::error::ProviderError;

/// Resolves symbols against packages loaded by canonical or local path.
///
/// Every load uses one configuration: name and type information under the
/// configured platform and build tags.
#[derive(Debug)]
pub struct PathProvider {
    loader: Loader,
    config: LoadConfig,
    /// Package used for unqualified symbols: a display name, canonical path
    /// or local import path.
    default_owner: Option<String>,
    /// Display name to canonical path.
    names: FxHashMap<String, String>,
    /// Local import path to canonical path.
    local: FxHashMap<String, String>,
    /// Loaded units by canonical path.
    units: FxHashMap<String, Arc<CompilationUnit>>,
}

impl PathProvider {
    pub fn new(loader: Loader) -> Self {
        PathProvider {
            loader,
            config: LoadConfig::new(LoadMode::NAME | LoadMode::TYPES),
            default_owner: None,
            names: FxHashMap::default(),
            local: FxHashMap::default(),
            units: FxHashMap::default(),
        }
    }

    /// Load for `platform`, which also adds its OS and architecture as tags.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.config = self.config.with_platform(platform);
        self
    }

    /// Add conditional-compilation tags.
    #[must_use]
    pub fn with_tags(mut self, tags: BuildTags) -> Self {
        self.config.tags = self.config.tags.union(&tags);
        self
    }

    /// Resolve unqualified symbols against `owner`. The caller still has to
    /// load that package.
    #[must_use]
    pub fn with_default_owner(mut self, owner: impl Into<String>) -> Self {
        self.default_owner = Some(owner.into());
        self
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Canonical path a qualifier refers to. Unknown qualifiers are taken to
    /// be canonical paths themselves.
    pub fn canonical<'a>(&'a self, qualifier: &'a str) -> &'a str {
        self.names
            .get(qualifier)
            .or_else(|| self.local.get(qualifier))
            .map_or(qualifier, String::as_str)
    }

    /// The unit loaded under `canonical_path`.
    pub fn unit(&self, canonical_path: &str) -> Option<&Arc<CompilationUnit>> {
        self.units.get(canonical_path)
    }

    fn register_name(&mut self, unit: &CompilationUnit) -> Result<(), ProviderError> {
        let name = unit.display_name();
        let canonical = unit.canonical_path();
        match self.names.get(name) {
            Some(existing) if existing != canonical => Err(ProviderError::NameConflict {
                name: name.to_owned(),
                existing: existing.clone(),
                requested: canonical.to_owned(),
            }),
            Some(_) => Ok(()),
            None => {
                self.names.insert(name.to_owned(), canonical.to_owned());
                Ok(())
            }
        }
    }

    /// Map a local-import default owner to its canonical path. Only the
    /// name is needed, so the load requests nothing else.
    fn resolve_default_owner(&mut self) -> Result<(), ProviderError> {
        let Some(owner) = self.default_owner.as_deref() else {
            return Ok(());
        };
        if self.names.contains_key(owner)
            || self.local.contains_key(owner)
            || !is_local_import(owner)
        {
            return Ok(());
        }

        let resolved = self.loader.load(&LoadConfig::new(LoadMode::NAME), owner)?;
        let canonical = resolved.canonical_path().to_owned();
        tracing::debug!(owner, canonical = %canonical, "resolved default owner");
        self.names.insert(owner.to_owned(), canonical.clone());
        self.local.insert(owner.to_owned(), canonical);
        Ok(())
    }
}

impl Provider for PathProvider {
    #[tracing::instrument(level = "debug", skip(self), fields(tags = %self.config.tags))]
    fn load(&mut self, path: &str) -> Result<(), ProviderError> {
        if path.is_empty() {
            return Err(ProviderError::InvalidPath {
                path: path.to_owned(),
            });
        }
        if self.units.contains_key(self.canonical(path)) {
            tracing::debug!("already loaded");
            return Ok(());
        }

        let unit = self.loader.load(&self.config, path)?;
        self.register_name(&unit)?;
        let canonical = unit.canonical_path().to_owned();
        if is_local_import(path) {
            self.local.insert(path.to_owned(), canonical.clone());
        }

        self.resolve_default_owner()?;

        self.units.insert(canonical, unit);
        Ok(())
    }

    fn lookup(&self, symbol: &str) -> Option<DeclRef> {
        let (mut qualifier, name) = split_qualified(symbol);
        if qualifier.is_empty() {
            qualifier = self.default_owner.as_deref().unwrap_or_default();
        }
        self.units.get(self.canonical(qualifier))?.lookup(name)
    }

    fn describe(&self) -> String {
        let mut loaded: Vec<&str> = self.units.keys().map(String::as_str).collect();
        loaded.sort_unstable();
        format!("path provider {} [{}]", self.config.tags, loaded.join(", "))
    }
}
