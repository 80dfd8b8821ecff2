//! Compilation units and handles to their declarations.
//!
//! A `CompilationUnit` is created once by a successful load and is shared
//! read-only (`Arc`) by every cache entry and provider that resolves to it.
//! Declarations are addressed by `DeclIdx` into the unit's declaration list,
//! and handed out as `DeclRef`s, which keep their unit alive.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::decl::Declaration;
use crate::ty::{NamedType, TypeRef};

/// Module that contains a unit: its path prefix and root directory.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ModuleInfo {
    pub path: String,
    pub dir: PathBuf,
}

impl ModuleInfo {
    pub fn new(path: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        ModuleInfo {
            path: path.into(),
            dir: dir.into(),
        }
    }
}

/// Index of a declaration within its unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct DeclIdx(u32);

impl DeclIdx {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A loaded package under one configuration.
#[derive(Debug)]
pub struct CompilationUnit {
    id: String,
    canonical_path: String,
    display_name: String,
    aliases: Vec<String>,
    module: Option<ModuleInfo>,
    decls: Vec<Declaration>,
    scope: FxHashMap<String, DeclIdx>,
    types: FxHashMap<TypeRef, NamedType>,
}

impl CompilationUnit {
    /// Identity of the unit, shared by every load of the same package.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn canonical_path(&self) -> &str {
        &self.canonical_path
    }

    /// The package name (`remotepkg` for `example.com/internal/remotepkg`).
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Every string this unit may be addressed by: canonical path, display
    /// name, then any local import specifiers.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn is_addressed_by(&self, path: &str) -> bool {
        self.aliases.iter().any(|alias| alias == path)
    }

    pub fn module(&self) -> Option<&ModuleInfo> {
        self.module.as_ref()
    }

    /// Number of top-level declarations.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    /// Look up a top-level declaration by name.
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.scope.get(name).map(|&idx| &self.decls[idx.index()])
    }

    /// Look up a top-level declaration, returning a handle that keeps this
    /// unit alive.
    pub fn lookup(self: &Arc<Self>, name: &str) -> Option<DeclRef> {
        self.scope.get(name).map(|&idx| DeclRef {
            unit: Arc::clone(self),
            idx,
        })
    }

    /// Definition of a named type reachable from this unit.
    pub fn named_type(&self, r: &TypeRef) -> Option<&NamedType> {
        self.types.get(r)
    }
}

/// Builds a `CompilationUnit`.
#[derive(Clone, Debug)]
pub struct UnitBuilder {
    id: Option<String>,
    canonical_path: String,
    display_name: String,
    aliases: Vec<String>,
    module: Option<ModuleInfo>,
    decls: Vec<Declaration>,
    types: FxHashMap<TypeRef, NamedType>,
}

impl UnitBuilder {
    pub fn new(canonical_path: impl Into<String>, display_name: impl Into<String>) -> Self {
        UnitBuilder {
            id: None,
            canonical_path: canonical_path.into(),
            display_name: display_name.into(),
            aliases: Vec::new(),
            module: None,
            decls: Vec::new(),
            types: FxHashMap::default(),
        }
    }

    /// Override the identity. Defaults to the canonical path.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add an alternate specifier (e.g. a local import path).
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn module(mut self, module: ModuleInfo) -> Self {
        self.module = Some(module);
        self
    }

    /// Add a top-level declaration. A later declaration with the same name
    /// replaces the earlier one.
    #[must_use]
    pub fn declare(mut self, decl: Declaration) -> Self {
        match self.decls.iter().position(|d| d.name() == decl.name()) {
            Some(at) => self.decls[at] = decl,
            None => self.decls.push(decl),
        }
        self
    }

    /// Define a named type reachable from the unit, local or imported.
    #[must_use]
    pub fn named_type(mut self, r: TypeRef, def: NamedType) -> Self {
        self.types.insert(r, def);
        self
    }

    /// Drop declarations and type definitions, keeping only the names.
    #[must_use]
    pub fn without_declarations(mut self) -> Self {
        self.decls.clear();
        self.types.clear();
        self
    }

    #[must_use]
    pub fn without_module(mut self) -> Self {
        self.module = None;
        self
    }

    pub fn build(self) -> CompilationUnit {
        let mut aliases = Vec::with_capacity(self.aliases.len() + 2);
        for alias in [self.canonical_path.clone(), self.display_name.clone()]
            .into_iter()
            .chain(self.aliases)
        {
            if !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }

        let scope = self
            .decls
            .iter()
            .enumerate()
            .filter_map(|(i, d)| {
                let idx = DeclIdx(u32::try_from(i).ok()?);
                Some((d.name().to_owned(), idx))
            })
            .collect();

        CompilationUnit {
            id: self.id.unwrap_or_else(|| self.canonical_path.clone()),
            canonical_path: self.canonical_path,
            display_name: self.display_name,
            aliases,
            module: self.module,
            decls: self.decls,
            scope,
            types: self.types,
        }
    }
}

/// Handle to a declaration inside a shared unit.
///
/// Equality and hashing are by identity: the same declaration of the same
/// unit instance. Two separate loads of one package give distinct handles.
#[derive(Clone)]
pub struct DeclRef {
    unit: Arc<CompilationUnit>,
    idx: DeclIdx,
}

impl DeclRef {
    pub fn unit(&self) -> &Arc<CompilationUnit> {
        &self.unit
    }

    pub fn idx(&self) -> DeclIdx {
        self.idx
    }

    pub fn decl(&self) -> &Declaration {
        &self.unit.decls[self.idx.index()]
    }

    pub fn name(&self) -> &str {
        self.decl().name()
    }
}

impl PartialEq for DeclRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.unit, &other.unit) && self.idx == other.idx
    }
}

impl Eq for DeclRef {}

impl Hash for DeclRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.unit), state);
        self.idx.hash(state);
    }
}

impl fmt::Display for DeclRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decl = self.decl();
        write!(
            f,
            "{} {}.{} {}",
            decl.kind().describe(),
            self.unit.canonical_path,
            decl.name(),
            decl.ty()
        )?;
        if let Some(value) = decl.value() {
            write!(f, " = {value}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DeclRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclRef({}.{})", self.unit.canonical_path, self.name())
    }
}
