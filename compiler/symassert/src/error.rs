//! Error types.
//!
//! Load-time failures (`ProviderError`) abort the offending load and are
//! returned on their own. Resolution and comparison failures (`SymbolError`)
//! are collected across a whole batch into one `Errors` value.

use std::fmt;

use symassert_ir::DeclRef;
use symassert_loader::LoadError;

/// Failure of a provider load.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("invalid package path {path:?}")]
    InvalidPath { path: String },

    #[error(transparent)]
    Load(#[from] LoadError),

    /// Two different packages share a display name within one provider.
    #[error("package name conflict: {name} is already loaded from {existing}, cannot load {requested}")]
    NameConflict {
        name: String,
        existing: String,
        requested: String,
    },

    #[error("{path:?} is not package {expected}")]
    WrongPackage { path: String, expected: String },

    #[error(transparent)]
    FileSetMismatch(#[from] FileSetMismatch),
}

/// The file list given to a file-set provider does not describe one build
/// variant of one package directory.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FileSetMismatch {
    #[error("files are stored in multiple directories: {}", dirs.join(", "))]
    MultipleDirectories { dirs: Vec<String> },

    /// The front-end would also compile a file missing from the list.
    #[error("file is ignored: {file}")]
    UnlistedFile { file: String },

    /// A canonical path could not be mapped to a directory.
    #[error("package {path} has no module directory")]
    NoModule { path: String },
}

/// Which provider of a resolution a symbol was looked up in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// The provider holding the authoritative declarations.
    Authoritative,
    /// The provider holding the local redeclarations.
    Local,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Authoritative => "authoritative",
            Side::Local => "local",
        })
    }
}

/// Failure of one symbol during resolution or comparison.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SymbolError {
    #[error("unresolved symbol: {symbol}")]
    Unresolved {
        side: Side,
        /// Description of the provider the lookup failed in.
        provider: String,
        symbol: String,
    },

    /// The declarations differ in kind or shape. `detail` names the check
    /// that failed.
    #[error("{detail} ({from} -> {to})")]
    TypeMismatch {
        from: DeclRef,
        to: DeclRef,
        detail: &'static str,
    },

    #[error("constant value mismatch ({from} -> {to})")]
    ValueMismatch { from: DeclRef, to: DeclRef },
}

impl SymbolError {
    /// The authoritative declaration of a mismatch.
    pub fn authoritative(&self) -> Option<&DeclRef> {
        match self {
            SymbolError::TypeMismatch { from, .. } | SymbolError::ValueMismatch { from, .. } => {
                Some(from)
            }
            SymbolError::Unresolved { .. } => None,
        }
    }

    /// The local declaration of a mismatch.
    pub fn local(&self) -> Option<&DeclRef> {
        match self {
            SymbolError::TypeMismatch { to, .. } | SymbolError::ValueMismatch { to, .. } => {
                Some(to)
            }
            SymbolError::Unresolved { .. } => None,
        }
    }
}

/// Every error of one batch, in input order. Never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Errors {
    errs: Vec<SymbolError>,
}

impl Errors {
    /// Wrap `errs`, or `None` if there are none.
    pub fn from_vec(errs: Vec<SymbolError>) -> Option<Self> {
        if errs.is_empty() {
            None
        } else {
            Some(Errors { errs })
        }
    }

    pub fn len(&self) -> usize {
        self.errs.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errs.is_empty()
    }

    pub fn first(&self) -> &SymbolError {
        &self.errs[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolError> {
        self.errs.iter()
    }

    pub fn as_slice(&self) -> &[SymbolError] {
        &self.errs
    }

    pub fn into_vec(self) -> Vec<SymbolError> {
        self.errs
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())?;
        match self.errs.len() {
            0 | 1 => Ok(()),
            n => write!(f, " (and {} more)", n - 1),
        }
    }
}

impl std::error::Error for Errors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.first())
    }
}

impl IntoIterator for Errors {
    type Item = SymbolError;
    type IntoIter = std::vec::IntoIter<SymbolError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errs.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a SymbolError;
    type IntoIter = std::slice::Iter<'a, SymbolError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errs.iter()
    }
}

#[cfg(test)]
mod tests;
