//! Symbol providers.
//!
//! A provider loads compilation units and resolves symbol names to
//! declarations. A symbol is either a bare name, resolved against the
//! provider's default package, or `qualifier.Name`, where the qualifier is a
//! canonical path, a display name or a local import path the provider knows.

mod file_set;
mod path;

pub use file_set::FileSetProvider;
pub use path::PathProvider;

use symassert_ir::DeclRef;

use crate::error::ProviderError;

/// Loads units and resolves symbols against them.
pub trait Provider {
    /// Load the unit at `path` and make its symbols available for lookup.
    fn load(&mut self, path: &str) -> Result<(), ProviderError>;

    /// Resolve `symbol`, or `None` if it is not declared.
    fn lookup(&self, symbol: &str) -> Option<DeclRef>;

    /// Short description for diagnostics.
    fn describe(&self) -> String;
}
