//! Assert that locally redeclared symbols match their authoritative
//! declarations.
//!
//! A typical check:
//!
//! 1. Build two providers, one over the authoritative package and one over
//!    the local mirror, sharing a `Loader` (and so its `LoadCache`).
//! 2. Load each.
//! 3. Map authoritative names to local names in a `SymbolMap`.
//! 4. `resolve` the map into declaration pairs and `compare_all` them.
//!
//! `check` runs step 4 in one call. Every failure of a batch is returned in
//! one `Errors` value.
//!
//! # Tracing
//!
//! Loads and comparisons are instrumented with `tracing`. Call
//! [`init_tracing`] and set `RUST_LOG` (e.g. `RUST_LOG=symassert=debug`) to
//! see them.

mod compare;
mod error;
mod provider;
mod resolve;
pub mod testing;

use std::sync::Once;

pub use compare::{compare, compare_all};
pub use error::{Errors, FileSetMismatch, ProviderError, Side, SymbolError};
pub use provider::{FileSetProvider, PathProvider, Provider};
pub use resolve::{DeclarationMap, SymbolMap};

// The model and loader are part of the public API.
pub use symassert_ir as ir;
pub use symassert_loader as loader;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only ever installs once per
/// process.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Resolve `symbols` against `from` (authoritative) and `to` (local), then
/// compare every pair.
///
/// Unresolved symbols are reported without comparing anything.
pub fn check(symbols: &SymbolMap, from: &dyn Provider, to: &dyn Provider) -> Result<(), Errors> {
    let pairs = symbols.resolve(from, to)?;
    compare_all(&pairs)
}
