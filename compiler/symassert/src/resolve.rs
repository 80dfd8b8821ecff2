//! Turning a name mapping into declaration pairs.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use symassert_ir::DeclRef;

use crate::error::{Errors, Side, SymbolError};
use crate::provider::Provider;

/// Maps an authoritative symbol to its local redeclaration.
///
/// Symbols are visited in sorted order, so diagnostics are reproducible.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SymbolMap {
    entries: BTreeMap<String, String>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `authoritative` to `local`, replacing an earlier mapping.
    pub fn insert(&mut self, authoritative: impl Into<String>, local: impl Into<String>) {
        self.entries.insert(authoritative.into(), local.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, l)| (a.as_str(), l.as_str()))
    }

    /// Look up every entry in `from` (authoritative) and `to` (local).
    ///
    /// Every failed lookup is reported; if any fails no map is returned.
    #[tracing::instrument(level = "debug", skip_all, fields(symbols = self.len()))]
    pub fn resolve(
        &self,
        from: &dyn Provider,
        to: &dyn Provider,
    ) -> Result<DeclarationMap, Errors> {
        let mut map = DeclarationMap::default();
        let mut errs = Vec::new();
        for (authoritative, local) in self.iter() {
            match (from.lookup(authoritative), to.lookup(local)) {
                (None, _) => errs.push(SymbolError::Unresolved {
                    side: Side::Authoritative,
                    provider: from.describe(),
                    symbol: authoritative.to_owned(),
                }),
                (_, None) => errs.push(SymbolError::Unresolved {
                    side: Side::Local,
                    provider: to.describe(),
                    symbol: local.to_owned(),
                }),
                (Some(f), Some(t)) => map.insert(f, t),
            }
        }
        match Errors::from_vec(errs) {
            Some(errs) => Err(errs),
            None => Ok(map),
        }
    }
}

impl<A: Into<String>, L: Into<String>> FromIterator<(A, L)> for SymbolMap {
    fn from_iter<I: IntoIterator<Item = (A, L)>>(iter: I) -> Self {
        SymbolMap {
            entries: iter.into_iter().map(|(a, l)| (a.into(), l.into())).collect(),
        }
    }
}

/// Resolved pairs, keyed by the authoritative declaration.
///
/// Pairs keep insertion order; re-inserting a key replaces its local
/// declaration in place.
#[derive(Clone, Debug, Default)]
pub struct DeclarationMap {
    pairs: Vec<(DeclRef, DeclRef)>,
    index: FxHashMap<DeclRef, usize>,
}

impl DeclarationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: DeclRef, to: DeclRef) {
        match self.index.get(&from) {
            Some(&at) => self.pairs[at].1 = to,
            None => {
                self.index.insert(from.clone(), self.pairs.len());
                self.pairs.push((from, to));
            }
        }
    }

    /// The local declaration paired with `from`.
    pub fn get(&self, from: &DeclRef) -> Option<&DeclRef> {
        self.index.get(from).map(|&at| &self.pairs[at].1)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(DeclRef, DeclRef)] {
        &self.pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DeclRef, &DeclRef)> {
        self.pairs.iter().map(|(f, t)| (f, t))
    }
}

impl FromIterator<(DeclRef, DeclRef)> for DeclarationMap {
    fn from_iter<I: IntoIterator<Item = (DeclRef, DeclRef)>>(iter: I) -> Self {
        let mut map = DeclarationMap::default();
        for (from, to) in iter {
            map.insert(from, to);
        }
        map
    }
}
