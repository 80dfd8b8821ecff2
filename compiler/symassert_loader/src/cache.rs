//! Subsumption cache for loaded units.
//!
//! Entries are filed by the path they were requested with. A lookup succeeds
//! when an entry's capability mask covers the request and its build tags are
//! equal as a set, so one heavy load answers every lighter request.
//!
//! `put` keeps the table small and identity-consistent. Entries of one
//! unit (by id) under one tag set are *variants* of each other:
//!
//! 1. A variant under the requested path that already covers the mask wins;
//!    the new load is dropped.
//! 2. Otherwise, if a variant filed under another path covers the mask, its
//!    instance is reused. Two spellings of one package then resolve to one
//!    shared unit.
//! 3. Variants whose mask is contained in the new mask are replaced in place
//!    by the new entry under every path, so lighter spellings are upgraded
//!    too.
//! 4. If nothing was replaced under the requested path, the entry is
//!    appended there.
//!
//! Under one path, no two variants have masks where one covers the other.
//!
//! All access goes through one mutex, held only for the scan; front-end
//! loads happen outside it.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use symassert_ir::CompilationUnit;

use crate::config::{BuildTags, LoadMode};

#[derive(Clone, Debug)]
struct CacheEntry {
    mode: LoadMode,
    tags: BuildTags,
    unit: Arc<CompilationUnit>,
}

impl CacheEntry {
    /// Same unit identity under the same tag set.
    fn is_variant_of(&self, unit: &CompilationUnit, tags: &BuildTags) -> bool {
        self.unit.id() == unit.id() && self.tags == *tags
    }
}

/// Cache of loaded units keyed by `(path, mode, tags)` with subsumption.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: Mutex<FxHashMap<String, SmallVec<[CacheEntry; 2]>>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a unit loaded for `path` whose mask covers `mode` under `tags`.
    pub fn get(
        &self,
        mode: LoadMode,
        tags: &BuildTags,
        path: &str,
    ) -> Option<Arc<CompilationUnit>> {
        let entries = self.entries.lock();
        let found = entries
            .get(path)?
            .iter()
            .find(|e| e.mode.covers(mode) && e.tags == *tags)
            .map(|e| Arc::clone(&e.unit));
        tracing::trace!(path, ?mode, %tags, hit = found.is_some(), "load cache lookup");
        found
    }

    /// Store `unit`, loaded for `path` with `mode` and `tags`.
    ///
    /// Returns the instance callers should use from now on, which is an
    /// already cached instance when one is equivalent.
    pub fn put(
        &self,
        mode: LoadMode,
        tags: &BuildTags,
        path: &str,
        unit: Arc<CompilationUnit>,
    ) -> Arc<CompilationUnit> {
        let mut entries = self.entries.lock();
        let covers = |e: &CacheEntry| e.is_variant_of(&unit, tags) && e.mode.covers(mode);

        if let Some(covering) = entries
            .get(path)
            .and_then(|slot| slot.iter().find(|&e| covers(e)))
        {
            return Arc::clone(&covering.unit);
        }

        let shared = entries
            .values()
            .flatten()
            .find(|&e| covers(e))
            .map(|e| Arc::clone(&e.unit));
        let unit = match shared {
            Some(existing) => {
                tracing::debug!(
                    path,
                    id = existing.id(),
                    "reusing unit loaded under another path"
                );
                existing
            }
            None => unit,
        };

        let entry = CacheEntry {
            mode,
            tags: tags.clone(),
            unit: Arc::clone(&unit),
        };
        for (key, slot) in entries.iter_mut() {
            if key.as_str() != path && absorb(slot, &entry) {
                tracing::debug!(
                    path = key.as_str(),
                    ?mode,
                    %tags,
                    "upgraded load cache entry under another path"
                );
            }
        }

        let slot = entries.entry(path.to_owned()).or_default();
        if absorb(slot, &entry) {
            tracing::debug!(path, ?mode, %tags, "upgraded load cache entry");
        } else {
            slot.push(entry);
        }
        unit
    }

    /// Total number of entries across all paths.
    pub fn len(&self) -> usize {
        self.entries.lock().values().map(SmallVec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries filed under `path`.
    pub fn entries_for(&self, path: &str) -> usize {
        self.entries.lock().get(path).map_or(0, SmallVec::len)
    }

    /// Masks filed under `path`, in order.
    #[cfg(test)]
    fn modes_for(&self, path: &str) -> Vec<LoadMode> {
        self.entries
            .lock()
            .get(path)
            .map(|slot| slot.iter().map(|e| e.mode).collect())
            .unwrap_or_default()
    }
}

/// Replace every variant of `entry` in `slot` whose mask it covers by
/// `entry`, at the position of the first. Returns whether any was replaced.
fn absorb(slot: &mut SmallVec<[CacheEntry; 2]>, entry: &CacheEntry) -> bool {
    let subsumed =
        |e: &CacheEntry| e.is_variant_of(&entry.unit, &entry.tags) && entry.mode.covers(e.mode);
    match slot.iter().position(|e| subsumed(e)) {
        Some(at) => {
            slot.retain(|e| !subsumed(&*e));
            slot.insert(at, entry.clone());
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests;
