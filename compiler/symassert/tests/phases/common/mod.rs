//! Provider setup shared by the phases.

use symassert::loader::{BuildTags, Loader, Platform};
use symassert::testing::fixtures::{self, CONSTANTS, FUNCS, LOCAL_LOCAL, REMOTE_LOCAL, TYPES};
use symassert::{PathProvider, Provider, SymbolMap};

/// The authoritative side: `remotepkg` for linux/amd64, owning unqualified
/// symbols.
pub fn remote(loader: &Loader) -> PathProvider {
    symassert::init_tracing();
    let mut p = PathProvider::new(loader.clone())
        .with_platform(Platform::new("linux", "amd64"))
        .with_default_owner(REMOTE_LOCAL);
    p.load(REMOTE_LOCAL).unwrap();
    p
}

/// The local side: `localpkg` under `tags`, owning unqualified symbols.
pub fn local(loader: &Loader, tags: &[&str]) -> PathProvider {
    symassert::init_tracing();
    let mut p = PathProvider::new(loader.clone())
        .with_tags(BuildTags::new(tags.iter().copied()))
        .with_default_owner(LOCAL_LOCAL);
    p.load(LOCAL_LOCAL).unwrap();
    p
}

/// Both sides over one fresh loader.
pub fn providers(local_tags: &[&str]) -> (PathProvider, PathProvider) {
    let (_, loader) = fixtures::frontend_and_loader();
    (remote(&loader), local(&loader, local_tags))
}

/// Every symbol both packages declare, mapped to itself.
pub fn mirrored_symbols() -> SymbolMap {
    CONSTANTS
        .iter()
        .chain(TYPES.iter())
        .chain(FUNCS.iter())
        .map(|name| (*name, *name))
        .collect()
}
