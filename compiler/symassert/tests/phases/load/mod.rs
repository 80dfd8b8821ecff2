//! Providers over the fixture front-end and their shared cache.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use symassert::loader::{BuildTags, LoadCache, LoadConfig, LoadMode, Loader};
use symassert::testing::fixtures::{
    self, remote_files, LOCAL_LOCAL, LOCAL_PATH, REMOTE_LOCAL, REMOTE_PATH,
};
use symassert::{FileSetProvider, Provider};

use crate::common;

#[test]
fn providers_share_one_cache() {
    let (frontend, loader) = fixtures::frontend_and_loader();
    let remote = common::remote(&loader);
    let again = common::remote(&loader);
    let local = common::local(&loader, &[]);

    assert_eq!(frontend.loads_of(REMOTE_LOCAL), 1);
    assert_eq!(frontend.loads_of(LOCAL_LOCAL), 1);
    let a = remote.lookup("ConstInt").unwrap();
    let b = again.lookup("ConstInt").unwrap();
    assert!(Arc::ptr_eq(a.unit(), b.unit()));
    assert!(local.lookup("ConstInt").is_some());
}

#[test]
fn cached_entry_answers_narrower_requests() {
    let (frontend, loader) = fixtures::frontend_and_loader();
    let _remote = common::remote(&loader);

    assert_eq!(loader.cache().unwrap().entries_for(REMOTE_LOCAL), 1);

    // A later identity query for the same path and tags is a hit.
    let config = LoadConfig::new(LoadMode::NAME).with_tags(BuildTags::new(["amd64", "linux"]));
    loader.load(&config, REMOTE_LOCAL).unwrap();
    assert_eq!(frontend.loads_of(REMOTE_LOCAL), 1);
}

#[test]
fn file_set_and_path_providers_agree() {
    let (_, loader) = fixtures::frontend_and_loader();
    let by_path = common::remote(&loader);
    let by_files = FileSetProvider::new(loader, REMOTE_PATH, &remote_files()).unwrap();

    for symbol in ["ConstInt", "Struct", "Func", "Method", "AliasType"] {
        let a = by_path.lookup(symbol).unwrap();
        let b = by_files.lookup(symbol).unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }
}

#[test]
fn uncached_loader_reloads_for_each_provider() {
    let frontend = Arc::new(fixtures::frontend());
    let loader = Loader::new(frontend.clone());
    let _first = common::local(&loader, &[]);
    let _second = common::local(&loader, &[]);
    assert_eq!(frontend.loads_of(LOCAL_LOCAL), 2);

    let shared = loader.with_cache(Arc::new(LoadCache::new()));
    let _third = common::local(&shared, &[]);
    let _fourth = common::local(&shared, &[]);
    assert_eq!(frontend.loads_of(LOCAL_LOCAL), 3);
    assert_eq!(frontend.loads_of(LOCAL_PATH), 0);
}
