//! Resolution of symbol maps across two providers.

use pretty_assertions::assert_eq;
use symassert::loader::Loader;
use symassert::testing::fixtures::{self, LOCAL_LOCAL, REMOTE_LOCAL, REMOTE_PATH};
use symassert::{PathProvider, Provider, Side, SymbolError, SymbolMap};

use crate::common;

fn untagged_remote(loader: &Loader) -> PathProvider {
    let mut p = PathProvider::new(loader.clone()).with_default_owner(REMOTE_LOCAL);
    p.load(REMOTE_LOCAL).unwrap();
    p
}

#[test]
fn mirrored_symbols_resolve() {
    let (from, to) = common::providers(&[]);
    let map = common::mirrored_symbols().resolve(&from, &to).unwrap();

    assert_eq!(map.len(), 32);
    for (a, b) in map.iter() {
        assert_eq!(a.name(), b.name());
        assert_eq!(a.unit().canonical_path(), REMOTE_PATH);
    }
}

#[test]
fn qualified_symbols_resolve() {
    let (from, to) = common::providers(&[]);
    let symbols: SymbolMap = [
        ("remotepkg.ConstInt", "localpkg.ConstInt"),
        ("./internal/remotepkg.Bool", "./internal/localpkg.Bool"),
    ]
    .into_iter()
    .collect();

    assert_eq!(symbols.resolve(&from, &to).unwrap().len(), 2);
}

#[test]
fn platform_gated_symbols_are_reported() {
    let (_, loader) = fixtures::frontend_and_loader();
    let from = untagged_remote(&loader);
    let to = common::local(&loader, &[]);
    let symbols: SymbolMap = [("ConstInt", "ConstInt"), ("Uint", "Uint")].into_iter().collect();

    let errs = symbols.resolve(&from, &to).unwrap_err();
    assert_eq!(errs.len(), 1);
    match errs.first() {
        SymbolError::Unresolved {
            side,
            provider,
            symbol,
        } => {
            assert_eq!(*side, Side::Authoritative);
            assert_eq!(symbol, "Uint");
            assert_eq!(provider, &from.describe());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn local_only_failures_name_the_local_side() {
    let (from, to) = common::providers(&[]);
    let symbols: SymbolMap = [("ConstInt", "MismatchInt")].into_iter().collect();

    let errs = symbols.resolve(&from, &to).unwrap_err();
    assert!(matches!(
        errs.first(),
        SymbolError::Unresolved { side: Side::Local, symbol, .. } if symbol == "MismatchInt"
    ));
}

#[test]
fn unresolved_symbols_skip_comparison() {
    let (_, loader) = fixtures::frontend_and_loader();
    let from = untagged_remote(&loader);
    let to = common::local(&loader, &["mismatch"]);
    // Would be a value mismatch if both sides resolved.
    let symbols: SymbolMap = [("ConstInt", "MismatchInt"), ("Func", "Func")].into_iter().collect();

    let errs = symassert::check(&symbols, &from, &to);
    assert!(errs
        .unwrap_err()
        .iter()
        .all(|e| matches!(e, SymbolError::Unresolved { .. })));
    assert!(to.lookup(&format!("{LOCAL_LOCAL}.MismatchInt")).is_some());
}
