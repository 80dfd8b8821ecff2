//! Match and mismatch tables over the fixture packages.

use pretty_assertions::assert_eq;
use symassert::testing::fixtures::{self, LOCAL_PATH, REMOTE_PATH};
use symassert::{compare_all, FileSetProvider, SymbolError, SymbolMap};

use crate::common;

#[test]
fn mirrored_declarations_match() {
    let (from, to) = common::providers(&[]);
    let symbols = common::mirrored_symbols();

    symassert::check(&symbols, &from, &to).unwrap();
}

#[test]
fn mismatch_table() {
    let (from, to) = common::providers(&["mismatch"]);
    let values = [
        ("ConstUntypedBool", "MismatchUntypedBool"),
        ("ConstBool", "MismatchBool"),
        ("ConstUntypedRune", "MismatchUntypedRune"),
        ("ConstRune", "MismatchRune"),
        ("ConstUntypedInt", "MismatchUntypedInt"),
        ("ConstInt", "MismatchInt"),
        ("ConstUint", "MismatchUint"),
        ("ConstUntypedFloat", "MismatchUntypedFloat"),
        ("ConstFloat64", "MismatchFloat64"),
        ("ConstUntypedComplex", "MismatchUntypedComplex"),
        ("ConstComplex128", "MismatchComplex128"),
    ];

    for (remote, local) in values {
        let symbols: SymbolMap = [(remote, local)].into_iter().collect();
        let errs = symassert::check(&symbols, &from, &to).unwrap_err();
        assert_eq!(errs.len(), 1, "{remote}");
        assert!(
            matches!(errs.first(), SymbolError::ValueMismatch { .. }),
            "{remote}: {errs}"
        );
    }

    let types = [
        // Extra method on the local side.
        ("Method", "Method"),
        // Constant against a type name.
        ("ConstInt", "Int"),
        // Function against a method-carrying type.
        ("Func", "Method"),
        // Different basic kinds.
        ("Int", "Int64"),
        ("Struct", "Interface"),
        // Untyped against sized.
        ("ConstUntypedInt", "ConstInt"),
    ];
    for (remote, local) in types {
        let symbols: SymbolMap = [(remote, local)].into_iter().collect();
        let errs = symassert::check(&symbols, &from, &to).unwrap_err();
        assert!(
            matches!(errs.first(), SymbolError::TypeMismatch { .. }),
            "{remote} -> {local}: {errs}"
        );
    }
}

#[test]
fn value_mismatch_names_both_declarations() {
    let (from, to) = common::providers(&["mismatch"]);
    let symbols: SymbolMap = [("ConstInt", "MismatchInt")].into_iter().collect();

    let errs = symassert::check(&symbols, &from, &to).unwrap_err();
    let err = errs.first();
    assert_eq!(err.authoritative().map(|d| d.unit().canonical_path()), Some(REMOTE_PATH));
    assert_eq!(err.local().map(|d| d.unit().canonical_path()), Some(LOCAL_PATH));
    assert_eq!(
        err.to_string(),
        format!(
            "constant value mismatch (constant {REMOTE_PATH}.ConstInt int = 1 -> \
             constant {LOCAL_PATH}.MismatchInt int = -1)"
        )
    );
}

#[test]
fn every_mismatch_of_a_batch_is_reported_in_order() {
    let (from, to) = common::providers(&["mismatch"]);
    let symbols: SymbolMap = [
        ("ConstInt", "MismatchInt"),
        ("ConstString", "ConstString"),
        ("Method", "Method"),
        ("Struct", "Struct"),
    ]
    .into_iter()
    .collect();

    let pairs = symbols.resolve(&from, &to).unwrap();
    let errs = compare_all(&pairs).unwrap_err();
    let names: Vec<&str> = errs
        .iter()
        .filter_map(|e| e.authoritative())
        .map(|d| d.name())
        .collect();
    assert_eq!(names, vec!["ConstInt", "Method"]);
    assert_eq!(
        errs.to_string(),
        format!("{} (and 1 more)", errs.first())
    );
}

#[test]
fn named_composites_match_across_packages() {
    let (from, to) = common::providers(&[]);
    let symbols: SymbolMap = [("Struct", "Struct"), ("Interface", "Interface")]
        .into_iter()
        .collect();
    symassert::check(&symbols, &from, &to).unwrap();
}

#[test]
fn file_set_provider_as_authoritative_side() {
    let (_, loader) = fixtures::frontend_and_loader();
    let from =
        FileSetProvider::new(loader.clone(), REMOTE_PATH, &fixtures::remote_files()).unwrap();
    let to = common::local(&loader, &[]);

    symassert::check(&common::mirrored_symbols(), &from, &to).unwrap();
}
