use super::*;
use pretty_assertions::assert_eq;

fn unresolved(symbol: &str) -> SymbolError {
    SymbolError::Unresolved {
        side: Side::Local,
        provider: "test".to_owned(),
        symbol: symbol.to_owned(),
    }
}

#[test]
fn empty_batch_is_not_an_error() {
    assert_eq!(Errors::from_vec(Vec::new()), None);
}

#[test]
fn single_error_displays_alone() {
    let errs = Errors::from_vec(vec![unresolved("Uint")]);
    assert_eq!(errs.map(|e| e.to_string()), Some("unresolved symbol: Uint".to_owned()));
}

#[test]
fn aggregate_counts_additional_errors() {
    let errs = Errors::from_vec(vec![unresolved("A"), unresolved("B"), unresolved("C")]);
    assert_eq!(
        errs.map(|e| e.to_string()),
        Some("unresolved symbol: A (and 2 more)".to_owned())
    );
}

#[test]
fn aggregate_unwraps_in_order() {
    let Some(errs) = Errors::from_vec(vec![unresolved("A"), unresolved("B")]) else {
        panic!("expected errors");
    };
    assert_eq!(errs.len(), 2);
    assert_eq!(errs.first(), &unresolved("A"));
    assert_eq!(errs.iter().count(), 2);
    assert_eq!(errs.into_vec(), vec![unresolved("A"), unresolved("B")]);
}

#[test]
fn load_errors_pass_through() {
    let err = ProviderError::from(LoadError::NoPackages {
        path: "p".to_owned(),
    });
    assert_eq!(err.to_string(), "no package found for \"p\"");
}

#[test]
fn file_set_messages() {
    let err = ProviderError::from(FileSetMismatch::MultipleDirectories {
        dirs: vec!["a/".to_owned(), "b/".to_owned()],
    });
    assert_eq!(err.to_string(), "files are stored in multiple directories: a/, b/");
    assert_eq!(
        FileSetMismatch::UnlistedFile {
            file: "x.go".to_owned()
        }
        .to_string(),
        "file is ignored: x.go"
    );
}
