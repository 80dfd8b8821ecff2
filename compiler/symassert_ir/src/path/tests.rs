use super::*;

#[test]
fn split_unqualified() {
    assert_eq!(split_qualified("Bool"), ("", "Bool"));
}

#[test]
fn split_local_import() {
    assert_eq!(
        split_qualified("./internal/localpkg.Bool"),
        ("./internal/localpkg", "Bool")
    );
}

#[test]
fn split_canonical_path_with_dotted_host() {
    assert_eq!(
        split_qualified("code.example.com/localpkg.Bool"),
        ("code.example.com/localpkg", "Bool")
    );
}

#[test]
fn split_package_name() {
    assert_eq!(split_qualified("remotepkg.ConstInt"), ("remotepkg", "ConstInt"));
}

#[test]
fn local_imports() {
    assert!(is_local_import("."));
    assert!(is_local_import(".."));
    assert!(is_local_import("./internal/remotepkg"));
    assert!(is_local_import("../sibling"));
    assert!(!is_local_import("example.com/internal/remotepkg"));
    assert!(!is_local_import("remotepkg"));
    assert!(!is_local_import(".hidden"));
}
