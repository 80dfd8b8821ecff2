//! Symbol and import path helpers.

/// Split a symbol at its last dot into `(qualifier, name)`.
///
/// The qualifier is empty for an unqualified symbol.
///
/// ```text
/// "Bool"                            -> ("", "Bool")
/// "./internal/localpkg.Bool"        -> ("./internal/localpkg", "Bool")
/// "code.example.com/localpkg.Bool"  -> ("code.example.com/localpkg", "Bool")
/// ```
pub fn split_qualified(symbol: &str) -> (&str, &str) {
    match symbol.rfind('.') {
        Some(at) => (&symbol[..at], &symbol[at + 1..]),
        None => ("", symbol),
    }
}

/// Whether `path` is a local (directory-relative) import specifier rather
/// than a canonical path: `.`, `..`, or starting with `./` or `../`.
pub fn is_local_import(path: &str) -> bool {
    path == "." || path == ".." || path.starts_with("./") || path.starts_with("../")
}

#[cfg(test)]
mod tests;
