//! Declaration model for symassert.
//!
//! Everything a provider hands out and the comparator inspects is described
//! here:
//!
//! - `BasicKind`: predeclared types, including untyped constant kinds
//! - `ConstValue`: exact constant values
//! - `TypeDescriptor`: owned type shapes; named types are referenced by
//!   `TypeRef` and defined in the owning unit's type table
//! - `Declaration`: a constant, function, type name or variable
//! - `CompilationUnit`: one loaded package, shared read-only via `Arc`
//! - `DeclRef`: an identity handle to a declaration of a shared unit

mod basic;
mod decl;
mod path;
mod ty;
mod unit;
mod value;

pub use basic::BasicKind;
pub use decl::{DeclKind, Declaration};
pub use path::{is_local_import, split_qualified};
pub use ty::{Field, NamedType, Param, Signature, TypeDescriptor, TypeRef};
pub use unit::{CompilationUnit, DeclIdx, DeclRef, ModuleInfo, UnitBuilder};
pub use value::ConstValue;

// Re-exported so callers can build exact values without naming the num crates.
pub use num_bigint::BigInt;
pub use num_rational::BigRational;
