//! Structural comparison of declaration pairs.
//!
//! The two sides of a pair come from independently loaded units, so nothing
//! is compared by identity. Rules:
//!
//! - Constants: the underlying basic kinds must be equal (untyped kinds are
//!   distinct from every sized kind), then the values must be exactly equal.
//! - Functions: variadic flag, then parameter and result lists position-wise
//!   by underlying shape. Parameter names do not matter.
//! - Type names: named types compare their underlying shapes, then their
//!   method lists index-wise. Methods must be methods on both sides.
//! - Struct fields compare position-wise by type; field names are ignored.
//! - Interface methods compare index-wise by signature.
//!
//! Named types are looked up in the type table of the unit each side came
//! from. Pairs of named types already under comparison are assumed equal,
//! which makes recursive types terminate.

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use symassert_ir::{
    BasicKind, CompilationUnit, ConstValue, DeclKind, DeclRef, Declaration, Param, Signature,
    TypeDescriptor, TypeRef,
};

use crate::error::{Errors, SymbolError};
use crate::resolve::DeclarationMap;

/// Red zone below which the stack is grown before recursing.
const RED_ZONE: usize = 100 * 1024;

/// Stack allocated per growth.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Compare every pair of `map`, collecting mismatches in pair order.
///
/// Pairs are independent and compared in parallel.
///
/// # Panics
///
/// If a pair involves a declaration kind that cannot be compared
/// (a variable).
#[tracing::instrument(level = "debug", skip_all, fields(pairs = map.len()))]
pub fn compare_all(map: &DeclarationMap) -> Result<(), Errors> {
    let errs: Vec<SymbolError> = map
        .pairs()
        .par_iter()
        .filter_map(|(from, to)| compare(from, to).err())
        .collect();
    tracing::debug!(mismatches = errs.len(), "compared declarations");
    Errors::from_vec(errs).map_or(Ok(()), Err)
}

/// Compare the authoritative declaration `from` with its redeclaration `to`.
///
/// # Panics
///
/// If either side is a variable. Only constants, functions and type names
/// are comparable; feeding anything else is a caller bug.
pub fn compare(from: &DeclRef, to: &DeclRef) -> Result<(), SymbolError> {
    let (l, r) = (from.decl(), to.decl());
    let mut cx = Comparer::new(from.unit(), to.unit());

    let outcome = match (l.kind(), r.kind()) {
        (DeclKind::Variable, _) | (_, DeclKind::Variable) => {
            panic!(
                "unsupported declaration kind: {from:?} ({}) -> {to:?} ({})",
                l.kind().describe(),
                r.kind().describe()
            )
        }
        (DeclKind::Constant(lv), DeclKind::Constant(rv)) => cx.constant(l.ty(), lv, r.ty(), rv),
        (DeclKind::Function { .. }, DeclKind::Function { .. }) => {
            Outcome::type_check(cx.function(l, r, false))
        }
        (DeclKind::TypeName, DeclKind::TypeName) => {
            Outcome::type_check(cx.same_type(l.ty(), r.ty()))
        }
        _ => Outcome::TypeMismatch("type mismatch"),
    };
    tracing::trace!(from = ?from, to = ?to, ?outcome, "compared pair");

    match outcome {
        Outcome::Equal => Ok(()),
        Outcome::TypeMismatch(detail) => Err(SymbolError::TypeMismatch {
            from: from.clone(),
            to: to.clone(),
            detail,
        }),
        Outcome::ValueMismatch => Err(SymbolError::ValueMismatch {
            from: from.clone(),
            to: to.clone(),
        }),
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Outcome {
    Equal,
    TypeMismatch(&'static str),
    ValueMismatch,
}

impl Outcome {
    fn type_check(equal: bool) -> Self {
        if equal {
            Outcome::Equal
        } else {
            Outcome::TypeMismatch("type mismatch")
        }
    }
}

/// Resolve `ty` through the unit's named types down to a non-named shape.
///
/// `None` if a named type is missing from the table or is defined in terms
/// of itself.
fn underlying<'a>(
    unit: &'a CompilationUnit,
    mut ty: &'a TypeDescriptor,
) -> Option<&'a TypeDescriptor> {
    let mut seen = FxHashSet::default();
    while let TypeDescriptor::Named(r) = ty {
        if !seen.insert(r) {
            return None;
        }
        ty = &unit.named_type(r)?.underlying;
    }
    Some(ty)
}

/// State of one pair comparison.
struct Comparer<'a> {
    from: &'a CompilationUnit,
    to: &'a CompilationUnit,
    /// Named pairs assumed identical (shape and methods).
    types: FxHashSet<(&'a TypeRef, &'a TypeRef)>,
    /// Named pairs assumed to have equal underlying shapes.
    shapes: FxHashSet<(&'a TypeRef, &'a TypeRef)>,
}

impl<'a> Comparer<'a> {
    fn new(from: &'a CompilationUnit, to: &'a CompilationUnit) -> Self {
        Comparer {
            from,
            to,
            types: FxHashSet::default(),
            shapes: FxHashSet::default(),
        }
    }

    fn constant(
        &mut self,
        lt: &'a TypeDescriptor,
        lv: &ConstValue,
        rt: &'a TypeDescriptor,
        rv: &ConstValue,
    ) -> Outcome {
        let basic = |unit: &CompilationUnit, ty: &TypeDescriptor| -> Option<BasicKind> {
            match underlying(unit, ty) {
                Some(TypeDescriptor::Basic(kind)) => Some(*kind),
                _ => None,
            }
        };
        match (basic(self.from, lt), basic(self.to, rt)) {
            (Some(a), Some(b)) if a == b => {
                if lv.exact_eq(rv) {
                    Outcome::Equal
                } else {
                    Outcome::ValueMismatch
                }
            }
            _ => Outcome::TypeMismatch("constant type mismatch"),
        }
    }

    /// Type identity for declared type names: named types must pair with
    /// named types and agree on methods as well as shape.
    fn same_type(&mut self, l: &'a TypeDescriptor, r: &'a TypeDescriptor) -> bool {
        match (l, r) {
            (TypeDescriptor::Named(a), TypeDescriptor::Named(b)) => self.named(a, b),
            (TypeDescriptor::Named(_), _) | (_, TypeDescriptor::Named(_)) => false,
            _ => self.shape(l, r),
        }
    }

    fn named(&mut self, a: &'a TypeRef, b: &'a TypeRef) -> bool {
        if !self.types.insert((a, b)) {
            return true;
        }
        match (self.from.named_type(a), self.to.named_type(b)) {
            (Some(x), Some(y)) => {
                self.shape(&x.underlying, &y.underlying)
                    && self.methods(&x.methods, &y.methods, true)
            }
            _ => false,
        }
    }

    /// Equality of underlying shapes; names of named types are looked
    /// through.
    fn shape(&mut self, l: &'a TypeDescriptor, r: &'a TypeDescriptor) -> bool {
        ensure_sufficient_stack(|| self.shape_inner(l, r))
    }

    fn shape_inner(&mut self, l: &'a TypeDescriptor, r: &'a TypeDescriptor) -> bool {
        use TypeDescriptor as T;

        match (l, r) {
            (T::Named(a), T::Named(b)) => {
                if !self.shapes.insert((a, b)) {
                    return true;
                }
                match (underlying(self.from, l), underlying(self.to, r)) {
                    (Some(x), Some(y)) => self.shape(x, y),
                    _ => false,
                }
            }
            (T::Named(_), _) | (_, T::Named(_)) => {
                match (underlying(self.from, l), underlying(self.to, r)) {
                    (Some(x), Some(y)) => self.shape(x, y),
                    _ => false,
                }
            }
            (T::Basic(a), T::Basic(b)) => a == b,
            (T::Struct(a), T::Struct(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.shape(&x.ty, &y.ty))
            }
            (T::Interface(a), T::Interface(b)) => self.methods(a, b, false),
            (T::Signature(a), T::Signature(b)) => self.signature(a, b),
            (T::Pointer(a), T::Pointer(b)) | (T::Slice(a), T::Slice(b)) => self.shape(a, b),
            (T::Array { len: la, elem: a }, T::Array { len: lb, elem: b }) => {
                la == lb && self.shape(a, b)
            }
            (T::Map { key: ka, value: va }, T::Map { key: kb, value: vb }) => {
                self.shape(ka, kb) && self.shape(va, vb)
            }
            _ => false,
        }
    }

    fn signature(&mut self, a: &'a Signature, b: &'a Signature) -> bool {
        a.variadic == b.variadic
            && self.params(&a.params, &b.params)
            && self.params(&a.results, &b.results)
    }

    fn params(&mut self, a: &'a [Param], b: &'a [Param]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.shape(&x.ty, &y.ty))
    }

    /// Index-wise method list equality.
    fn methods(&mut self, a: &'a [Declaration], b: &'a [Declaration], receiver: bool) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.function(x, y, receiver))
    }

    /// Signature equality; with `receiver`, both must also be methods.
    fn function(&mut self, l: &'a Declaration, r: &'a Declaration, receiver: bool) -> bool {
        match (l.ty().as_signature(), r.ty().as_signature()) {
            (Some(a), Some(b)) => {
                self.signature(a, b) && (!receiver || (l.has_receiver() && r.has_receiver()))
            }
            _ => false,
        }
    }
}
