//! Top-level declarations.

use crate::ty::{Signature, TypeDescriptor};
use crate::value::ConstValue;

/// What a declaration declares.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclKind {
    Constant(ConstValue),
    /// Function or method. Methods are bound to a named type.
    Function { has_receiver: bool },
    TypeName,
    /// Package-level variable. Loaded and resolvable, but not comparable.
    Variable,
}

impl DeclKind {
    /// Short name of the kind, for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            DeclKind::Constant(_) => "constant",
            DeclKind::Function {
                has_receiver: false,
            } => "function",
            DeclKind::Function { has_receiver: true } => "method",
            DeclKind::TypeName => "type",
            DeclKind::Variable => "variable",
        }
    }
}

/// A loaded declaration. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    name: String,
    ty: TypeDescriptor,
    kind: DeclKind,
}

impl Declaration {
    /// A constant of type `ty`.
    pub fn constant(name: impl Into<String>, ty: TypeDescriptor, value: ConstValue) -> Self {
        Declaration {
            name: name.into(),
            ty,
            kind: DeclKind::Constant(value),
        }
    }

    /// A free function.
    pub fn function(name: impl Into<String>, sig: Signature) -> Self {
        Declaration {
            name: name.into(),
            ty: TypeDescriptor::Signature(sig),
            kind: DeclKind::Function {
                has_receiver: false,
            },
        }
    }

    /// A method bound to a named type.
    pub fn method(name: impl Into<String>, sig: Signature) -> Self {
        Declaration {
            name: name.into(),
            ty: TypeDescriptor::Signature(sig),
            kind: DeclKind::Function { has_receiver: true },
        }
    }

    /// A type name. `ty` is usually `TypeDescriptor::Named` pointing at the
    /// declared type; an alias points at the aliased type instead.
    pub fn type_name(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Declaration {
            name: name.into(),
            ty,
            kind: DeclKind::TypeName,
        }
    }

    /// A package-level variable.
    pub fn variable(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Declaration {
            name: name.into(),
            ty,
            kind: DeclKind::Variable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn kind(&self) -> &DeclKind {
        &self.kind
    }

    /// The constant value, if this is a constant.
    pub fn value(&self) -> Option<&ConstValue> {
        match &self.kind {
            DeclKind::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// Whether this is a method bound to a named type.
    pub fn has_receiver(&self) -> bool {
        matches!(self.kind, DeclKind::Function { has_receiver: true })
    }
}
