//! Type descriptors.
//!
//! `TypeDescriptor` is an owned tree. Named types are never embedded: a
//! `Named` node is a `TypeRef` (canonical path + name) that is looked up in
//! the type table of the owning `CompilationUnit`. This keeps the tree
//! acyclic while still describing self-referential and mutually recursive
//! named types.

use std::fmt;

use crate::basic::BasicKind;
use crate::decl::Declaration;

/// Reference to a named type by canonical path and name.
#[derive(Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct TypeRef {
    pub path: String,
    pub name: String,
}

impl TypeRef {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef {
            path: path.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            // universe scope (`error`, `any`)
            return f.write_str(&self.name);
        }
        write!(f, "{}.{}", self.path, self.name)
    }
}

/// Definition of a named type: its underlying shape and its method set.
///
/// Methods are `Function` declarations with a receiver, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedType {
    pub underlying: TypeDescriptor,
    pub methods: Vec<Declaration>,
}

impl NamedType {
    pub fn new(underlying: TypeDescriptor) -> Self {
        NamedType {
            underlying,
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: Declaration) -> Self {
        self.methods.push(method);
        self
    }
}

/// A struct field. The name is kept for rendering only.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// A function parameter or result. The name is kept for rendering only.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Option<String>,
    pub ty: TypeDescriptor,
}

impl Param {
    pub fn named(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Param {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: TypeDescriptor) -> Self {
        Param { name: None, ty }
    }
}

/// Function signature.
///
/// When `variadic` is set, the last parameter is a slice of the variadic
/// element type.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
    pub variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<Param>, results: Vec<Param>) -> Self {
        Signature {
            params,
            results,
            variadic: false,
        }
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// Shape of a type.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDescriptor {
    /// Predeclared type.
    Basic(BasicKind),
    /// Reference to a named type in the owning unit's type table.
    Named(TypeRef),
    /// Struct with ordered fields.
    Struct(Vec<Field>),
    /// Interface with an ordered method list.
    Interface(Vec<Declaration>),
    /// Function type.
    Signature(Signature),
    Pointer(Box<TypeDescriptor>),
    Slice(Box<TypeDescriptor>),
    Array { len: u64, elem: Box<TypeDescriptor> },
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn named(path: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDescriptor::Named(TypeRef::new(path, name))
    }

    pub fn pointer(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Pointer(Box::new(elem))
    }

    pub fn slice(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Slice(Box::new(elem))
    }

    pub fn array(len: u64, elem: TypeDescriptor) -> Self {
        TypeDescriptor::Array {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// The signature, if this is a function type.
    pub fn as_signature(&self) -> Option<&Signature> {
        match self {
            TypeDescriptor::Signature(sig) => Some(sig),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Basic(kind) => write!(f, "{kind}"),
            TypeDescriptor::Named(r) => write!(f, "{r}"),
            TypeDescriptor::Struct(fields) => {
                f.write_str("struct{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{} {}", field.name, field.ty)?;
                }
                f.write_str("}")
            }
            TypeDescriptor::Interface(methods) => {
                f.write_str("interface{")?;
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    f.write_str(method.name())?;
                    match method.ty().as_signature() {
                        Some(sig) => fmt_signature(sig, f)?,
                        None => write!(f, " {}", method.ty())?,
                    }
                }
                f.write_str("}")
            }
            TypeDescriptor::Signature(sig) => {
                f.write_str("func")?;
                fmt_signature(sig, f)
            }
            TypeDescriptor::Pointer(elem) => write!(f, "*{elem}"),
            TypeDescriptor::Slice(elem) => write!(f, "[]{elem}"),
            TypeDescriptor::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeDescriptor::Map { key, value } => write!(f, "map[{key}]{value}"),
        }
    }
}

fn fmt_params(params: &[Param], variadic: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if let Some(name) = &param.name {
            write!(f, "{name} ")?;
        }
        match (&param.ty, variadic && i + 1 == params.len()) {
            (TypeDescriptor::Slice(elem), true) => write!(f, "...{elem}")?,
            (ty, _) => write!(f, "{ty}")?,
        }
    }
    Ok(())
}

fn fmt_signature(sig: &Signature, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("(")?;
    fmt_params(&sig.params, sig.variadic, f)?;
    f.write_str(")")?;
    match sig.results.as_slice() {
        [] => Ok(()),
        [single] if single.name.is_none() => write!(f, " {}", single.ty),
        results => {
            f.write_str(" (")?;
            fmt_params(results, false, f)?;
            f.write_str(")")
        }
    }
}
