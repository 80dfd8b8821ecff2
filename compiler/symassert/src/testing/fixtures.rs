//! The `remotepkg` / `localpkg` fixture pair.
//!
//! `remotepkg` is the authoritative package. Its constants and aliases are
//! always compiled; its named types need the `linux` tag and its functions
//! need `linux` and `amd64`. `localpkg` mirrors it with its own named types
//! and always compiles everything. Under the `mismatch` tag, `localpkg` adds
//! `Mismatch*` constants holding different values and an extra method on
//! `Method`.

use std::path::PathBuf;
use std::sync::Arc;

use symassert_ir::{
    BasicKind, BigInt, BigRational, ConstValue, Declaration, Field, ModuleInfo, NamedType, Param,
    Signature, TypeDescriptor, TypeRef, UnitBuilder,
};
use symassert_loader::{BuildTags, LoadCache, Loader};

use super::mocks::MockFrontend;

pub const MODULE_PATH: &str = "example.com/symassert";
pub const MODULE_DIR: &str = "/src/symassert";

pub const REMOTE_PATH: &str = "example.com/symassert/internal/remotepkg";
pub const REMOTE_LOCAL: &str = "./internal/remotepkg";
pub const LOCAL_PATH: &str = "example.com/symassert/internal/localpkg";
pub const LOCAL_LOCAL: &str = "./internal/localpkg";

/// Package of the types `remotepkg` aliases.
pub const BINARY_PATH: &str = "encoding/binary";

/// Constants declared by both packages.
pub const CONSTANTS: [&str; 17] = [
    "ConstUntypedBool",
    "ConstBool",
    "ConstUntypedRune",
    "ConstRune",
    "ConstUntypedInt",
    "ConstInt",
    "ConstInt64",
    "ConstUint",
    "ConstUint64",
    "ConstUntypedFloat",
    "ConstFloat32",
    "ConstFloat64",
    "ConstUntypedComplex",
    "ConstComplex64",
    "ConstComplex128",
    "ConstUntypedString",
    "ConstString",
];

/// Type names declared by both packages (`remotepkg` needs `linux`).
pub const TYPES: [&str; 13] = [
    "Bool",
    "Rune",
    "Int",
    "Int64",
    "Uint",
    "Uint64",
    "Float32",
    "Float64",
    "Complex64",
    "Complex128",
    "String",
    "Struct",
    "Interface",
];

/// Functions and method-carrying types (`remotepkg` needs `linux` and
/// `amd64`).
pub const FUNCS: [&str; 2] = ["Func", "Method"];

/// Files of the `remotepkg` directory with their build constraints.
pub const REMOTE_DIR_FILES: [(&str, &[&str]); 5] = [
    ("alias.go", &[]),
    ("consts.go", &[]),
    ("funcs_linux_amd64.go", &["linux", "amd64"]),
    ("types_darwin.go", &["darwin"]),
    ("types_linux.go", &["linux"]),
];

/// The linux/amd64 build variant of `remotepkg`, as local file paths.
pub fn remote_files() -> Vec<String> {
    ["alias.go", "consts.go", "funcs_linux_amd64.go", "types_linux.go"]
        .into_iter()
        .map(|name| format!("{REMOTE_LOCAL}/{name}"))
        .collect()
}

/// Directory of `remotepkg` inside the module.
pub fn remote_dir() -> PathBuf {
    PathBuf::from(MODULE_DIR).join("internal/remotepkg")
}

/// A front-end serving both packages and the `remotepkg` directory.
pub fn frontend() -> MockFrontend {
    MockFrontend::new()
        .package(REMOTE_PATH, remotepkg)
        .local_path(REMOTE_LOCAL, REMOTE_PATH)
        .package(LOCAL_PATH, localpkg)
        .local_path(LOCAL_LOCAL, LOCAL_PATH)
        .directory(remote_dir(), &REMOTE_DIR_FILES)
        .directory(REMOTE_LOCAL, &REMOTE_DIR_FILES)
}

/// The fixture front-end and a loader over it with a fresh cache.
pub fn frontend_and_loader() -> (Arc<MockFrontend>, Loader) {
    let frontend = Arc::new(frontend());
    let loader = Loader::new(frontend.clone()).with_cache(Arc::new(LoadCache::new()));
    (frontend, loader)
}

fn basic(kind: BasicKind) -> TypeDescriptor {
    TypeDescriptor::Basic(kind)
}

fn rational(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

fn float(n: i64) -> ConstValue {
    ConstValue::Float(rational(n))
}

fn complex(re: i64, im: i64) -> ConstValue {
    ConstValue::complex(rational(re), rational(im))
}

/// The predeclared `error` interface.
pub fn error_type() -> (TypeRef, NamedType) {
    let error = Declaration::method(
        "Error",
        Signature::new(Vec::new(), vec![Param::unnamed(basic(BasicKind::String))]),
    );
    (
        TypeRef::new("", "error"),
        NamedType::new(TypeDescriptor::Interface(vec![error])),
    )
}

/// `func(b Bool, r Rune, i Int) error` over the named types of `path`.
pub fn func_signature(path: &str) -> Signature {
    Signature::new(
        vec![
            Param::named("b", TypeDescriptor::named(path, "Bool")),
            Param::named("r", TypeDescriptor::named(path, "Rune")),
            Param::named("i", TypeDescriptor::named(path, "Int")),
        ],
        vec![Param::unnamed(TypeDescriptor::named("", "error"))],
    )
}

const BASIC_TYPES: [(&str, BasicKind); 11] = [
    ("Bool", BasicKind::Bool),
    ("Rune", BasicKind::RUNE),
    ("Int", BasicKind::Int),
    ("Int64", BasicKind::Int64),
    ("Uint", BasicKind::Uint),
    ("Uint64", BasicKind::Uint64),
    ("Float32", BasicKind::Float32),
    ("Float64", BasicKind::Float64),
    ("Complex64", BasicKind::Complex64),
    ("Complex128", BasicKind::Complex128),
    ("String", BasicKind::String),
];

/// The seventeen `Const*` declarations. `bool_type` is the type of
/// `ConstBool`.
fn constants(mut builder: UnitBuilder, bool_type: TypeDescriptor) -> UnitBuilder {
    let decls = [
        ("ConstUntypedBool", basic(BasicKind::UntypedBool), ConstValue::from(true)),
        ("ConstBool", bool_type, ConstValue::from(true)),
        ("ConstUntypedRune", basic(BasicKind::UntypedRune), ConstValue::int(97)),
        ("ConstRune", basic(BasicKind::RUNE), ConstValue::int(97)),
        ("ConstUntypedInt", basic(BasicKind::UntypedInt), ConstValue::int(1)),
        ("ConstInt", basic(BasicKind::Int), ConstValue::int(1)),
        ("ConstInt64", basic(BasicKind::Int64), ConstValue::int(1)),
        ("ConstUint", basic(BasicKind::Uint), ConstValue::int(1)),
        ("ConstUint64", basic(BasicKind::Uint64), ConstValue::int(1)),
        ("ConstUntypedFloat", basic(BasicKind::UntypedFloat), float(1)),
        ("ConstFloat32", basic(BasicKind::Float32), float(1)),
        ("ConstFloat64", basic(BasicKind::Float64), float(1)),
        ("ConstUntypedComplex", basic(BasicKind::UntypedComplex), complex(1, 1)),
        ("ConstComplex64", basic(BasicKind::Complex64), complex(1, 1)),
        ("ConstComplex128", basic(BasicKind::Complex128), complex(1, 1)),
        ("ConstUntypedString", basic(BasicKind::UntypedString), ConstValue::from("string")),
        ("ConstString", basic(BasicKind::String), ConstValue::from("string")),
    ];
    for (name, ty, value) in decls {
        builder = builder.declare(Declaration::constant(name, ty, value));
    }
    builder
}

/// `Bool` through `String`, `Struct` and `Interface`, declared in `path`.
fn types(mut builder: UnitBuilder, path: &str) -> UnitBuilder {
    for (name, kind) in BASIC_TYPES {
        builder = builder
            .declare(Declaration::type_name(name, TypeDescriptor::named(path, name)))
            .named_type(TypeRef::new(path, name), NamedType::new(basic(kind)));
    }

    let fields = BASIC_TYPES
        .iter()
        .map(|&(name, kind)| Field::new(name, basic(kind)))
        .collect();
    let interface =
        TypeDescriptor::Interface(vec![Declaration::method("Method", Signature::default())]);
    builder
        .declare(Declaration::type_name("Struct", TypeDescriptor::named(path, "Struct")))
        .named_type(TypeRef::new(path, "Struct"), NamedType::new(TypeDescriptor::Struct(fields)))
        .declare(Declaration::type_name("Interface", TypeDescriptor::named(path, "Interface")))
        .named_type(TypeRef::new(path, "Interface"), NamedType::new(interface))
}

/// `Func`, and `Method` with its method set.
fn funcs(builder: UnitBuilder, path: &str, extra_methods: Vec<Declaration>) -> UnitBuilder {
    let (error_ref, error_def) = error_type();
    let mut method = NamedType::new(TypeDescriptor::Struct(Vec::new()))
        .with_method(Declaration::method("Method", func_signature(path)));
    for extra in extra_methods {
        method = method.with_method(extra);
    }
    builder
        .named_type(error_ref, error_def)
        .declare(Declaration::function("Func", func_signature(path)))
        .declare(Declaration::type_name("Method", TypeDescriptor::named(path, "Method")))
        .named_type(TypeRef::new(path, "Method"), method)
}

/// Declarations aliasing `encoding/binary`.
fn aliases(builder: UnitBuilder) -> UnitBuilder {
    let bytes = || Param::unnamed(TypeDescriptor::slice(basic(BasicKind::BYTE)));
    let put = |name: &str, kind| {
        Declaration::method(
            name,
            Signature::new(vec![bytes(), Param::unnamed(basic(kind))], Vec::new()),
        )
    };
    let get = |name: &str, kind| {
        Declaration::method(name, Signature::new(vec![bytes()], vec![Param::unnamed(basic(kind))]))
    };
    let byte_order = TypeDescriptor::Interface(vec![
        put("PutUint16", BasicKind::Uint16),
        put("PutUint32", BasicKind::Uint32),
        put("PutUint64", BasicKind::Uint64),
        Declaration::method(
            "String",
            Signature::new(Vec::new(), vec![Param::unnamed(basic(BasicKind::String))]),
        ),
        get("Uint16", BasicKind::Uint16),
        get("Uint32", BasicKind::Uint32),
        get("Uint64", BasicKind::Uint64),
    ]);

    builder
        .declare(Declaration::type_name(
            "AliasType",
            TypeDescriptor::named(BINARY_PATH, "ByteOrder"),
        ))
        .named_type(TypeRef::new(BINARY_PATH, "ByteOrder"), NamedType::new(byte_order))
        .declare(Declaration::constant(
            "AliasConst",
            basic(BasicKind::UntypedInt),
            ConstValue::int(10),
        ))
        .declare(Declaration::variable(
            "AliasVar",
            TypeDescriptor::named(BINARY_PATH, "littleEndian"),
        ))
        .named_type(
            TypeRef::new(BINARY_PATH, "littleEndian"),
            NamedType::new(TypeDescriptor::Struct(Vec::new())),
        )
}

/// The authoritative package.
pub fn remotepkg(tags: &BuildTags) -> UnitBuilder {
    let mut builder = UnitBuilder::new(REMOTE_PATH, "remotepkg")
        .module(ModuleInfo::new(MODULE_PATH, MODULE_DIR));
    builder = constants(builder, basic(BasicKind::Bool));
    builder = aliases(builder);
    if tags.contains("linux") {
        builder = types(builder, REMOTE_PATH);
        if tags.contains("amd64") {
            builder = funcs(builder, REMOTE_PATH, Vec::new());
        }
    }
    builder
}

/// The local mirror.
pub fn localpkg(tags: &BuildTags) -> UnitBuilder {
    let mut builder = UnitBuilder::new(LOCAL_PATH, "localpkg")
        .module(ModuleInfo::new(MODULE_PATH, MODULE_DIR));
    builder = constants(builder, TypeDescriptor::named(LOCAL_PATH, "Bool"));
    builder = types(builder, LOCAL_PATH);

    let mut extra = Vec::new();
    if tags.contains("mismatch") {
        builder = mismatches(builder);
        extra.push(Declaration::method("MismatchMethod", Signature::default()));
    }
    funcs(builder, LOCAL_PATH, extra)
}

/// Constants whose values differ from their `Const*` counterparts.
fn mismatches(mut builder: UnitBuilder) -> UnitBuilder {
    let decls = [
        ("MismatchUntypedBool", basic(BasicKind::UntypedBool), ConstValue::from(false)),
        ("MismatchBool", basic(BasicKind::Bool), ConstValue::from(false)),
        ("MismatchUntypedRune", basic(BasicKind::UntypedRune), ConstValue::int(98)),
        ("MismatchRune", basic(BasicKind::RUNE), ConstValue::int(98)),
        ("MismatchUntypedInt", basic(BasicKind::UntypedInt), ConstValue::int(-1)),
        ("MismatchInt", basic(BasicKind::Int), ConstValue::int(-1)),
        ("MismatchUint", basic(BasicKind::Uint), ConstValue::int(2)),
        ("MismatchUntypedFloat", basic(BasicKind::UntypedFloat), float(2)),
        ("MismatchFloat64", basic(BasicKind::Float64), float(2)),
        ("MismatchUntypedComplex", basic(BasicKind::UntypedComplex), complex(2, 2)),
        ("MismatchComplex128", basic(BasicKind::Complex128), complex(2, 2)),
    ];
    for (name, ty, value) in decls {
        builder = builder.declare(Declaration::constant(name, ty, value));
    }
    builder
}
