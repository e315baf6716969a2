//! Symbols and type references.

use std::fmt;

use serde::Serialize;

/// Names the standard prelude brings into scope, with the module each lives in.
///
/// These are rendered bare and never imported unless a clash forces
/// qualification.
const PRELUDE: &[(&str, &str)] = &[
    ("AsRef", "std::convert"),
    ("Box", "std::boxed"),
    ("Clone", "std::clone"),
    ("Copy", "std::marker"),
    ("Default", "std::default"),
    ("Eq", "std::cmp"),
    ("Err", "std::result::Result"),
    ("FnMut", "std::ops"),
    ("From", "std::convert"),
    ("Into", "std::convert"),
    ("IntoIterator", "std::iter"),
    ("Iterator", "std::iter"),
    ("None", "std::option::Option"),
    ("Ok", "std::result::Result"),
    ("Option", "std::option"),
    ("Ord", "std::cmp"),
    ("PartialEq", "std::cmp"),
    ("PartialOrd", "std::cmp"),
    ("Result", "std::result"),
    ("Send", "std::marker"),
    ("Some", "std::option::Option"),
    ("String", "std::string"),
    ("Sync", "std::marker"),
    ("ToString", "std::string"),
    ("Vec", "std::vec"),
];

/// A named item together with the module that declares it.
///
/// An empty module marks a name declared in the unit being written (or a
/// generic parameter, or `Self`); such symbols are never imported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Symbol {
    pub module: Vec<String>,
    pub name: String,
}

impl Symbol {
    pub fn new<I, S>(module: I, name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module: module.into_iter().map(Into::into).collect(),
            name: name.into(),
        }
    }

    /// Split a `::`-separated path: `std::sync::Arc`.
    pub fn path(path: &str) -> Self {
        match path.rsplit_once("::") {
            Some((module, name)) => Self::new(module.split("::"), name),
            None => Self::local(path),
        }
    }

    /// A name declared in the current unit.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            module: Vec::new(),
            name: name.into(),
        }
    }

    /// A prelude name: `Option`, `Vec`, `Ok`.
    ///
    /// Names missing from the prelude table are treated as local.
    pub fn prelude(name: &str) -> Self {
        match PRELUDE.iter().find(|(n, _)| *n == name) {
            Some((_, module)) => Self::new(module.split("::"), name),
            None => Self::local(name),
        }
    }

    /// A built-in derive macro: `Debug`, `Clone`.
    ///
    /// `Debug` and `Hash` are only preluded as derives, so derive names are
    /// kept apart from the trait paths and never imported.
    pub fn derive(name: &str) -> Self {
        Self::local(name)
    }

    pub fn is_local(&self) -> bool {
        self.module.is_empty()
    }

    pub fn is_prelude(&self) -> bool {
        PRELUDE
            .iter()
            .any(|(name, module)| *name == self.name && self.module_path() == *module)
    }

    /// First module segment: `std`, `crate`, a crate name.
    pub fn root(&self) -> Option<&str> {
        self.module.first().map(String::as_str)
    }

    /// The module as a `::`-separated path.
    pub fn module_path(&self) -> String {
        self.module.join("::")
    }

    /// The fully qualified path.
    pub fn qualified(&self) -> String {
        if self.module.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.module_path(), self.name)
        }
    }

    /// A symbol nested one level below this one: `Self` -> `Self::Shelf`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut module = self.module.clone();
        module.push(self.name.clone());
        Self {
            module,
            name: name.into(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Primitive {
    Bool,
    I32,
    I64,
    U8,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Char,
    Str,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::Str => "str",
        }
    }
}

/// A fully resolved type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeRef {
    /// `Arc<dyn EchoStub>`, `Iterator<Item = T>`.
    Named {
        symbol: Symbol,
        args: Vec<TypeRef>,
        bindings: Vec<(String, TypeRef)>,
    },
    Primitive(Primitive),
    Reference {
        mutable: bool,
        inner: Box<TypeRef>,
    },
    Slice(Box<TypeRef>),
    /// The empty tuple is `()`.
    Tuple(Vec<TypeRef>),
    /// `dyn A + B`.
    Dyn(Vec<TypeRef>),
    /// `impl A + B`; only valid in parameter and return position.
    ImplTrait(Vec<TypeRef>),
    SelfType,
    /// A generic parameter in scope.
    Generic(String),
}

impl TypeRef {
    pub fn named(symbol: Symbol) -> Self {
        Self::Named {
            symbol,
            args: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// A named type from a `::` path.
    pub fn path(path: &str) -> Self {
        Self::named(Symbol::path(path))
    }

    pub fn prelude(name: &str) -> Self {
        Self::named(Symbol::prelude(name))
    }

    /// Add a generic argument to a named type; other variants are returned unchanged.
    pub fn arg(mut self, ty: TypeRef) -> Self {
        if let Self::Named { args, .. } = &mut self {
            args.push(ty);
        }
        self
    }

    /// Add an associated type binding to a named type.
    pub fn binding(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        if let Self::Named { bindings, .. } = &mut self {
            bindings.push((name.into(), ty));
        }
        self
    }

    pub fn unit() -> Self {
        Self::Tuple(Vec::new())
    }

    pub fn string() -> Self {
        Self::prelude("String")
    }

    pub fn str_ref() -> Self {
        Self::reference(Self::Primitive(Primitive::Str))
    }

    pub fn reference(inner: TypeRef) -> Self {
        Self::Reference {
            mutable: false,
            inner: Box::new(inner),
        }
    }

    pub fn reference_mut(inner: TypeRef) -> Self {
        Self::Reference {
            mutable: true,
            inner: Box::new(inner),
        }
    }

    pub fn option(inner: TypeRef) -> Self {
        Self::prelude("Option").arg(inner)
    }

    pub fn vec(inner: TypeRef) -> Self {
        Self::prelude("Vec").arg(inner)
    }

    pub fn boxed(inner: TypeRef) -> Self {
        Self::prelude("Box").arg(inner)
    }

    pub fn result(ok: TypeRef, err: TypeRef) -> Self {
        Self::prelude("Result").arg(ok).arg(err)
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Tuple(items) if items.is_empty())
    }

    /// The symbol of a named type.
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Named { symbol, .. } => Some(symbol),
            _ => None,
        }
    }

    /// Whether `impl Trait` appears anywhere inside this type.
    pub fn contains_impl_trait(&self) -> bool {
        match self {
            Self::ImplTrait(_) => true,
            Self::Named { args, bindings, .. } => {
                args.iter().any(Self::contains_impl_trait)
                    || bindings.iter().any(|(_, ty)| ty.contains_impl_trait())
            }
            Self::Reference { inner, .. } | Self::Slice(inner) => inner.contains_impl_trait(),
            Self::Tuple(items) | Self::Dyn(items) => items.iter().any(Self::contains_impl_trait),
            Self::Primitive(_) | Self::SelfType | Self::Generic(_) => false,
        }
    }
}

impl From<Primitive> for TypeRef {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<Symbol> for TypeRef {
    fn from(symbol: Symbol) -> Self {
        Self::named(symbol)
    }
}
