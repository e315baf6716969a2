//! Declarations.

use serde::Serialize;

use super::{Block, Expr, Symbol, TypeRef};

/// Visibility of an item or field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Visibility {
    #[default]
    Public,
    Crate,
    Super,
    Private,
}

impl Visibility {
    /// The keyword prefix including its trailing space, or `""`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Public => "pub ",
            Self::Crate => "pub(crate) ",
            Self::Super => "pub(super) ",
            Self::Private => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Receiver {
    Owned,
    Ref,
    RefMut,
}

impl Receiver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owned => "self",
            Self::Ref => "&self",
            Self::RefMut => "&mut self",
        }
    }
}

/// A generic parameter with its bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generic {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A free function, an inherent or trait method, or a trait method signature.
///
/// Only trait declarations may leave `body` empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    pub doc: Option<String>,
    pub visibility: Visibility,
    pub attrs: Vec<String>,
    pub receiver: Option<Receiver>,
    pub generics: Vec<Generic>,
    pub params: Vec<Param>,
    pub returns: Option<TypeRef>,
    pub body: Option<Block>,
}

impl MethodDecl {
    /// A public function with no parameters, return type or body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            visibility: Visibility::Public,
            attrs: Vec::new(),
            receiver: None,
            generics: Vec::new(),
            params: Vec::new(),
            returns: None,
            body: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn doc_opt(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn generic(mut self, name: impl Into<String>, bounds: Vec<TypeRef>) -> Self {
        self.generics.push(Generic {
            name: name.into(),
            bounds,
        });
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(Param::new(name, ty));
        self
    }

    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.returns = Some(ty);
        self
    }

    pub fn body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDecl {
    pub name: String,
    pub doc: Option<String>,
    pub visibility: Visibility,
    pub ty: TypeRef,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            doc: None,
            visibility: Visibility::Public,
            ty,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClassKind {
    Named(Vec<FieldDecl>),
    Tuple(Vec<TypeRef>),
    Unit,
}

/// A struct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    pub name: String,
    pub doc: Option<String>,
    pub visibility: Visibility,
    pub derives: Vec<Symbol>,
    pub attrs: Vec<String>,
    pub kind: ClassKind,
}

impl Class {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            doc: None,
            visibility: Visibility::Public,
            derives: Vec::new(),
            attrs: Vec::new(),
            kind,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derive(mut self, symbol: Symbol) -> Self {
        self.derives.push(symbol);
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trait {
    pub name: String,
    pub doc: Option<String>,
    pub visibility: Visibility,
    pub supertraits: Vec<TypeRef>,
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VariantKind {
    Unit,
    Tuple(Vec<TypeRef>),
    Named(Vec<FieldDecl>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub name: String,
    pub doc: Option<String>,
    pub kind: VariantKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enum {
    pub name: String,
    pub doc: Option<String>,
    pub visibility: Visibility,
    pub derives: Vec<Symbol>,
    pub attrs: Vec<String>,
    pub variants: Vec<Variant>,
}

/// An `impl` block, inherent or for a trait.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Impl {
    pub generics: Vec<Generic>,
    pub trait_ref: Option<TypeRef>,
    pub target: TypeRef,
    pub assoc_types: Vec<(String, TypeRef)>,
    pub methods: Vec<MethodDecl>,
}

impl Impl {
    pub fn inherent(target: TypeRef) -> Self {
        Self {
            generics: Vec::new(),
            trait_ref: None,
            target,
            assoc_types: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn of_trait(trait_ref: TypeRef, target: TypeRef) -> Self {
        Self {
            trait_ref: Some(trait_ref),
            ..Self::inherent(target)
        }
    }

    pub fn assoc_type(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.assoc_types.push((name.into(), ty));
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = MethodDecl>) -> Self {
        self.methods.extend(methods);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Const {
    pub name: String,
    pub doc: Option<String>,
    pub visibility: Visibility,
    pub ty: TypeRef,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAlias {
    pub name: String,
    pub doc: Option<String>,
    pub visibility: Visibility,
    pub ty: TypeRef,
}

/// A `mod name;` declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub name: String,
    pub doc: Option<String>,
    pub visibility: Visibility,
}

/// A `pub use path;` re-export. Its symbol is written as given, never imported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReExport {
    pub visibility: Visibility,
    pub symbol: Symbol,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Item {
    Class(Class),
    Trait(Trait),
    Enum(Enum),
    Impl(Impl),
    Function(MethodDecl),
    Const(Const),
    TypeAlias(TypeAlias),
    Module(Module),
    ReExport(ReExport),
}

impl Item {
    /// The name this item declares in its module, if any.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Self::Class(c) => Some(&c.name),
            Self::Trait(t) => Some(&t.name),
            Self::Enum(e) => Some(&e.name),
            Self::Function(f) => Some(&f.name),
            Self::Const(c) => Some(&c.name),
            Self::TypeAlias(t) => Some(&t.name),
            Self::Module(m) => Some(&m.name),
            Self::ReExport(r) => Some(&r.symbol.name),
            Self::Impl(_) => None,
        }
    }
}
