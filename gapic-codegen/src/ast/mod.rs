//! The closed syntax tree composers produce and writers render.
//!
//! ```text
//! CompilationUnit → Item → MethodDecl → Block → Stmt → Expr / Pattern
//!                                                        ↘ TypeRef → Symbol
//! ```
//!
//! Nodes carry no references back into the semantic model: every type is a
//! [`TypeRef`] and every name outside the unit is a [`Symbol`] with its
//! module path, so a writer needs nothing but the tree.

mod expr;
mod item;
mod types;
mod unit;
mod visit;

pub use expr::{BinOp, Block, Expr, Lit, MatchArm, Pattern, Stmt, UnOp};
pub use item::{
    Class, ClassKind, Const, Enum, FieldDecl, Generic, Impl, Item, MethodDecl, Module, Param,
    ReExport, Receiver, Trait, TypeAlias, Variant, VariantKind, Visibility,
};
pub use types::{Primitive, Symbol, TypeRef};
pub use unit::CompilationUnit;
pub use visit::referenced_symbols;
