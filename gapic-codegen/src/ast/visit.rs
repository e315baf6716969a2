//! Symbol collection over a compilation unit.
//!
//! The writer computes imports from what this walk finds, so every node that
//! can name a [`Symbol`] must be visited here.

use super::{
    Block, ClassKind, CompilationUnit, Expr, Generic, Item, MethodDecl, Pattern, Stmt, Symbol,
    TypeRef, VariantKind,
};

/// Every symbol referenced by `unit`, in order of first appearance, with
/// repeats.
///
/// Re-exports are skipped: they spell out their own path.
pub fn referenced_symbols(unit: &CompilationUnit) -> Vec<&Symbol> {
    let mut collector = SymbolCollector::default();
    for item in &unit.items {
        collector.item(item);
    }
    collector.symbols
}

#[derive(Default)]
struct SymbolCollector<'a> {
    symbols: Vec<&'a Symbol>,
}

impl<'a> SymbolCollector<'a> {
    fn item(&mut self, item: &'a Item) {
        match item {
            Item::Class(class) => {
                self.symbols.extend(&class.derives);
                match &class.kind {
                    ClassKind::Named(fields) => fields.iter().for_each(|f| self.ty(&f.ty)),
                    ClassKind::Tuple(types) => types.iter().for_each(|t| self.ty(t)),
                    ClassKind::Unit => {}
                }
            }
            Item::Trait(t) => {
                t.supertraits.iter().for_each(|s| self.ty(s));
                t.methods.iter().for_each(|m| self.method(m));
            }
            Item::Enum(e) => {
                self.symbols.extend(&e.derives);
                for variant in &e.variants {
                    match &variant.kind {
                        VariantKind::Unit => {}
                        VariantKind::Tuple(types) => types.iter().for_each(|t| self.ty(t)),
                        VariantKind::Named(fields) => fields.iter().for_each(|f| self.ty(&f.ty)),
                    }
                }
            }
            Item::Impl(imp) => {
                self.generics(&imp.generics);
                if let Some(trait_ref) = &imp.trait_ref {
                    self.ty(trait_ref);
                }
                self.ty(&imp.target);
                imp.assoc_types.iter().for_each(|(_, ty)| self.ty(ty));
                imp.methods.iter().for_each(|m| self.method(m));
            }
            Item::Function(f) => self.method(f),
            Item::Const(c) => {
                self.ty(&c.ty);
                self.expr(&c.value);
            }
            Item::TypeAlias(alias) => self.ty(&alias.ty),
            Item::Module(_) | Item::ReExport(_) => {}
        }
    }

    fn generics(&mut self, generics: &'a [Generic]) {
        for generic in generics {
            generic.bounds.iter().for_each(|b| self.ty(b));
        }
    }

    fn method(&mut self, method: &'a MethodDecl) {
        self.generics(&method.generics);
        method.params.iter().for_each(|p| self.ty(&p.ty));
        if let Some(returns) = &method.returns {
            self.ty(returns);
        }
        if let Some(body) = &method.body {
            self.block(body);
        }
    }

    fn ty(&mut self, ty: &'a TypeRef) {
        match ty {
            TypeRef::Named {
                symbol,
                args,
                bindings,
            } => {
                self.symbols.push(symbol);
                args.iter().for_each(|a| self.ty(a));
                bindings.iter().for_each(|(_, b)| self.ty(b));
            }
            TypeRef::Reference { inner, .. } | TypeRef::Slice(inner) => self.ty(inner),
            TypeRef::Tuple(items) | TypeRef::Dyn(items) | TypeRef::ImplTrait(items) => {
                items.iter().for_each(|t| self.ty(t))
            }
            TypeRef::Primitive(_) | TypeRef::SelfType | TypeRef::Generic(_) => {}
        }
    }

    fn block(&mut self, block: &'a Block) {
        for stmt in &block.stmts {
            match stmt {
                Stmt::Let { pattern, ty, value } => {
                    self.pattern(pattern);
                    if let Some(ty) = ty {
                        self.ty(ty);
                    }
                    if let Some(value) = value {
                        self.expr(value);
                    }
                }
                Stmt::Expr(expr) | Stmt::Tail(expr) => self.expr(expr),
                Stmt::Comment(_) => {}
            }
        }
    }

    fn pattern(&mut self, pattern: &'a Pattern) {
        match pattern {
            Pattern::TupleStruct { path, fields } => {
                self.symbols.push(path);
                fields.iter().for_each(|f| self.pattern(f));
            }
            Pattern::Struct { path, .. } | Pattern::Path(path) => self.symbols.push(path),
            Pattern::Tuple(items) | Pattern::Slice(items) => {
                items.iter().for_each(|p| self.pattern(p))
            }
            Pattern::Ident { .. } | Pattern::Wildcard | Pattern::Lit(_) => {}
        }
    }

    fn expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Lit(_) | Expr::Local(_) | Expr::SelfValue => {}
            Expr::Path(symbol) => self.symbols.push(symbol),
            Expr::Assoc { ty, .. } => self.ty(ty),
            Expr::Field { base, .. } => self.expr(base),
            Expr::MethodCall {
                receiver,
                turbofish,
                args,
                ..
            } => {
                self.expr(receiver);
                turbofish.iter().for_each(|t| self.ty(t));
                args.iter().for_each(|a| self.expr(a));
            }
            Expr::Call { func, args } => {
                self.expr(func);
                args.iter().for_each(|a| self.expr(a));
            }
            Expr::Macro { args, .. } | Expr::Tuple(args) | Expr::Array(args) => {
                args.iter().for_each(|a| self.expr(a))
            }
            Expr::StructLit { ty, fields, rest } => {
                self.ty(ty);
                fields.iter().for_each(|(_, value)| self.expr(value));
                if let Some(rest) = rest {
                    self.expr(rest);
                }
            }
            Expr::Ref { expr, .. } | Expr::Try(expr) | Expr::Unary { expr, .. } => self.expr(expr),
            Expr::Closure { params, body, .. } => {
                params.iter().for_each(|p| self.pattern(p));
                self.expr(body);
            }
            Expr::Binary { lhs, rhs, .. } => {
                self.expr(lhs);
                self.expr(rhs);
            }
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expr(cond);
                self.block(then_branch);
                if let Some(branch) = else_branch {
                    self.expr(branch);
                }
            }
            Expr::IfLet {
                pattern,
                expr,
                then_branch,
                else_branch,
            } => {
                self.pattern(pattern);
                self.expr(expr);
                self.block(then_branch);
                if let Some(branch) = else_branch {
                    self.expr(branch);
                }
            }
            Expr::Match { expr, arms } => {
                self.expr(expr);
                for arm in arms {
                    self.pattern(&arm.pattern);
                    if let Some(guard) = &arm.guard {
                        self.expr(guard);
                    }
                    self.expr(&arm.body);
                }
            }
            Expr::ForLoop {
                pattern,
                iter,
                body,
            } => {
                self.pattern(pattern);
                self.expr(iter);
                self.block(body);
            }
            Expr::Block(block) => self.block(block),
            Expr::Return(value) => {
                if let Some(value) = value {
                    self.expr(value);
                }
            }
            Expr::Assign { target, value } => {
                self.expr(target);
                self.expr(value);
            }
            Expr::Cast { expr, ty } => {
                self.expr(expr);
                self.ty(ty);
            }
        }
    }
}
