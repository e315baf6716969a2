//! Items as Rust text.

use gapic_codegen::{
    WriterError,
    ast::{
        Class, ClassKind, Const, Enum, FieldDecl, Generic, Impl, Item, MethodDecl, Module,
        ReExport, Symbol, Trait, TypeAlias, Variant, VariantKind, Visibility,
    },
    builder::CodeBuilder,
};

use super::{
    MAX_WIDTH,
    expr::{ExprRenderer, check_ident},
    names::NameTable,
};

/// Where a method is declared; decides visibility and whether a body is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MethodSite {
    Free,
    Inherent,
    Trait,
    TraitImpl,
}

pub(crate) struct ItemRenderer<'a> {
    names: &'a NameTable,
}

impl<'a> ItemRenderer<'a> {
    pub(crate) fn new(names: &'a NameTable) -> Self {
        Self { names }
    }

    fn exprs(&self, context: &str) -> ExprRenderer<'a> {
        ExprRenderer::new(self.names, context)
    }

    pub(crate) fn item(&self, b: &mut CodeBuilder, item: &Item) -> Result<(), WriterError> {
        if let Some(name) = item.declared_name() {
            if !matches!(item, Item::ReExport(_)) {
                check_ident(name)?;
            }
        }
        match item {
            Item::Class(class) => self.class(b, class),
            Item::Trait(t) => self.trait_(b, t),
            Item::Enum(e) => self.enum_(b, e),
            Item::Impl(imp) => self.impl_(b, imp),
            Item::Function(f) => self.method(b, f, MethodSite::Free),
            Item::Const(c) => self.const_(b, c),
            Item::TypeAlias(alias) => self.type_alias(b, alias),
            Item::Module(m) => {
                self.module(b, m);
                Ok(())
            }
            Item::ReExport(r) => {
                self.re_export(b, r);
                Ok(())
            }
        }
    }

    fn doc(&self, b: &mut CodeBuilder, doc: Option<&str>) {
        if let Some(doc) = doc.filter(|d| !d.trim().is_empty()) {
            b.push_doc("///", doc, MAX_WIDTH);
        }
    }

    fn attributes(&self, b: &mut CodeBuilder, derives: &[Symbol], attrs: &[String]) {
        if !derives.is_empty() {
            let derives: Vec<String> = derives.iter().map(|d| self.names.resolve(d)).collect();
            b.push_line(&format!("#[derive({})]", derives.join(", ")));
        }
        for attr in attrs {
            b.push_line(&format!("#[{attr}]"));
        }
    }

    fn class(&self, b: &mut CodeBuilder, class: &Class) -> Result<(), WriterError> {
        self.doc(b, class.doc.as_deref());
        self.attributes(b, &class.derives, &class.attrs);
        let head = format!("{}struct {}", class.visibility.prefix(), class.name);
        match &class.kind {
            ClassKind::Unit => {
                b.push_line(&format!("{head};"));
            }
            ClassKind::Tuple(types) => {
                let exprs = self.exprs(&class.name);
                let mut fields = Vec::with_capacity(types.len());
                for ty in types {
                    if ty.contains_impl_trait() {
                        return Err(WriterError::ImplTraitInField(class.name.clone()));
                    }
                    fields.push(exprs.ty(ty));
                }
                b.push_line(&format!("{head}({});", fields.join(", ")));
            }
            ClassKind::Named(fields) if fields.is_empty() => {
                b.push_line(&format!("{head} {{}}"));
            }
            ClassKind::Named(fields) => {
                b.push_line(&format!("{head} {{"));
                b.push_indent();
                self.fields(b, &class.name, fields, true)?;
                b.push_dedent();
                b.push_line("}");
            }
        }
        Ok(())
    }

    /// Field lines, one per field; `with_visibility` is false inside enum variants.
    fn fields(
        &self,
        b: &mut CodeBuilder,
        owner: &str,
        fields: &[FieldDecl],
        with_visibility: bool,
    ) -> Result<(), WriterError> {
        let exprs = self.exprs(owner);
        for field in fields {
            check_ident(&field.name)?;
            if field.ty.contains_impl_trait() {
                return Err(WriterError::ImplTraitInField(format!("{owner}.{}", field.name)));
            }
            self.doc(b, field.doc.as_deref());
            let visibility = if with_visibility {
                field.visibility.prefix()
            } else {
                ""
            };
            b.push_line(&format!("{visibility}{}: {},", field.name, exprs.ty(&field.ty)));
        }
        Ok(())
    }

    fn trait_(&self, b: &mut CodeBuilder, t: &Trait) -> Result<(), WriterError> {
        self.doc(b, t.doc.as_deref());
        let exprs = self.exprs(&t.name);
        let mut head = format!("{}trait {}", t.visibility.prefix(), t.name);
        if !t.supertraits.is_empty() {
            let bounds: Vec<String> = t.supertraits.iter().map(|s| exprs.ty(s)).collect();
            head = format!("{head}: {}", bounds.join(" + "));
        }
        if t.methods.is_empty() {
            b.push_line(&format!("{head} {{}}"));
            return Ok(());
        }
        b.push_line(&format!("{head} {{"));
        b.push_indent();
        self.methods(b, &t.methods, MethodSite::Trait)?;
        b.push_dedent();
        b.push_line("}");
        Ok(())
    }

    fn enum_(&self, b: &mut CodeBuilder, e: &Enum) -> Result<(), WriterError> {
        self.doc(b, e.doc.as_deref());
        self.attributes(b, &e.derives, &e.attrs);
        b.push_line(&format!("{}enum {} {{", e.visibility.prefix(), e.name));
        b.push_indent();
        for variant in &e.variants {
            self.variant(b, &e.name, variant)?;
        }
        b.push_dedent();
        b.push_line("}");
        Ok(())
    }

    fn variant(&self, b: &mut CodeBuilder, owner: &str, v: &Variant) -> Result<(), WriterError> {
        check_ident(&v.name)?;
        self.doc(b, v.doc.as_deref());
        match &v.kind {
            VariantKind::Unit => {
                b.push_line(&format!("{},", v.name));
            }
            VariantKind::Tuple(types) => {
                let exprs = self.exprs(owner);
                let types: Vec<String> = types.iter().map(|t| exprs.ty(t)).collect();
                b.push_line(&format!("{}({}),", v.name, types.join(", ")));
            }
            VariantKind::Named(fields) => {
                b.push_line(&format!("{} {{", v.name));
                b.push_indent();
                self.fields(b, &format!("{owner}::{}", v.name), fields, false)?;
                b.push_dedent();
                b.push_line("},");
            }
        }
        Ok(())
    }

    fn impl_(&self, b: &mut CodeBuilder, imp: &Impl) -> Result<(), WriterError> {
        let exprs = self.exprs("impl");
        let mut head = format!("impl{}", self.generics(&imp.generics)?);
        if let Some(trait_ref) = &imp.trait_ref {
            head = format!("{head} {} for", exprs.ty(trait_ref));
        }
        head = format!("{head} {}", exprs.ty(&imp.target));
        if imp.assoc_types.is_empty() && imp.methods.is_empty() {
            b.push_line(&format!("{head} {{}}"));
            return Ok(());
        }

        b.push_line(&format!("{head} {{"));
        b.push_indent();
        for (name, ty) in &imp.assoc_types {
            check_ident(name)?;
            b.push_line(&format!("type {name} = {};", exprs.ty(ty)));
        }
        if !imp.assoc_types.is_empty() && !imp.methods.is_empty() {
            b.push_blank();
        }
        let site = if imp.trait_ref.is_some() {
            MethodSite::TraitImpl
        } else {
            MethodSite::Inherent
        };
        self.methods(b, &imp.methods, site)?;
        b.push_dedent();
        b.push_line("}");
        Ok(())
    }

    fn methods(
        &self,
        b: &mut CodeBuilder,
        methods: &[MethodDecl],
        site: MethodSite,
    ) -> Result<(), WriterError> {
        for (i, method) in methods.iter().enumerate() {
            if i > 0 {
                b.push_blank();
            }
            self.method(b, method, site)?;
        }
        Ok(())
    }

    fn method(
        &self,
        b: &mut CodeBuilder,
        m: &MethodDecl,
        site: MethodSite,
    ) -> Result<(), WriterError> {
        check_ident(&m.name)?;
        let exprs = self.exprs(&m.name);
        self.doc(b, m.doc.as_deref());
        for attr in &m.attrs {
            b.push_line(&format!("#[{attr}]"));
        }

        let visibility = match site {
            MethodSite::Trait | MethodSite::TraitImpl => "",
            MethodSite::Free | MethodSite::Inherent => m.visibility.prefix(),
        };
        let mut params: Vec<String> = m.receiver.iter().map(|r| r.as_str().to_string()).collect();
        for param in &m.params {
            check_ident(&param.name)?;
            params.push(format!("{}: {}", param.name, exprs.ty(&param.ty)));
        }
        let returns = match &m.returns {
            Some(ty) if !ty.is_unit() => format!(" -> {}", exprs.ty(ty)),
            _ => String::new(),
        };
        let prefix = format!("{visibility}fn {}{}", m.name, self.generics(&m.generics)?);

        let open = match (&m.body, site) {
            (Some(body), _) if body.is_empty() => " {}",
            (Some(_), _) => " {",
            (None, MethodSite::Trait) => ";",
            (None, _) => return Err(WriterError::MissingBody(m.name.clone())),
        };
        let inline = format!("{prefix}({}){returns}{open}", params.join(", "));
        if b.column() + inline.len() <= MAX_WIDTH {
            b.push_line(&inline);
        } else {
            b.push_line(&format!("{prefix}("));
            b.push_indent();
            for param in &params {
                b.push_line(&format!("{param},"));
            }
            b.push_dedent();
            b.push_line(&format!("){returns}{open}"));
        }

        if let Some(body) = m.body.as_ref().filter(|body| !body.is_empty()) {
            b.push_indent();
            let exprs = exprs.at_column(b.column());
            b.push_line(&exprs.stmts(body)?);
            b.push_dedent();
            b.push_line("}");
        }
        Ok(())
    }

    fn generics(&self, generics: &[Generic]) -> Result<String, WriterError> {
        if generics.is_empty() {
            return Ok(String::new());
        }
        let exprs = self.exprs("generics");
        let mut parts = Vec::with_capacity(generics.len());
        for generic in generics {
            check_ident(&generic.name)?;
            if generic.bounds.is_empty() {
                parts.push(generic.name.clone());
            } else {
                let bounds: Vec<String> = generic.bounds.iter().map(|t| exprs.ty(t)).collect();
                parts.push(format!("{}: {}", generic.name, bounds.join(" + ")));
            }
        }
        Ok(format!("<{}>", parts.join(", ")))
    }

    fn const_(&self, b: &mut CodeBuilder, c: &Const) -> Result<(), WriterError> {
        let exprs = self.exprs(&c.name);
        self.doc(b, c.doc.as_deref());
        b.push_line(&format!(
            "{}const {}: {} = {};",
            c.visibility.prefix(),
            c.name,
            exprs.ty(&c.ty),
            exprs.expr(&c.value)?
        ));
        Ok(())
    }

    fn type_alias(&self, b: &mut CodeBuilder, alias: &TypeAlias) -> Result<(), WriterError> {
        self.doc(b, alias.doc.as_deref());
        let ty = self.exprs(&alias.name).ty(&alias.ty);
        b.push_line(&format!("{}type {} = {ty};", alias.visibility.prefix(), alias.name));
        Ok(())
    }

    fn module(&self, b: &mut CodeBuilder, m: &Module) {
        self.doc(b, m.doc.as_deref());
        b.push_line(&format!("{}mod {};", m.visibility.prefix(), m.name));
    }

    fn re_export(&self, b: &mut CodeBuilder, r: &ReExport) {
        let visibility = match r.visibility {
            Visibility::Private => "",
            other => other.prefix(),
        };
        b.push_line(&format!("{visibility}use {};", r.symbol.qualified()));
    }
}
