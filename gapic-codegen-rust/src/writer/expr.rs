//! Expressions, statements, patterns and types as Rust text.
//!
//! Everything here renders to a string whose continuation lines are
//! indented relative to its first line; the item writer places the result.

use std::cell::Cell;

use gapic_codegen::{
    WriterError,
    ast::{BinOp, Block, Expr, Lit, MatchArm, Pattern, Stmt, TypeRef},
    language::RUST_NAMING,
};

use super::{MAX_WIDTH, names::NameTable};

/// Past this width, chains with at least two calls go one call per line and
/// other calls put their arguments one per line.
const LINE_WIDTH: usize = 80;

const INDENT: &str = "    ";

/// Struct literals whose fields fit in this width stay on one line.
const STRUCT_LIT_WIDTH: usize = 18;

pub(crate) struct ExprRenderer<'a> {
    names: &'a NameTable,
    /// The declaration being rendered, for error messages.
    context: String,
    /// Column of the statement being rendered.
    column: Cell<usize>,
}

impl<'a> ExprRenderer<'a> {
    pub(crate) fn new(names: &'a NameTable, context: impl Into<String>) -> Self {
        Self {
            names,
            context: context.into(),
            column: Cell::new(0),
        }
    }

    /// Render statements that start at `column`.
    pub(crate) fn at_column(self, column: usize) -> Self {
        self.column.set(column);
        self
    }

    /// Run `render` one indentation level deeper.
    fn nested<T>(&self, render: impl FnOnce() -> T) -> T {
        let column = self.column.get();
        self.column.set(column + INDENT.len());
        let out = render();
        self.column.set(column);
        out
    }

    pub(crate) fn ty(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Named {
                symbol,
                args,
                bindings,
            } => format!("{}{}", self.names.resolve(symbol), self.generic_args(args, bindings)),
            TypeRef::Primitive(primitive) => primitive.as_str().to_string(),
            TypeRef::Reference { mutable: false, inner } => format!("&{}", self.ty(inner)),
            TypeRef::Reference { mutable: true, inner } => format!("&mut {}", self.ty(inner)),
            TypeRef::Slice(inner) => format!("[{}]", self.ty(inner)),
            TypeRef::Tuple(items) if items.len() == 1 => format!("({},)", self.ty(&items[0])),
            TypeRef::Tuple(items) => format!("({})", self.types(items, ", ")),
            TypeRef::Dyn(bounds) => format!("dyn {}", self.types(bounds, " + ")),
            TypeRef::ImplTrait(bounds) => format!("impl {}", self.types(bounds, " + ")),
            TypeRef::SelfType => "Self".to_string(),
            TypeRef::Generic(name) => name.clone(),
        }
    }

    /// A type in expression position, where generic arguments need a turbofish.
    fn path_ty(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Named {
                symbol,
                args,
                bindings,
            } => {
                let args = self.generic_args(args, bindings);
                if args.is_empty() {
                    self.names.resolve(symbol)
                } else {
                    format!("{}::{args}", self.names.resolve(symbol))
                }
            }
            TypeRef::SelfType | TypeRef::Generic(_) | TypeRef::Primitive(_) => self.ty(ty),
            _ => format!("<{}>", self.ty(ty)),
        }
    }

    fn types(&self, types: &[TypeRef], separator: &str) -> String {
        types.iter().map(|t| self.ty(t)).collect::<Vec<_>>().join(separator)
    }

    fn generic_args(&self, args: &[TypeRef], bindings: &[(String, TypeRef)]) -> String {
        let mut parts: Vec<String> = args.iter().map(|a| self.ty(a)).collect();
        parts.extend(bindings.iter().map(|(name, ty)| format!("{name} = {}", self.ty(ty))));
        if parts.is_empty() {
            String::new()
        } else {
            format!("<{}>", parts.join(", "))
        }
    }

    pub(crate) fn expr(&self, expr: &Expr) -> Result<String, WriterError> {
        Ok(match expr {
            Expr::Lit(lit) => literal(lit),
            Expr::Path(symbol) => self.names.resolve(symbol),
            Expr::Assoc { ty, name } => format!("{}::{name}", self.path_ty(ty)),
            Expr::Local(name) => name.clone(),
            Expr::SelfValue => "self".to_string(),
            Expr::Field { .. } | Expr::MethodCall { .. } | Expr::Try(_) => self.chain(expr)?,
            Expr::Call { func, args } => {
                let func = self.operand(func)?;
                let args = self.args(args)?;
                let inline = format!("{func}({})", args.join(", "));
                if inline.len() > LINE_WIDTH && breakable(&args) {
                    format!("{func}{}", broken_args(&args))
                } else {
                    inline
                }
            }
            Expr::Macro { name, args } if name == "vec" => format!("vec![{}]", self.list(args)?),
            Expr::Macro { name, args } => format!("{name}!({})", self.list(args)?),
            Expr::StructLit { ty, fields, rest } => self.struct_lit(ty, fields, rest.as_deref())?,
            Expr::Ref { mutable, expr } => {
                let prefix = if *mutable { "&mut " } else { "&" };
                format!("{prefix}{}", self.operand(expr)?)
            }
            Expr::Closure {
                is_move,
                params,
                body,
            } => {
                let params = params
                    .iter()
                    .map(|p| self.pattern(p))
                    .collect::<Result<Vec<_>, _>>()?;
                let body = match body.as_ref() {
                    Expr::Block(block) => self.block(block)?,
                    other => self.expr(other)?,
                };
                let prefix = if *is_move { "move " } else { "" };
                format!("{prefix}|{}| {body}", params.join(", "))
            }
            Expr::Binary { op, lhs, rhs } => format!(
                "{} {} {}",
                self.binary_side(*op, lhs)?,
                op.as_str(),
                self.binary_side(*op, rhs)?
            ),
            Expr::Unary { op, expr } => format!("{}{}", op.as_str(), self.operand(expr)?),
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => format!(
                "if {} {}{}",
                self.expr(cond)?,
                self.block(then_branch)?,
                self.else_branch(else_branch.as_deref())?
            ),
            Expr::IfLet {
                pattern,
                expr,
                then_branch,
                else_branch,
            } => format!(
                "if let {} = {} {}{}",
                self.pattern(pattern)?,
                self.expr(expr)?,
                self.block(then_branch)?,
                self.else_branch(else_branch.as_deref())?
            ),
            Expr::Match { expr, arms } => self.match_(expr, arms)?,
            Expr::ForLoop {
                pattern,
                iter,
                body,
            } => format!(
                "for {} in {} {}",
                self.pattern(pattern)?,
                self.expr(iter)?,
                self.block(body)?
            ),
            Expr::Block(block) => self.block(block)?,
            Expr::Return(None) => "return".to_string(),
            Expr::Return(Some(value)) => format!("return {}", self.expr(value)?),
            Expr::Assign { target, value } => {
                format!("{} = {}", self.expr(target)?, self.expr(value)?)
            }
            Expr::Tuple(items) if items.len() == 1 => format!("({},)", self.expr(&items[0])?),
            Expr::Tuple(items) => format!("({})", self.list(items)?),
            Expr::Array(items) => format!("[{}]", self.list(items)?),
            Expr::Cast { expr, ty } => format!("{} as {}", self.operand(expr)?, self.ty(ty)),
        })
    }

    fn list(&self, exprs: &[Expr]) -> Result<String, WriterError> {
        Ok(exprs
            .iter()
            .map(|e| self.expr(e))
            .collect::<Result<Vec<_>, _>>()?
            .join(", "))
    }

    /// An expression used as a receiver or operand, parenthesized when needed.
    fn operand(&self, expr: &Expr) -> Result<String, WriterError> {
        let rendered = self.expr(expr)?;
        Ok(match expr {
            Expr::Binary { .. }
            | Expr::Cast { .. }
            | Expr::Closure { .. }
            | Expr::Ref { .. }
            | Expr::Unary { .. }
            | Expr::Assign { .. }
            | Expr::Return(_) => format!("({rendered})"),
            _ => rendered,
        })
    }

    fn binary_side(&self, op: BinOp, side: &Expr) -> Result<String, WriterError> {
        match side {
            Expr::Binary { op: inner, .. } if *inner != op => self.operand(side),
            _ => self.expr(side),
        }
    }

    fn else_branch(&self, branch: Option<&Expr>) -> Result<String, WriterError> {
        Ok(match branch {
            None => String::new(),
            Some(branch @ (Expr::If { .. } | Expr::IfLet { .. })) => {
                format!(" else {}", self.expr(branch)?)
            }
            Some(Expr::Block(block)) => format!(" else {}", self.block(block)?),
            Some(other) => format!(" else {}", self.block(&Block::tail(other.clone()))?),
        })
    }

    fn args(&self, exprs: &[Expr]) -> Result<Vec<String>, WriterError> {
        exprs.iter().map(|e| self.expr(e)).collect()
    }

    /// A postfix chain: field accesses, method calls and `?`.
    fn chain(&self, expr: &Expr) -> Result<String, WriterError> {
        let mut links = Vec::new();
        let mut root = expr;
        loop {
            match root {
                Expr::Field { base, name } => {
                    links.push(Link::Field(name.clone()));
                    root = base;
                }
                Expr::MethodCall {
                    receiver,
                    method,
                    turbofish,
                    args,
                } => {
                    let head = if turbofish.is_empty() {
                        method.clone()
                    } else {
                        format!("{method}::<{}>", self.types(turbofish, ", "))
                    };
                    links.push(Link::Call {
                        head,
                        args: self.args(args)?,
                    });
                    root = receiver;
                }
                Expr::Try(inner) => {
                    links.push(Link::Try);
                    root = inner;
                }
                _ => break,
            }
        }
        links.reverse();

        let root = self.operand(root)?;
        let inline = links.iter().fold(root.clone(), |mut out, link| {
            link.push_to(&mut out, "", false);
            out
        });
        if inline.len() <= LINE_WIDTH {
            return Ok(inline);
        }
        let calls = links.iter().filter(|l| matches!(l, Link::Call { .. })).count();
        let per_line = calls >= 2;
        Ok(links.iter().fold(root, |mut out, link| {
            let indent = if per_line { INDENT } else { "" };
            let break_args = link.inline_len() > LINE_WIDTH - INDENT.len();
            link.push_to(&mut out, indent, !per_line || break_args);
            out
        }))
    }

    fn struct_lit(
        &self,
        ty: &TypeRef,
        fields: &[(String, Expr)],
        rest: Option<&Expr>,
    ) -> Result<String, WriterError> {
        let ty = self.path_ty(ty);
        if fields.is_empty() && rest.is_none() {
            return Ok(format!("{ty} {{}}"));
        }
        let mut parts = Vec::new();
        for (name, value) in fields {
            check_ident(name)?;
            match value {
                Expr::Local(local) if local == name => parts.push(name.clone()),
                _ => parts.push(format!("{name}: {}", self.nested(|| self.expr(value))?)),
            }
        }
        let rest = rest.map(|rest| self.expr(rest)).transpose()?;
        let mut inline = parts.join(", ");
        if let Some(rest) = &rest {
            inline = if parts.is_empty() {
                format!("..{rest}")
            } else {
                format!("{inline}, ..{rest}")
            };
        }
        if inline.len() <= STRUCT_LIT_WIDTH && !inline.contains('\n') {
            return Ok(format!("{ty} {{ {inline} }}"));
        }
        let mut lines: Vec<String> = parts.into_iter().map(|part| part + ",").collect();
        if let Some(rest) = rest {
            lines.push(format!("..{rest}"));
        }
        Ok(format!("{ty} {{\n{}\n}}", indent(&lines.join("\n"))))
    }

    fn match_(&self, expr: &Expr, arms: &[MatchArm]) -> Result<String, WriterError> {
        let scrutinee = self.expr(expr)?;
        let mut lines = Vec::new();
        for arm in arms {
            lines.push(self.nested(|| self.match_arm(arm))?);
        }
        Ok(format!("match {scrutinee} {{\n{}\n}}", indent(&lines.join("\n"))))
    }

    /// One arm, laid out the way rustfmt does once it runs out of width:
    /// first the body moves into a block, then the guard onto its own line.
    fn match_arm(&self, arm: &MatchArm) -> Result<String, WriterError> {
        let pattern = self.pattern(&arm.pattern)?;
        let guard = arm.guard.as_ref().map(|guard| self.expr(guard)).transpose()?;
        let head = match &guard {
            Some(guard) => format!("{pattern} if {guard}"),
            None => pattern.clone(),
        };
        let column = self.column.get();

        let block = match &arm.body {
            Expr::Block(block) => self.block(block)?,
            body => {
                let inline = self.expr(body)?;
                let first = inline.split('\n').next().unwrap_or_default();
                let comma = if inline.contains('\n') { 0 } else { 1 };
                if column + head.len() + " => ".len() + first.len() + comma <= MAX_WIDTH {
                    return Ok(format!("{head} => {inline},"));
                }
                let body = self.nested(|| self.expr(body))?;
                format!("{{\n{}\n}}", indent(&body))
            }
        };
        match guard {
            Some(guard) if column + head.len() + " => {".len() > MAX_WIDTH => {
                Ok(format!("{pattern}\n{INDENT}if {guard} =>\n{block}"))
            }
            _ => Ok(format!("{head} => {block}")),
        }
    }

    pub(crate) fn block(&self, block: &Block) -> Result<String, WriterError> {
        if block.is_empty() {
            return Ok("{}".to_string());
        }
        let stmts = self.nested(|| self.stmts(block))?;
        Ok(format!("{{\n{}\n}}", indent(&stmts)))
    }

    /// The statements of `block`, one per line, unindented.
    pub(crate) fn stmts(&self, block: &Block) -> Result<String, WriterError> {
        let mut lines = Vec::with_capacity(block.stmts.len());
        for (i, stmt) in block.stmts.iter().enumerate() {
            let last = i + 1 == block.stmts.len();
            lines.push(match stmt {
                Stmt::Let { pattern, ty, value } => {
                    let mut line = format!("let {}", self.pattern(pattern)?);
                    if let Some(ty) = ty {
                        line = format!("{line}: {}", self.ty(ty));
                    }
                    if let Some(value) = value {
                        line = format!("{line} = {}", self.expr(value)?);
                    }
                    line + ";"
                }
                Stmt::Expr(expr) if expr.is_block_like() => self.expr(expr)?,
                Stmt::Expr(expr) => format!("{};", self.expr(expr)?),
                Stmt::Tail(_) if !last => {
                    return Err(WriterError::MisplacedTail(self.context.clone()));
                }
                Stmt::Tail(expr) => self.expr(expr)?,
                Stmt::Comment(text) => format!("// {text}"),
            });
        }
        Ok(lines.join("\n"))
    }

    pub(crate) fn pattern(&self, pattern: &Pattern) -> Result<String, WriterError> {
        Ok(match pattern {
            Pattern::Ident { name, mutable } => {
                check_ident(name)?;
                if *mutable {
                    format!("mut {name}")
                } else {
                    name.clone()
                }
            }
            Pattern::Wildcard => "_".to_string(),
            Pattern::Tuple(items) => format!("({})", self.patterns(items)?),
            Pattern::TupleStruct { path, fields } => {
                format!("{}({})", self.names.resolve(path), self.patterns(fields)?)
            }
            Pattern::Struct { path, fields } => {
                for field in fields {
                    check_ident(field)?;
                }
                format!("{} {{ {} }}", self.names.resolve(path), fields.join(", "))
            }
            Pattern::Path(path) => self.names.resolve(path),
            Pattern::Slice(items) => format!("[{}]", self.patterns(items)?),
            Pattern::Lit(lit) => literal(lit),
        })
    }

    fn patterns(&self, patterns: &[Pattern]) -> Result<String, WriterError> {
        Ok(patterns
            .iter()
            .map(|p| self.pattern(p))
            .collect::<Result<Vec<_>, _>>()?
            .join(", "))
    }
}

enum Link {
    Field(String),
    Call { head: String, args: Vec<String> },
    Try,
}

impl Link {
    fn inline_len(&self) -> usize {
        match self {
            Self::Field(name) => name.len() + 1,
            Self::Call { head, args } => {
                let separators = 2 * args.len().saturating_sub(1);
                head.len() + 3 + args.iter().map(String::len).sum::<usize>() + separators
            }
            Self::Try => 1,
        }
    }

    /// Append to `out`; a non-empty `indent` starts the link on a new line
    /// and indents its continuation lines too.
    ///
    /// With `break_args`, a breakable argument list goes one argument per line.
    fn push_to(&self, out: &mut String, indent: &str, break_args: bool) {
        let text = match self {
            Self::Field(name) => format!(".{name}"),
            Self::Call { head, args } if break_args && breakable(args) => {
                format!(".{head}{}", broken_args(args))
            }
            Self::Call { head, args } => format!(".{head}({})", args.join(", ")),
            Self::Try => {
                out.push('?');
                return;
            }
        };
        if indent.is_empty() {
            out.push_str(&text);
        } else {
            out.push('\n');
            out.push_str(indent);
            out.push_str(&text.replace('\n', &format!("\n{indent}")));
        }
    }
}

/// Argument lists of two or more single-line arguments can be broken.
fn breakable(args: &[String]) -> bool {
    args.len() >= 2 && args.iter().all(|arg| !arg.contains('\n'))
}

/// `(\n    a,\n    b,\n)`.
fn broken_args(args: &[String]) -> String {
    let lines: Vec<String> = args.iter().map(|arg| format!("{arg},")).collect();
    format!("(\n{}\n)", indent(&lines.join("\n")))
}

pub(crate) fn literal(lit: &Lit) -> String {
    match lit {
        Lit::Str(value) => format!("\"{}\"", value.escape_debug()),
        Lit::Int(value) => value.to_string(),
        Lit::UInt(value) => value.to_string(),
        Lit::Float(value) => format!("{value:?}"),
        Lit::Bool(value) => value.to_string(),
    }
}

/// Indent every non-empty line of `text` by one level.
pub(crate) fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reject names that cannot be written as a Rust identifier.
pub(crate) fn check_ident(name: &str) -> Result<(), WriterError> {
    let (raw, bare) = match name.strip_prefix("r#") {
        Some(bare) => (true, bare),
        None => (false, name),
    };
    let mut chars = bare.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_');
    let valid = valid_start
        && chars.all(|c| c.is_alphanumeric() || c == '_')
        && bare != "_"
        && if raw {
            !matches!(bare, "crate" | "self" | "Self" | "super")
        } else {
            !RUST_NAMING.is_reserved(bare)
        };
    if valid {
        Ok(())
    } else {
        Err(WriterError::InvalidIdentifier(name.to_string()))
    }
}
