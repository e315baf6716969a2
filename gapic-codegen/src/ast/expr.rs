//! Expressions, statements and patterns.

use serde::Serialize;

use super::{Symbol, TypeRef};

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Lit {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Add,
    Sub,
    Mul,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnOp {
    Not,
    Neg,
    Deref,
}

impl UnOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::Neg => "-",
            Self::Deref => "*",
        }
    }
}

/// An expression. Every name in it is already resolved to a [`Symbol`],
/// a local binding or a member name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Lit(Lit),
    /// A function, constant, unit struct or variant: `Default::default`, `None`.
    Path(Symbol),
    /// An associated item of a type: `Duration::from_millis`, `Self::new`.
    Assoc { ty: TypeRef, name: String },
    Local(String),
    SelfValue,
    Field { base: Box<Expr>, name: String },
    MethodCall {
        receiver: Box<Expr>,
        method: String,
        turbofish: Vec<TypeRef>,
        args: Vec<Expr>,
    },
    Call { func: Box<Expr>, args: Vec<Expr> },
    /// `format!(...)`, `vec![...]`.
    Macro { name: String, args: Vec<Expr> },
    StructLit {
        ty: TypeRef,
        fields: Vec<(String, Expr)>,
        rest: Option<Box<Expr>>,
    },
    Ref { mutable: bool, expr: Box<Expr> },
    Try(Box<Expr>),
    Closure {
        is_move: bool,
        params: Vec<Pattern>,
        body: Box<Expr>,
    },
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Unary { op: UnOp, expr: Box<Expr> },
    If {
        cond: Box<Expr>,
        then_branch: Block,
        else_branch: Option<Box<Expr>>,
    },
    IfLet {
        pattern: Pattern,
        expr: Box<Expr>,
        then_branch: Block,
        else_branch: Option<Box<Expr>>,
    },
    Match { expr: Box<Expr>, arms: Vec<MatchArm> },
    ForLoop {
        pattern: Pattern,
        iter: Box<Expr>,
        body: Block,
    },
    Block(Block),
    Return(Option<Box<Expr>>),
    Assign { target: Box<Expr>, value: Box<Expr> },
    Tuple(Vec<Expr>),
    Array(Vec<Expr>),
    Cast { expr: Box<Expr>, ty: TypeRef },
}

impl Expr {
    pub fn local(name: impl Into<String>) -> Self {
        Self::Local(name.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Self::Lit(Lit::Str(value.into()))
    }

    pub fn int(value: i64) -> Self {
        Self::Lit(Lit::Int(value))
    }

    pub fn uint(value: u64) -> Self {
        Self::Lit(Lit::UInt(value))
    }

    pub fn float(value: f64) -> Self {
        Self::Lit(Lit::Float(value))
    }

    pub fn bool(value: bool) -> Self {
        Self::Lit(Lit::Bool(value))
    }

    pub fn path(symbol: Symbol) -> Self {
        Self::Path(symbol)
    }

    pub fn assoc(ty: TypeRef, name: impl Into<String>) -> Self {
        Self::Assoc {
            ty,
            name: name.into(),
        }
    }

    /// `Type::name(args)`.
    pub fn assoc_call(ty: TypeRef, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::call(Self::assoc(ty, name), args)
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Self::Call {
            func: Box::new(func),
            args,
        }
    }

    pub fn macro_call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Macro {
            name: name.into(),
            args,
        }
    }

    pub fn struct_lit(ty: TypeRef, fields: Vec<(String, Expr)>) -> Self {
        Self::StructLit {
            ty,
            fields,
            rest: None,
        }
    }

    /// `Some(expr)`.
    pub fn some(expr: Expr) -> Self {
        Self::call(Self::Path(Symbol::prelude("Some")), vec![expr])
    }

    /// `Ok(expr)`.
    pub fn ok(expr: Expr) -> Self {
        Self::call(Self::Path(Symbol::prelude("Ok")), vec![expr])
    }

    /// `Err(expr)`.
    pub fn err(expr: Expr) -> Self {
        Self::call(Self::Path(Symbol::prelude("Err")), vec![expr])
    }

    /// `Default::default()`.
    pub fn default_value() -> Self {
        Self::assoc_call(TypeRef::prelude("Default"), "default", Vec::new())
    }

    pub fn closure(params: Vec<Pattern>, body: Expr) -> Self {
        Self::Closure {
            is_move: false,
            params,
            body: Box::new(body),
        }
    }

    pub fn move_closure(params: Vec<Pattern>, body: Expr) -> Self {
        Self::Closure {
            is_move: true,
            params,
            body: Box::new(body),
        }
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn not(expr: Expr) -> Self {
        Self::Unary {
            op: UnOp::Not,
            expr: Box::new(expr),
        }
    }

    pub fn deref(expr: Expr) -> Self {
        Self::Unary {
            op: UnOp::Deref,
            expr: Box::new(expr),
        }
    }

    pub fn if_(cond: Expr, then_branch: Block) -> Self {
        Self::If {
            cond: Box::new(cond),
            then_branch,
            else_branch: None,
        }
    }

    pub fn if_let(pattern: Pattern, expr: Expr, then_branch: Block) -> Self {
        Self::IfLet {
            pattern,
            expr: Box::new(expr),
            then_branch,
            else_branch: None,
        }
    }

    pub fn match_(expr: Expr, arms: Vec<MatchArm>) -> Self {
        Self::Match {
            expr: Box::new(expr),
            arms,
        }
    }

    pub fn for_loop(pattern: Pattern, iter: Expr, body: Block) -> Self {
        Self::ForLoop {
            pattern,
            iter: Box::new(iter),
            body,
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::Assign {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    // Postfix helpers, so composers can write `request.field("name").method("clone", [])`.

    pub fn field(self, name: impl Into<String>) -> Self {
        Self::Field {
            base: Box::new(self),
            name: name.into(),
        }
    }

    pub fn method(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::MethodCall {
            receiver: Box::new(self),
            method: method.into(),
            turbofish: Vec::new(),
            args,
        }
    }

    pub fn method_turbofish(
        self,
        method: impl Into<String>,
        turbofish: Vec<TypeRef>,
        args: Vec<Expr>,
    ) -> Self {
        Self::MethodCall {
            receiver: Box::new(self),
            method: method.into(),
            turbofish,
            args,
        }
    }

    pub fn try_(self) -> Self {
        Self::Try(Box::new(self))
    }

    pub fn by_ref(self) -> Self {
        Self::Ref {
            mutable: false,
            expr: Box::new(self),
        }
    }

    pub fn by_mut(self) -> Self {
        Self::Ref {
            mutable: true,
            expr: Box::new(self),
        }
    }

    pub fn cast(self, ty: TypeRef) -> Self {
        Self::Cast {
            expr: Box::new(self),
            ty,
        }
    }

    /// Attach an `else` branch to an `if` or `if let`; other expressions are unchanged.
    pub fn or_else(mut self, branch: Expr) -> Self {
        if let Self::If { else_branch, .. } | Self::IfLet { else_branch, .. } = &mut self {
            *else_branch = Some(Box::new(branch));
        }
        self
    }

    /// Expressions that end in a block and need no `;` as statements.
    pub fn is_block_like(&self) -> bool {
        matches!(
            self,
            Self::If { .. } | Self::IfLet { .. } | Self::Match { .. } | Self::ForLoop { .. }
                | Self::Block(_)
        )
    }
}

/// One `match` arm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub guard: Option<Expr>,
    pub body: Expr,
}

impl MatchArm {
    pub fn new(pattern: Pattern, body: Expr) -> Self {
        Self {
            pattern,
            guard: None,
            body,
        }
    }

    pub fn guard(mut self, guard: Expr) -> Self {
        self.guard = Some(guard);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Pattern {
    Ident { name: String, mutable: bool },
    Wildcard,
    Tuple(Vec<Pattern>),
    /// `Some(x)`, `Self::Shelf(name)`.
    TupleStruct { path: Symbol, fields: Vec<Pattern> },
    /// `Self::ProjectShelf { project, shelf }`; fields bind by shorthand.
    Struct { path: Symbol, fields: Vec<String> },
    /// A unit struct or variant: `None`.
    Path(Symbol),
    /// `["shelves", shelf]`.
    Slice(Vec<Pattern>),
    Lit(Lit),
}

impl Pattern {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident {
            name: name.into(),
            mutable: false,
        }
    }

    pub fn ident_mut(name: impl Into<String>) -> Self {
        Self::Ident {
            name: name.into(),
            mutable: true,
        }
    }

    pub fn tuple_struct(path: Symbol, fields: Vec<Pattern>) -> Self {
        Self::TupleStruct { path, fields }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Let {
        pattern: Pattern,
        ty: Option<TypeRef>,
        value: Option<Expr>,
    },
    /// An expression evaluated for effect.
    Expr(Expr),
    /// The value of the enclosing block; must come last.
    Tail(Expr),
    /// A `//` line comment.
    Comment(String),
}

impl Stmt {
    pub fn let_(name: impl Into<String>, value: Expr) -> Self {
        Self::Let {
            pattern: Pattern::ident(name),
            ty: None,
            value: Some(value),
        }
    }

    pub fn let_mut(name: impl Into<String>, value: Expr) -> Self {
        Self::Let {
            pattern: Pattern::ident_mut(name),
            ty: None,
            value: Some(value),
        }
    }

    pub fn let_typed(name: impl Into<String>, ty: TypeRef, value: Expr) -> Self {
        Self::Let {
            pattern: Pattern::ident(name),
            ty: Some(ty),
            value: Some(value),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    /// A block that evaluates to `expr`.
    pub fn tail(expr: Expr) -> Self {
        Self {
            stmts: vec![Stmt::Tail(expr)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postfix_helpers_nest() {
        let expr = Expr::local("request").field("name").method("clone", Vec::new()).try_();
        let Expr::Try(inner) = expr else {
            panic!("expected try");
        };
        let Expr::MethodCall {
            receiver, method, ..
        } = *inner
        else {
            panic!("expected method call");
        };
        assert_eq!(method, "clone");
        assert_eq!(*receiver, Expr::local("request").field("name"));
    }

    #[test]
    fn test_or_else_only_applies_to_conditionals() {
        let cond = Expr::if_(Expr::bool(true), Block::tail(Expr::int(1)))
            .or_else(Expr::Block(Block::tail(Expr::int(2))));
        assert!(matches!(cond, Expr::If { else_branch: Some(_), .. }));
        assert_eq!(Expr::int(1).or_else(Expr::int(2)), Expr::int(1));
    }

    #[test]
    fn test_block_like() {
        assert!(Expr::match_(Expr::local("x"), Vec::new()).is_block_like());
        assert!(!Expr::local("x").method("len", Vec::new()).is_block_like());
    }
}
