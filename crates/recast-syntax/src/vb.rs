//! Source-side syntax tree: the Visual Basic subset the converter accepts.
//!
//! The front end hands this tree over already parsed. It is deliberately
//! shallow -- no trivia, no tokens -- but every node carries the byte
//! [`Span`] of the source it came from, because spans are how the semantic
//! model is queried and how diagnostics point back at the original code.
//!
//! The one deliberately unparsed shape is [`Expr::ParenApply`]: `head(args)`
//! means a call, an array element, an indexer or a parameterized property
//! depending on what `head` resolves to, so the parser cannot commit and the
//! converter decides later.

use recast_common::Span;

// ── Declarations ─────────────────────────────────────────────────────────

/// One source document after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub types: Vec<TypeDecl>,
    pub span: Span,
}

/// `Class ... End Class`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub access: Access,
    pub name: String,
    pub members: Vec<Member>,
    pub span: Span,
}

/// Source access modifiers. A class without a modifier parses as `Friend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Friend,
    Protected,
    Private,
}

/// Any member declaration inside a type.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Enum(EnumDecl),
}

/// `Public name As Type [= init]` at class level.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub access: Access,
    pub name: String,
    pub ty: TypeName,
    pub init: Option<Expr>,
    pub span: Span,
}

/// Auto-implemented `Property name As Type`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub access: Access,
    pub name: String,
    pub ty: TypeName,
    pub span: Span,
}

/// `Sub`/`Function` declaration with its body.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub access: Access,
    pub shared: bool,
    pub name: String,
    pub params: Vec<ParamDecl>,
    /// `None` for a `Sub`, `Some` for a `Function`.
    pub return_ty: Option<TypeName>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// One formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeName,
    pub by_ref: bool,
    pub optional: bool,
    pub span: Span,
}

/// `Enum ... End Enum`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub access: Access,
    pub name: String,
    pub underlying: Option<TypeName>,
    pub variants: Vec<EnumVariant>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: String,
    pub value: Option<i64>,
    pub span: Span,
}

/// A type reference as written in source, possibly dotted
/// (`System.Some.UnknownType`). Resolution happens against the semantic
/// model; the tree only records the spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub name: String,
    pub span: Span,
}

impl TypeName {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self { name: name.into(), span }
    }
}

// ── Statements ───────────────────────────────────────────────────────────

/// Any statement shape the converter has a rule for.
///
/// The enum is closed on purpose: a new statement kind added here will not
/// compile until every conversion match arm decides what to do with it.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `Dim name [As Type] [= init]`.
    Local {
        name: String,
        ty: Option<TypeName>,
        init: Option<Expr>,
        span: Span,
    },
    /// `target = value`.
    Assign { target: Expr, value: Expr, span: Span },
    /// `Call f(args)`. The keyword promises an invocation, so the
    /// call-versus-index question never arises for this form.
    Call { invocation: Expr, span: Span },
    /// An expression evaluated for effect, written without the `Call`
    /// keyword. An ambiguous `head(args)` here stays ambiguous and the
    /// converter resolves it in statement position.
    Expr { expr: Expr, span: Span },
    /// `For target = from To limit [Step step] ... Next`.
    For(ForNext),
    /// `Select Case ... End Select`.
    Select(SelectCase),
    /// Single-line `If condition Then statement`.
    IfGuard {
        condition: Expr,
        then_stmt: Box<Stmt>,
        span: Span,
    },
    /// `Return [value]`.
    Return { value: Option<Expr>, span: Span },
    /// `On Error Resume Next` (`resume_next`) or `On Error GoTo 0`.
    OnError { resume_next: bool, span: Span },
}

impl Stmt {
    /// The source span of the statement.
    pub fn span(&self) -> Span {
        match self {
            Stmt::Local { span, .. }
            | Stmt::Assign { span, .. }
            | Stmt::Call { span, .. }
            | Stmt::Expr { span, .. }
            | Stmt::IfGuard { span, .. }
            | Stmt::Return { span, .. }
            | Stmt::OnError { span, .. } => *span,
            Stmt::For(f) => f.span,
            Stmt::Select(s) => s.span,
        }
    }
}

/// Counted `For ... Next` loop. The target may be any assignable
/// expression, not just a fresh local.
#[derive(Debug, Clone, PartialEq)]
pub struct ForNext {
    pub target: Expr,
    pub from: Expr,
    pub to: Expr,
    pub step: Option<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Multi-branch `Select Case`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectCase {
    pub scrutinee: Expr,
    pub arms: Vec<CaseArm>,
    pub else_body: Option<Vec<Stmt>>,
    pub span: Span,
}

/// One `Case label[, label...]` arm with its body.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseArm {
    pub labels: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

// ── Expressions ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A bare identifier reference.
    Ident { name: String, span: Span },
    /// The `Me` self reference.
    Me { span: Span },
    /// Qualified access: `base.name`.
    Member {
        base: Box<Expr>,
        name: String,
        span: Span,
    },
    /// The ambiguous `head(args)` form. Whether this is a call or an
    /// indexed access is decided during conversion, not parsing.
    ParenApply {
        head: Box<Expr>,
        args: Vec<Arg>,
        span: Span,
    },
    /// `New Type(args)`; a missing argument list parses as empty `args`.
    New {
        ty: TypeName,
        args: Vec<Arg>,
        span: Span,
    },
    Literal { value: Lit, span: Span },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>, span: Span) -> Expr {
        Expr::Ident { name: name.into(), span }
    }

    pub fn me(span: Span) -> Expr {
        Expr::Me { span }
    }

    pub fn member(base: Expr, name: impl Into<String>, span: Span) -> Expr {
        Expr::Member {
            base: Box::new(base),
            name: name.into(),
            span,
        }
    }

    pub fn paren_apply(head: Expr, args: Vec<Arg>, span: Span) -> Expr {
        Expr::ParenApply {
            head: Box::new(head),
            args,
            span,
        }
    }

    pub fn int(value: i64, span: Span) -> Expr {
        Expr::Literal { value: Lit::Int(value), span }
    }

    pub fn str(value: impl Into<String>, span: Span) -> Expr {
        Expr::Literal {
            value: Lit::Str(value.into()),
            span,
        }
    }

    /// The `Nothing` literal.
    pub fn nothing(span: Span) -> Expr {
        Expr::Literal { value: Lit::Nothing, span }
    }

    /// The source span of the expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident { span, .. }
            | Expr::Me { span }
            | Expr::Member { span, .. }
            | Expr::ParenApply { span, .. }
            | Expr::New { span, .. }
            | Expr::Literal { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. } => *span,
        }
    }

    /// The identifier text if this is a bare name, `None` otherwise.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            Expr::Ident { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// One argument position in an argument list.
///
/// Basic permits gaps (`f(a, , b)`); the parser keeps them so the converter
/// can fill the slot instead of shifting later arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Positional(Expr),
    Omitted { span: Span },
}

impl Arg {
    pub fn span(&self) -> Span {
        match self {
            Arg::Positional(e) => e.span(),
            Arg::Omitted { span } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    /// The `Nothing` literal. What it becomes on the target side depends on
    /// the type expected at the use site.
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Reference identity `Is`.
    Is,
    /// Negated reference identity `IsNot`.
    IsNot,
    AndAlso,
    OrElse,
}
