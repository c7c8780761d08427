//! Target-side syntax tree: the C# subset the converter produces.
//!
//! Target nodes carry no spans -- provenance lives in the diagnostics, which
//! point at the source tree. Each node implements `Display` with a compact
//! single-line rendering; that rendering is the canonical form asserted by
//! tests and written to logs, while pretty-printing for humans is the
//! printer's job downstream.

use std::fmt;

// ── Declarations ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub access: Access,
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Internal,
    Protected,
    Private,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Enum(EnumDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub access: Access,
    pub ty: TypeName,
    pub name: String,
    pub init: Option<Expr>,
}

/// Auto-property with a getter and setter.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub access: Access,
    pub ty: TypeName,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub access: Access,
    pub is_static: bool,
    /// `None` renders as `void`.
    pub return_ty: Option<TypeName>,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub mode: ParamMode,
    pub ty: TypeName,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    Value,
    Ref,
    Out,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub access: Access,
    pub name: String,
    pub underlying: Option<TypeName>,
    pub variants: Vec<EnumVariant>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: String,
    pub value: Option<i64>,
}

/// A rendered type name. By the time a name lands here it is already in
/// target spelling: either a keyword form (`int`, `string`) or a verbatim
/// source name carried through by the missing-type fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName(pub String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

// ── Statements ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `T name = init;` or `var name = init;` when `ty` is `None`.
    Local {
        ty: Option<TypeName>,
        name: String,
        init: Option<Expr>,
    },
    /// `target = value;`
    Assign { target: Expr, value: Expr },
    /// Bare expression statement `expr;`
    Expr(Expr),
    /// `for (target = from; cond; update) { ... }`
    For {
        target: Expr,
        from: Expr,
        cond: Expr,
        update: Expr,
        body: Vec<Stmt>,
    },
    /// `switch (scrutinee) { case ...: { ... } default: { ... } }`
    Switch {
        scrutinee: Expr,
        sections: Vec<SwitchSection>,
        default: Option<Vec<Stmt>>,
    },
    /// `if (condition) statement`
    If {
        condition: Expr,
        then_stmt: Box<Stmt>,
    },
    Return(Option<Expr>),
    Break,
    /// Placeholder for a source construct with no translation rule. The
    /// reason is the same text carried by the paired diagnostic.
    Unsupported { reason: String },
}

/// One `case l1: case l2: { body }` section of a switch.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSection {
    pub labels: Vec<Expr>,
    pub body: Vec<Stmt>,
}

// ── Expressions ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Name(String),
    This,
    /// `base.name`
    Member { base: Box<Expr>, name: String },
    /// `callee(args)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// `target[args]`
    Index { target: Box<Expr>, args: Vec<Expr> },
    /// `target?.Invoke(args)` -- the null-conditional raise form.
    ConditionalInvoke { target: Box<Expr>, args: Vec<Expr> },
    /// `new T(args)`
    New { ty: TypeName, args: Vec<Expr> },
    /// `(T)operand`
    Cast { ty: TypeName, operand: Box<Expr> },
    /// The bare `default` literal.
    Default,
    /// `default(T)`
    DefaultOf(TypeName),
    Null,
    Literal(Lit),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `operand is null` / `operand is object`
    IsPattern {
        operand: Box<Expr>,
        pattern: NullPattern,
    },
    /// `operand++`
    PostIncrement(Box<Expr>),
    /// `operand--`
    PostDecrement(Box<Expr>),
    /// `target += amount`
    AddAssign { target: Box<Expr>, amount: Box<Expr> },
    /// `target -= amount`
    SubAssign { target: Box<Expr>, amount: Box<Expr> },
    /// `out operand` in an argument list.
    OutArg(Box<Expr>),
    /// `ref operand` in an argument list.
    RefArg(Box<Expr>),
}

impl Expr {
    pub fn name(n: impl Into<String>) -> Expr {
        Expr::Name(n.into())
    }

    pub fn member(base: Expr, name: impl Into<String>) -> Expr {
        Expr::Member {
            base: Box::new(base),
            name: name.into(),
        }
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn index(target: Expr, args: Vec<Expr>) -> Expr {
        Expr::Index {
            target: Box::new(target),
            args,
        }
    }

    /// `Class.Method(args)` -- the shape every runtime compatibility call
    /// takes.
    pub fn static_call(class: &str, method: &str, args: Vec<Expr>) -> Expr {
        Expr::call(Expr::member(Expr::name(class), method), args)
    }

    pub fn int(value: i64) -> Expr {
        Expr::Literal(Lit::Int(value))
    }

    pub fn str(value: impl Into<String>) -> Expr {
        Expr::Literal(Lit::Str(value.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPattern {
    /// `is null` -- the target-side spelling of `Is Nothing`.
    Null,
    /// `is object` -- the target-side spelling of `IsNot Nothing`.
    Object,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lit {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
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
    And,
    Or,
}

// ── Rendering ────────────────────────────────────────────────────────────

impl BinOp {
    /// Binding strength in the target grammar; higher binds tighter.
    fn precedence(self) -> u8 {
        match self {
            BinOp::Mul | BinOp::Div => 5,
            BinOp::Add | BinOp::Sub => 4,
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 3,
            BinOp::Eq | BinOp::Ne => 2,
            BinOp::And => 1,
            BinOp::Or => 0,
        }
    }
}

impl Expr {
    /// Binding strength of the expression's top operator. `None` for
    /// primary forms, which never need grouping.
    fn precedence(&self) -> Option<u8> {
        match self {
            Expr::Binary { op, .. } => Some(op.precedence()),
            Expr::Unary { .. } | Expr::Cast { .. } => Some(6),
            // `is` sits at relational strength.
            Expr::IsPattern { .. } => Some(3),
            _ => None,
        }
    }
}

/// Write `operand`, parenthesized when its top operator binds looser
/// than the position requires. The source tree records grouping purely
/// by nesting, so the renderer has to put the parentheses back.
fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, min: u8) -> fmt::Result {
    match operand.precedence() {
        Some(p) if p < min => write!(f, "({operand})"),
        _ => write!(f, "{operand}"),
    }
}

/// A rendering that begins with `-`: a second leading minus in front of
/// it would lex as the `--` operator.
fn leads_with_minus(expr: &Expr) -> bool {
    match expr {
        Expr::Unary { op: UnaryOp::Neg, .. } => true,
        Expr::Literal(Lit::Int(v)) => *v < 0,
        Expr::Literal(Lit::Float(v)) => *v < 0.0,
        _ => false,
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Expr]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, stmts: &[Stmt]) -> fmt::Result {
    if stmts.is_empty() {
        return write!(f, "{{ }}");
    }
    write!(f, "{{")?;
    for stmt in stmts {
        write!(f, " {stmt}")?;
    }
    write!(f, " }}")
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kw = match self {
            Access::Public => "public",
            Access::Internal => "internal",
            Access::Protected => "protected",
            Access::Private => "private",
        };
        write!(f, "{kw}")
    }
}

impl fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.types.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} class {} ", self.access, self.name)?;
        if self.members.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{")?;
        for member in &self.members {
            write!(f, " {member}")?;
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Field(d) => write!(f, "{d}"),
            Member::Property(d) => write!(f, "{d}"),
            Member::Method(d) => write!(f, "{d}"),
            Member::Enum(d) => write!(f, "{d}"),
        }
    }
}

impl fmt::Display for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.access, self.ty, self.name)?;
        if let Some(init) = &self.init {
            write!(f, " = {init}")?;
        }
        write!(f, ";")
    }
}

impl fmt::Display for PropertyDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {{ get; set; }}", self.access, self.ty, self.name)
    }
}

impl fmt::Display for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.access)?;
        if self.is_static {
            write!(f, "static ")?;
        }
        match &self.return_ty {
            Some(ty) => write!(f, "{ty} ")?,
            None => write!(f, "void ")?,
        }
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") ")?;
        write_block(f, &self.body)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            ParamMode::Value => {}
            ParamMode::Ref => write!(f, "ref ")?,
            ParamMode::Out => write!(f, "out ")?,
        }
        write!(f, "{} {}", self.ty, self.name)
    }
}

impl fmt::Display for EnumDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} enum {}", self.access, self.name)?;
        if let Some(under) = &self.underlying {
            write!(f, " : {under}")?;
        }
        write!(f, " {{ ")?;
        for (i, variant) in self.variants.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", variant.name)?;
            if let Some(value) = variant.value {
                write!(f, " = {value}")?;
            }
        }
        write!(f, " }}")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Local { ty, name, init } => {
                match ty {
                    Some(ty) => write!(f, "{ty} {name}")?,
                    None => write!(f, "var {name}")?,
                }
                if let Some(init) = init {
                    write!(f, " = {init}")?;
                }
                write!(f, ";")
            }
            Stmt::Assign { target, value } => write!(f, "{target} = {value};"),
            Stmt::Expr(e) => write!(f, "{e};"),
            Stmt::For {
                target,
                from,
                cond,
                update,
                body,
            } => {
                write!(f, "for ({target} = {from}; {cond}; {update}) ")?;
                write_block(f, body)
            }
            Stmt::Switch {
                scrutinee,
                sections,
                default,
            } => {
                write!(f, "switch ({scrutinee}) {{")?;
                for section in sections {
                    write!(f, " {section}")?;
                }
                if let Some(body) = default {
                    write!(f, " default: ")?;
                    write_block(f, body)?;
                }
                write!(f, " }}")
            }
            Stmt::If {
                condition,
                then_stmt,
            } => write!(f, "if ({condition}) {then_stmt}"),
            Stmt::Return(None) => write!(f, "return;"),
            Stmt::Return(Some(e)) => write!(f, "return {e};"),
            Stmt::Break => write!(f, "break;"),
            Stmt::Unsupported { reason } => write!(f, "/* unsupported: {reason} */"),
        }
    }
}

impl fmt::Display for SwitchSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for label in &self.labels {
            write!(f, "case {label}: ")?;
        }
        write_block(f, &self.body)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Name(n) => write!(f, "{n}"),
            Expr::This => write!(f, "this"),
            Expr::Member { base, name } => {
                write_operand(f, base, 7)?;
                write!(f, ".{name}")
            }
            Expr::Call { callee, args } => {
                write_operand(f, callee, 7)?;
                write!(f, "(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Expr::Index { target, args } => {
                write_operand(f, target, 7)?;
                write!(f, "[")?;
                write_args(f, args)?;
                write!(f, "]")
            }
            Expr::ConditionalInvoke { target, args } => {
                write_operand(f, target, 7)?;
                write!(f, "?.Invoke(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Expr::New { ty, args } => {
                write!(f, "new {ty}(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Expr::Cast { ty, operand } => {
                write!(f, "({ty})")?;
                write_operand(f, operand, 6)
            }
            Expr::Default => write!(f, "default"),
            Expr::DefaultOf(ty) => write!(f, "default({ty})"),
            Expr::Null => write!(f, "null"),
            Expr::Literal(l) => write!(f, "{l}"),
            Expr::Unary { op, operand } => {
                write!(f, "{op}")?;
                if *op == UnaryOp::Neg && leads_with_minus(operand) {
                    write!(f, "({operand})")
                } else {
                    write_operand(f, operand, 6)
                }
            }
            Expr::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                write_operand(f, lhs, prec)?;
                write!(f, " {op} ")?;
                // These operators are left-associative, so a right
                // operand regroups at equal strength too.
                write_operand(f, rhs, prec + 1)
            }
            Expr::IsPattern { operand, pattern } => {
                write_operand(f, operand, 3)?;
                match pattern {
                    NullPattern::Null => write!(f, " is null"),
                    NullPattern::Object => write!(f, " is object"),
                }
            }
            Expr::PostIncrement(e) => {
                write_operand(f, e, 7)?;
                write!(f, "++")
            }
            Expr::PostDecrement(e) => {
                write_operand(f, e, 7)?;
                write!(f, "--")
            }
            Expr::AddAssign { target, amount } => write!(f, "{target} += {amount}"),
            Expr::SubAssign { target, amount } => write!(f, "{target} -= {amount}"),
            Expr::OutArg(e) => write!(f, "out {e}"),
            Expr::RefArg(e) => write!(f, "ref {e}"),
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lit::Int(v) => write!(f, "{v}"),
            Lit::Float(v) => write!(f, "{v}f"),
            Lit::Str(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        c => write!(f, "{c}")?,
                    }
                }
                write!(f, "\"")
            }
            Lit::Bool(true) => write!(f, "true"),
            Lit::Bool(false) => write!(f, "false"),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "!"),
            UnaryOp::Neg => write!(f, "-"),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        };
        write!(f, "{op}")
    }
}
