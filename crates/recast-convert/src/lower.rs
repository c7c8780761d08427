//! The tree-to-tree lowering walk.
//!
//! One [`ConversionContext`] walks a source unit top-down and builds the
//! target tree, consulting the semantic model per node and delegating to
//! [`resolve`](crate::resolve) for the call-versus-index decision, to
//! [`intrinsics`](crate::intrinsics) for runtime rewrites and implicit
//! coercions, and to [`fallback`](crate::fallback) for unresolved types.
//! Every statement shape has exactly one rule here; a shape with no rule
//! becomes an explicit `Unsupported` placeholder and conversion of the
//! surrounding block continues.

use recast_common::Span;
use recast_sema::{MethodSig, RefKind, Resolution, SemanticModel, SymbolKind, Ty};
use recast_syntax::{cs, vb};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::fallback;
use crate::intrinsics;
use crate::resolve::{self, Position, Rendering};

/// Per-unit conversion state: the read-only semantic model and the
/// unit-local diagnostics sink. Never shared across units; concurrent
/// units each build their own against the same model.
pub struct ConversionContext<'a> {
    model: &'a dyn SemanticModel,
    diagnostics: Diagnostics,
}

impl<'a> ConversionContext<'a> {
    pub fn new(model: &'a dyn SemanticModel) -> Self {
        Self {
            model,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Hand back everything recorded during lowering, in emission order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics.into_vec()
    }

    // ── Declarations ─────────────────────────────────────────────────

    pub fn lower_unit(&mut self, unit: &vb::CompilationUnit) -> cs::CompilationUnit {
        tracing::debug!(types = unit.types.len(), "lowering unit");
        cs::CompilationUnit {
            types: unit.types.iter().map(|t| self.lower_type(t)).collect(),
        }
    }

    fn lower_type(&mut self, decl: &vb::TypeDecl) -> cs::TypeDecl {
        cs::TypeDecl {
            access: lower_access(decl.access),
            name: decl.name.clone(),
            members: decl.members.iter().map(|m| self.lower_member(m)).collect(),
        }
    }

    fn lower_member(&mut self, member: &vb::Member) -> cs::Member {
        match member {
            vb::Member::Field(d) => cs::Member::Field(self.lower_field(d)),
            vb::Member::Property(d) => cs::Member::Property(self.lower_property(d)),
            vb::Member::Method(d) => cs::Member::Method(self.lower_method(d)),
            vb::Member::Enum(d) => cs::Member::Enum(self.lower_enum(d)),
        }
    }

    fn lower_field(&mut self, field: &vb::FieldDecl) -> cs::FieldDecl {
        let resolved = self.model.declared_type(field.ty.span);
        let ty = fallback::render_type(&field.ty, &resolved, &mut self.diagnostics);
        let init = field
            .init
            .as_ref()
            .map(|e| self.lower_expr_expecting(e, Some(&resolved)));
        cs::FieldDecl {
            access: lower_access(field.access),
            ty,
            name: field.name.clone(),
            init,
        }
    }

    fn lower_property(&mut self, property: &vb::PropertyDecl) -> cs::PropertyDecl {
        let resolved = self.model.declared_type(property.ty.span);
        let ty = fallback::render_type(&property.ty, &resolved, &mut self.diagnostics);
        cs::PropertyDecl {
            access: lower_access(property.access),
            ty,
            name: property.name.clone(),
        }
    }

    fn lower_method(&mut self, method: &vb::MethodDecl) -> cs::MethodDecl {
        let return_ty = method.return_ty.as_ref().map(|annotation| {
            let resolved = self.model.declared_type(annotation.span);
            fallback::render_type(annotation, &resolved, &mut self.diagnostics)
        });
        let params = method.params.iter().map(|p| self.lower_param(p)).collect();
        let body = self.lower_block(&method.body);
        cs::MethodDecl {
            access: lower_access(method.access),
            is_static: method.shared,
            return_ty,
            name: method.name.clone(),
            params,
            body,
        }
    }

    fn lower_param(&mut self, param: &vb::ParamDecl) -> cs::Param {
        let resolved = self.model.declared_type(param.ty.span);
        let ty = fallback::render_type(&param.ty, &resolved, &mut self.diagnostics);
        let mode = if param.by_ref {
            cs::ParamMode::Ref
        } else {
            cs::ParamMode::Value
        };
        cs::Param {
            mode,
            ty,
            name: param.name.clone(),
        }
    }

    fn lower_enum(&mut self, decl: &vb::EnumDecl) -> cs::EnumDecl {
        let underlying = decl.underlying.as_ref().map(|annotation| {
            let resolved = self.model.declared_type(annotation.span);
            fallback::render_type(annotation, &resolved, &mut self.diagnostics)
        });
        cs::EnumDecl {
            access: lower_access(decl.access),
            name: decl.name.clone(),
            underlying,
            variants: decl
                .variants
                .iter()
                .map(|v| cs::EnumVariant {
                    name: v.name.clone(),
                    value: v.value,
                })
                .collect(),
        }
    }

    // ── Statements ───────────────────────────────────────────────────

    fn lower_block(&mut self, stmts: &[vb::Stmt]) -> Vec<cs::Stmt> {
        let mut out = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            self.lower_stmt(stmt, &mut out);
        }
        out
    }

    /// Lower one source statement, appending one or more target
    /// statements. Multi-statement expansion happens only for a hoisted
    /// switch discriminant.
    fn lower_stmt(&mut self, stmt: &vb::Stmt, out: &mut Vec<cs::Stmt>) {
        match stmt {
            vb::Stmt::Local { name, ty, init, .. } => self.lower_local(name, ty, init, out),
            vb::Stmt::Assign { target, value, .. } => {
                let to = self.model.declared_type(target.span());
                let value = self.lower_expr_expecting(value, Some(&to));
                let target = self.lower_plain_expr(target);
                out.push(cs::Stmt::Assign { target, value });
            }
            vb::Stmt::Call { invocation, .. } => self.lower_call_stmt(invocation, out),
            vb::Stmt::Expr { expr, .. } => {
                let lowered = self.lower_expr_stmt(expr);
                out.push(cs::Stmt::Expr(lowered));
            }
            vb::Stmt::For(f) => self.lower_for(f, out),
            vb::Stmt::Select(s) => self.lower_select(s, out),
            vb::Stmt::IfGuard {
                condition,
                then_stmt,
                span,
            } => self.lower_if_guard(condition, then_stmt, *span, out),
            vb::Stmt::Return { value, .. } => {
                let value = value.as_ref().map(|e| self.lower_expr(e));
                out.push(cs::Stmt::Return(value));
            }
            vb::Stmt::OnError { resume_next, span } => {
                let construct = if *resume_next {
                    "On Error Resume Next"
                } else {
                    "On Error GoTo 0"
                };
                let reason = format!("no translation rule for `{construct}`");
                self.diagnostics
                    .push(Diagnostic::unsupported(*span, reason.clone()));
                out.push(cs::Stmt::Unsupported { reason });
            }
        }
    }

    fn lower_local(
        &mut self,
        name: &str,
        ty: &Option<vb::TypeName>,
        init: &Option<vb::Expr>,
        out: &mut Vec<cs::Stmt>,
    ) {
        let lowered = match (ty, init) {
            // `Dim x = init` infers on the target side too.
            (None, Some(init)) => cs::Stmt::Local {
                ty: None,
                name: name.to_string(),
                init: Some(self.lower_expr(init)),
            },
            // `Dim x` with no annotation is an object local.
            (None, None) => cs::Stmt::Local {
                ty: Some(cs::TypeName::new("object")),
                name: name.to_string(),
                init: None,
            },
            (Some(annotation), init) => {
                let resolved = self.model.declared_type(annotation.span);
                let rendered =
                    fallback::render_type(annotation, &resolved, &mut self.diagnostics);
                match init {
                    Some(init) => cs::Stmt::Local {
                        ty: Some(rendered),
                        name: name.to_string(),
                        init: Some(self.lower_expr_expecting(init, Some(&resolved))),
                    },
                    // The source zero-initializes every local; the target
                    // only does so where definite assignment allows it.
                    None if resolved.is_unknown() => cs::Stmt::Local {
                        ty: Some(rendered),
                        name: name.to_string(),
                        init: Some(cs::Expr::Default),
                    },
                    None if resolved.is_reference() => cs::Stmt::Local {
                        ty: Some(rendered),
                        name: name.to_string(),
                        init: None,
                    },
                    None => cs::Stmt::Local {
                        ty: None,
                        name: name.to_string(),
                        init: Some(cs::Expr::DefaultOf(rendered)),
                    },
                }
            }
        };
        out.push(lowered);
    }

    /// A `Call` statement is never ambiguous: the keyword promises an
    /// invocation, so the parenthesized head renders as a call even
    /// when it does not resolve.
    fn lower_call_stmt(&mut self, invocation: &vb::Expr, out: &mut Vec<cs::Stmt>) {
        let lowered = match invocation {
            vb::Expr::ParenApply { head, args, .. } => {
                let resolution = self.model.resolve_symbol(head.span());
                let signature = resolution.symbol().and_then(|s| s.signature.as_ref());
                let callee = self.lower_plain_expr(head);
                let args = self.lower_args(args, signature);
                cs::Expr::call(callee, args)
            }
            // A bare name or member after the keyword is a
            // zero-argument invocation.
            other => cs::Expr::call(self.lower_plain_expr(other), vec![]),
        };
        out.push(cs::Stmt::Expr(lowered));
    }

    /// A keywordless expression statement keeps the call-versus-index
    /// question open; the resolver answers it in statement position.
    fn lower_expr_stmt(&mut self, expr: &vb::Expr) -> cs::Expr {
        match expr {
            vb::Expr::ParenApply { head, args, span } => {
                self.lower_paren_apply(head, args, *span, Position::Statement)
            }
            other => self.lower_expr(other),
        }
    }

    fn lower_for(&mut self, f: &vb::ForNext, out: &mut Vec<cs::Stmt>) {
        if !matches!(
            f.target,
            vb::Expr::Ident { .. } | vb::Expr::Member { .. } | vb::Expr::ParenApply { .. }
        ) {
            let reason = "loop target is not an assignable expression".to_string();
            self.diagnostics
                .push(Diagnostic::unsupported(f.target.span(), reason.clone()));
            out.push(cs::Stmt::Unsupported { reason });
            return;
        }
        let target = self.lower_plain_expr(&f.target);
        let from = self.lower_expr(&f.from);
        let limit = self.lower_expr(&f.to);

        // Condition direction and update shape come from the declared
        // step sign; an absent step is an ascending unit step.
        let (cond_op, update) = match f.step.as_ref() {
            None => (cs::BinOp::Le, cs::Expr::PostIncrement(Box::new(target.clone()))),
            Some(step) => match step_literal(step) {
                Some(1) => (cs::BinOp::Le, cs::Expr::PostIncrement(Box::new(target.clone()))),
                Some(-1) => (cs::BinOp::Ge, cs::Expr::PostDecrement(Box::new(target.clone()))),
                Some(n) if n >= 0 => (
                    cs::BinOp::Le,
                    cs::Expr::AddAssign {
                        target: Box::new(target.clone()),
                        amount: Box::new(cs::Expr::int(n)),
                    },
                ),
                Some(n) => match n.checked_neg() {
                    Some(magnitude) => (
                        cs::BinOp::Ge,
                        cs::Expr::SubAssign {
                            target: Box::new(target.clone()),
                            amount: Box::new(cs::Expr::int(magnitude)),
                        },
                    ),
                    // The one literal whose magnitude does not fit.
                    None => self.assume_ascending(
                        step,
                        "the step literal has no positive magnitude",
                        &target,
                    ),
                },
                None => self.assume_ascending(step, "the step is not a literal", &target),
            },
        };
        let cond = cs::Expr::Binary {
            op: cond_op,
            lhs: Box::new(target.clone()),
            rhs: Box::new(limit),
        };
        let body = self.lower_block(&f.body);
        out.push(cs::Stmt::For {
            target,
            from,
            cond,
            update,
            body,
        });
    }

    /// The documented default for a step the loop cannot classify:
    /// ascending comparison with an additive update, plus a warning
    /// recording the assumption.
    fn assume_ascending(
        &mut self,
        step: &vb::Expr,
        why: &str,
        target: &cs::Expr,
    ) -> (cs::BinOp, cs::Expr) {
        self.diagnostics.push(Diagnostic::ambiguous(
            step.span(),
            format!("assumed-ascending: {why}, so the loop renders with `<=` and an additive update"),
        ));
        let amount = self.lower_expr(step);
        (
            cs::BinOp::Le,
            cs::Expr::AddAssign {
                target: Box::new(target.clone()),
                amount: Box::new(amount),
            },
        )
    }

    fn lower_select(&mut self, s: &vb::SelectCase, out: &mut Vec<cs::Stmt>) {
        let scrutinee_ty = self.model.declared_type(s.scrutinee.span());
        let lowered = self.lower_expr(&s.scrutinee);
        // A discriminant with any computation is hoisted into a local so
        // the switch reads it exactly once.
        let scrutinee = if is_simple_discriminant(&lowered) {
            lowered
        } else {
            out.push(cs::Stmt::Local {
                ty: None,
                name: "switchExpr".to_string(),
                init: Some(lowered),
            });
            cs::Expr::name("switchExpr")
        };

        let sections = s
            .arms
            .iter()
            .map(|arm| {
                let labels = arm
                    .labels
                    .iter()
                    .map(|label| self.lower_expr_expecting(label, Some(&scrutinee_ty)))
                    .collect();
                let body = finish_section(self.lower_block(&arm.body));
                cs::SwitchSection { labels, body }
            })
            .collect();
        // An absent else branch yields no default; a present one yields
        // exactly one.
        let default = s
            .else_body
            .as_ref()
            .map(|body| finish_section(self.lower_block(body)));
        out.push(cs::Stmt::Switch {
            scrutinee,
            sections,
            default,
        });
    }

    fn lower_if_guard(
        &mut self,
        condition: &vb::Expr,
        then_stmt: &vb::Stmt,
        span: Span,
        out: &mut Vec<cs::Stmt>,
    ) {
        if let Some((name, head, args)) = match_guarded_raise(condition, then_stmt) {
            let resolution = self.model.resolve_symbol(head.span());
            if let Resolution::Resolved(symbol) = &resolution {
                if symbol.kind == SymbolKind::Event || symbol.declared_type.is_delegate() {
                    // Declared event: the null-conditional invocation
                    // subsumes the guard.
                    tracing::debug!(event = %name, "guarded raise of a declared event");
                    let args = self.lower_args(args, symbol.signature.as_ref());
                    out.push(cs::Stmt::Expr(cs::Expr::ConditionalInvoke {
                        target: Box::new(cs::Expr::name(name)),
                        args,
                    }));
                    return;
                }
            }
            // No declared event behind a keywordless raise: keep the
            // guard and hand the parenthesized form to the resolver in
            // statement position, reproducing the documented index
            // default. A `Call`-keyword raise already promised an
            // invocation and falls through to the generic lowering.
            if matches!(then_stmt, vb::Stmt::Expr { .. }) {
                let condition = self.lower_expr(condition);
                let inner = self.lower_paren_apply(head, args, span, Position::Statement);
                out.push(cs::Stmt::If {
                    condition,
                    then_stmt: Box::new(cs::Stmt::Expr(inner)),
                });
                return;
            }
        }

        let condition = self.lower_expr(condition);
        let mut lowered_then = Vec::with_capacity(1);
        self.lower_stmt(then_stmt, &mut lowered_then);
        let then_stmt = if lowered_then.len() == 1 {
            lowered_then.remove(0)
        } else {
            let reason = "multi-statement expansion inside a single-line If".to_string();
            self.diagnostics
                .push(Diagnostic::unsupported(span, reason.clone()));
            cs::Stmt::Unsupported { reason }
        };
        out.push(cs::Stmt::If {
            condition,
            then_stmt: Box::new(then_stmt),
        });
    }

    // ── Expressions ──────────────────────────────────────────────────

    /// Lower an expression in value position.
    fn lower_expr(&mut self, expr: &vb::Expr) -> cs::Expr {
        match expr {
            vb::Expr::Ident { name, span } => {
                let lowered = cs::Expr::name(name.clone());
                self.normalize_method_reference(lowered, *span)
            }
            vb::Expr::Me { .. } => cs::Expr::This,
            vb::Expr::Member { base, name, span } => {
                let base = self.lower_expr(base);
                let lowered = cs::Expr::member(base, name.clone());
                self.normalize_method_reference(lowered, *span)
            }
            vb::Expr::ParenApply { head, args, span } => {
                self.lower_paren_apply(head, args, *span, Position::Expression)
            }
            vb::Expr::New { ty, args, .. } => {
                let resolved = self.model.declared_type(ty.span);
                let rendered = fallback::render_type(ty, &resolved, &mut self.diagnostics);
                let args = self.lower_args(args, None);
                cs::Expr::New { ty: rendered, args }
            }
            vb::Expr::Literal { value, .. } => lower_literal(value),
            vb::Expr::Unary { op, operand, .. } => cs::Expr::Unary {
                op: match op {
                    vb::UnaryOp::Not => cs::UnaryOp::Not,
                    vb::UnaryOp::Neg => cs::UnaryOp::Neg,
                },
                operand: Box::new(self.lower_expr(operand)),
            },
            vb::Expr::Binary { op, lhs, rhs, .. } => self.lower_binary(*op, lhs, rhs),
        }
    }

    /// Lower a value expression and coerce it toward the type the
    /// surrounding slot expects.
    fn lower_expr_expecting(&mut self, expr: &vb::Expr, expected: Option<&Ty>) -> cs::Expr {
        if matches!(
            expr,
            vb::Expr::Literal {
                value: vb::Lit::Nothing,
                ..
            }
        ) {
            return fallback::nothing_value(expected);
        }
        let lowered = self.lower_expr(expr);
        match expected {
            Some(to) => {
                let mut from = self.model.declared_type(expr.span());
                if from.is_unknown() {
                    // A literal's type is syntactic knowledge; no model
                    // entry is needed to coerce it.
                    if let Some(literal_ty) = literal_type(expr) {
                        from = literal_ty;
                    }
                }
                intrinsics::coerce(lowered, &from, to)
            }
            None => lowered,
        }
    }

    /// Lower an expression that must stay structural: a callee head or
    /// an assignment target. No method-reference normalization happens
    /// here, so a resolved method head never double-wraps into `head()`.
    fn lower_plain_expr(&mut self, expr: &vb::Expr) -> cs::Expr {
        match expr {
            vb::Expr::Ident { name, .. } => cs::Expr::name(name.clone()),
            vb::Expr::Member { base, name, .. } => {
                let base = self.lower_expr(base);
                cs::Expr::member(base, name.clone())
            }
            other => self.lower_expr(other),
        }
    }

    /// A bare reference to a resolved method is an implicit invocation
    /// in the source language; the target spells the parentheses.
    fn normalize_method_reference(&mut self, lowered: cs::Expr, span: Span) -> cs::Expr {
        if let Resolution::Resolved(symbol) = self.model.resolve_symbol(span) {
            if symbol.kind == SymbolKind::Method {
                return cs::Expr::call(lowered, vec![]);
            }
        }
        lowered
    }

    fn lower_binary(&mut self, op: vb::BinOp, lhs: &vb::Expr, rhs: &vb::Expr) -> cs::Expr {
        let is_nothing_rhs = matches!(
            rhs,
            vb::Expr::Literal {
                value: vb::Lit::Nothing,
                ..
            }
        );
        match op {
            vb::BinOp::Is if is_nothing_rhs => cs::Expr::IsPattern {
                operand: Box::new(self.lower_expr(lhs)),
                pattern: cs::NullPattern::Null,
            },
            vb::BinOp::IsNot if is_nothing_rhs => cs::Expr::IsPattern {
                operand: Box::new(self.lower_expr(lhs)),
                pattern: cs::NullPattern::Object,
            },
            vb::BinOp::Is => cs::Expr::call(
                cs::Expr::name("ReferenceEquals"),
                vec![self.lower_expr(lhs), self.lower_expr(rhs)],
            ),
            vb::BinOp::IsNot => cs::Expr::Unary {
                op: cs::UnaryOp::Not,
                operand: Box::new(cs::Expr::call(
                    cs::Expr::name("ReferenceEquals"),
                    vec![self.lower_expr(lhs), self.lower_expr(rhs)],
                )),
            },
            _ => cs::Expr::Binary {
                op: lower_bin_op(op),
                lhs: Box::new(self.lower_expr(lhs)),
                rhs: Box::new(self.lower_expr(rhs)),
            },
        }
    }

    /// Lower the ambiguous `head(args)` form.
    ///
    /// Intrinsic recognition is purely syntactic and comes before any
    /// symbol query; after that the resolver decides call versus index.
    fn lower_paren_apply(
        &mut self,
        head: &vb::Expr,
        args: &[vb::Arg],
        span: Span,
        position: Position,
    ) -> cs::Expr {
        if let Some(name) = head.simple_name() {
            if let Some(intrinsic) = intrinsics::recognize(name) {
                let args = self.lower_args(args, None);
                return intrinsics::expand(intrinsic, name, args, span, &mut self.diagnostics);
            }
        }
        let resolution = self.model.resolve_symbol(head.span());
        // Lower the head before classifying so diagnostics from a nested
        // head come out in source order.
        let callee = self.lower_plain_expr(head);
        let rendering = resolve::classify(
            head,
            args.len(),
            &resolution,
            position,
            &mut self.diagnostics,
        );
        let signature = resolution.symbol().and_then(|s| s.signature.as_ref());
        let args = self.lower_args(args, signature);
        match rendering {
            Rendering::Call => cs::Expr::call(callee, args),
            Rendering::Index => cs::Expr::index(callee, args),
        }
    }

    /// Lower an argument list against an optional declared signature.
    ///
    /// Omitted positions become the `default` placeholder so count and
    /// position survive exactly; a signature's `ByRef`/`Out` modes spell
    /// the matching argument modifiers.
    fn lower_args(&mut self, args: &[vb::Arg], signature: Option<&MethodSig>) -> Vec<cs::Expr> {
        args.iter()
            .enumerate()
            .map(|(index, arg)| match arg {
                vb::Arg::Omitted { .. } => cs::Expr::Default,
                vb::Arg::Positional(expr) => {
                    let param = signature.and_then(|sig| sig.param(index));
                    let lowered = self.lower_expr_expecting(expr, param.map(|p| &p.ty));
                    match param.map(|p| p.mode) {
                        Some(RefKind::Out) => cs::Expr::OutArg(Box::new(lowered)),
                        Some(RefKind::Ref) => cs::Expr::RefArg(Box::new(lowered)),
                        _ => lowered,
                    }
                }
            })
            .collect()
    }
}

// ── Free helpers ─────────────────────────────────────────────────────────

fn lower_access(access: vb::Access) -> cs::Access {
    match access {
        vb::Access::Public => cs::Access::Public,
        vb::Access::Friend => cs::Access::Internal,
        vb::Access::Protected => cs::Access::Protected,
        vb::Access::Private => cs::Access::Private,
    }
}

fn lower_literal(value: &vb::Lit) -> cs::Expr {
    match value {
        vb::Lit::Int(v) => cs::Expr::Literal(cs::Lit::Int(*v)),
        vb::Lit::Float(v) => cs::Expr::Literal(cs::Lit::Float(*v)),
        vb::Lit::Str(s) => cs::Expr::Literal(cs::Lit::Str(s.clone())),
        vb::Lit::Bool(b) => cs::Expr::Literal(cs::Lit::Bool(*b)),
        // Position-free `Nothing`; slots with a known expected type go
        // through `lower_expr_expecting` instead.
        vb::Lit::Nothing => cs::Expr::Default,
    }
}

fn lower_bin_op(op: vb::BinOp) -> cs::BinOp {
    match op {
        vb::BinOp::Add => cs::BinOp::Add,
        vb::BinOp::Sub => cs::BinOp::Sub,
        vb::BinOp::Mul => cs::BinOp::Mul,
        vb::BinOp::Div => cs::BinOp::Div,
        vb::BinOp::Eq => cs::BinOp::Eq,
        vb::BinOp::Ne => cs::BinOp::Ne,
        vb::BinOp::Lt => cs::BinOp::Lt,
        vb::BinOp::Le => cs::BinOp::Le,
        vb::BinOp::Gt => cs::BinOp::Gt,
        vb::BinOp::Ge => cs::BinOp::Ge,
        vb::BinOp::AndAlso => cs::BinOp::And,
        vb::BinOp::OrElse => cs::BinOp::Or,
        // Identity comparisons are rewritten before this table applies.
        vb::BinOp::Is => cs::BinOp::Eq,
        vb::BinOp::IsNot => cs::BinOp::Ne,
    }
}

/// The statically known type of a literal, if the expression is one.
fn literal_type(expr: &vb::Expr) -> Option<Ty> {
    match expr {
        vb::Expr::Literal { value, .. } => match value {
            vb::Lit::Int(_) => Some(Ty::Integer),
            vb::Lit::Float(_) => Some(Ty::Double),
            vb::Lit::Str(_) => Some(Ty::Str),
            vb::Lit::Bool(_) => Some(Ty::Boolean),
            vb::Lit::Nothing => None,
        },
        _ => None,
    }
}

/// The literal value of a step expression, looking through a leading
/// negation. A negation that overflows reads as not-a-literal.
fn step_literal(step: &vb::Expr) -> Option<i64> {
    match step {
        vb::Expr::Literal {
            value: vb::Lit::Int(n),
            ..
        } => Some(*n),
        vb::Expr::Unary {
            op: vb::UnaryOp::Neg,
            operand,
            ..
        } => match operand.as_ref() {
            vb::Expr::Literal {
                value: vb::Lit::Int(n),
                ..
            } => n.checked_neg(),
            _ => None,
        },
        _ => None,
    }
}

/// A switch can read its discriminant directly only when re-reading it
/// is free of effects: bare names, `this`, and member chains over them.
fn is_simple_discriminant(expr: &cs::Expr) -> bool {
    match expr {
        cs::Expr::Name(_) | cs::Expr::This => true,
        cs::Expr::Member { base, .. } => is_simple_discriminant(base),
        _ => false,
    }
}

/// Close a switch section body: every section breaks unless it already
/// returns.
fn finish_section(mut body: Vec<cs::Stmt>) -> Vec<cs::Stmt> {
    if !matches!(body.last(), Some(cs::Stmt::Return(_))) {
        body.push(cs::Stmt::Break);
    }
    body
}

/// Match `If name IsNot Nothing Then name(args)`: a null guard
/// immediately raising the guarded name. Name comparison folds case the
/// way the source language does.
fn match_guarded_raise<'s>(
    condition: &'s vb::Expr,
    then_stmt: &'s vb::Stmt,
) -> Option<(&'s str, &'s vb::Expr, &'s [vb::Arg])> {
    let vb::Expr::Binary {
        op: vb::BinOp::IsNot,
        lhs,
        rhs,
        ..
    } = condition
    else {
        return None;
    };
    let guarded = lhs.simple_name()?;
    if !matches!(
        rhs.as_ref(),
        vb::Expr::Literal {
            value: vb::Lit::Nothing,
            ..
        }
    ) {
        return None;
    }
    let invocation = match then_stmt {
        vb::Stmt::Call { invocation, .. } | vb::Stmt::Expr { expr: invocation, .. } => invocation,
        _ => return None,
    };
    let vb::Expr::ParenApply { head, args, .. } = invocation else {
        return None;
    };
    let raised = head.simple_name()?;
    if raised.eq_ignore_ascii_case(guarded) {
        Some((raised, head, args))
    } else {
        None
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
